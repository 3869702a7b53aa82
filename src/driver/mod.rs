//! Core driver components for the ENC28J60.
//!
//! - [`config`] - Configuration types and builder patterns
//! - [`error`] - Error types and result aliases
//! - [`enc28j60`] - The driver: bring-up, state, link and interrupts
//! - [`rx`] - Receive buffer draining and receiver recovery
//! - [`tx`] - Frame transmission
//! - [`interrupt`] - Decoded EIR flags
//! - [`stats`] - Driver counters
//! - [`watchdog`] - Receiver reset hold timer
//!
//! # Example
//!
//! ```ignore
//! use ph_enc28j60::driver::{Enc28j60, Enc28j60Config};
//!
//! let config = Enc28j60Config::new()
//!     .with_mac_address([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
//! ```

// Submodules
pub mod config;
pub mod enc28j60;
pub mod error;
pub mod interrupt;
pub mod rx;
pub mod stats;
pub mod tx;
pub mod watchdog;

// Re-exports for convenience
pub use config::{Duplex, Enc28j60Config, LedConfig, LedMode, State};
pub use enc28j60::{Enc28j60, NoResetPin};
pub use error::{
    BufferError, BufferResult, ConfigError, ConfigResult, Error, IoError, IoResult, Result,
};
pub use interrupt::InterruptStatus;
pub use rx::{RxDescriptor, rx_read_pointer};
pub use stats::DriverStats;
pub use watchdog::RxResetWatchdog;
