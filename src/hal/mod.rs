//! Hardware Abstraction Layer
//!
//! This module wraps the ENC28J60's SPI command set so the driver never
//! deals with opcodes, bank switching or MII sequencing directly.
//!
//! # Modules
//!
//! - [`bus`]: SPI command encoding, bank selection and buffer memory access
//! - [`mdio`]: PHY register access through the MII management interface
//! - [`reset`]: Hardware reset pulse, clock-ready wait and soft reset
//!
//! # Delay Integration
//!
//! All types that require delays use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL.

pub mod bus;
pub mod mdio;
pub mod reset;

// Re-export commonly used types
pub use bus::{RegisterBus, WriteVerify};
pub use mdio::{MdioBus, MdioPort, MiiRead, PollOutcome};
pub use reset::{ClockReady, ResetController, is_clock_ready};
