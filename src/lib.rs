//! ENC28J60 Ethernet Driver
//!
//! A `no_std`, `no_alloc` driver for the Microchip ENC28J60 stand-alone
//! 10BASE-T Ethernet controller, attached over SPI.
//!
//! The driver talks to the chip through the `embedded-hal` 1.0 traits
//! (`SpiDevice`, `OutputPin`, `DelayNs`), so it runs on any HAL that
//! implements them.
//!
//! # Architecture
//!
//! The driver is organized into three layers:
//!
//! 1. **Driver Layer** ([`driver`]): [`Enc28j60`] bring-up, receive draining,
//!    transmission and receiver recovery
//! 2. **PHY Layer** ([`phy`]): the on-chip 10BASE-T PHY, reached through MII
//! 3. **HAL Layer** ([`hal`]): SPI command encoding, bank selection, MII
//!    sequencing and reset timing
//!
//! ## Buffer Layout
//!
//! The chip's 8 KB of buffer memory is split into a receive ring at
//! `0x0000..=0x17FF` and a single transmit buffer at `0x1800..=0x1FFF`.
//!
//! # Features
//!
//! - `defmt`: Enable defmt formatting and driver log output
//! - `smoltcp`: Enable smoltcp network stack integration
//! - `critical-section`: Enable ISR-safe [`SharedEnc28j60`] wrapper
//!
//! # Example
//!
//! ```ignore
//! use ph_enc28j60::{Enc28j60, Enc28j60Config, Duplex};
//!
//! let mut enc = Enc28j60::new(spi, reset_pin);
//!
//! let config = Enc28j60Config::new()
//!     .with_mac_address([0x02, 0x00, 0x00, 0x12, 0x34, 0x56])
//!     .with_duplex(Duplex::Full);
//!
//! enc.init(config, &mut delay).unwrap();
//!
//! loop {
//!     enc.poll(|frame| {
//!         // frame includes the trailing CRC
//!     })
//!     .unwrap();
//!
//!     if enc.is_link_up().unwrap() {
//!         enc.send(&outgoing).unwrap();
//!     }
//! }
//! ```
//!
//! # Memory Requirements
//!
//! The driver keeps one 1518-byte frame buffer inline; everything else lives
//! in the chip's own buffer memory.

#![no_std]
#![deny(missing_docs)]
#![forbid(unsafe_code)]
// Clippy lint levels live here and mirror the [lints] table in Cargo.toml.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements,
    clippy::let_underscore_future
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;
pub mod phy;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "smoltcp")]
#[cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
pub mod integration;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub(crate) mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{Duplex, Enc28j60Config, LedConfig, LedMode, State};
pub use driver::enc28j60::{Enc28j60, NoResetPin};
pub use driver::error::{
    BufferError, BufferResult, ConfigError, ConfigResult, Error, IoError, IoResult, Result,
};
pub use driver::interrupt::InterruptStatus;
pub use driver::stats::DriverStats;

// Re-export PHY types
pub use phy::{Enc28j60Phy, PhyIdentity};

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::SharedEnc28j60;

/// Register map for advanced use.
///
/// These are separated from the primary facade. Most users should prefer
/// the driver APIs; writing registers through
/// [`RegisterBus`](crate::hal::RegisterBus) bypasses driver invariants such
/// as the receive read pointer and the selected bank.
pub mod registers {
    pub use crate::internal::register::{Bank, common, eth, mac, needs_dummy_byte, opcode};
}

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types and integration points.
pub mod constants {
    pub use crate::internal::constants::{
        // Memory map
        BUFFER_MEMORY_SIZE,
        // Frame sizes
        CRC_SIZE,
        // MAC address
        DEFAULT_MAC_ADDR,
        ETH_HEADER_SIZE,
        MAC_ADDR_LEN,
        MAX_FRAME_LEN,
        // Timing
        MII_BUSY_POLLS,
        MIN_FRAME_SIZE,
        MTU,
        RESET_PULSE_MS,
        RX_BUF_END,
        RX_BUF_START,
        RX_DESCRIPTOR_LEN,
        RX_RESET_CYCLES,
        TX_BUF_END,
        TX_BUF_START,
    };
}
