//! Synchronization Support
//!
//! This module provides interrupt-safe access to the driver:
//!
//! - **Primitives** (`primitives`): [`CriticalSectionCell`], ISR-safe
//!   interior mutability
//! - **Shared Wrapper** (`shared`): [`SharedEnc28j60`], a critical-section
//!   protected slot for a driver instance
//!
//! The ENC28J60 signals received frames on its INT pin. An interrupt
//! handler typically calls [`Enc28j60::poll`](crate::Enc28j60::poll)
//! through the wrapper; with interrupts enabled in the configuration, the
//! driver masks INT while it drains the buffer.
//!
//! # Feature Flags
//!
//! - `critical-section`: Enables this module. The critical-section
//!   implementation is provided by the HAL crate.
//!
//! # Example
//!
//! ```ignore
//! use ph_enc28j60::sync::SharedEnc28j60;
//!
//! static ETH: SharedEnc28j60<Spi, Pin> = SharedEnc28j60::new();
//!
//! fn main() {
//!     ETH.install(Enc28j60::new(spi, reset));
//!     ETH.with(|enc| enc.init(Enc28j60Config::new().with_interrupts(true), &mut delay));
//! }
//!
//! #[interrupt]
//! fn EXTI0() {
//!     ETH.with(|enc| {
//!         let status = enc.interrupt_status();
//!         enc.poll(|frame| { /* ... */ })
//!     });
//! }
//! ```

mod primitives;

pub use primitives::CriticalSectionCell;

mod shared;

pub use shared::SharedEnc28j60;
