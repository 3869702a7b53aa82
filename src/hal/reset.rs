//! Reset Controller HAL
//!
//! Bring-up of the chip happens in three steps:
//!
//! 1. Pulse the external reset line low
//! 2. Wait for the oscillator start-up timer (ESTAT.CLKRDY)
//! 3. Issue the SPI system reset command and let it settle
//!
//! All waits go through `embedded_hal::delay::DelayNs`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::driver::error::{ConfigError, ConfigResult, IoResult};
use crate::hal::bus::RegisterBus;
use crate::internal::constants::{
    CLOCK_READY_ATTEMPTS, CLOCK_READY_POLL_MS, RESET_PULSE_MS, SOFT_RESET_SETTLE_MS,
};
use crate::internal::register::common::{ESTAT, ESTAT_CLKRDY, ESTAT_UNIMPLEMENTED};

// =============================================================================
// Clock Ready
// =============================================================================

/// Result of waiting for the oscillator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockReady {
    /// CLKRDY was seen on poll number `polls`
    Ready {
        /// Polls used, starting at 1
        polls: u32,
    },
    /// CLKRDY never appeared
    TimedOut,
}

/// Whether an ESTAT value reports a running oscillator.
///
/// Bit 3 is unimplemented and reads as zero on a live chip; a set bit
/// means MISO is floating high, so 0xFF does not count as ready.
#[inline]
pub const fn is_clock_ready(estat: u8) -> bool {
    estat & ESTAT_CLKRDY != 0 && estat & ESTAT_UNIMPLEMENTED == 0
}

// =============================================================================
// Reset Controller
// =============================================================================

/// Reset controller for the ENC28J60
#[derive(Debug)]
pub struct ResetController<D: DelayNs> {
    /// Delay provider
    delay: D,
    /// Reset pulse width in milliseconds
    pulse_ms: u32,
    /// Number of 1 ms clock-ready polls
    clock_ready_attempts: u32,
}

impl<D: DelayNs> ResetController<D> {
    /// Create a reset controller with the default timing
    pub fn new(delay: D) -> Self {
        Self {
            delay,
            pulse_ms: RESET_PULSE_MS,
            clock_ready_attempts: CLOCK_READY_ATTEMPTS,
        }
    }

    /// Create a reset controller with custom timing
    pub fn with_timing(delay: D, pulse_ms: u32, clock_ready_attempts: u32) -> Self {
        Self {
            delay,
            pulse_ms,
            clock_ready_attempts,
        }
    }

    /// Drive the reset line low for the pulse width, then release it
    pub fn hardware_reset<P: OutputPin>(&mut self, pin: &mut P) -> ConfigResult<()> {
        pin.set_low().map_err(|_| ConfigError::GpioError)?;
        self.delay.delay_ms(self.pulse_ms);
        pin.set_high().map_err(|_| ConfigError::GpioError)
    }

    /// Poll ESTAT every millisecond until the oscillator is ready.
    ///
    /// Only reads are issued, so a timeout leaves the chip untouched.
    pub fn wait_clock_ready<SPI: SpiDevice>(&mut self, bus: &mut RegisterBus<SPI>) -> IoResult<ClockReady> {
        for poll in 1..=self.clock_ready_attempts {
            self.delay.delay_ms(CLOCK_READY_POLL_MS);
            if is_clock_ready(bus.read(ESTAT)?) {
                return Ok(ClockReady::Ready { polls: poll });
            }
        }
        Ok(ClockReady::TimedOut)
    }

    /// Issue the system reset command and wait for it to settle
    pub fn soft_reset<SPI: SpiDevice>(&mut self, bus: &mut RegisterBus<SPI>) -> IoResult<()> {
        bus.soft_reset()?;
        self.delay.delay_ms(SOFT_RESET_SETTLE_MS);
        Ok(())
    }

    /// Get the configured pulse width
    pub fn pulse_ms(&self) -> u32 {
        self.pulse_ms
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
