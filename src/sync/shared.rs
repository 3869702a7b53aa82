//! ISR-safe driver wrapper using critical sections.

use super::primitives::CriticalSectionCell;
use crate::driver::enc28j60::{Enc28j60, NoResetPin};

/// ISR-safe ENC28J60 wrapper using critical sections.
///
/// The SPI device and pins are only known at runtime, so the wrapper starts
/// empty and the driver is installed after construction. All access goes
/// through `critical_section::with()`, disabling interrupts for the
/// duration of the closure.
///
/// # Example
///
/// ```ignore
/// static ETH: SharedEnc28j60<MySpi, MyPin> = SharedEnc28j60::new();
///
/// ETH.install(Enc28j60::new(spi, reset));
/// ETH.with(|enc| enc.init(config, &mut delay));
///
/// #[interrupt]
/// fn GPIO_INT() {
///     ETH.with(|enc| enc.poll(|frame| { /* queue frame */ }));
/// }
/// ```
pub struct SharedEnc28j60<SPI, RST = NoResetPin> {
    inner: CriticalSectionCell<Option<Enc28j60<SPI, RST>>>,
}

impl<SPI, RST> SharedEnc28j60<SPI, RST> {
    /// Create an empty wrapper (const, suitable for static initialization).
    pub const fn new() -> Self {
        Self {
            inner: CriticalSectionCell::new(None),
        }
    }

    /// Install a driver, returning the one it replaces.
    pub fn install(&self, driver: Enc28j60<SPI, RST>) -> Option<Enc28j60<SPI, RST>> {
        self.inner.replace(Some(driver))
    }

    /// Remove and return the driver.
    pub fn take(&self) -> Option<Enc28j60<SPI, RST>> {
        self.inner.replace(None)
    }

    /// Check if a driver is installed.
    pub fn is_installed(&self) -> bool {
        self.inner.with(|slot| slot.is_some())
    }

    /// Execute a closure with exclusive access to the driver.
    ///
    /// Returns `None` if no driver is installed.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Enc28j60<SPI, RST>) -> R,
    {
        self.inner.with(|slot| slot.as_mut().map(f))
    }

    /// Try to execute a closure, returning `None` if the driver is already
    /// borrowed or not installed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Enc28j60<SPI, RST>) -> R,
    {
        self.inner.try_with(|slot| slot.as_mut().map(f)).flatten()
    }
}

impl<SPI, RST> Default for SharedEnc28j60<SPI, RST> {
    fn default() -> Self {
        Self::new()
    }
}
