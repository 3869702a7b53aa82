//! Receiver reset hold timer
//!
//! When a receive descriptor cannot be trusted the receiver is held in
//! reset (ECON1.RXRST) for a number of poll cycles before it is enabled
//! again. The timer counts poll cycles, not time.

/// Countdown of poll cycles while the receiver is held in reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxResetWatchdog {
    remaining: u16,
    reload: u16,
}

impl RxResetWatchdog {
    /// Create a disarmed watchdog holding for `reload` cycles once armed
    pub const fn new(reload: u16) -> Self {
        Self { remaining: 0, reload }
    }

    /// Change the hold time used by the next [`arm`](Self::arm)
    pub fn set_reload(&mut self, reload: u16) {
        self.reload = reload;
    }

    /// Start counting down from the reload value
    pub fn arm(&mut self) {
        self.remaining = self.reload;
    }

    /// Stop counting without expiring
    pub fn disarm(&mut self) {
        self.remaining = 0;
    }

    /// Whether a countdown is in progress
    #[inline]
    pub const fn is_armed(&self) -> bool {
        self.remaining > 0
    }

    /// Cycles left before expiry
    #[inline]
    pub const fn remaining(&self) -> u16 {
        self.remaining
    }

    /// Count one poll cycle. Returns true on the cycle the countdown
    /// reaches zero, false otherwise (including when disarmed).
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}
