//! Driver counters
//!
//! Conditions the driver recovers from without returning an error are
//! counted here so they stay visible to the application.

/// Running counters kept by the driver
///
/// All counters wrap on overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverStats {
    /// Frames handed to the chip for transmission
    pub tx_frames: u32,
    /// Bytes handed to the chip for transmission
    pub tx_bytes: u32,
    /// Transmit logic resets after a transmit error
    pub tx_error_recoveries: u32,
    /// Frames delivered to the application
    pub rx_frames: u32,
    /// Bytes delivered to the application
    pub rx_bytes: u32,
    /// Descriptors rejected as oversized, failed or out of range
    pub rx_dropped: u32,
    /// Receive buffer overflows reported by the chip
    pub rx_overflows: u32,
    /// Times the receiver was put into reset
    pub rx_resets: u32,
    /// Times the receiver was released from reset
    pub rx_restores: u32,
    /// Registers that did not read back the written value
    pub verify_failures: u32,
    /// Bring-ups that found an unexpected PHY identifier
    pub identity_mismatches: u32,
    /// MII operations that were still busy after the poll budget
    pub mdio_timeouts: u32,
}

impl DriverStats {
    /// All counters zero
    pub const fn new() -> Self {
        Self {
            tx_frames: 0,
            tx_bytes: 0,
            tx_error_recoveries: 0,
            rx_frames: 0,
            rx_bytes: 0,
            rx_dropped: 0,
            rx_overflows: 0,
            rx_resets: 0,
            rx_restores: 0,
            verify_failures: 0,
            identity_mismatches: 0,
            mdio_timeouts: 0,
        }
    }

    /// Reset all counters to zero
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Whether any bring-up or management problem was recorded
    pub const fn has_faults(&self) -> bool {
        self.verify_failures != 0 || self.identity_mismatches != 0 || self.mdio_timeouts != 0
    }

    pub(crate) fn record_tx(&mut self, len: usize) {
        self.tx_frames = self.tx_frames.wrapping_add(1);
        self.tx_bytes = self.tx_bytes.wrapping_add(len as u32);
    }

    pub(crate) fn record_tx_recovery(&mut self) {
        self.tx_error_recoveries = self.tx_error_recoveries.wrapping_add(1);
    }

    pub(crate) fn record_rx(&mut self, len: usize) {
        self.rx_frames = self.rx_frames.wrapping_add(1);
        self.rx_bytes = self.rx_bytes.wrapping_add(len as u32);
    }

    pub(crate) fn record_rx_drop(&mut self) {
        self.rx_dropped = self.rx_dropped.wrapping_add(1);
    }

    pub(crate) fn record_rx_overflow(&mut self) {
        self.rx_overflows = self.rx_overflows.wrapping_add(1);
    }

    pub(crate) fn record_rx_reset(&mut self) {
        self.rx_resets = self.rx_resets.wrapping_add(1);
    }

    pub(crate) fn record_rx_restore(&mut self) {
        self.rx_restores = self.rx_restores.wrapping_add(1);
    }

    pub(crate) fn record_verify_failure(&mut self) {
        self.verify_failures = self.verify_failures.wrapping_add(1);
    }

    pub(crate) fn record_identity_mismatch(&mut self) {
        self.identity_mismatches = self.identity_mismatches.wrapping_add(1);
    }

    pub(crate) fn record_mdio_timeout(&mut self) {
        self.mdio_timeouts = self.mdio_timeouts.wrapping_add(1);
    }
}
