//! Interrupt status handling for the ENC28J60.
//!
//! This module provides the [`InterruptStatus`] structure for parsing
//! and clearing the EIR flags.

use crate::internal::register::common::{
    EIR_DMAIF, EIR_LINKIF, EIR_PKTIF, EIR_RXERIF, EIR_TXERIF, EIR_TXIF, EIR_WOLIF,
};

// =============================================================================
// Interrupt Status
// =============================================================================

/// Interrupt flags parsed from EIR.
///
/// # Example
///
/// ```ignore
/// let status = enc.interrupt_status()?;
/// if status.rx_pending {
///     enc.poll(|frame| stack.ingest(frame))?;
/// }
/// if status.has_error() {
///     // Buffer overflow or transmit abort
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptStatus {
    /// At least one received frame is waiting (PKTIF)
    pub rx_pending: bool,
    /// DMA copy or checksum finished (DMAIF)
    pub dma_done: bool,
    /// PHY link state changed (LINKIF)
    pub link_changed: bool,
    /// Transmission finished (TXIF)
    pub tx_complete: bool,
    /// Wake-on-LAN event (WOLIF)
    pub wake_on_lan: bool,
    /// Transmission aborted (TXERIF)
    pub tx_error: bool,
    /// Receive buffer full or packet counter saturated (RXERIF)
    pub rx_error: bool,
}

impl InterruptStatus {
    /// Create from a raw EIR value
    #[inline]
    pub fn from_raw(eir: u8) -> Self {
        Self {
            rx_pending: (eir & EIR_PKTIF) != 0,
            dma_done: (eir & EIR_DMAIF) != 0,
            link_changed: (eir & EIR_LINKIF) != 0,
            tx_complete: (eir & EIR_TXIF) != 0,
            wake_on_lan: (eir & EIR_WOLIF) != 0,
            tx_error: (eir & EIR_TXERIF) != 0,
            rx_error: (eir & EIR_RXERIF) != 0,
        }
    }

    /// Convert to a raw EIR mask for a bit-field clear
    #[inline]
    pub fn to_raw(&self) -> u8 {
        let mut val = 0u8;
        if self.rx_pending {
            val |= EIR_PKTIF;
        }
        if self.dma_done {
            val |= EIR_DMAIF;
        }
        if self.link_changed {
            val |= EIR_LINKIF;
        }
        if self.tx_complete {
            val |= EIR_TXIF;
        }
        if self.wake_on_lan {
            val |= EIR_WOLIF;
        }
        if self.tx_error {
            val |= EIR_TXERIF;
        }
        if self.rx_error {
            val |= EIR_RXERIF;
        }
        val
    }

    /// Check if any interrupt occurred
    #[inline]
    pub fn any(&self) -> bool {
        self.to_raw() != 0
    }

    /// Check if any error occurred
    #[inline]
    pub fn has_error(&self) -> bool {
        self.tx_error || self.rx_error
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
