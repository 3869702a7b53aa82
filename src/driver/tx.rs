//! Frame transmission for the ENC28J60.
//!
//! A single transmit buffer sits at the top of buffer memory. Every send
//! overwrites it and starts transmission; completion and failure are
//! reported by EIR.TXIF / EIR.TXERIF and picked up by the next send or poll.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use super::enc28j60::Enc28j60;
use super::error::{BufferError, Result};
use crate::internal::constants::{MAX_FRAME_LEN, TX_BUF_START};
use crate::internal::register::common::{ECON1, ECON1_TXRST, ECON1_TXRTS, EIR, EIR_TXERIF, EIR_TXIF};
use crate::internal::register::{Bank, eth};

impl<SPI: SpiDevice, RST: OutputPin> Enc28j60<SPI, RST> {
    /// Queue a frame for transmission
    ///
    /// The frame must carry destination, source and type; the MAC pads it
    /// and appends the CRC. Returns once transmission has been requested,
    /// without waiting for it to finish.
    ///
    /// Transmission still works after [`halt`](Self::halt).
    ///
    /// # Errors
    /// - `InvalidState` - not initialized
    /// - `InvalidLength` - empty frame
    /// - `FrameTooLarge` - frame longer than 1518 bytes
    /// - `Bus` - SPI transfer failed
    pub fn send(&mut self, frame: &[u8]) -> Result<()> {
        self.ensure_initialized()?;
        if frame.is_empty() {
            return Err(BufferError::InvalidLength.into());
        }
        if frame.len() > MAX_FRAME_LEN {
            return Err(BufferError::FrameTooLarge.into());
        }

        // ETXND points at the last frame byte; the control byte takes ETXST
        let end = TX_BUF_START + frame.len() as u16;

        self.bus.select_bank(Bank::Bank0)?;
        self.bus.write_u16(eth::EWRPTL, TX_BUF_START)?;
        self.bus.write_u16(eth::ETXNDL, end)?;
        self.bus.write_u16(eth::ETXSTL, TX_BUF_START)?;
        self.bus.write_buffer(frame)?;

        // Transmit logic can stall after a late collision; reset it
        if self.bus.read(EIR)? & EIR_TXERIF != 0 {
            self.bus.set_bits(ECON1, ECON1_TXRST)?;
            self.bus.clear_bits(ECON1, ECON1_TXRST)?;
            self.stats.record_tx_recovery();
            #[cfg(feature = "defmt")]
            defmt::warn!("transmit logic reset after error");
        }
        self.bus.clear_bits(EIR, EIR_TXERIF | EIR_TXIF)?;

        self.bus.set_bits(ECON1, ECON1_TXRTS)?;
        self.stats.record_tx(frame.len());
        Ok(())
    }
}
