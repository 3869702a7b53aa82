//! Frame reception for the ENC28J60.
//!
//! The chip writes received frames into a circular region of its buffer
//! memory, each preceded by a 6-byte descriptor:
//!
//! | Offset | Field |
//! |--------|-------|
//! | 0..2 | Next packet pointer (little endian) |
//! | 2..4 | Received byte count, CRC included |
//! | 4..6 | Receive status vector bits 16..31 |
//!
//! EPKTCNT counts frames not yet released by the host. Each frame is
//! released by moving ERDPT to its next pointer, decrementing EPKTCNT with
//! ECON2.PKTDEC, and advancing ERXRDPT so the hardware can reuse the space.
//!
//! # Receiver Recovery
//!
//! A descriptor that is oversized, flagged as failed, or points into the
//! transmit region is not trusted. The frame is discarded and the receiver
//! is held in reset (ECON1.RXRST) for a number of poll cycles counted by
//! [`RxResetWatchdog`](super::watchdog::RxResetWatchdog).

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use super::config::State;
use super::enc28j60::Enc28j60;
use super::error::Result;
use crate::internal::constants::{MAX_FRAME_LEN, RX_BUF_END, RX_BUF_START, RX_DESCRIPTOR_LEN, TX_BUF_START};
use crate::internal::register::common::{
    ECON1, ECON1_RXEN, ECON1_RXRST, ECON2, ECON2_PKTDEC, EIR, EIR_PKTIF, EIR_RXERIF, EIR_TXIF,
};
use crate::internal::register::{Bank, eth};

// =============================================================================
// Receive Descriptor
// =============================================================================

/// Receive status vector bits (descriptor bytes 4..6)
pub mod rsv {
    /// Frame had a CRC error
    pub const CRC_ERROR: u16 = 1 << 4;
    /// Type/length field did not match the byte count
    pub const LENGTH_CHECK_ERROR: u16 = 1 << 5;
    /// Type/length field was out of range
    pub const LENGTH_OUT_OF_RANGE: u16 = 1 << 6;
    /// Frame was received without errors
    pub const RECEIVED_OK: u16 = 1 << 7;
    /// Destination address was multicast
    pub const MULTICAST: u16 = 1 << 8;
    /// Destination address was broadcast
    pub const BROADCAST: u16 = 1 << 9;
    /// Frame was a MAC control frame
    pub const CONTROL_FRAME: u16 = 1 << 11;
    /// Frame was a pause control frame
    pub const PAUSE_FRAME: u16 = 1 << 12;
    /// Frame carried a VLAN tag
    pub const VLAN: u16 = 1 << 14;
}

/// Descriptor preceding each frame in the receive buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxDescriptor {
    /// Buffer address of the following descriptor
    pub next_packet: u16,
    /// Received byte count, including the CRC
    pub byte_count: u16,
    /// Receive status vector bits 16..31
    pub status: u16,
}

impl RxDescriptor {
    /// Parse the 6 raw descriptor bytes
    pub const fn from_bytes(raw: [u8; RX_DESCRIPTOR_LEN]) -> Self {
        Self {
            next_packet: u16::from_le_bytes([raw[0], raw[1]]),
            byte_count: u16::from_le_bytes([raw[2], raw[3]]),
            status: u16::from_le_bytes([raw[4], raw[5]]),
        }
    }

    /// Check the "received OK" status bit
    #[inline(always)]
    pub const fn received_ok(&self) -> bool {
        self.status & rsv::RECEIVED_OK != 0
    }

    /// Check if the frame had a CRC error
    #[inline(always)]
    pub const fn crc_error(&self) -> bool {
        self.status & rsv::CRC_ERROR != 0
    }

    /// Check if the destination was a multicast address
    #[inline(always)]
    pub const fn is_multicast(&self) -> bool {
        self.status & rsv::MULTICAST != 0
    }

    /// Check if the destination was the broadcast address
    #[inline(always)]
    pub const fn is_broadcast(&self) -> bool {
        self.status & rsv::BROADCAST != 0
    }

    /// Number of bytes to hand to the application.
    ///
    /// Zero when the descriptor cannot be trusted: byte count above the
    /// maximum frame length, "received OK" clear, or a next pointer at or
    /// past the start of the transmit region.
    pub const fn copy_len(&self) -> usize {
        if self.byte_count as usize > MAX_FRAME_LEN
            || !self.received_ok()
            || self.next_packet >= TX_BUF_START
        {
            0
        } else {
            self.byte_count as usize
        }
    }
}

/// ERXRDPT value for a next packet pointer.
///
/// The chip misbehaves with an even ERXRDPT, and next pointers are always
/// even, so the register is set one byte behind. A result outside the
/// receive region wraps to its end.
#[inline]
pub fn rx_read_pointer(next_packet: u16) -> u16 {
    let rdpt = next_packet.wrapping_sub(1);
    if (RX_BUF_START..=RX_BUF_END).contains(&rdpt) {
        rdpt
    } else {
        RX_BUF_END
    }
}

// =============================================================================
// Receive Path
// =============================================================================

impl<SPI: SpiDevice, RST: OutputPin> Enc28j60<SPI, RST> {
    /// Service the chip and deliver every pending frame to `on_frame`
    ///
    /// One call is one poll cycle:
    /// 1. Count down the receiver reset hold, re-enabling reception when
    ///    it expires
    /// 2. Clear a pending transmit-complete flag
    /// 3. Drain all frames counted in EPKTCNT
    /// 4. Count and clear a receive buffer overflow
    ///
    /// The slice passed to `on_frame` is the driver's frame buffer and is
    /// only valid for the duration of the call. Its length is the byte
    /// count reported by the chip, CRC included.
    ///
    /// # Returns
    /// Number of frames delivered. Discarded frames are not counted.
    ///
    /// # Errors
    /// - `InvalidState` - not initialized
    /// - `Bus` - SPI transfer failed
    pub fn poll<F: FnMut(&[u8])>(&mut self, mut on_frame: F) -> Result<usize> {
        self.ensure_initialized()?;
        self.service_watchdog()?;
        self.with_interrupts_masked(|enc| enc.receive_pass(&mut on_frame))
    }

    /// Deliver at most one pending frame to `f`
    ///
    /// Used where frames are pulled one at a time (e.g. a network stack
    /// token). Discarded frames are skipped until a good one is found or
    /// none remain.
    ///
    /// # Returns
    /// `Ok(Some(r))` with the value returned by `f`, or `Ok(None)` if no
    /// frame was pending.
    pub fn receive_with<R>(&mut self, f: impl FnOnce(&[u8]) -> R) -> Result<Option<R>> {
        self.ensure_initialized()?;
        self.service_watchdog()?;
        self.with_interrupts_masked(|enc| {
            let eir = enc.take_event_flags()?;
            let received = enc.receive_one(f)?;
            enc.clear_overflow(eir)?;
            Ok(received)
        })
    }

    /// Number of frames waiting in the receive buffer (EPKTCNT)
    pub fn pending_frames(&mut self) -> Result<u8> {
        self.bus.select_bank(Bank::Bank1)?;
        Ok(self.bus.read(eth::EPKTCNT)?)
    }

    /// Hold the receiver in reset and start the hold timer.
    ///
    /// Does nothing if ECON1.RXRST is already set, so a reset in progress
    /// is not extended.
    pub fn reset_receiver(&mut self) -> Result<()> {
        self.ensure_initialized()?;
        if self.bus.read(ECON1)? & ECON1_RXRST != 0 {
            return Ok(());
        }
        self.bus.set_bits(ECON1, ECON1_RXRST)?;
        self.watchdog.arm();
        self.stats.record_rx_reset();

        #[cfg(feature = "defmt")]
        defmt::warn!("receiver reset for {=u16} poll cycles", self.watchdog.remaining());
        Ok(())
    }

    fn receive_one<R>(&mut self, f: impl FnOnce(&[u8]) -> R) -> Result<Option<R>> {
        loop {
            if self.pending_frames()? == 0 {
                self.bus.clear_bits(EIR, EIR_PKTIF)?;
                return Ok(None);
            }
            self.bus.select_bank(Bank::Bank0)?;
            self.bus.write_u16(eth::ERDPTL, self.next_packet)?;
            let (len, _) = self.dequeue_frame()?;
            if let Some(len) = len {
                self.stats.record_rx(len);
                return Ok(Some(f(&self.frame[..len])));
            }
        }
    }

    /// Count one poll cycle of the hold timer; release the receiver when it
    /// runs out.
    ///
    /// RXEN is always set again, even if reception was halted meanwhile.
    fn service_watchdog(&mut self) -> Result<()> {
        if !self.watchdog.tick() {
            return Ok(());
        }
        self.bus.clear_bits(ECON1, ECON1_RXRST)?;
        self.bus.set_bits(ECON1, ECON1_RXEN)?;
        self.state = State::Running;
        self.stats.record_rx_restore();

        #[cfg(feature = "defmt")]
        defmt::info!("receiver restored");
        Ok(())
    }

    fn receive_pass<F: FnMut(&[u8])>(&mut self, on_frame: &mut F) -> Result<usize> {
        let eir = self.take_event_flags()?;

        let mut delivered = 0;
        let mut pending = self.pending_frames()?;
        if pending > 0 {
            self.bus.select_bank(Bank::Bank0)?;
            self.bus.write_u16(eth::ERDPTL, self.next_packet)?;

            while pending > 0 {
                let (len, remaining) = self.dequeue_frame()?;
                pending = remaining;
                if let Some(len) = len {
                    self.stats.record_rx(len);
                    on_frame(&self.frame[..len]);
                    delivered += 1;
                }
            }
            self.bus.clear_bits(EIR, EIR_PKTIF)?;
        }

        self.clear_overflow(eir)?;
        Ok(delivered)
    }

    /// Read EIR and clear a pending transmit-complete flag
    fn take_event_flags(&mut self) -> Result<u8> {
        let eir = self.bus.read(EIR)?;
        if eir & EIR_TXIF != 0 {
            self.bus.clear_bits(EIR, EIR_TXIF)?;
        }
        Ok(eir)
    }

    /// Count and clear a receive buffer overflow seen in `eir`
    fn clear_overflow(&mut self, eir: u8) -> Result<()> {
        if eir & EIR_RXERIF != 0 {
            self.stats.record_rx_overflow();
            self.bus.clear_bits(EIR, EIR_RXERIF)?;
            #[cfg(feature = "defmt")]
            defmt::warn!("receive buffer overflow");
        }
        Ok(())
    }

    /// Read one frame at ERDPT and release its buffer space.
    ///
    /// Expects bank 0 selected and ERDPT at a descriptor. Leaves bank 0
    /// selected and ERDPT at the next descriptor.
    ///
    /// Returns the frame length if the frame is in `self.frame`, and
    /// EPKTCNT read after the release.
    fn dequeue_frame(&mut self) -> Result<(Option<usize>, u8)> {
        let mut raw = [0u8; RX_DESCRIPTOR_LEN];
        self.bus.read_buffer(&mut raw)?;
        let descriptor = RxDescriptor::from_bytes(raw);

        let copy_len = descriptor.copy_len();
        if copy_len > 0 {
            self.bus.read_buffer(&mut self.frame[..copy_len])?;
        } else {
            self.bus.skip_buffer(descriptor.byte_count as usize)?;
        }

        self.bus.write_u16(eth::ERDPTL, descriptor.next_packet)?;
        self.next_packet = descriptor.next_packet;
        self.bus.set_bits(ECON2, ECON2_PKTDEC)?;
        self.bus
            .write_u16(eth::ERXRDPTL, rx_read_pointer(descriptor.next_packet))?;

        let remaining = self.pending_frames()?;
        self.bus.select_bank(Bank::Bank0)?;

        if copy_len == 0 {
            self.stats.record_rx_drop();
            #[cfg(feature = "defmt")]
            defmt::warn!("dropped frame {}", descriptor);
            self.reset_receiver()?;
            return Ok((None, remaining));
        }
        Ok((Some(copy_len), remaining))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
