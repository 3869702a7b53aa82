//! SPI register and buffer access
//!
//! [`RegisterBus`] speaks the ENC28J60 SPI instruction set over any
//! `embedded_hal::spi::SpiDevice`. Every instruction is one chip-select
//! frame (one `transaction`); the device acquires the bus and asserts chip
//! select for the frame and releases both on every exit path, including
//! transfer errors. Exclusive use of the chip across several frames is
//! guaranteed by the `&mut` borrow of the bus.
//!
//! # Banks
//!
//! The bank the chip is in is tracked in [`RegisterBus::bank`], but it is
//! only a record: [`RegisterBus::select_bank`] always writes BSEL, and
//! [`RegisterBus::read`] re-reads ECON1 to decide whether the target
//! register shifts out a dummy byte first.

use embedded_hal::spi::{Operation, SpiDevice};

use crate::driver::error::{IoError, IoResult};
use crate::internal::constants::{DISCARD_CHUNK, TX_CONTROL_BYTE};
use crate::internal::register::common::{ECON1, ECON1_BSEL_MASK};
use crate::internal::register::{Bank, needs_dummy_byte, opcode};

// =============================================================================
// Write-Verify Outcome
// =============================================================================

/// Result of a verified register write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteVerify {
    /// The read-back matched after `attempts` writes
    Verified {
        /// Number of write/read-back rounds used
        attempts: u8,
    },
    /// Every attempt read back a different value
    Mismatch {
        /// Value returned by the final read-back
        last_read: u8,
    },
}

impl WriteVerify {
    /// Returns true if the register holds the written value
    #[inline]
    pub const fn is_verified(&self) -> bool {
        matches!(self, WriteVerify::Verified { .. })
    }
}

// =============================================================================
// Register Bus
// =============================================================================

/// Control register and buffer memory access over SPI
#[derive(Debug)]
pub struct RegisterBus<SPI> {
    spi: SPI,
    /// Bank observed by the last bank select or ECON1 read
    bank: Option<Bank>,
}

impl<SPI> RegisterBus<SPI> {
    /// Wrap an SPI device
    pub const fn new(spi: SPI) -> Self {
        Self { spi, bank: None }
    }

    /// Give back the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }

    /// Bank recorded by the last bank select or register read.
    ///
    /// `None` after a soft reset until the bank is selected again.
    #[inline(always)]
    pub fn bank(&self) -> Option<Bank> {
        self.bank
    }
}

impl<SPI: SpiDevice> RegisterBus<SPI> {
    #[inline]
    fn frame(&mut self, operations: &mut [Operation<'_, u8>]) -> IoResult<()> {
        self.spi.transaction(operations).map_err(|_| IoError::Bus)
    }

    /// Two-byte instruction: opcode with register address, then argument
    fn command(&mut self, op: u8, addr: u8, arg: u8) -> IoResult<()> {
        let bytes = [op | (addr & opcode::ADDR_MASK), arg];
        self.frame(&mut [Operation::Write(&bytes)])
    }

    fn read_raw(&mut self, addr: u8, dummy: bool) -> IoResult<u8> {
        let cmd = [opcode::RCR | (addr & opcode::ADDR_MASK)];
        let mut rx = [0u8; 2];
        let len = if dummy { 2 } else { 1 };
        self.frame(&mut [Operation::Write(&cmd), Operation::Read(&mut rx[..len])])?;
        Ok(rx[len - 1])
    }

    // =========================================================================
    // Control Registers
    // =========================================================================

    /// Read a control register.
    ///
    /// ECON1 is read first to learn which bank the chip is in; MAC and MII
    /// registers then need a second byte clocked out because the first one
    /// is a dummy.
    pub fn read(&mut self, addr: u8) -> IoResult<u8> {
        let econ1 = self.read_raw(ECON1, false)?;
        let bank = Bank::from_econ1(econ1);
        self.bank = Some(bank);
        if addr == ECON1 {
            return Ok(econ1);
        }
        self.read_raw(addr, needs_dummy_byte(bank, addr))
    }

    /// Write a control register
    pub fn write(&mut self, addr: u8, value: u8) -> IoResult<()> {
        self.command(opcode::WCR, addr, value)
    }

    /// Write a 16-bit register pair, low byte first
    pub fn write_u16(&mut self, addr_low: u8, value: u16) -> IoResult<()> {
        let [low, high] = value.to_le_bytes();
        self.write(addr_low, low)?;
        self.write(addr_low + 1, high)
    }

    /// Read a 16-bit register pair
    pub fn read_u16(&mut self, addr_low: u8) -> IoResult<u16> {
        let low = self.read(addr_low)?;
        let high = self.read(addr_low + 1)?;
        Ok(u16::from_le_bytes([low, high]))
    }

    /// Write a register and read it back, up to `max_attempts` times.
    ///
    /// At least one write and one read-back are always issued. A mismatch
    /// after the last attempt is reported, not raised as an error.
    pub fn write_verified(&mut self, addr: u8, value: u8, max_attempts: u8) -> IoResult<WriteVerify> {
        let mut last_read = 0;
        for attempt in 1..=max_attempts.max(1) {
            self.write(addr, value)?;
            last_read = self.read(addr)?;
            if last_read == value {
                return Ok(WriteVerify::Verified { attempts: attempt });
            }
        }
        Ok(WriteVerify::Mismatch { last_read })
    }

    /// Set bits in an ETH register (BFS)
    pub fn set_bits(&mut self, addr: u8, mask: u8) -> IoResult<()> {
        self.command(opcode::BFS, addr, mask)
    }

    /// Clear bits in an ETH register (BFC)
    pub fn clear_bits(&mut self, addr: u8, mask: u8) -> IoResult<()> {
        self.command(opcode::BFC, addr, mask)
    }

    /// Select a register bank.
    ///
    /// Both BSEL bits are always written; the recorded bank is not trusted
    /// to skip the write.
    pub fn select_bank(&mut self, bank: Bank) -> IoResult<()> {
        let bits = bank.bsel_bits();
        let clear = !bits & ECON1_BSEL_MASK;
        if clear != 0 {
            self.clear_bits(ECON1, clear)?;
        }
        if bits != 0 {
            self.set_bits(ECON1, bits)?;
        }
        self.bank = Some(bank);
        Ok(())
    }

    /// Issue the system reset command
    pub fn soft_reset(&mut self) -> IoResult<()> {
        self.bank = None;
        self.frame(&mut [Operation::Write(&[opcode::SRC])])
    }

    // =========================================================================
    // Buffer Memory
    // =========================================================================

    /// Stream `dest.len()` bytes from buffer memory at ERDPT
    pub fn read_buffer(&mut self, dest: &mut [u8]) -> IoResult<()> {
        if dest.is_empty() {
            return Ok(());
        }
        self.frame(&mut [Operation::Write(&[opcode::RBM]), Operation::Read(dest)])
    }

    /// Advance ERDPT past `len` bytes without keeping them.
    ///
    /// The bytes are clocked out in small frames; ERDPT keeps its position
    /// between frames so the result is the same as one long read.
    pub fn skip_buffer(&mut self, len: usize) -> IoResult<()> {
        let mut scratch = [0u8; DISCARD_CHUNK];
        let mut remaining = len;
        while remaining > 0 {
            let chunk = remaining.min(DISCARD_CHUNK);
            self.read_buffer(&mut scratch[..chunk])?;
            remaining -= chunk;
        }
        Ok(())
    }

    /// Stream a frame into buffer memory at EWRPT, preceded by the
    /// per-packet control byte
    pub fn write_buffer(&mut self, src: &[u8]) -> IoResult<()> {
        self.frame(&mut [
            Operation::Write(&[opcode::WBM, TX_CONTROL_BYTE]),
            Operation::Write(src),
        ])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
