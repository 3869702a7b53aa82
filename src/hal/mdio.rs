//! MII management (PHY register) access
//!
//! The ENC28J60's PHY is not on an external MDIO bus; its 16-bit registers
//! are reached indirectly through the MII registers in banks 2 and 3:
//!
//! - read: MIREGADR, then MICMD.MIIRD, wait for MISTAT.BUSY to clear, clear
//!   MICMD, then collect MIRDL/MIRDH
//! - write: MIREGADR, MIWRL, then MIWRH (which starts the operation), wait
//!   for MISTAT.BUSY to clear
//!
//! The busy wait is bounded by a poll count. Running out of polls is
//! reported as [`PollOutcome::TimedOut`] rather than as an error, so the
//! caller decides whether a late PHY is fatal. [`MdioPort`] carries on and
//! counts the timeout.

use embedded_hal::spi::SpiDevice;

use crate::driver::error::{IoResult, Result};
use crate::driver::stats::DriverStats;
use crate::hal::bus::RegisterBus;
use crate::internal::register::{Bank, mac};

// =============================================================================
// Poll Outcome
// =============================================================================

/// Result of a bounded busy-wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// The condition was met within the poll budget
    Ready,
    /// The poll budget ran out
    TimedOut,
}

impl PollOutcome {
    /// Returns true if the wait ran out of polls
    #[inline]
    pub const fn timed_out(&self) -> bool {
        matches!(self, PollOutcome::TimedOut)
    }
}

/// Value read from a PHY register together with how the busy-wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MiiRead {
    /// Register value (MIRDH:MIRDL)
    pub value: u16,
    /// Busy-wait result
    pub outcome: PollOutcome,
}

// =============================================================================
// MDIO Bus Trait
// =============================================================================

/// Trait for PHY register access
///
/// Implemented by [`MdioPort`] for the real chip; PHY logic is written
/// against this trait so it can be exercised without SPI.
pub trait MdioBus {
    /// Read a PHY register
    fn read(&mut self, reg_addr: u8) -> Result<u16>;

    /// Write a PHY register
    fn write(&mut self, reg_addr: u8, value: u16) -> Result<()>;

    /// Check if an MII operation is in progress
    fn is_busy(&mut self) -> Result<bool>;
}

// =============================================================================
// MII Sequences
// =============================================================================

impl<SPI: SpiDevice> RegisterBus<SPI> {
    /// Check MISTAT.BUSY. Leaves bank 3 selected.
    pub fn mii_busy(&mut self) -> IoResult<bool> {
        self.select_bank(Bank::Bank3)?;
        Ok(self.read(mac::MISTAT)? & mac::MISTAT_BUSY != 0)
    }

    /// Poll MISTAT.BUSY until clear, at most `max_polls` times.
    ///
    /// At least one poll is made.
    pub fn wait_mii_idle(&mut self, max_polls: u32) -> IoResult<PollOutcome> {
        self.select_bank(Bank::Bank3)?;
        for _ in 0..max_polls.max(1) {
            if self.read(mac::MISTAT)? & mac::MISTAT_BUSY == 0 {
                return Ok(PollOutcome::Ready);
            }
            core::hint::spin_loop();
        }
        Ok(PollOutcome::TimedOut)
    }

    /// Read a PHY register. Leaves bank 2 selected.
    pub fn phy_read(&mut self, reg_addr: u8, max_polls: u32) -> IoResult<MiiRead> {
        self.select_bank(Bank::Bank2)?;
        self.write(mac::MIREGADR, reg_addr)?;
        self.write(mac::MICMD, mac::MICMD_MIIRD)?;

        let outcome = self.wait_mii_idle(max_polls)?;

        self.select_bank(Bank::Bank2)?;
        self.write(mac::MICMD, 0)?;
        let high = self.read(mac::MIRDH)?;
        let low = self.read(mac::MIRDL)?;

        Ok(MiiRead {
            value: u16::from_be_bytes([high, low]),
            outcome,
        })
    }

    /// Write a PHY register. Leaves bank 3 selected.
    pub fn phy_write(&mut self, reg_addr: u8, value: u16, max_polls: u32) -> IoResult<PollOutcome> {
        let [high, low] = value.to_be_bytes();
        self.select_bank(Bank::Bank2)?;
        self.write(mac::MIREGADR, reg_addr)?;
        self.write(mac::MIWRL, low)?;
        // MIWRH starts the transaction
        self.write(mac::MIWRH, high)?;
        self.wait_mii_idle(max_polls)
    }
}

// =============================================================================
// MDIO Port
// =============================================================================

/// Best-effort [`MdioBus`] over the register bus.
///
/// A busy-wait that runs out of polls is counted in
/// [`DriverStats::mdio_timeouts`] and logged; the operation then completes
/// as if the PHY had finished. SPI failures are still returned.
pub struct MdioPort<'a, SPI> {
    bus: &'a mut RegisterBus<SPI>,
    max_polls: u32,
    stats: &'a mut DriverStats,
}

impl<'a, SPI: SpiDevice> MdioPort<'a, SPI> {
    /// Create a port with a poll budget per operation
    pub fn new(bus: &'a mut RegisterBus<SPI>, max_polls: u32, stats: &'a mut DriverStats) -> Self {
        Self {
            bus,
            max_polls,
            stats,
        }
    }

    #[cfg_attr(not(feature = "defmt"), allow(unused_variables))]
    fn note(&mut self, outcome: PollOutcome, reg_addr: u8) {
        if outcome.timed_out() {
            self.stats.record_mdio_timeout();
            #[cfg(feature = "defmt")]
            defmt::warn!("MII busy after {} polls (PHY reg {=u8:#x})", self.max_polls, reg_addr);
        }
    }
}

impl<SPI: SpiDevice> MdioBus for MdioPort<'_, SPI> {
    fn read(&mut self, reg_addr: u8) -> Result<u16> {
        let read = self.bus.phy_read(reg_addr, self.max_polls)?;
        self.note(read.outcome, reg_addr);
        Ok(read.value)
    }

    fn write(&mut self, reg_addr: u8, value: u16) -> Result<()> {
        let outcome = self.bus.phy_write(reg_addr, value, self.max_polls)?;
        self.note(outcome, reg_addr);
        Ok(())
    }

    fn is_busy(&mut self) -> Result<bool> {
        Ok(self.bus.mii_busy()?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
