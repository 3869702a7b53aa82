//! Core ENC28J60 driver implementation.
//!
//! This module contains the main [`Enc28j60`] structure and core operations:
//!
//! - Bring-up and configuration
//! - Start/stop of reception
//! - Link state through the integrated PHY
//! - Interrupt flag handling
//!
//! Frame reception lives in [`rx`](super::rx), transmission in
//! [`tx`](super::tx).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal::spi::SpiDevice;

use super::config::{Duplex, Enc28j60Config, State};
use super::error::{ConfigError, IoError, Result};
use super::interrupt::InterruptStatus;
use super::stats::DriverStats;
use super::watchdog::RxResetWatchdog;
use crate::hal::bus::RegisterBus;
use crate::hal::mdio::MdioPort;
use crate::hal::reset::{ClockReady, ResetController};
use crate::internal::constants::{
    ADDRESS_VERIFY_ATTEMPTS, COLLISION_WINDOW, GEOMETRY_VERIFY_ATTEMPTS, MABBIPG_FULL_DUPLEX,
    MABBIPG_HALF_DUPLEX, MAIPGH_DEFAULT, MAIPGL_DEFAULT, MAX_FRAME_LEN, RX_BUF_END, RX_BUF_START,
    RX_RESET_CYCLES,
};
use crate::internal::register::common::{
    ECON1, ECON1_RXEN, EIE, EIE_INTIE, EIE_PKTIE, EIE_RXERIE, EIE_TXERIE, EIE_TXIE, EIR,
};
use crate::internal::register::{Bank, eth, mac};
use crate::phy::{Enc28j60Phy, PhyIdentity};

// =============================================================================
// Reset Pin Placeholder
// =============================================================================

/// Reset pin for boards that leave RESET tied high.
///
/// Driving it does nothing; bring-up then relies on the soft reset alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResetPin;

impl ErrorType for NoResetPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for NoResetPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}

// =============================================================================
// ENC28J60 Driver
// =============================================================================

/// ENC28J60 driver
///
/// Owns the SPI device and the reset pin. All chip access goes through
/// `&mut self`, so one driver instance is the single owner of the chip; use
/// [`SharedEnc28j60`](crate::sync::SharedEnc28j60) to reach it from an
/// interrupt handler.
///
/// # Example
/// ```ignore
/// let mut enc = Enc28j60::new(spi, reset_pin);
/// enc.init(Enc28j60Config::new().with_mac_address(mac), &mut delay)?;
///
/// enc.send(&frame)?;
/// enc.poll(|frame| {
///     // handle frame
/// })?;
/// ```
///
/// # Module Organization
///
/// - Core operations (this module): init, start/stop, link, interrupts
/// - [`rx`](super::rx): receive ring draining and receiver recovery
/// - [`tx`](super::tx): frame transmission
pub struct Enc28j60<SPI, RST = NoResetPin> {
    /// SPI register access
    pub(super) bus: RegisterBus<SPI>,
    /// External reset line
    reset_pin: RST,
    /// Current configuration
    pub(super) config: Enc28j60Config,
    /// Current state
    pub(super) state: State,
    /// Buffer address of the next receive descriptor
    pub(super) next_packet: u16,
    /// Receive frame buffer
    pub(super) frame: [u8; MAX_FRAME_LEN],
    /// Receiver reset hold timer
    pub(super) watchdog: RxResetWatchdog,
    /// Counters
    pub(super) stats: DriverStats,
    /// PHY identifier read during bring-up
    identity: Option<PhyIdentity>,
    /// Silicon revision read during bring-up
    revision: u8,
}

impl<SPI> Enc28j60<SPI, NoResetPin> {
    /// Create a driver for a chip without a reset line
    pub const fn without_reset(spi: SPI) -> Self {
        Self::new(spi, NoResetPin)
    }
}

impl<SPI, RST> Enc28j60<SPI, RST> {
    /// Create a new driver
    ///
    /// The chip is not touched until [`init`](Self::init).
    pub const fn new(spi: SPI, reset_pin: RST) -> Self {
        Self {
            bus: RegisterBus::new(spi),
            reset_pin,
            config: Enc28j60Config::new(),
            state: State::Uninitialized,
            next_packet: RX_BUF_START,
            frame: [0u8; MAX_FRAME_LEN],
            watchdog: RxResetWatchdog::new(RX_RESET_CYCLES),
            stats: DriverStats::new(),
            identity: None,
            revision: 0,
        }
    }

    /// Give back the SPI device and reset pin
    pub fn release(self) -> (SPI, RST) {
        (self.bus.release(), self.reset_pin)
    }

    // =========================================================================
    // State Accessors
    // =========================================================================

    /// Get the current state
    #[inline(always)]
    pub fn state(&self) -> State {
        self.state
    }

    /// Get the configuration used by the last bring-up
    #[inline(always)]
    pub fn config(&self) -> &Enc28j60Config {
        &self.config
    }

    /// Get the MAC address
    #[inline(always)]
    pub fn mac_address(&self) -> &[u8; 6] {
        &self.config.mac_address
    }

    /// Get the counters
    #[inline(always)]
    pub fn stats(&self) -> &DriverStats {
        &self.stats
    }

    /// Reset all counters to zero
    pub fn clear_stats(&mut self) {
        self.stats.clear();
    }

    /// PHY identifier read during the last bring-up
    pub fn phy_identity(&self) -> Option<PhyIdentity> {
        self.identity
    }

    /// Silicon revision (EREVID) read during the last bring-up
    pub fn silicon_revision(&self) -> u8 {
        self.revision
    }

    /// Buffer address of the next receive descriptor
    pub fn next_packet_pointer(&self) -> u16 {
        self.next_packet
    }

    /// Whether the receiver is being held in reset
    pub fn is_receiver_resetting(&self) -> bool {
        self.watchdog.is_armed()
    }

    pub(super) fn ensure_initialized(&self) -> Result<()> {
        if self.state == State::Uninitialized {
            return Err(IoError::InvalidState.into());
        }
        Ok(())
    }
}

impl<SPI: SpiDevice, RST: OutputPin> Enc28j60<SPI, RST> {
    // =========================================================================
    // Initialization
    // =========================================================================

    /// Bring up the chip with the given configuration
    ///
    /// This performs the full sequence:
    /// 1. Pulse the reset line and wait for the oscillator
    /// 2. Soft reset
    /// 3. Program the receive buffer bounds and pointers
    /// 4. Check the PHY identifier
    /// 5. Program the MAC and the station address
    /// 6. Configure the PHY, interrupts, and enable reception
    ///
    /// Registers that do not read back correctly, a foreign PHY identifier
    /// and late MII operations are counted in [`stats`](Self::stats) and
    /// do not fail bring-up.
    ///
    /// May be called again to re-initialize; counters are kept.
    ///
    /// # Errors
    /// - `InvalidConfig` - configuration rejected by
    ///   [`Enc28j60Config::is_valid`]
    /// - `GpioError` - reset pin could not be driven
    /// - `ClockNotReady` - oscillator never started; no register has been
    ///   written
    /// - `Bus` - SPI transfer failed
    pub fn init<D: DelayNs>(&mut self, config: Enc28j60Config, mut delay: D) -> Result<()> {
        if !config.is_valid() {
            return Err(ConfigError::InvalidConfig.into());
        }

        self.config = config;
        self.state = State::Uninitialized;
        self.identity = None;

        let mut reset = ResetController::with_timing(
            &mut delay,
            config.reset_pulse_ms,
            config.clock_ready_attempts,
        );

        // === STEP 1: External reset and oscillator start-up ===
        reset.hardware_reset(&mut self.reset_pin)?;

        match reset.wait_clock_ready(&mut self.bus)? {
            #[cfg(feature = "defmt")]
            ClockReady::Ready { polls } => {
                defmt::debug!("ENC28J60 clock ready after {} polls", polls);
            }
            #[cfg(not(feature = "defmt"))]
            ClockReady::Ready { .. } => {}
            ClockReady::TimedOut => {
                #[cfg(feature = "defmt")]
                defmt::warn!("ENC28J60 clock not ready, check wiring");
                return Err(ConfigError::ClockNotReady.into());
            }
        }

        // === STEP 2: Soft reset ===
        reset.soft_reset(&mut self.bus)?;

        // === STEP 3: Receive buffer (bank 0) ===
        self.bus.select_bank(Bank::Bank0)?;
        self.write_checked_u16(eth::ERXSTL, RX_BUF_START, GEOMETRY_VERIFY_ATTEMPTS)?;
        self.write_checked_u16(eth::ERXNDL, RX_BUF_END, GEOMETRY_VERIFY_ATTEMPTS)?;
        self.write_checked_u16(eth::ERDPTL, RX_BUF_START, GEOMETRY_VERIFY_ATTEMPTS)?;
        // ERXRDPTL latches on the ERXRDPTH write; check the pair afterwards
        self.bus.write_u16(eth::ERXRDPTL, RX_BUF_END)?;
        self.check_u16(eth::ERXRDPTL, RX_BUF_END)?;
        self.next_packet = RX_BUF_START;
        self.watchdog.set_reload(config.rx_reset_cycles);
        self.watchdog.disarm();

        if config.promiscuous {
            self.bus.select_bank(Bank::Bank1)?;
            self.write_checked(eth::ERXFCON, eth::ERXFCON_PROMISCUOUS, GEOMETRY_VERIFY_ATTEMPTS)?;
        }

        // === STEP 4: PHY identity ===
        let identity = Enc28j60Phy::new().identify(&mut self.mdio())?;
        if !identity.is_expected() {
            self.stats.record_identity_mismatch();
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "unexpected PHY id {=u16:#x}:{=u16:#x}",
                identity.id1,
                identity.id2
            );
        }
        self.identity = Some(identity);

        // === STEP 5: MAC (bank 2) and station address (bank 3) ===
        self.configure_mac(&config)?;
        self.write_station_address(&config.mac_address)?;
        self.revision = self.bus.read(mac::EREVID)?;

        #[cfg(feature = "defmt")]
        defmt::info!("ENC28J60 rev {=u8} identity {}", self.revision, identity);

        // === STEP 6: PHY, interrupts, reception ===
        Enc28j60Phy::new().configure(&mut self.mdio(), config.duplex, config.leds)?;

        if config.interrupts {
            self.bus.set_bits(
                EIE,
                EIE_PKTIE | EIE_TXIE | EIE_RXERIE | EIE_TXERIE | EIE_INTIE,
            )?;
        }

        self.bus.set_bits(ECON1, ECON1_RXEN)?;
        self.state = State::Running;
        Ok(())
    }

    /// Program MAC control, gaps and the maximum frame length.
    fn configure_mac(&mut self, config: &Enc28j60Config) -> Result<()> {
        let attempts = config.mac_verify_attempts;
        let full = config.duplex == Duplex::Full;

        let mut macon3 = mac::MACON3_PADCFG0 | mac::MACON3_TXCRCEN | mac::MACON3_FRMLNEN;
        if full {
            macon3 |= mac::MACON3_FULDPX;
        }
        let mabbipg = if full {
            MABBIPG_FULL_DUPLEX
        } else {
            MABBIPG_HALF_DUPLEX
        };

        self.bus.select_bank(Bank::Bank2)?;
        self.write_checked(
            mac::MACON1,
            mac::MACON1_MARXEN | mac::MACON1_TXPAUS | mac::MACON1_RXPAUS,
            attempts,
        )?;
        self.write_checked(mac::MACON3, macon3, attempts)?;
        self.write_checked(mac::MACON4, mac::MACON4_DEFER, attempts)?;
        self.write_checked(mac::MACLCON2, COLLISION_WINDOW, attempts)?;
        self.write_checked(mac::MAIPGL, MAIPGL_DEFAULT, attempts)?;
        self.write_checked(mac::MAIPGH, MAIPGH_DEFAULT, attempts)?;
        self.write_checked_u16(mac::MAMXFLL, MAX_FRAME_LEN as u16, attempts)?;
        self.write_checked(mac::MABBIPG, mabbipg, attempts)
    }

    /// Program MAADR1..MAADR6, last byte first.
    fn write_station_address(&mut self, addr: &[u8; 6]) -> Result<()> {
        self.bus.select_bank(Bank::Bank3)?;
        for (reg, byte) in mac::MAADR.iter().zip(addr.iter()).rev() {
            self.write_checked(*reg, *byte, ADDRESS_VERIFY_ATTEMPTS)?;
        }
        Ok(())
    }

    fn write_checked(&mut self, addr: u8, value: u8, attempts: u8) -> Result<()> {
        let outcome = self.bus.write_verified(addr, value, attempts)?;
        if !outcome.is_verified() {
            self.stats.record_verify_failure();
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "register {=u8:#x} wrote {=u8:#x}: {}",
                addr,
                value,
                outcome
            );
        }
        Ok(())
    }

    fn check_u16(&mut self, addr_low: u8, expected: u16) -> Result<()> {
        let found = self.bus.read_u16(addr_low)?;
        if found != expected {
            self.stats.record_verify_failure();
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "register pair {=u8:#x} reads {=u16:#x}, expected {=u16:#x}",
                addr_low,
                found,
                expected
            );
        }
        Ok(())
    }

    fn write_checked_u16(&mut self, addr_low: u8, value: u16, attempts: u8) -> Result<()> {
        let [low, high] = value.to_le_bytes();
        self.write_checked(addr_low, low, attempts)?;
        self.write_checked(addr_low + 1, high, attempts)
    }

    // =========================================================================
    // Start / Stop
    // =========================================================================

    /// Stop accepting frames (clears ECON1.RXEN)
    ///
    /// Frames already in the buffer can still be drained with
    /// [`poll`](Self::poll), and [`send`](Self::send) keeps working.
    /// A receiver reset still being held re-enables reception when it
    /// expires.
    ///
    /// # Errors
    /// - `InvalidState` - not initialized
    pub fn halt(&mut self) -> Result<()> {
        self.ensure_initialized()?;
        self.bus.clear_bits(ECON1, ECON1_RXEN)?;
        self.state = State::Stopped;

        #[cfg(feature = "defmt")]
        defmt::info!("ENC28J60 receive halted");
        Ok(())
    }

    /// Accept frames again after [`halt`](Self::halt)
    ///
    /// # Errors
    /// - `InvalidState` - not initialized
    pub fn start(&mut self) -> Result<()> {
        match self.state {
            State::Running => return Ok(()),
            State::Stopped => {}
            State::Uninitialized => return Err(IoError::InvalidState.into()),
        }
        self.bus.set_bits(ECON1, ECON1_RXEN)?;
        self.state = State::Running;
        Ok(())
    }

    // =========================================================================
    // PHY Access
    // =========================================================================

    /// MII access with the configured poll budget
    pub fn mdio(&mut self) -> MdioPort<'_, SPI> {
        MdioPort::new(&mut self.bus, self.config.mdio_poll_limit, &mut self.stats)
    }

    /// Run PHY register operations through the MII interface
    ///
    /// ```ignore
    /// let phcon1 = enc.with_mdio(|mdio| mdio.read(phy_reg::PHCON1))?;
    /// ```
    pub fn with_mdio<R>(&mut self, f: impl FnOnce(&mut MdioPort<'_, SPI>) -> Result<R>) -> Result<R> {
        f(&mut self.mdio())
    }

    /// Check the latching link bit (PHSTAT1.LLSTAT)
    pub fn is_link_up(&mut self) -> Result<bool> {
        Enc28j60Phy::new().is_link_up(&mut self.mdio())
    }

    /// Live link state and duplex (PHSTAT2), `None` if the link is down
    pub fn link_status(&mut self) -> Result<Option<Duplex>> {
        Enc28j60Phy::new().link_status(&mut self.mdio())
    }

    // =========================================================================
    // Interrupt Handling
    // =========================================================================

    /// Read the interrupt flags (EIR)
    pub fn interrupt_status(&mut self) -> Result<InterruptStatus> {
        Ok(InterruptStatus::from_raw(self.bus.read(EIR)?))
    }

    /// Clear the given interrupt flags
    pub fn clear_interrupts(&mut self, status: InterruptStatus) -> Result<()> {
        let mask = status.to_raw();
        if mask != 0 {
            self.bus.clear_bits(EIR, mask)?;
        }
        Ok(())
    }

    /// Enable or disable the INT output
    pub fn set_interrupt_output(&mut self, enable: bool) -> Result<()> {
        if enable {
            self.bus.set_bits(EIE, EIE_INTIE)?;
        } else {
            self.bus.clear_bits(EIE, EIE_INTIE)?;
        }
        Ok(())
    }

    /// Run `op` with the INT output masked when interrupts are configured.
    ///
    /// INT is unmasked again on every path, including errors from `op`.
    pub(super) fn with_interrupts_masked<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if !self.config.interrupts {
            return op(self);
        }
        self.bus.clear_bits(EIE, EIE_INTIE)?;
        let result = op(self);
        let restored = self.bus.set_bits(EIE, EIE_INTIE);
        let value = result?;
        restored?;
        Ok(value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
