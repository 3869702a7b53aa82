//! Configuration types for the ENC28J60 driver

use crate::internal::constants::{
    CLOCK_READY_ATTEMPTS, DEFAULT_MAC_ADDR, MAC_VERIFY_ATTEMPTS, MII_BUSY_POLLS, RESET_PULSE_MS,
    RX_RESET_CYCLES,
};

/// Ethernet duplex mode
///
/// The integrated PHY is 10BASE-T only and does not auto-negotiate, so
/// duplex has to match the link partner by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duplex {
    /// Half duplex
    #[default]
    Half,
    /// Full duplex
    Full,
}

// =============================================================================
// LED Configuration
// =============================================================================

/// Function of one PHY LED output (PHLCON.LACFG / LBCFG)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LedMode {
    /// Transmit activity
    TxActivity = 0x1,
    /// Receive activity
    RxActivity = 0x2,
    /// Collision activity
    Collision = 0x3,
    /// Link status
    LinkStatus = 0x4,
    /// Duplex status
    DuplexStatus = 0x5,
    /// Transmit and receive activity
    TxRxActivity = 0x7,
    /// Always on
    On = 0x8,
    /// Always off
    Off = 0x9,
    /// Blink fast
    BlinkFast = 0xA,
    /// Blink slow
    BlinkSlow = 0xB,
    /// Link status, blinking on receive activity
    LinkRxActivity = 0xC,
    /// Link status, blinking on transmit and receive activity
    LinkTxRxActivity = 0xD,
    /// Duplex status, blinking on collision
    DuplexCollision = 0xE,
}

/// PHY LED configuration (PHLCON)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedConfig {
    /// LEDA function
    pub led_a: LedMode,
    /// LEDB function
    pub led_b: LedMode,
    /// Stretch short LED events to be visible
    pub stretch: bool,
}

impl LedConfig {
    /// LEDA shows link, LEDB shows activity, pulses stretched
    pub const fn new() -> Self {
        Self {
            led_a: LedMode::LinkStatus,
            led_b: LedMode::TxRxActivity,
            stretch: true,
        }
    }

    /// PHLCON register value
    #[must_use]
    pub const fn to_phlcon(&self) -> u16 {
        let mut value = ((self.led_a as u16) << 8) | ((self.led_b as u16) << 4);
        if self.stretch {
            value |= 1 << 1;
        }
        value
    }
}

impl Default for LedConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Driver Configuration
// =============================================================================

/// Complete ENC28J60 configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Enc28j60Config {
    /// MAC address (6 bytes)
    pub mac_address: [u8; 6],
    /// Duplex mode for both MAC and PHY
    pub duplex: Duplex,
    /// Enable the chip's INT output and mask it while the driver services
    /// the receive path
    pub interrupts: bool,
    /// Disable the receive filters and accept every frame
    pub promiscuous: bool,
    /// PHY LED configuration
    pub leds: LedConfig,
    /// External reset pulse width in milliseconds
    pub reset_pulse_ms: u32,
    /// Number of 1 ms polls for the oscillator after reset
    pub clock_ready_attempts: u32,
    /// Number of MISTAT.BUSY polls per PHY register access
    pub mdio_poll_limit: u32,
    /// Write attempts for each MAC register during bring-up
    pub mac_verify_attempts: u8,
    /// Poll cycles the receiver is held in reset after a bad descriptor
    pub rx_reset_cycles: u16,
}

impl Default for Enc28j60Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Enc28j60Config {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mac_address: DEFAULT_MAC_ADDR,
            duplex: Duplex::Half,
            interrupts: false,
            promiscuous: false,
            leds: LedConfig::new(),
            reset_pulse_ms: RESET_PULSE_MS,
            clock_ready_attempts: CLOCK_READY_ATTEMPTS,
            mdio_poll_limit: MII_BUSY_POLLS,
            mac_verify_attempts: MAC_VERIFY_ATTEMPTS,
            rx_reset_cycles: RX_RESET_CYCLES,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the MAC address
    ///
    /// If not set, a default locally-administered address
    /// (02:00:00:00:00:01) is used.
    #[must_use]
    pub const fn with_mac_address(mut self, addr: [u8; 6]) -> Self {
        self.mac_address = addr;
        self
    }

    /// Set the duplex mode
    #[must_use]
    pub const fn with_duplex(mut self, duplex: Duplex) -> Self {
        self.duplex = duplex;
        self
    }

    /// Enable or disable the interrupt output
    #[must_use]
    pub const fn with_interrupts(mut self, enabled: bool) -> Self {
        self.interrupts = enabled;
        self
    }

    /// Enable or disable promiscuous mode
    #[must_use]
    pub const fn with_promiscuous(mut self, enabled: bool) -> Self {
        self.promiscuous = enabled;
        self
    }

    /// Set the LED configuration
    #[must_use]
    pub const fn with_leds(mut self, leds: LedConfig) -> Self {
        self.leds = leds;
        self
    }

    /// Set the reset pulse width
    #[must_use]
    pub const fn with_reset_pulse_ms(mut self, ms: u32) -> Self {
        self.reset_pulse_ms = ms;
        self
    }

    /// Set the number of oscillator polls
    #[must_use]
    pub const fn with_clock_ready_attempts(mut self, attempts: u32) -> Self {
        self.clock_ready_attempts = attempts;
        self
    }

    /// Set the MII busy poll budget
    #[must_use]
    pub const fn with_mdio_poll_limit(mut self, polls: u32) -> Self {
        self.mdio_poll_limit = polls;
        self
    }

    /// Set the MAC register write attempts
    #[must_use]
    pub const fn with_mac_verify_attempts(mut self, attempts: u8) -> Self {
        self.mac_verify_attempts = attempts;
        self
    }

    /// Set how long the receiver is held in reset
    #[must_use]
    pub const fn with_rx_reset_cycles(mut self, cycles: u16) -> Self {
        self.rx_reset_cycles = cycles;
        self
    }

    /// Check the configuration for values the chip cannot use.
    ///
    /// A zero hold time would never release the receiver; a zero
    /// oscillator budget would never see the clock.
    pub const fn is_valid(&self) -> bool {
        self.rx_reset_cycles > 0 && self.clock_ready_attempts > 0
    }
}

/// Driver state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Not initialized, or the last bring-up failed
    #[default]
    Uninitialized,
    /// Running (receive enabled)
    Running,
    /// Stopped (receive disabled, transmit still available)
    Stopped,
}

// =============================================================================
// Unit Tests
// =============================================================================
