//! ENC28J60 integrated PHY
//!
//! The on-chip PHY is a fixed 10BASE-T transceiver. It has no
//! auto-negotiation, so duplex is forced on both ends: PHCON1.PDPXMD here
//! and MACON3.FULDPX in the MAC.
//!
//! PHSTAT1.LLSTAT is latching-low: a read reports whether the link has
//! stayed up since the previous read. PHSTAT2.LSTAT is the live state.
//!
//! # Example
//!
//! ```ignore
//! use ph_enc28j60::phy::Enc28j60Phy;
//!
//! let phy = Enc28j60Phy::new();
//! let identity = phy.identify(&mut mdio)?;
//! phy.configure(&mut mdio, Duplex::Half, LedConfig::default())?;
//! if let Some(duplex) = phy.link_status(&mut mdio)? {
//!     // link up
//! }
//! ```

use crate::driver::config::{Duplex, LedConfig};
use crate::driver::error::Result;
use crate::hal::mdio::MdioBus;
use crate::internal::constants::{PHY_ID1, PHY_ID2, PHY_ID2_MASK};
use crate::internal::phy_registers::{phcon1, phcon2, phid2, phstat1, phstat2, phy_reg};

// =============================================================================
// PHY Identity
// =============================================================================

/// Contents of PHID1 and PHID2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyIdentity {
    /// PHID1 (OUI bits 3:18)
    pub id1: u16,
    /// PHID2 (OUI bits 19:24, part number, revision)
    pub id2: u16,
}

impl PhyIdentity {
    /// Whether the identifier matches Microchip's ENC28J60 PHY.
    ///
    /// Part number and revision bits are not compared.
    pub const fn is_expected(&self) -> bool {
        self.id1 == PHY_ID1 && (self.id2 & PHY_ID2_MASK) == PHY_ID2
    }

    /// Part number field of PHID2
    pub const fn model(&self) -> u8 {
        ((self.id2 & phid2::MODEL_MASK) >> phid2::MODEL_SHIFT) as u8
    }

    /// Revision field of PHID2
    pub const fn revision(&self) -> u8 {
        (self.id2 & phid2::REVISION_MASK) as u8
    }
}

// =============================================================================
// PHY Driver
// =============================================================================

/// Driver for the integrated 10BASE-T PHY
#[derive(Debug, Clone, Copy, Default)]
pub struct Enc28j60Phy;

impl Enc28j60Phy {
    /// Create a PHY driver
    pub const fn new() -> Self {
        Self
    }

    /// Read the identifier registers
    pub fn identify<M: MdioBus>(&self, mdio: &mut M) -> Result<PhyIdentity> {
        let id1 = mdio.read(phy_reg::PHID1)?;
        let id2 = mdio.read(phy_reg::PHID2)?;
        Ok(PhyIdentity { id1, id2 })
    }

    /// Program loopback, LED and duplex settings.
    ///
    /// Half-duplex loopback is disabled so the PHY does not echo
    /// transmitted frames back into the receive buffer.
    pub fn configure<M: MdioBus>(&self, mdio: &mut M, duplex: Duplex, leds: LedConfig) -> Result<()> {
        mdio.write(phy_reg::PHCON2, phcon2::HDLDIS)?;
        mdio.write(phy_reg::PHLCON, leds.to_phlcon())?;
        let phcon1 = match duplex {
            Duplex::Full => phcon1::PDPXMD,
            Duplex::Half => 0,
        };
        mdio.write(phy_reg::PHCON1, phcon1)
    }

    /// Check PHSTAT1.LLSTAT.
    ///
    /// The bit latches low, so a link that dropped since the previous
    /// call reads as down once even if it is back up.
    pub fn is_link_up<M: MdioBus>(&self, mdio: &mut M) -> Result<bool> {
        Ok(mdio.read(phy_reg::PHSTAT1)? & phstat1::LLSTAT != 0)
    }

    /// Live link state and the duplex the PHY is running.
    ///
    /// Returns `None` if the link is down.
    pub fn link_status<M: MdioBus>(&self, mdio: &mut M) -> Result<Option<Duplex>> {
        let status = mdio.read(phy_reg::PHSTAT2)?;
        if status & phstat2::LSTAT == 0 {
            return Ok(None);
        }
        Ok(Some(if status & phstat2::DPXSTAT != 0 {
            Duplex::Full
        } else {
            Duplex::Half
        }))
    }

    /// Put the PHY into or out of power-down
    pub fn set_power_down<M: MdioBus>(&self, mdio: &mut M, enabled: bool) -> Result<()> {
        let value = mdio.read(phy_reg::PHCON1)?;
        let value = if enabled {
            value | phcon1::PPWRSV
        } else {
            value & !phcon1::PPWRSV
        };
        mdio.write(phy_reg::PHCON1, value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
