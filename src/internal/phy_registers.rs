//! PHY register definitions
//!
//! The integrated 10BASE-T PHY is reached through the MII registers in bank 2
//! (see [`hal::mdio`](crate::hal::mdio)); it has no bus address of its own.
//!
//! | Register | Addr | Description |
//! |----------|------|-------------|
//! | PHCON1 | 0x00 | Control 1 (reset, loopback, duplex) |
//! | PHSTAT1 | 0x01 | Status 1 (latching link status) |
//! | PHID1 | 0x02 | Identifier 1 |
//! | PHID2 | 0x03 | Identifier 2 |
//! | PHCON2 | 0x10 | Control 2 (loopback disable) |
//! | PHSTAT2 | 0x11 | Status 2 (live link and duplex) |
//! | PHIE | 0x12 | Interrupt enable |
//! | PHIR | 0x13 | Interrupt request |
//! | PHLCON | 0x14 | LED configuration |

// Allow unused constants - complete register definitions for reference
#![allow(dead_code)]

/// PHY register addresses
pub mod phy_reg {
    /// PHY Control 1
    pub const PHCON1: u8 = 0x00;
    /// PHY Status 1
    pub const PHSTAT1: u8 = 0x01;
    /// PHY Identifier 1
    pub const PHID1: u8 = 0x02;
    /// PHY Identifier 2
    pub const PHID2: u8 = 0x03;
    /// PHY Control 2
    pub const PHCON2: u8 = 0x10;
    /// PHY Status 2
    pub const PHSTAT2: u8 = 0x11;
    /// PHY Interrupt Enable
    pub const PHIE: u8 = 0x12;
    /// PHY Interrupt Request
    pub const PHIR: u8 = 0x13;
    /// PHY LED Configuration
    pub const PHLCON: u8 = 0x14;
}

/// PHCON1 bits
pub mod phcon1 {
    /// PHY software reset
    pub const PRST: u16 = 1 << 15;
    /// PHY loopback
    pub const PLOOPBK: u16 = 1 << 14;
    /// PHY power down
    pub const PPWRSV: u16 = 1 << 11;
    /// PHY full duplex
    pub const PDPXMD: u16 = 1 << 8;
}

/// PHSTAT1 bits
pub mod phstat1 {
    /// Full duplex capable
    pub const PFDPX: u16 = 1 << 12;
    /// Half duplex capable
    pub const PHDPX: u16 = 1 << 11;
    /// Link status, latched low until read
    pub const LLSTAT: u16 = 1 << 2;
    /// Jabber detected
    pub const JBSTAT: u16 = 1 << 1;
}

/// PHCON2 bits
pub mod phcon2 {
    /// Force link up
    pub const FRCLNK: u16 = 1 << 14;
    /// Twisted pair transmitter disable
    pub const TXDIS: u16 = 1 << 13;
    /// Jabber correction disable
    pub const JABBER: u16 = 1 << 10;
    /// Half duplex loopback disable
    pub const HDLDIS: u16 = 1 << 8;
}

/// PHSTAT2 bits
pub mod phstat2 {
    /// Transmitting
    pub const TXSTAT: u16 = 1 << 13;
    /// Receiving
    pub const RXSTAT: u16 = 1 << 12;
    /// Collision occurring
    pub const COLSTAT: u16 = 1 << 11;
    /// Link is up (live, not latched)
    pub const LSTAT: u16 = 1 << 10;
    /// Operating in full duplex
    pub const DPXSTAT: u16 = 1 << 9;
    /// Polarity inverted
    pub const PLRITY: u16 = 1 << 5;
}

/// PHID2 fields
pub mod phid2 {
    /// OUI bits 19:24 (bits 15:10)
    pub const OUI_MASK: u16 = 0xFC00;
    /// Part number (bits 9:4)
    pub const MODEL_MASK: u16 = 0x03F0;
    /// Part number shift
    pub const MODEL_SHIFT: u16 = 4;
    /// Revision (bits 3:0)
    pub const REVISION_MASK: u16 = 0x000F;
}
