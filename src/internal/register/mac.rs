//! MAC and MII registers in banks 2 and 3

// Allow unused constants - complete register map kept for reference
#![allow(dead_code)]

// =============================================================================
// Bank 2
// =============================================================================

/// MAC control 1
pub const MACON1: u8 = 0x00;
/// MAC control 3
pub const MACON3: u8 = 0x02;
/// MAC control 4
pub const MACON4: u8 = 0x03;
/// Back-to-back inter-packet gap
pub const MABBIPG: u8 = 0x04;
/// Non back-to-back inter-packet gap, low byte
pub const MAIPGL: u8 = 0x06;
/// Non back-to-back inter-packet gap, high byte
pub const MAIPGH: u8 = 0x07;
/// Retransmission maximum
pub const MACLCON1: u8 = 0x08;
/// Collision window
pub const MACLCON2: u8 = 0x09;
/// Maximum frame length, low byte
pub const MAMXFLL: u8 = 0x0A;
/// Maximum frame length, high byte
pub const MAMXFLH: u8 = 0x0B;
/// MII command
pub const MICMD: u8 = 0x12;
/// MII register address
pub const MIREGADR: u8 = 0x14;
/// MII write data, low byte
pub const MIWRL: u8 = 0x16;
/// MII write data, high byte (writing starts the MII transaction)
pub const MIWRH: u8 = 0x17;
/// MII read data, low byte
pub const MIRDL: u8 = 0x18;
/// MII read data, high byte
pub const MIRDH: u8 = 0x19;

// MACON1 bits
/// Loopback
pub const MACON1_LOOPBK: u8 = 0x10;
/// Pause control frame transmission enable
pub const MACON1_TXPAUS: u8 = 0x08;
/// Pause control frame reception enable
pub const MACON1_RXPAUS: u8 = 0x04;
/// Pass all received frames
pub const MACON1_PASSALL: u8 = 0x02;
/// MAC receive enable
pub const MACON1_MARXEN: u8 = 0x01;

// MACON3 bits
/// Automatic pad and CRC configuration (pad to 60 bytes, append CRC)
pub const MACON3_PADCFG0: u8 = 0x20;
/// Transmit CRC enable
pub const MACON3_TXCRCEN: u8 = 0x10;
/// Frame length checking enable
pub const MACON3_FRMLNEN: u8 = 0x02;
/// MAC full duplex
pub const MACON3_FULDPX: u8 = 0x01;

// MACON4 bits
/// Defer transmission (half duplex, IEEE 802.3 compliant)
pub const MACON4_DEFER: u8 = 0x40;

// MICMD bits
/// MII read enable
pub const MICMD_MIIRD: u8 = 0x01;

// =============================================================================
// Bank 3
// =============================================================================

/// MAC address byte 5
pub const MAADR5: u8 = 0x00;
/// MAC address byte 6 (last byte on the wire)
pub const MAADR6: u8 = 0x01;
/// MAC address byte 3
pub const MAADR3: u8 = 0x02;
/// MAC address byte 4
pub const MAADR4: u8 = 0x03;
/// MAC address byte 1 (first byte on the wire)
pub const MAADR1: u8 = 0x04;
/// MAC address byte 2
pub const MAADR2: u8 = 0x05;
/// Built-in self-test fill seed
pub const EBSTSD: u8 = 0x06;
/// Built-in self-test control
pub const EBSTCON: u8 = 0x07;
/// Built-in self-test checksum, low byte
pub const EBSTCSL: u8 = 0x08;
/// Built-in self-test checksum, high byte
pub const EBSTCSH: u8 = 0x09;
/// MII status
pub const MISTAT: u8 = 0x0A;
/// Silicon revision
pub const EREVID: u8 = 0x12;
/// Clock output control
pub const ECOCON: u8 = 0x15;
/// Flow control
pub const EFLOCON: u8 = 0x17;
/// Pause timer value, low byte
pub const EPAUSL: u8 = 0x18;
/// Pause timer value, high byte
pub const EPAUSH: u8 = 0x19;

/// Station address registers, indexed by byte position on the wire
pub const MAADR: [u8; 6] = [MAADR1, MAADR2, MAADR3, MAADR4, MAADR5, MAADR6];

// MISTAT bits
/// MII management busy
pub const MISTAT_BUSY: u8 = 0x01;
