//! ETH registers in banks 0 and 1
//!
//! 16-bit pointers are split into an `L` (bits 7:0) and `H` (bits 12:8)
//! register; the driver always writes the low byte first.

// Allow unused constants - complete register map kept for reference
#![allow(dead_code)]

// =============================================================================
// Bank 0
// =============================================================================

/// Read pointer, low byte
pub const ERDPTL: u8 = 0x00;
/// Read pointer, high byte
pub const ERDPTH: u8 = 0x01;
/// Write pointer, low byte
pub const EWRPTL: u8 = 0x02;
/// Write pointer, high byte
pub const EWRPTH: u8 = 0x03;
/// Transmit start, low byte
pub const ETXSTL: u8 = 0x04;
/// Transmit start, high byte
pub const ETXSTH: u8 = 0x05;
/// Transmit end, low byte
pub const ETXNDL: u8 = 0x06;
/// Transmit end, high byte
pub const ETXNDH: u8 = 0x07;
/// Receive start, low byte
pub const ERXSTL: u8 = 0x08;
/// Receive start, high byte
pub const ERXSTH: u8 = 0x09;
/// Receive end, low byte
pub const ERXNDL: u8 = 0x0A;
/// Receive end, high byte
pub const ERXNDH: u8 = 0x0B;
/// Receive read pointer (hardware stop), low byte
pub const ERXRDPTL: u8 = 0x0C;
/// Receive read pointer (hardware stop), high byte
pub const ERXRDPTH: u8 = 0x0D;
/// Receive write pointer, low byte
pub const ERXWRPTL: u8 = 0x0E;
/// Receive write pointer, high byte
pub const ERXWRPTH: u8 = 0x0F;
/// DMA start, low byte
pub const EDMASTL: u8 = 0x10;
/// DMA start, high byte
pub const EDMASTH: u8 = 0x11;
/// DMA end, low byte
pub const EDMANDL: u8 = 0x12;
/// DMA end, high byte
pub const EDMANDH: u8 = 0x13;
/// DMA destination, low byte
pub const EDMADSTL: u8 = 0x14;
/// DMA destination, high byte
pub const EDMADSTH: u8 = 0x15;
/// DMA checksum, low byte
pub const EDMACSL: u8 = 0x16;
/// DMA checksum, high byte
pub const EDMACSH: u8 = 0x17;

// =============================================================================
// Bank 1
// =============================================================================

/// Hash table byte 0 (EHT1..EHT7 follow)
pub const EHT0: u8 = 0x00;
/// Pattern match mask byte 0 (EPMM1..EPMM7 follow)
pub const EPMM0: u8 = 0x08;
/// Pattern match checksum, low byte
pub const EPMCSL: u8 = 0x10;
/// Pattern match checksum, high byte
pub const EPMCSH: u8 = 0x11;
/// Pattern match offset, low byte
pub const EPMOL: u8 = 0x14;
/// Pattern match offset, high byte
pub const EPMOH: u8 = 0x15;
/// Receive filter control
pub const ERXFCON: u8 = 0x18;
/// Pending packet count
pub const EPKTCNT: u8 = 0x19;

// ERXFCON bits
/// Unicast filter enable
pub const ERXFCON_UCEN: u8 = 0x80;
/// AND/OR filter combination
pub const ERXFCON_ANDOR: u8 = 0x40;
/// Post-filter CRC check enable
pub const ERXFCON_CRCEN: u8 = 0x20;
/// Pattern match filter enable
pub const ERXFCON_PMEN: u8 = 0x10;
/// Magic packet filter enable
pub const ERXFCON_MPEN: u8 = 0x08;
/// Hash table filter enable
pub const ERXFCON_HTEN: u8 = 0x04;
/// Multicast filter enable
pub const ERXFCON_MCEN: u8 = 0x02;
/// Broadcast filter enable
pub const ERXFCON_BCEN: u8 = 0x01;
/// Filter value after reset
pub const ERXFCON_RESET: u8 = ERXFCON_UCEN | ERXFCON_CRCEN | ERXFCON_BCEN;
/// Accept every frame
pub const ERXFCON_PROMISCUOUS: u8 = 0x00;
