//! Centralized Constants
//!
//! Single source of truth for the numbers the driver is built around.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **Frame sizes**: Ethernet frame dimensions
//! - **Packet memory**: the fixed receive/transmit partition of the 8 KiB buffer
//! - **Timing**: reset pulse, settle delays, polling bounds
//! - **Retry budgets**: write-verify attempt counts per init stage
//! - **MAC defaults**: inter-packet gaps and collision window
//! - **PHY**: identity and LED defaults
//!
//! # Note
//!
//! Register addresses and bit definitions live in [`register`](super::register)
//! and [`phy_registers`](super::phy_registers).

// =============================================================================
// Frame Sizes
// =============================================================================

/// Maximum frame length accepted by the MAC (1500 + 14 header + 4 CRC)
pub const MAX_FRAME_LEN: usize = 1518;

/// Standard Ethernet MTU (Maximum Transmission Unit)
pub const MTU: usize = 1500;

/// Ethernet header size (dst MAC + src MAC + EtherType)
pub const ETH_HEADER_SIZE: usize = 14;

/// CRC/FCS size at end of frame
pub const CRC_SIZE: usize = 4;

/// Minimum Ethernet frame size (excluding CRC)
pub const MIN_FRAME_SIZE: usize = 60;

/// MAC address length in bytes
pub const MAC_ADDR_LEN: usize = 6;

/// Default locally-administered MAC address
pub const DEFAULT_MAC_ADDR: [u8; MAC_ADDR_LEN] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];

// =============================================================================
// Packet Memory
// =============================================================================

/// Size of the on-chip packet memory
pub const BUFFER_MEMORY_SIZE: usize = 0x2000;

/// First byte of the receive region.
///
/// Errata: the receive region must start at 0x0000.
pub const RX_BUF_START: u16 = 0x0000;

/// Last byte of the receive region
pub const RX_BUF_END: u16 = 0x17FF;

/// First byte of the transmit region (holds the per-packet control byte)
pub const TX_BUF_START: u16 = 0x1800;

/// Last byte of the transmit region
pub const TX_BUF_END: u16 = 0x1FFF;

/// Size of the receive status header in front of every buffered frame
pub const RX_DESCRIPTOR_LEN: usize = 6;

/// Per-packet control byte written ahead of a transmit frame (use MACON3 settings)
pub const TX_CONTROL_BYTE: u8 = 0x00;

// =============================================================================
// Timing
// =============================================================================

/// External reset pulse width in milliseconds
pub const RESET_PULSE_MS: u32 = 100;

/// Clock-ready poll interval in milliseconds
pub const CLOCK_READY_POLL_MS: u32 = 1;

/// Maximum clock-ready polls before init gives up
pub const CLOCK_READY_ATTEMPTS: u32 = 100;

/// Settle time after the soft reset command (errata: CLKRDY is unreliable here)
pub const SOFT_RESET_SETTLE_MS: u32 = 1;

/// Maximum MISTAT.BUSY polls per MII operation
pub const MII_BUSY_POLLS: u32 = 1_000;

/// Poll cycles the receiver is held in reset after an anomaly
pub const RX_RESET_CYCLES: u16 = 1_000;

/// Bytes discarded per SPI frame when skipping an unwanted receive frame
pub const DISCARD_CHUNK: usize = 64;

// =============================================================================
// Retry Budgets
// =============================================================================

/// Write-verify attempts for the buffer geometry registers
pub const GEOMETRY_VERIFY_ATTEMPTS: u8 = 1;

/// Write-verify attempts for the MAC configuration registers
pub const MAC_VERIFY_ATTEMPTS: u8 = 10;

/// Write-verify attempts for the station address registers
pub const ADDRESS_VERIFY_ATTEMPTS: u8 = 1;

// =============================================================================
// MAC Defaults
// =============================================================================

/// Back-to-back inter-packet gap for half duplex
pub const MABBIPG_HALF_DUPLEX: u8 = 0x12;

/// Back-to-back inter-packet gap for full duplex
pub const MABBIPG_FULL_DUPLEX: u8 = 0x15;

/// Non back-to-back inter-packet gap, low byte
pub const MAIPGL_DEFAULT: u8 = 0x12;

/// Non back-to-back inter-packet gap, high byte (half duplex only)
pub const MAIPGH_DEFAULT: u8 = 0x0C;

/// Late collision window (MACLCON2)
pub const COLLISION_WINDOW: u8 = 63;

// =============================================================================
// PHY
// =============================================================================

/// Expected PHID1 value
pub const PHY_ID1: u16 = 0x0083;

/// Expected PHID2 value after masking out model revision bits
pub const PHY_ID2: u16 = 0x1400;

/// PHID2 mask covering the OUI bits
pub const PHY_ID2_MASK: u16 = 0xFC00;

/// Default PHLCON value: LEDA link/activity, LEDB receive, stretched pulses
pub const PHLCON_DEFAULT: u16 = 0x0472;
