//! ENC28J60 control register definitions
//!
//! The control register space is split into four banks of 32 registers.
//! Addresses 0x1B..=0x1F (EIE, EIR, ESTAT, ECON2, ECON1) are mapped into
//! every bank; everything below that belongs to the bank selected by
//! ECON1.BSEL1:BSEL0.
//!
//! Register addresses are plain `u8` offsets grouped by bank:
//! - [`eth`]: bank 0 (buffer pointers, DMA) and bank 1 (filters, packet count)
//! - [`mac`]: bank 2 (MAC and MII) and bank 3 (address, revision, MII status)

pub mod eth;
pub mod mac;

// =============================================================================
// SPI Opcodes
// =============================================================================

/// SPI instruction set (opcode in bits 7:5, argument in bits 4:0)
pub mod opcode {
    /// Read Control Register
    pub const RCR: u8 = 0x00;
    /// Read Buffer Memory
    pub const RBM: u8 = 0x3A;
    /// Write Control Register
    pub const WCR: u8 = 0x40;
    /// Write Buffer Memory
    pub const WBM: u8 = 0x7A;
    /// Bit Field Set
    pub const BFS: u8 = 0x80;
    /// Bit Field Clear
    pub const BFC: u8 = 0xA0;
    /// System Reset Command (soft reset)
    pub const SRC: u8 = 0xFF;

    /// Register address bits carried in the opcode byte
    pub const ADDR_MASK: u8 = 0x1F;
}

// =============================================================================
// Banks
// =============================================================================

/// Control register bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Bank {
    /// Buffer pointers and DMA
    Bank0 = 0,
    /// Receive filters and packet count
    Bank1 = 1,
    /// MAC and MII control
    Bank2 = 2,
    /// Station address, revision and MII status
    Bank3 = 3,
}

impl Bank {
    /// Bank currently selected by an ECON1 value
    #[inline]
    pub const fn from_econ1(econ1: u8) -> Self {
        match econ1 & common::ECON1_BSEL_MASK {
            0 => Bank::Bank0,
            1 => Bank::Bank1,
            2 => Bank::Bank2,
            _ => Bank::Bank3,
        }
    }

    /// BSEL1:BSEL0 bits selecting this bank
    #[inline]
    pub const fn bsel_bits(self) -> u8 {
        self as u8
    }
}

/// Whether a read of `addr` in `bank` is preceded by a dummy byte.
///
/// MAC and MII registers shift out one dummy byte before the value; ETH
/// registers do not. Bank 2 MAC/MII registers sit at 0x00..=0x1A, bank 3
/// MAC/MII registers at 0x00..=0x05 plus MISTAT (0x0A).
#[inline]
pub const fn needs_dummy_byte(bank: Bank, addr: u8) -> bool {
    match bank {
        Bank::Bank2 => addr <= 0x1A,
        Bank::Bank3 => addr <= 0x05 || addr == mac::MISTAT,
        Bank::Bank0 | Bank::Bank1 => false,
    }
}

/// Whether `addr` is mapped into every bank
#[inline]
pub const fn is_common(addr: u8) -> bool {
    addr >= common::EIE
}

// =============================================================================
// Common Registers (all banks)
// =============================================================================

/// Registers and bits present in every bank
pub mod common {
    /// Ethernet Interrupt Enable
    pub const EIE: u8 = 0x1B;
    /// Ethernet Interrupt Request (flags)
    pub const EIR: u8 = 0x1C;
    /// Ethernet Status
    pub const ESTAT: u8 = 0x1D;
    /// Ethernet Control 2
    pub const ECON2: u8 = 0x1E;
    /// Ethernet Control 1
    pub const ECON1: u8 = 0x1F;

    // ECON1 bits
    /// Transmit logic reset
    pub const ECON1_TXRST: u8 = 0x80;
    /// Receive logic reset
    pub const ECON1_RXRST: u8 = 0x40;
    /// DMA start/busy
    pub const ECON1_DMAST: u8 = 0x20;
    /// DMA checksum mode
    pub const ECON1_CSUMEN: u8 = 0x10;
    /// Transmit request to send
    pub const ECON1_TXRTS: u8 = 0x08;
    /// Receive enable
    pub const ECON1_RXEN: u8 = 0x04;
    /// Bank select bit 1
    pub const ECON1_BSEL1: u8 = 0x02;
    /// Bank select bit 0
    pub const ECON1_BSEL0: u8 = 0x01;
    /// Both bank select bits
    pub const ECON1_BSEL_MASK: u8 = ECON1_BSEL1 | ECON1_BSEL0;

    // ECON2 bits
    /// Automatic buffer pointer increment
    pub const ECON2_AUTOINC: u8 = 0x80;
    /// Packet decrement (writes of 1 decrement EPKTCNT)
    pub const ECON2_PKTDEC: u8 = 0x40;
    /// Power save
    pub const ECON2_PWRSV: u8 = 0x20;
    /// Voltage regulator power save
    pub const ECON2_VRPS: u8 = 0x08;

    // EIE bits
    /// Global interrupt enable
    pub const EIE_INTIE: u8 = 0x80;
    /// Receive packet pending interrupt enable
    pub const EIE_PKTIE: u8 = 0x40;
    /// DMA interrupt enable
    pub const EIE_DMAIE: u8 = 0x20;
    /// Link status change interrupt enable
    pub const EIE_LINKIE: u8 = 0x10;
    /// Transmit interrupt enable
    pub const EIE_TXIE: u8 = 0x08;
    /// Wake-on-LAN interrupt enable
    pub const EIE_WOLIE: u8 = 0x04;
    /// Transmit error interrupt enable
    pub const EIE_TXERIE: u8 = 0x02;
    /// Receive error interrupt enable
    pub const EIE_RXERIE: u8 = 0x01;

    // EIR bits
    /// Receive packet pending
    pub const EIR_PKTIF: u8 = 0x40;
    /// DMA done
    pub const EIR_DMAIF: u8 = 0x20;
    /// Link change
    pub const EIR_LINKIF: u8 = 0x10;
    /// Transmit complete
    pub const EIR_TXIF: u8 = 0x08;
    /// Wake-on-LAN
    pub const EIR_WOLIF: u8 = 0x04;
    /// Transmit error
    pub const EIR_TXERIF: u8 = 0x02;
    /// Receive error (buffer overflow or too many pending packets)
    pub const EIR_RXERIF: u8 = 0x01;

    // ESTAT bits
    /// INT interrupt flag
    pub const ESTAT_INT: u8 = 0x80;
    /// Late collision
    pub const ESTAT_LATECOL: u8 = 0x10;
    /// Unimplemented, reads as zero. A set bit means the bus is floating.
    pub const ESTAT_UNIMPLEMENTED: u8 = 0x08;
    /// Receive busy
    pub const ESTAT_RXBUSY: u8 = 0x04;
    /// Transmit abort
    pub const ESTAT_TXABRT: u8 = 0x02;
    /// Oscillator start-up timer expired
    pub const ESTAT_CLKRDY: u8 = 0x01;
}
