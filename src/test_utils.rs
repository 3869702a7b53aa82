//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the ENC28J60
//! driver on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::vec;
use std::vec::Vec;

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, Operation, SpiDevice};

use crate::driver::error::Result;
use crate::hal::mdio::MdioBus;
use crate::internal::constants::{BUFFER_MEMORY_SIZE, RX_DESCRIPTOR_LEN};
use crate::internal::phy_registers::phy_reg;
use crate::internal::register::common::{
    ECON1, ECON1_BSEL_MASK, ECON1_RXEN, ECON1_RXRST, ECON1_TXRTS, ECON2, ECON2_AUTOINC,
    ECON2_PKTDEC, EIR, EIR_PKTIF, EIR_TXIF, ESTAT, ESTAT_CLKRDY,
};
use crate::internal::register::{Bank, eth, is_common, mac, needs_dummy_byte, opcode};

/// Station address used throughout the tests
pub const TEST_MAC: [u8; 6] = [0x02, 0x12, 0x34, 0x56, 0x78, 0x9A];

/// Byte shifted out in place of the dummy byte on MAC/MII reads
pub const DUMMY_BYTE: u8 = 0xEE;

/// Silicon revision reported by the mock
pub const MOCK_REVISION: u8 = 0x06;

// =============================================================================
// Mock ENC28J60
// =============================================================================

/// One decoded SPI instruction seen by [`MockEnc28j60`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiOp {
    /// RCR with the bank selected at the time
    ReadControl { bank: u8, addr: u8 },
    /// WCR with the bank selected at the time
    WriteControl { bank: u8, addr: u8, value: u8 },
    /// BFS
    BitSet { addr: u8, mask: u8 },
    /// BFC
    BitClear { addr: u8, mask: u8 },
    /// RBM of `len` bytes
    ReadBuffer { len: usize },
    /// WBM of `len` bytes, control byte included
    WriteBuffer { len: usize },
    /// SRC
    SoftReset,
}

impl SpiOp {
    fn is_write(&self) -> bool {
        !matches!(self, SpiOp::ReadControl { .. } | SpiOp::ReadBuffer { .. })
    }
}

/// Transfer failure injected by [`MockEnc28j60::set_fail_transfers`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockSpiError;

impl spi::Error for MockSpiError {
    fn kind(&self) -> spi::ErrorKind {
        spi::ErrorKind::Other
    }
}

#[derive(Debug)]
struct ChipModel {
    /// Bank-specific registers 0x00..0x1A
    banks: [[u8; 0x1B]; 4],
    /// EIE, EIR, ESTAT, ECON2, ECON1
    common: [u8; 5],
    memory: Vec<u8>,
    phy: HashMap<u8, u16>,
    phy_writes: Vec<(u8, u16)>,
    ops: Vec<SpiOp>,
    sticky: HashMap<(u8, u8), u8>,
    /// ESTAT reads that return CLKRDY clear; `None` never becomes ready
    clock_ready_after: Option<u32>,
    estat_reads: u32,
    mii_busy_polls: u32,
    mii_busy_remaining: u32,
    mii_stuck: bool,
    soft_resets: usize,
    floating: bool,
    fail_transfers: bool,
    fail_buffer_reads: bool,
    /// Where the next injected frame is written
    rx_write_pointer: u16,
    /// ERXRDPTL value waiting for the ERXRDPTH write
    read_pointer_low: Option<u8>,
    buffer_bytes_read: usize,
    transmitted: Vec<Vec<u8>>,
}

impl ChipModel {
    fn new() -> Self {
        let mut phy = HashMap::new();
        phy.insert(phy_reg::PHCON1, 0x0000);
        phy.insert(phy_reg::PHSTAT1, 0x1800);
        phy.insert(phy_reg::PHID1, 0x0083);
        phy.insert(phy_reg::PHID2, 0x1405);
        phy.insert(phy_reg::PHCON2, 0x0000);
        phy.insert(phy_reg::PHSTAT2, 0x0000);
        phy.insert(phy_reg::PHLCON, 0x3422);

        let mut model = Self {
            banks: [[0; 0x1B]; 4],
            common: [0; 5],
            memory: vec![0; BUFFER_MEMORY_SIZE],
            phy,
            phy_writes: Vec::new(),
            ops: Vec::new(),
            sticky: HashMap::new(),
            clock_ready_after: Some(0),
            estat_reads: 0,
            mii_busy_polls: 0,
            mii_busy_remaining: 0,
            mii_stuck: false,
            soft_resets: 0,
            floating: false,
            fail_transfers: false,
            fail_buffer_reads: false,
            rx_write_pointer: 0,
            read_pointer_low: None,
            buffer_bytes_read: 0,
            transmitted: Vec::new(),
        };
        model.reset_registers();
        model
    }

    /// Register values after power-on or SRC
    fn reset_registers(&mut self) {
        self.banks = [[0; 0x1B]; 4];
        self.common = [0; 5];
        self.set16(0, eth::ERDPTL, 0x05FA);
        self.set16(0, eth::ERXNDL, 0x1FFF);
        self.set16(0, eth::ERXRDPTL, 0x05FA);
        self.banks[1][eth::ERXFCON as usize] = eth::ERXFCON_RESET;
        self.banks[3][mac::EREVID as usize] = MOCK_REVISION;
        *self.slot(0, ECON2) = ECON2_AUTOINC;
        self.rx_write_pointer = 0;
        self.read_pointer_low = None;
        self.mii_busy_remaining = 0;
        let sticky: Vec<_> = self.sticky.iter().map(|(key, value)| (*key, *value)).collect();
        for ((bank, addr), value) in sticky {
            *self.slot(bank, addr) = value;
        }
    }

    fn bank(&self) -> u8 {
        self.common[4] & ECON1_BSEL_MASK
    }

    fn slot(&mut self, bank: u8, addr: u8) -> &mut u8 {
        if is_common(addr) {
            &mut self.common[(addr - 0x1B) as usize]
        } else {
            &mut self.banks[bank as usize][addr as usize]
        }
    }

    fn get(&self, bank: u8, addr: u8) -> u8 {
        if is_common(addr) {
            self.common[(addr - 0x1B) as usize]
        } else {
            self.banks[bank as usize][addr as usize]
        }
    }

    fn get16(&self, bank: u8, addr_low: u8) -> u16 {
        u16::from_le_bytes([self.get(bank, addr_low), self.get(bank, addr_low + 1)])
    }

    fn set16(&mut self, bank: u8, addr_low: u8, value: u16) {
        let [low, high] = value.to_le_bytes();
        *self.slot(bank, addr_low) = low;
        *self.slot(bank, addr_low + 1) = high;
    }

    fn econ1(&self) -> u8 {
        self.common[4]
    }

    fn eir(&self) -> u8 {
        self.common[1]
    }

    fn pending(&self) -> u8 {
        self.banks[1][eth::EPKTCNT as usize]
    }

    // -------------------------------------------------------------------------
    // Register side effects
    // -------------------------------------------------------------------------

    fn read_register(&mut self, bank: u8, addr: u8) -> u8 {
        if addr == ESTAT {
            self.estat_reads += 1;
            let ready = match self.clock_ready_after {
                Some(after) => self.estat_reads > after,
                None => false,
            };
            let estat = self.get(bank, ESTAT) & !ESTAT_CLKRDY;
            return if ready { estat | ESTAT_CLKRDY } else { estat };
        }
        if bank == 3 && addr == mac::MISTAT {
            if self.mii_stuck {
                return mac::MISTAT_BUSY;
            }
            if self.mii_busy_remaining > 0 {
                self.mii_busy_remaining -= 1;
                return mac::MISTAT_BUSY;
            }
            return 0;
        }
        self.get(bank, addr)
    }

    fn write_register(&mut self, bank: u8, addr: u8, value: u8) {
        let value = self.sticky.get(&(bank, addr)).copied().unwrap_or(value);
        if addr == ECON1 {
            self.write_econ1(value);
            return;
        }
        if addr == EIR {
            self.write_eir(value);
            return;
        }
        // The ERXRDPT low byte only takes effect with the high byte
        if bank == 0 && addr == eth::ERXRDPTL {
            self.read_pointer_low = Some(value);
            return;
        }
        if bank == 0 && addr == eth::ERXRDPTH {
            if let Some(low) = self.read_pointer_low.take() {
                self.banks[0][eth::ERXRDPTL as usize] = low;
            }
        }
        *self.slot(bank, addr) = value;

        if bank == 0 && addr == eth::ERXSTH {
            self.rx_write_pointer = self.get16(0, eth::ERXSTL);
        }
        if bank == 2 && addr == mac::MICMD && value & mac::MICMD_MIIRD != 0 {
            let reg = self.banks[2][mac::MIREGADR as usize];
            let [high, low] = self.phy.get(&reg).copied().unwrap_or(0).to_be_bytes();
            self.banks[2][mac::MIRDL as usize] = low;
            self.banks[2][mac::MIRDH as usize] = high;
            self.mii_busy_remaining = self.mii_busy_polls;
        }
        if bank == 2 && addr == mac::MIWRH {
            let reg = self.banks[2][mac::MIREGADR as usize];
            let value = u16::from_be_bytes([value, self.banks[2][mac::MIWRL as usize]]);
            self.phy.insert(reg, value);
            self.phy_writes.push((reg, value));
            self.mii_busy_remaining = self.mii_busy_polls;
        }
    }

    fn write_econ1(&mut self, value: u8) {
        let mut value = value;
        if value & ECON1_RXRST != 0 {
            value &= !ECON1_RXEN;
        }
        if value & ECON1_TXRTS != 0 {
            let start = self.get16(0, eth::ETXSTL) as usize;
            let end = self.get16(0, eth::ETXNDL) as usize;
            let frame = self.memory[start + 1..=end].to_vec();
            self.transmitted.push(frame);
            value &= !ECON1_TXRTS;
            self.common[1] |= EIR_TXIF;
        }
        self.common[4] = value;
    }

    fn write_eir(&mut self, value: u8) {
        let mut value = value;
        // PKTIF follows EPKTCNT and cannot be cleared by the host
        if self.pending() > 0 {
            value |= EIR_PKTIF;
        }
        self.common[1] = value;
    }

    fn write_econ2(&mut self, value: u8) {
        let mut value = value;
        if value & ECON2_PKTDEC != 0 {
            let count = self.pending().saturating_sub(1);
            self.banks[1][eth::EPKTCNT as usize] = count;
            if count == 0 {
                self.common[1] &= !EIR_PKTIF;
            }
            value &= !ECON2_PKTDEC;
        }
        self.common[3] = value;
    }

    fn modify_bits(&mut self, addr: u8, mask: u8, set: bool) {
        let bank = self.bank();
        let current = self.get(bank, addr);
        let value = if set { current | mask } else { current & !mask };
        match addr {
            ECON1 => self.write_econ1(value),
            ECON2 => self.write_econ2(value),
            EIR => self.write_eir(value),
            _ => *self.slot(bank, addr) = value,
        }
    }

    // -------------------------------------------------------------------------
    // Buffer memory
    // -------------------------------------------------------------------------

    fn mem_index(addr: u16) -> usize {
        addr as usize % BUFFER_MEMORY_SIZE
    }

    fn read_memory_byte(&mut self) -> u8 {
        let rdpt = self.get16(0, eth::ERDPTL);
        let byte = self.memory[Self::mem_index(rdpt)];
        let next = if rdpt == self.get16(0, eth::ERXNDL) {
            self.get16(0, eth::ERXSTL)
        } else {
            rdpt.wrapping_add(1) % BUFFER_MEMORY_SIZE as u16
        };
        self.set16(0, eth::ERDPTL, next);
        self.buffer_bytes_read += 1;
        byte
    }

    fn write_memory_byte(&mut self, byte: u8) {
        let wrpt = self.get16(0, eth::EWRPTL);
        self.memory[Self::mem_index(wrpt)] = byte;
        self.set16(0, eth::EWRPTL, wrpt.wrapping_add(1) % BUFFER_MEMORY_SIZE as u16);
    }

    /// Advance `ptr` by `len` bytes inside the receive region
    fn rx_advance(&self, ptr: u16, len: usize) -> u16 {
        let start = self.get16(0, eth::ERXSTL) as usize;
        let size = self.get16(0, eth::ERXNDL) as usize - start + 1;
        let offset = (ptr as usize - start + len) % size;
        (start + offset) as u16
    }

    fn write_rx_bytes(&mut self, ptr: u16, bytes: &[u8]) -> u16 {
        let mut ptr = ptr;
        for byte in bytes {
            self.memory[Self::mem_index(ptr)] = *byte;
            ptr = self.rx_advance(ptr, 1);
        }
        ptr
    }

    fn inject(&mut self, next: Option<u16>, count: u16, status: u16, payload: &[u8]) {
        let start = self.rx_write_pointer;
        let mut end = self.rx_advance(start, RX_DESCRIPTOR_LEN + payload.len());
        if end % 2 != 0 {
            end = self.rx_advance(end, 1);
        }
        let next = next.unwrap_or(end);

        let mut descriptor = [0u8; RX_DESCRIPTOR_LEN];
        descriptor[0..2].copy_from_slice(&next.to_le_bytes());
        descriptor[2..4].copy_from_slice(&count.to_le_bytes());
        descriptor[4..6].copy_from_slice(&status.to_le_bytes());

        let after = self.write_rx_bytes(start, &descriptor);
        self.write_rx_bytes(after, payload);
        self.rx_write_pointer = end;

        let slot = &mut self.banks[1][eth::EPKTCNT as usize];
        *slot = slot.saturating_add(1);
        self.common[1] |= EIR_PKTIF;
    }

    fn soft_reset(&mut self) {
        self.soft_resets += 1;
        self.reset_registers();
    }

    // -------------------------------------------------------------------------
    // SPI framing
    // -------------------------------------------------------------------------

    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> core::result::Result<(), MockSpiError> {
        if self.fail_transfers {
            return Err(MockSpiError);
        }

        let mut written = Vec::new();
        for op in operations.iter() {
            if let Operation::Write(bytes) = op {
                written.extend_from_slice(bytes);
            }
        }
        let Some(&command) = written.first() else {
            return Ok(());
        };
        let bank = self.bank();

        if command == opcode::SRC {
            self.ops.push(SpiOp::SoftReset);
            self.soft_reset();
            return Ok(());
        }
        if command == opcode::RBM {
            if self.fail_buffer_reads {
                return Err(MockSpiError);
            }
            let mut len = 0;
            for op in operations.iter_mut() {
                if let Operation::Read(buf) = op {
                    for byte in buf.iter_mut() {
                        *byte = if self.floating { 0xFF } else { self.read_memory_byte() };
                    }
                    len += buf.len();
                }
            }
            self.ops.push(SpiOp::ReadBuffer { len });
            return Ok(());
        }
        if command == opcode::WBM {
            self.ops.push(SpiOp::WriteBuffer { len: written.len() - 1 });
            for byte in &written[1..] {
                self.write_memory_byte(*byte);
            }
            return Ok(());
        }

        let addr = command & opcode::ADDR_MASK;
        let arg = written.get(1).copied().unwrap_or(0);
        match command & !opcode::ADDR_MASK {
            opcode::RCR => {
                self.ops.push(SpiOp::ReadControl { bank, addr });
                let value = self.read_register(bank, addr);
                let dummy = needs_dummy_byte(Bank::from_econ1(bank), addr);
                let mut position = 0;
                for op in operations.iter_mut() {
                    if let Operation::Read(buf) = op {
                        for byte in buf.iter_mut() {
                            *byte = if self.floating {
                                0xFF
                            } else if dummy && position == 0 {
                                DUMMY_BYTE
                            } else {
                                value
                            };
                            position += 1;
                        }
                    }
                }
            }
            opcode::WCR => {
                self.ops.push(SpiOp::WriteControl { bank, addr, value: arg });
                self.write_register(bank, addr, arg);
            }
            opcode::BFS => {
                self.ops.push(SpiOp::BitSet { addr, mask: arg });
                self.modify_bits(addr, arg, true);
            }
            opcode::BFC => {
                self.ops.push(SpiOp::BitClear { addr, mask: arg });
                self.modify_bits(addr, arg, false);
            }
            _ => {}
        }
        Ok(())
    }
}

/// SPI-level model of an ENC28J60
///
/// Decodes every chip-select frame as one instruction and applies it to a
/// register file, 8 KiB of buffer memory and the PHY registers. Clones
/// share the same chip, so a test keeps one handle while the driver owns
/// another.
///
/// Modelled behaviour:
/// - four banks plus the common registers, BSEL switching through ECON1
/// - a dummy byte before MAC/MII register values
/// - ERDPT auto-increment with wrap at ERXND, EWRPT auto-increment
/// - PKTDEC, PKTIF following EPKTCNT
/// - MII reads/writes with a configurable busy time
/// - RXRST clearing RXEN, TXRTS sending the frame between ETXST and ETXND
///
/// # Example
///
/// ```ignore
/// let chip = MockEnc28j60::new();
/// let mut enc = Enc28j60::without_reset(chip.clone());
/// enc.init(config, &mut MockDelay::new())?;
///
/// chip.inject_frame(&[0xFF; 60]);
/// enc.poll(|frame| assert_eq!(frame.len(), 60))?;
/// ```
#[derive(Debug, Clone)]
pub struct MockEnc28j60 {
    model: Rc<RefCell<ChipModel>>,
}

impl Default for MockEnc28j60 {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnc28j60 {
    /// Create a chip in its power-on state with the clock already running
    pub fn new() -> Self {
        Self {
            model: Rc::new(RefCell::new(ChipModel::new())),
        }
    }

    // --- Instruction log ---

    pub fn ops(&self) -> Vec<SpiOp> {
        self.model.borrow().ops.clone()
    }

    pub fn clear_ops(&self) {
        let mut model = self.model.borrow_mut();
        model.ops.clear();
        model.buffer_bytes_read = 0;
    }

    /// Number of instructions that change chip state
    pub fn write_op_count(&self) -> usize {
        self.model.borrow().ops.iter().filter(|op| op.is_write()).count()
    }

    /// WCR instructions to `addr` (common registers match in any bank)
    pub fn count_writes_to(&self, bank: u8, addr: u8) -> usize {
        self.model
            .borrow()
            .ops
            .iter()
            .filter(|op| match **op {
                SpiOp::WriteControl { bank: b, addr: a, .. } => {
                    a == addr && (b == bank || is_common(addr))
                }
                _ => false,
            })
            .count()
    }

    /// RCR instructions of `addr` (common registers match in any bank)
    pub fn count_reads_of(&self, bank: u8, addr: u8) -> usize {
        self.model
            .borrow()
            .ops
            .iter()
            .filter(|op| match **op {
                SpiOp::ReadControl { bank: b, addr: a } => a == addr && (b == bank || is_common(addr)),
                _ => false,
            })
            .count()
    }

    pub fn soft_resets(&self) -> usize {
        self.model.borrow().soft_resets
    }

    // --- Registers ---

    pub fn reg(&self, bank: u8, addr: u8) -> u8 {
        self.model.borrow().get(bank, addr)
    }

    pub fn reg16(&self, bank: u8, addr_low: u8) -> u16 {
        self.model.borrow().get16(bank, addr_low)
    }

    pub fn set_reg(&self, bank: u8, addr: u8, value: u8) {
        *self.model.borrow_mut().slot(bank, addr) = value;
    }

    pub fn econ1(&self) -> u8 {
        self.model.borrow().econ1()
    }

    pub fn set_econ1(&self, value: u8) {
        self.model.borrow_mut().common[4] = value;
    }

    pub fn eir(&self) -> u8 {
        self.model.borrow().eir()
    }

    pub fn set_eir(&self, value: u8) {
        self.model.borrow_mut().common[1] = value;
    }

    /// EPKTCNT
    pub fn pending(&self) -> u8 {
        self.model.borrow().pending()
    }

    pub fn set_pending(&self, count: u8) {
        self.model.borrow_mut().banks[1][eth::EPKTCNT as usize] = count;
    }

    /// Make a register ignore writes and always hold `value`
    pub fn make_sticky(&self, bank: u8, addr: u8, value: u8) {
        let mut model = self.model.borrow_mut();
        model.sticky.insert((bank, addr), value);
        *model.slot(bank, addr) = value;
    }

    /// ESTAT reads before CLKRDY is reported; `None` never reports it
    pub fn set_clock_ready_after(&self, reads: Option<u32>) {
        let mut model = self.model.borrow_mut();
        model.clock_ready_after = reads;
        model.estat_reads = 0;
    }

    /// Drive every read byte to 0xFF as with nothing attached to MISO
    pub fn set_floating(&self, floating: bool) {
        self.model.borrow_mut().floating = floating;
    }

    pub fn set_fail_transfers(&self, fail: bool) {
        self.model.borrow_mut().fail_transfers = fail;
    }

    /// Fail only RBM frames
    pub fn set_fail_buffer_reads(&self, fail: bool) {
        self.model.borrow_mut().fail_buffer_reads = fail;
    }

    // --- PHY ---

    pub fn phy(&self, reg: u8) -> u16 {
        self.model.borrow().phy.get(&reg).copied().unwrap_or(0)
    }

    pub fn set_phy(&self, reg: u8, value: u16) {
        self.model.borrow_mut().phy.insert(reg, value);
    }

    pub fn phy_writes(&self) -> Vec<(u8, u16)> {
        self.model.borrow().phy_writes.clone()
    }

    /// MISTAT reads that report BUSY after each MII operation
    pub fn set_mii_busy_polls(&self, polls: u32) {
        self.model.borrow_mut().mii_busy_polls = polls;
    }

    pub fn set_mii_stuck(&self, stuck: bool) {
        self.model.borrow_mut().mii_stuck = stuck;
    }

    // --- Buffer memory ---

    pub fn memory(&self, addr: u16, len: usize) -> Vec<u8> {
        let model = self.model.borrow();
        (0..len)
            .map(|i| model.memory[ChipModel::mem_index(addr.wrapping_add(i as u16))])
            .collect()
    }

    pub fn load_memory(&self, addr: u16, bytes: &[u8]) {
        let mut model = self.model.borrow_mut();
        for (i, byte) in bytes.iter().enumerate() {
            model.memory[ChipModel::mem_index(addr.wrapping_add(i as u16))] = *byte;
        }
    }

    /// ERDPT
    pub fn read_pointer(&self) -> u16 {
        self.model.borrow().get16(0, eth::ERDPTL)
    }

    /// Where the next injected frame will be written
    pub fn rx_write_pointer(&self) -> u16 {
        self.model.borrow().rx_write_pointer
    }

    /// Bytes clocked out by RBM since the last [`clear_ops`](Self::clear_ops)
    pub fn buffer_bytes_read(&self) -> usize {
        self.model.borrow().buffer_bytes_read
    }

    /// Frames sent through TXRTS, oldest first
    pub fn transmitted(&self) -> Vec<Vec<u8>> {
        self.model.borrow().transmitted.clone()
    }

    /// Receive a good frame as the hardware would: descriptor, payload,
    /// even-aligned next pointer, EPKTCNT incremented
    pub fn inject_frame(&self, frame: &[u8]) {
        let status = crate::driver::rx::rsv::RECEIVED_OK;
        self.model
            .borrow_mut()
            .inject(None, frame.len() as u16, status, frame);
    }

    /// Receive a frame with arbitrary descriptor fields.
    ///
    /// `payload_len` filler bytes follow the descriptor; `next` defaults to
    /// the aligned end of the payload.
    pub fn inject_descriptor(&self, next: Option<u16>, count: u16, status: u16, payload_len: usize) {
        let payload: Vec<u8> = (0..payload_len).map(|i| i as u8).collect();
        self.model.borrow_mut().inject(next, count, status, &payload);
    }
}

impl spi::ErrorType for MockEnc28j60 {
    type Error = MockSpiError;
}

impl SpiDevice for MockEnc28j60 {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> core::result::Result<(), Self::Error> {
        self.model.borrow_mut().transaction(operations)
    }
}

// =============================================================================
// Mock MDIO Bus
// =============================================================================

/// Mock MDIO bus for testing PHY logic without SPI
///
/// This allows setting up expected register values and verifying writes.
///
/// # Example
///
/// ```ignore
/// let mut mdio = MockMdioBus::new();
/// mdio.set_register(phy_reg::PHSTAT1, phstat1::LLSTAT);
///
/// let phy = Enc28j60Phy::new();
/// assert!(phy.is_link_up(&mut mdio).unwrap());
/// ```
#[derive(Debug, Default)]
pub struct MockMdioBus {
    /// Register values: reg_addr -> value
    registers: RefCell<HashMap<u8, u16>>,
    /// Record of writes: (reg_addr, value)
    write_log: RefCell<Vec<(u8, u16)>>,
    /// Whether the bus should report as busy
    busy: RefCell<bool>,
}

impl MockMdioBus {
    /// Create a new mock MDIO bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register value
    pub fn set_register(&self, reg_addr: u8, value: u16) {
        self.registers.borrow_mut().insert(reg_addr, value);
    }

    /// Get the current value of a register (for test verification)
    pub fn get_register(&self, reg_addr: u8) -> Option<u16> {
        self.registers.borrow().get(&reg_addr).copied()
    }

    /// Get all writes that have been made
    pub fn get_writes(&self) -> Vec<(u8, u16)> {
        self.write_log.borrow().clone()
    }

    /// Clear the write log
    pub fn clear_writes(&self) {
        self.write_log.borrow_mut().clear();
    }

    /// Set the busy flag
    pub fn set_busy(&self, busy: bool) {
        *self.busy.borrow_mut() = busy;
    }

    /// Setup for the ENC28J60 PHY with its reset values
    pub fn setup_enc28j60(&self) {
        self.set_register(phy_reg::PHID1, 0x0083);
        self.set_register(phy_reg::PHID2, 0x1405);
        self.set_register(phy_reg::PHCON1, 0x0000);
        self.set_register(phy_reg::PHSTAT1, 0x1800);
        self.set_register(phy_reg::PHSTAT2, 0x0000);
        self.set_register(phy_reg::PHLCON, 0x3422);
    }
}

impl MdioBus for MockMdioBus {
    fn read(&mut self, reg_addr: u8) -> Result<u16> {
        Ok(self.get_register(reg_addr).unwrap_or(0))
    }

    fn write(&mut self, reg_addr: u8, value: u16) -> Result<()> {
        self.write_log.borrow_mut().push((reg_addr, value));
        self.set_register(reg_addr, value);
        Ok(())
    }

    fn is_busy(&mut self) -> Result<bool> {
        Ok(*self.busy.borrow())
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: u64,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }

    /// Get total milliseconds that were "delayed"
    pub fn total_ms(&self) -> u32 {
        (self.total_ns / 1_000_000) as u32
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

// =============================================================================
// Mock Reset Pin
// =============================================================================

/// Mock output pin recording every level it is driven to
///
/// Clones share the history, so a test can keep a handle while the
/// driver owns the pin.
#[derive(Debug, Clone, Default)]
pub struct MockPin {
    history: Rc<RefCell<Vec<bool>>>,
    failing: bool,
}

/// Pin failure injected by [`MockPin::failing`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl digital::Error for MockPinError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pin whose every operation fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Levels driven so far (`false` = low)
    pub fn history(&self) -> Vec<bool> {
        self.history.borrow().clone()
    }

    fn drive(&mut self, level: bool) -> core::result::Result<(), MockPinError> {
        if self.failing {
            return Err(MockPinError);
        }
        self.history.borrow_mut().push(level);
        Ok(())
    }
}

impl digital::ErrorType for MockPin {
    type Error = MockPinError;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.drive(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::delay::DelayNs;

    #[test]
    fn mock_mdio_read_write() {
        let mut mdio = MockMdioBus::new();

        // Initially reads 0
        assert_eq!(mdio.read(0x01).unwrap(), 0);

        mdio.set_register(0x01, 0x1234);
        assert_eq!(mdio.read(0x01).unwrap(), 0x1234);

        // Write updates the value
        mdio.write(0x01, 0x5678).unwrap();
        assert_eq!(mdio.read(0x01).unwrap(), 0x5678);

        // Write is logged
        assert_eq!(mdio.get_writes(), vec![(0x01, 0x5678)]);
    }

    #[test]
    fn mock_delay_tracking() {
        let mut delay = MockDelay::new();

        delay.delay_ns(1000);
        delay.delay_ns(2000);
        assert_eq!(delay.total_ns(), 3000);
        assert_eq!(delay.total_ms(), 0);

        delay.delay_ms(5);
        assert_eq!(delay.total_ms(), 5);
    }

    #[test]
    fn mock_pin_shares_history() {
        let pin = MockPin::new();
        let mut driven = pin.clone();

        driven.set_low().unwrap();
        driven.set_high().unwrap();

        assert_eq!(pin.history(), [false, true]);
        assert!(MockPin::failing().set_low().is_err());
    }

    #[test]
    fn mock_chip_dummy_byte_on_mac_reads() {
        let mut chip = MockEnc28j60::new();
        chip.set_econ1(0x02);
        chip.set_reg(2, mac::MACON3, 0x32);

        let mut rx = [0u8; 2];
        chip.transaction(&mut [Operation::Write(&[mac::MACON3]), Operation::Read(&mut rx)])
            .unwrap();

        assert_eq!(rx, [DUMMY_BYTE, 0x32]);
    }

    #[test]
    fn mock_chip_injected_frame_layout() {
        let chip = MockEnc28j60::new();
        chip.set_reg(0, eth::ERXNDL, 0xFF);
        chip.set_reg(0, eth::ERXNDH, 0x17);

        chip.inject_frame(&[0xAB; 61]);

        // 6 + 61 rounded up to even
        assert_eq!(chip.memory(0, 6), [68, 0, 61, 0, 0x80, 0x00]);
        assert_eq!(chip.memory(6, 1), [0xAB]);
        assert_eq!(chip.rx_write_pointer(), 68);
        assert_eq!(chip.pending(), 1);
        assert_ne!(chip.eir() & EIR_PKTIF, 0);
    }

    #[test]
    fn mock_chip_pktdec_releases_frames() {
        let mut chip = MockEnc28j60::new();
        chip.set_pending(2);
        chip.set_eir(EIR_PKTIF);
        let pktdec = [opcode::BFS | ECON2, ECON2_PKTDEC];

        chip.transaction(&mut [Operation::Write(&pktdec)]).unwrap();
        assert_eq!(chip.pending(), 1);
        assert_ne!(chip.eir() & EIR_PKTIF, 0);

        chip.transaction(&mut [Operation::Write(&pktdec)]).unwrap();
        assert_eq!(chip.pending(), 0);
        assert_eq!(chip.eir() & EIR_PKTIF, 0);
    }

    #[test]
    fn mock_chip_read_pointer_low_byte_waits_for_high() {
        let mut chip = MockEnc28j60::new();
        let write = |addr: u8, value: u8| [opcode::WCR | addr, value];

        chip.transaction(&mut [Operation::Write(&write(eth::ERXRDPTL, 0xFF))])
            .unwrap();
        assert_eq!(chip.reg16(0, eth::ERXRDPTL), 0x05FA);

        chip.transaction(&mut [Operation::Write(&write(eth::ERXRDPTH, 0x17))])
            .unwrap();
        assert_eq!(chip.reg16(0, eth::ERXRDPTL), 0x17FF);
    }
}
