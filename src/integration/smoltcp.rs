//! smoltcp Network Stack Integration
#![cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
//!
//! This module implements the `smoltcp::phy::Device` trait for the ENC28J60
//! driver, so it can be used as a network interface with smoltcp's TCP/IP
//! stack.
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::iface::{Config, Interface, SocketSet};
//! use smoltcp::wire::{EthernetAddress, IpCidr};
//! use ph_enc28j60::{Enc28j60, Enc28j60Config};
//!
//! let mut enc = Enc28j60::new(spi, reset);
//! enc.init(Enc28j60Config::new().with_mac_address(mac), &mut delay).unwrap();
//!
//! let config = Config::new(ethernet_address(&enc).into());
//! let mut iface = Interface::new(config, &mut enc, smoltcp::time::Instant::ZERO);
//! ```
//!
//! # Token Ownership
//!
//! smoltcp hands out an RX and a TX token together and may consume the TX
//! token from inside the RX token's closure (e.g. to answer an ARP request).
//! Both cannot borrow the driver mutably at once, so the frame is copied out
//! of the chip when the tokens are created: the RX token owns the frame
//! bytes and only the TX token borrows the driver. The trailing CRC is
//! stripped before the frame reaches the stack.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::driver::config::State;
use crate::driver::enc28j60::Enc28j60;
use crate::internal::constants::{CRC_SIZE, MAX_FRAME_LEN, MTU};

use smoltcp::phy::{Checksum, ChecksumCapabilities, Device, DeviceCapabilities, Medium};
use smoltcp::time::Instant;

// =============================================================================
// RX Token
// =============================================================================

/// Receive token for smoltcp
///
/// Holds a copy of one received frame, CRC removed.
pub struct Enc28j60RxToken {
    buffer: [u8; MAX_FRAME_LEN],
    len: usize,
}

impl Enc28j60RxToken {
    fn from_frame(frame: &[u8]) -> Self {
        let len = frame.len().saturating_sub(CRC_SIZE).min(MAX_FRAME_LEN);
        let mut buffer = [0u8; MAX_FRAME_LEN];
        buffer[..len].copy_from_slice(&frame[..len]);
        Self { buffer, len }
    }

    /// Length of the held frame
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the held frame is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl smoltcp::phy::RxToken for Enc28j60RxToken {
    fn consume<R, F>(self, f: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        f(&self.buffer[..self.len])
    }
}

// =============================================================================
// TX Token
// =============================================================================

/// Transmit token for smoltcp
///
/// Borrows the driver until the frame is sent.
pub struct Enc28j60TxToken<'a, SPI, RST> {
    enc: &'a mut Enc28j60<SPI, RST>,
}

impl<SPI: SpiDevice, RST: OutputPin> smoltcp::phy::TxToken for Enc28j60TxToken<'_, SPI, RST> {
    fn consume<R, F>(self, len: usize, f: F) -> R
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        let len = len.min(MAX_FRAME_LEN);
        let mut buffer = [0u8; MAX_FRAME_LEN];

        let result = f(&mut buffer[..len]);

        // Dropped frames are retried by the stack's own timers
        if let Err(_e) = self.enc.send(&buffer[..len]) {
            #[cfg(feature = "defmt")]
            defmt::warn!("smoltcp transmit failed: {}", _e);
        }

        result
    }
}

// =============================================================================
// Device Implementation
// =============================================================================

impl<SPI: SpiDevice, RST: OutputPin> Device for Enc28j60<SPI, RST> {
    type RxToken<'a>
        = Enc28j60RxToken
    where
        Self: 'a;
    type TxToken<'a>
        = Enc28j60TxToken<'a, SPI, RST>
    where
        Self: 'a;

    fn receive(&mut self, _timestamp: Instant) -> Option<(Self::RxToken<'_>, Self::TxToken<'_>)> {
        if self.state() != State::Running {
            return None;
        }

        match self.receive_with(Enc28j60RxToken::from_frame) {
            Ok(Some(rx)) => Some((rx, Enc28j60TxToken { enc: self })),
            Ok(None) => None,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("smoltcp receive failed: {}", _e);
                None
            }
        }
    }

    fn transmit(&mut self, _timestamp: Instant) -> Option<Self::TxToken<'_>> {
        // The single transmit buffer is always available once initialized
        if self.state() == State::Uninitialized {
            return None;
        }
        Some(Enc28j60TxToken { enc: self })
    }

    fn capabilities(&self) -> DeviceCapabilities {
        let mut caps = DeviceCapabilities::default();
        caps.medium = Medium::Ethernet;
        caps.max_transmission_unit = MTU;
        // One transmit buffer on the chip
        caps.max_burst_size = Some(1);

        // No checksum offload on this chip
        caps.checksum = ChecksumCapabilities::default();
        caps.checksum.ipv4 = Checksum::Both;
        caps.checksum.udp = Checksum::Both;
        caps.checksum.tcp = Checksum::Both;
        caps.checksum.icmpv4 = Checksum::Both;

        caps
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get the MAC address as a smoltcp EthernetAddress
pub fn ethernet_address<SPI, RST>(enc: &Enc28j60<SPI, RST>) -> smoltcp::wire::EthernetAddress {
    smoltcp::wire::EthernetAddress(*enc.mac_address())
}
