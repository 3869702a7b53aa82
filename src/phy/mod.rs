//! Ethernet PHY Driver
//!
//! The ENC28J60 carries its own 10BASE-T PHY, reached through the MII
//! registers rather than an external MDIO bus. The PHY logic only talks to
//! [`MdioBus`](crate::hal::mdio::MdioBus), so it can be tested against a
//! mock register file without SPI.
//!
//! The driver builds an [`MdioPort`](crate::hal::mdio::MdioPort) internally;
//! applications normally use [`Enc28j60::is_link_up`](crate::Enc28j60::is_link_up)
//! and [`Enc28j60::link_status`](crate::Enc28j60::link_status) instead of
//! this module directly.

pub mod enc28j60;

pub use enc28j60::{Enc28j60Phy, PhyIdentity};

// Register definitions for callers going through `Enc28j60::with_mdio`
pub use crate::internal::phy_registers::{phcon1, phcon2, phstat1, phstat2, phy_reg};
