//! Dell iDRAC support.
//!
//! Implements the [`Bmc`](crate::vendors::Bmc) trait over iDRAC resource
//! addresses and schemas, plus the iDRAC-only attribute registries.

mod client;
mod models;

pub use client::DellBmc;
