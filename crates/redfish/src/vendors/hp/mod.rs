//! HP/HPE iLO support.
//!
//! Implements the [`Bmc`](crate::vendors::Bmc) trait over iLO resource
//! addresses and schemas.

mod client;
mod models;

pub use client::HpBmc;
