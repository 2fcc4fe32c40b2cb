//! Vendor-abstracted Redfish client for out-of-band management controllers.
//!
//! Redfish models a server as a graph of linked resources: collection
//! resources name their members by address, every member is a separate
//! fetch, and the JSON shapes differ per vendor and per firmware release.
//! This crate walks that graph, reconciles the vendor shapes into one
//! normalized record model, and classifies transport/HTTP failures into
//! actionable error kinds.
//!
//! # Example
//!
//! ```rust,ignore
//! use redfish::{connect, Endpoint, Vendor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), redfish::RedfishError> {
//!     let endpoint = Endpoint::new("https://10.4.0.12", "root", "calvin");
//!     let bmc = connect(Vendor::from_tag("dell")?, endpoint)?;
//!
//!     let summary = bmc.system_summary().await?;
//!     println!("{} ({}) is {}", summary.model, summary.serial_number, summary.power_state);
//!
//!     for drive in bmc.storage_health().await? {
//!         println!("{}: {} {:?}", drive.name, drive.health, drive.capacity_bytes());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod health;
pub mod model;
pub mod transport;
pub mod vendors;
pub mod version;
pub mod walker;

pub use error::RedfishError;
pub use health::{aggregate, SubsystemView};
pub use model::{
    CollectionEnvelope, Health, HealthRecord, NormalizedRecord, Payload, PowerState, State,
    SystemSummary,
};
pub use transport::{Endpoint, RawResponse, Transport};
pub use vendors::dell::DellBmc;
pub use vendors::hp::HpBmc;
pub use vendors::{connect, Bmc, ResetType, Vendor};
pub use version::{resolve_event_log_schema, EventLogSchema};
