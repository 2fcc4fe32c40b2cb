//! Vendor dispatch for supported management controllers.

pub mod dell;
pub mod hp;
mod traits;

pub use traits::{Bmc, ResetRequest, ResetType};

use crate::error::RedfishError;
use crate::transport::{Endpoint, Transport};

/// Supported controller vendors. The set is closed: dispatch never falls
/// through, and tags outside it are an explicit error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vendor {
    /// Dell iDRAC.
    Dell,
    /// HP/HPE iLO.
    Hp,
}

impl Vendor {
    /// Map a caller-supplied vendor tag onto the closed vendor set. The
    /// vendor is never inferred from response content.
    ///
    /// # Errors
    /// `UnsupportedVendor` for any tag outside the set.
    pub fn from_tag(tag: &str) -> Result<Self, RedfishError> {
        match tag.to_ascii_lowercase().as_str() {
            "dell" => Ok(Self::Dell),
            "hp" | "hpe" => Ok(Self::Hp),
            _ => Err(RedfishError::UnsupportedVendor(tag.to_string())),
        }
    }
}

/// Build the vendor client for an endpoint.
///
/// # Errors
/// `Connection` if the transport cannot be constructed.
pub fn connect(vendor: Vendor, endpoint: Endpoint) -> Result<Box<dyn Bmc>, RedfishError> {
    let transport = Transport::new(endpoint)?;
    Ok(match vendor {
        Vendor::Dell => Box::new(dell::DellBmc::new(transport)),
        Vendor::Hp => Box::new(hp::HpBmc::new(transport)),
    })
}
