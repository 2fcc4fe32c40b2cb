//! Wire-common Redfish shapes and the normalized record model.
//!
//! Vendor-specific shapes live with their vendor under [`crate::vendors`];
//! everything here is either part of the Redfish core (OData references,
//! collections, the standard `Status` object) or the stable output model
//! the vendor adapters normalize into.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::RedfishError;

/// Decode a JSON payload, attributing failures to the resource address.
pub(crate) fn decode_json<T: serde::de::DeserializeOwned>(
    path: &str,
    bytes: &[u8],
) -> Result<T, RedfishError> {
    serde_json::from_slice(bytes).map_err(|e| {
        warn!(path = %path, error = %e, "failed to decode resource");
        RedfishError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        }
    })
}

/// Controllers are inconsistent about which of `Name`/`Id` they populate.
pub(crate) fn name_or_id(name: String, id: String) -> String {
    if name.is_empty() {
        id
    } else {
        name
    }
}

// ============================================================================
// Wire-common shapes
// ============================================================================

/// Reference to another resource by address.
#[derive(Debug, Clone, Deserialize)]
pub struct ODataId {
    /// Resource address, relative to the endpoint.
    #[serde(rename = "@odata.id")]
    pub odata_id: String,
}

/// Raw collection resource as the controller returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Collection {
    /// Member references, in controller order.
    #[serde(default)]
    pub members: Vec<ODataId>,
    /// Declared member count.
    #[serde(rename = "Members@odata.count", default)]
    pub count: Option<usize>,
}

/// Decoded collection resource: ordered member addresses plus whatever
/// count the controller declared. The member list is authoritative; the
/// count is advisory.
#[derive(Debug, Clone)]
pub struct CollectionEnvelope {
    /// Member addresses, in declared order.
    pub members: Vec<String>,
    /// Declared member count, when present.
    pub declared_count: Option<usize>,
}

impl From<Collection> for CollectionEnvelope {
    fn from(collection: Collection) -> Self {
        Self {
            members: collection
                .members
                .into_iter()
                .map(|m| m.odata_id)
                .collect(),
            declared_count: collection.count,
        }
    }
}

/// Redfish health vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Health {
    /// Component is healthy.
    #[serde(rename = "OK")]
    Ok,
    /// Degraded but functional.
    Warning,
    /// Failed or failing.
    Critical,
    /// Controller reported nothing recognizable.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Warning => write!(f, "Warning"),
            Self::Critical => write!(f, "Critical"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Redfish enablement vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    /// Present and enabled.
    Enabled,
    /// Present but disabled.
    Disabled,
    /// Powered off but ready to take over.
    StandbyOffline,
    /// Coming up.
    Starting,
    /// Not installed.
    Absent,
    /// Applying an update.
    Updating,
    /// Controller reported nothing recognizable.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Redfish standard status object.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Status {
    /// Component health, when reported.
    #[serde(default)]
    pub health: Option<Health>,
    /// Component state, when reported.
    #[serde(default)]
    pub state: Option<State>,
}

impl Status {
    /// Health, defaulting to `Unknown` when the controller omitted it.
    pub fn health_or_unknown(&self) -> Health {
        self.health.unwrap_or(Health::Unknown)
    }

    /// State, defaulting to `Unknown` when the controller omitted it.
    pub fn state_or_unknown(&self) -> State {
        self.state.unwrap_or(State::Unknown)
    }
}

/// Chassis power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerState {
    /// System is on.
    On,
    /// System is off.
    Off,
    /// Transitioning to on.
    PoweringOn,
    /// Transitioning to off.
    PoweringOff,
    /// Controller reported nothing recognizable.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A power/thermal subsystem element. Name plus status is all the health
/// rollup needs; vendor-specific readings are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubsystemMember {
    /// Position within the subsystem array.
    #[serde(default)]
    pub member_id: String,
    /// Element name. iLO4 labels fans `FanName`.
    #[serde(default, alias = "FanName")]
    pub name: String,
    /// Element status.
    #[serde(default)]
    pub status: Status,
}

impl SubsystemMember {
    /// Reduce to a health record, falling back to the member id when the
    /// controller omits a name.
    pub fn to_health(&self) -> HealthRecord {
        HealthRecord {
            name: name_or_id(self.name.clone(), self.member_id.clone()),
            health: self.status.health_or_unknown(),
            state: self.status.state_or_unknown(),
        }
    }
}

// ============================================================================
// Normalized output model
// ============================================================================

/// Name/health/state triple used for cross-subsystem aggregation views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthRecord {
    /// Identifying name.
    pub name: String,
    /// Health status.
    pub health: Health,
    /// Operational state.
    pub state: State,
}

/// Kind-specific payload of a normalized record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Payload {
    /// CPU socket.
    Processor {
        /// Processor model string.
        model: String,
        /// Physical core count.
        total_cores: u64,
    },
    /// Physical drive.
    StorageDevice {
        /// Capacity in bytes.
        capacity_bytes: u64,
    },
    /// Host network interface.
    NetworkInterface {
        /// MAC address as the controller formats it.
        mac_address: String,
    },
    /// Firmware inventory entry.
    FirmwareEntry {
        /// Inventory member id.
        id: String,
        /// Component version string.
        version: String,
        /// Whether the component accepts updates through the controller.
        updateable: bool,
    },
    /// System event log entry.
    EventLogEntry {
        /// Log entry id.
        id: String,
        /// Human-readable message.
        message: String,
        /// Registry message id, on schemas that carry one.
        message_id: Option<String>,
        /// Creation timestamp as the controller formats it.
        created: String,
    },
    /// Controller user account.
    Account {
        /// Assigned role.
        role: String,
        /// Whether the account is enabled.
        enabled: bool,
    },
}

/// Vendor- and firmware-independent view of one hardware sub-resource.
/// Built by a schema adapter from one response body; immutable after that.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    /// Identifying name.
    pub name: String,
    /// Health status.
    pub health: Health,
    /// Operational state.
    pub state: State,
    /// Kind-specific payload.
    pub payload: Payload,
}

impl NormalizedRecord {
    /// Reduce to the cross-subsystem health view.
    pub fn to_health(&self) -> HealthRecord {
        HealthRecord {
            name: self.name.clone(),
            health: self.health,
            state: self.state,
        }
    }

    /// Capacity in bytes, for storage-device records.
    pub fn capacity_bytes(&self) -> Option<u64> {
        match &self.payload {
            Payload::StorageDevice { capacity_bytes } => Some(*capacity_bytes),
            _ => None,
        }
    }

    /// MAC address, for network-interface records.
    pub fn mac_address(&self) -> Option<&str> {
        match &self.payload {
            Payload::NetworkInterface { mac_address } => Some(mac_address),
            _ => None,
        }
    }
}

/// One-shot summary of the system resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemSummary {
    /// Rollup health.
    pub health: Health,
    /// Installed memory in GiB.
    pub memory_gib: f64,
    /// System model.
    pub model: String,
    /// Chassis power state.
    pub power_state: PowerState,
    /// Populated processor sockets.
    pub processor_count: u64,
    /// Processor family/model string.
    pub processor_family: String,
    /// Chassis serial number.
    pub serial_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_envelope_decode() {
        let body = br#"{
            "Members": [
                {"@odata.id": "/redfish/v1/Systems/System.Embedded.1/Processors/CPU.Socket.1"},
                {"@odata.id": "/redfish/v1/Systems/System.Embedded.1/Processors/CPU.Socket.2"}
            ],
            "Members@odata.count": 2
        }"#;
        let collection: Collection = decode_json("/p", body).unwrap();
        let envelope = CollectionEnvelope::from(collection);
        assert_eq!(envelope.declared_count, Some(2));
        assert_eq!(envelope.members.len(), 2);
        assert!(envelope.members[0].ends_with("CPU.Socket.1"));
    }

    #[test]
    fn test_collection_tolerates_missing_fields() {
        let collection: Collection = decode_json("/p", b"{}").unwrap();
        let envelope = CollectionEnvelope::from(collection);
        assert!(envelope.members.is_empty());
        assert_eq!(envelope.declared_count, None);
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        // Object expected, array given.
        let err = decode_json::<Collection>("/p", b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, RedfishError::Decode { ref path, .. } if path == "/p"));

        let err = decode_json::<Collection>("/p", b"not json").unwrap_err();
        assert!(matches!(err, RedfishError::Decode { .. }));
    }

    #[test]
    fn test_health_vocabulary() {
        let status: Status =
            serde_json::from_str(r#"{"Health": "OK", "State": "Enabled"}"#).unwrap();
        assert_eq!(status.health_or_unknown(), Health::Ok);
        assert_eq!(status.state_or_unknown(), State::Enabled);

        // Vendor extensions fold into Unknown rather than failing decode.
        let status: Status =
            serde_json::from_str(r#"{"Health": "Degraded", "State": "Frobnicating"}"#).unwrap();
        assert_eq!(status.health_or_unknown(), Health::Unknown);
        assert_eq!(status.state_or_unknown(), State::Unknown);

        let status: Status = serde_json::from_str("{}").unwrap();
        assert_eq!(status.health_or_unknown(), Health::Unknown);
    }

    #[test]
    fn test_subsystem_member_name_fallback() {
        let member: SubsystemMember =
            serde_json::from_str(r#"{"MemberId": "0", "Status": {"Health": "OK"}}"#).unwrap();
        assert_eq!(member.to_health().name, "0");

        let member: SubsystemMember =
            serde_json::from_str(r#"{"MemberId": "0", "FanName": "Fan 1"}"#).unwrap();
        assert_eq!(member.to_health().name, "Fan 1");
    }

    #[test]
    fn test_record_payload_accessors() {
        let record = NormalizedRecord {
            name: "Disk.Bay.0".to_string(),
            health: Health::Ok,
            state: State::Enabled,
            payload: Payload::StorageDevice {
                capacity_bytes: 480_103_981_056,
            },
        };
        assert_eq!(record.capacity_bytes(), Some(480_103_981_056));
        assert_eq!(record.mac_address(), None);
        assert_eq!(record.to_health().name, "Disk.Bay.0");
    }
}
