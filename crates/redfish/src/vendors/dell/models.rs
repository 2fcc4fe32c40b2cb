//! iDRAC wire models and schema adapters.
//!
//! Shapes follow what iDRAC actually returns, not the published schema:
//! optional fields default so older firmware decodes cleanly, and acronym
//! keys (`MACAddress`, `TotalSystemMemoryGiB`) get explicit renames.
//! Adapters decode one response body into one [`NormalizedRecord`]; they
//! never touch the network.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::RedfishError;
use crate::model::{
    decode_json, name_or_id, Health, NormalizedRecord, ODataId, Payload, PowerState, Status,
    SubsystemMember,
};

// ============================================================================
// System resource
// ============================================================================

/// `/redfish/v1/Systems/System.Embedded.1`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ComputerSystem {
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub power_state: Option<PowerState>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub memory_summary: MemorySummary,
    #[serde(default)]
    pub processor_summary: ProcessorSummary,
    #[serde(default)]
    pub boot: Boot,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct MemorySummary {
    #[serde(rename = "TotalSystemMemoryGiB", default)]
    pub total_system_memory_gib: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ProcessorSummary {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub model: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Boot {
    #[serde(default)]
    pub boot_order: Vec<String>,
}

// ============================================================================
// Collection members
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Processor {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    total_cores: u64,
    #[serde(default)]
    status: Status,
}

/// Adapter: processor member -> normalized record.
pub(crate) fn processor_record(
    path: &str,
    bytes: &[u8],
) -> Result<NormalizedRecord, RedfishError> {
    let processor: Processor = decode_json(path, bytes)?;
    Ok(NormalizedRecord {
        name: name_or_id(processor.name, processor.id),
        health: processor.status.health_or_unknown(),
        state: processor.status.state_or_unknown(),
        payload: Payload::Processor {
            model: processor.model,
            total_cores: processor.total_cores,
        },
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct EthernetInterface {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "MACAddress", default)]
    mac_address: String,
    #[serde(default)]
    status: Status,
}

/// Adapter: ethernet interface member -> normalized record.
pub(crate) fn ethernet_interface_record(
    path: &str,
    bytes: &[u8],
) -> Result<NormalizedRecord, RedfishError> {
    let interface: EthernetInterface = decode_json(path, bytes)?;
    Ok(NormalizedRecord {
        name: name_or_id(interface.name, interface.id),
        health: interface.status.health_or_unknown(),
        state: interface.status.state_or_unknown(),
        payload: Payload::NetworkInterface {
            mac_address: interface.mac_address,
        },
    })
}

/// Storage controller resource; drives hang off it by reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StorageController {
    #[serde(default)]
    drives: Vec<ODataId>,
}

/// Extract the drive references from a storage controller, in declared
/// order.
pub(crate) fn storage_drive_refs(
    path: &str,
    bytes: &[u8],
) -> Result<Vec<String>, RedfishError> {
    let controller: StorageController = decode_json(path, bytes)?;
    Ok(controller.drives.into_iter().map(|d| d.odata_id).collect())
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Drive {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    capacity_bytes: u64,
    #[serde(default)]
    status: Status,
}

/// Adapter: drive member -> normalized record.
pub(crate) fn drive_record(path: &str, bytes: &[u8]) -> Result<NormalizedRecord, RedfishError> {
    let drive: Drive = decode_json(path, bytes)?;
    Ok(NormalizedRecord {
        name: name_or_id(drive.name, drive.id),
        health: drive.status.health_or_unknown(),
        state: drive.status.state_or_unknown(),
        payload: Payload::StorageDevice {
            capacity_bytes: drive.capacity_bytes,
        },
    })
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SoftwareInventory {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    updateable: bool,
    #[serde(default)]
    status: Status,
}

/// Adapter: firmware inventory member -> normalized record.
pub(crate) fn firmware_record(
    path: &str,
    bytes: &[u8],
) -> Result<NormalizedRecord, RedfishError> {
    let entry: SoftwareInventory = decode_json(path, bytes)?;
    Ok(NormalizedRecord {
        name: name_or_id(entry.name, entry.id.clone()),
        health: entry.status.health_or_unknown(),
        state: entry.status.state_or_unknown(),
        payload: Payload::FirmwareEntry {
            id: entry.id,
            version: entry.version,
            updateable: entry.updateable,
        },
    })
}

// ============================================================================
// Power / thermal resources
// ============================================================================

/// `/redfish/v1/Chassis/System.Embedded.1/Power`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Power {
    #[serde(default)]
    pub power_supplies: Vec<SubsystemMember>,
    #[serde(rename = "PowerSupplies@odata.count", default)]
    pub power_supplies_count: Option<usize>,
    #[serde(default)]
    pub redundancy: Vec<SubsystemMember>,
    #[serde(rename = "Redundancy@odata.count", default)]
    pub redundancy_count: Option<usize>,
    #[serde(default)]
    pub voltages: Vec<SubsystemMember>,
    #[serde(rename = "Voltages@odata.count", default)]
    pub voltages_count: Option<usize>,
}

/// `/redfish/v1/Chassis/System.Embedded.1/Thermal`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Thermal {
    #[serde(default)]
    pub fans: Vec<SubsystemMember>,
    #[serde(rename = "Fans@odata.count", default)]
    pub fans_count: Option<usize>,
    #[serde(default)]
    pub temperatures: Vec<SubsystemMember>,
    #[serde(rename = "Temperatures@odata.count", default)]
    pub temperatures_count: Option<usize>,
    #[serde(default)]
    pub redundancy: Vec<SubsystemMember>,
    #[serde(rename = "Redundancy@odata.count", default)]
    pub redundancy_count: Option<usize>,
}

// ============================================================================
// Event log entries (schema changed across firmware releases)
// ============================================================================

/// SEL entry as firmware <= 3.15.17.15 formats it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SelEntryV1 {
    #[serde(default)]
    id: String,
    #[serde(default)]
    severity: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    created: String,
}

/// Adapter: V1 SEL entry -> normalized record. Severity strings predate the
/// standard health vocabulary.
pub(crate) fn sel_entry_v1_record(
    path: &str,
    bytes: &[u8],
) -> Result<NormalizedRecord, RedfishError> {
    let entry: SelEntryV1 = decode_json(path, bytes)?;
    let health = match entry.severity.as_str() {
        "Informational" => Health::Ok,
        "Warning" => Health::Warning,
        "Critical" => Health::Critical,
        _ => Health::Unknown,
    };
    Ok(NormalizedRecord {
        name: entry.id.clone(),
        health,
        state: crate::model::State::Unknown,
        payload: Payload::EventLogEntry {
            id: entry.id,
            message: entry.message,
            message_id: None,
            created: entry.created,
        },
    })
}

/// SEL entry on later firmware: standard `LogEntry` with registry message
/// ids and the standard severity vocabulary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SelEntryV2 {
    #[serde(default)]
    id: String,
    #[serde(default)]
    severity: Option<Health>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    message_id: String,
    #[serde(default)]
    created: String,
}

/// Adapter: V2 SEL entry -> normalized record.
pub(crate) fn sel_entry_v2_record(
    path: &str,
    bytes: &[u8],
) -> Result<NormalizedRecord, RedfishError> {
    let entry: SelEntryV2 = decode_json(path, bytes)?;
    let message_id = if entry.message_id.is_empty() {
        None
    } else {
        Some(entry.message_id)
    };
    Ok(NormalizedRecord {
        name: entry.id.clone(),
        health: entry.severity.unwrap_or(Health::Unknown),
        state: crate::model::State::Unknown,
        payload: Payload::EventLogEntry {
            id: entry.id,
            message: entry.message,
            message_id,
            created: entry.created,
        },
    })
}

// ============================================================================
// Accounts and attribute registries
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ManagerAccount {
    #[serde(default)]
    id: String,
    #[serde(default)]
    user_name: String,
    #[serde(default)]
    role_id: String,
    #[serde(default)]
    enabled: bool,
}

/// Adapter: account member -> normalized record.
pub(crate) fn account_record(
    path: &str,
    bytes: &[u8],
) -> Result<NormalizedRecord, RedfishError> {
    let account: ManagerAccount = decode_json(path, bytes)?;
    let state = if account.enabled {
        crate::model::State::Enabled
    } else {
        crate::model::State::Disabled
    };
    Ok(NormalizedRecord {
        name: name_or_id(account.user_name, account.id),
        health: Health::Unknown,
        state,
        payload: Payload::Account {
            role: account.role_id,
            enabled: account.enabled,
        },
    })
}

/// Any iDRAC attribute registry (BIOS, iDRAC, lifecycle controller,
/// system): a flat `Attributes` map of mixed-type values.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AttributeSet {
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::State;

    #[test]
    fn test_minimal_system_round_trip() {
        let body = br#"{
            "Model": "PowerEdge R640",
            "SerialNumber": "CN1234",
            "PowerState": "On",
            "Status": {"Health": "OK", "State": "Enabled"},
            "MemorySummary": {"TotalSystemMemoryGiB": 191.41},
            "ProcessorSummary": {"Count": 2, "Model": "Intel(R) Xeon(R) Gold 6130"},
            "Boot": {"BootOrder": ["HardDisk.List.1-1", "NIC.Integrated.1-1-1"]}
        }"#;
        let system: ComputerSystem = decode_json("/s", body).unwrap();
        assert_eq!(system.power_state, Some(PowerState::On));
        assert_eq!(system.status.health_or_unknown(), Health::Ok);
        assert_eq!(system.processor_summary.count, 2);
        assert!((system.memory_summary.total_system_memory_gib - 191.41).abs() < f64::EPSILON);
        assert_eq!(system.boot.boot_order.len(), 2);
    }

    #[test]
    fn test_system_tolerates_sparse_payload() {
        let system: ComputerSystem =
            decode_json("/s", br#"{"PowerState": "Off"}"#).unwrap();
        assert_eq!(system.power_state, Some(PowerState::Off));
        assert_eq!(system.status.health_or_unknown(), Health::Unknown);
        assert!(system.boot.boot_order.is_empty());
    }

    #[test]
    fn test_processor_record() {
        let body = br#"{
            "Id": "CPU.Socket.1",
            "Model": "Intel(R) Xeon(R) Gold 6130",
            "TotalCores": 16,
            "Status": {"Health": "OK", "State": "Enabled"}
        }"#;
        let record = processor_record("/p", body).unwrap();
        assert_eq!(record.name, "CPU.Socket.1");
        assert_eq!(record.health, Health::Ok);
        assert_eq!(
            record.payload,
            Payload::Processor {
                model: "Intel(R) Xeon(R) Gold 6130".to_string(),
                total_cores: 16,
            }
        );
    }

    #[test]
    fn test_ethernet_interface_record_uses_dell_mac_key() {
        let body = br#"{
            "Id": "NIC.Integrated.1-1-1",
            "MACAddress": "24:6e:96:aa:bb:cc",
            "Status": {"Health": "OK", "State": "Enabled"}
        }"#;
        let record = ethernet_interface_record("/e", body).unwrap();
        assert_eq!(record.mac_address(), Some("24:6e:96:aa:bb:cc"));
    }

    #[test]
    fn test_drive_record_capacity() {
        let body = br#"{
            "Id": "Disk.Bay.0",
            "Name": "Physical Disk 0:1:0",
            "CapacityBytes": 480103981056,
            "Status": {"Health": "OK", "State": "Enabled"}
        }"#;
        let record = drive_record("/d", body).unwrap();
        assert_eq!(record.capacity_bytes(), Some(480_103_981_056));
        assert_eq!(record.name, "Physical Disk 0:1:0");
    }

    #[test]
    fn test_storage_drive_refs_preserve_order() {
        let body = br#"{
            "Drives": [
                {"@odata.id": "/redfish/v1/Systems/System.Embedded.1/Storage/Drives/1"},
                {"@odata.id": "/redfish/v1/Systems/System.Embedded.1/Storage/Drives/0"}
            ]
        }"#;
        let refs = storage_drive_refs("/c", body).unwrap();
        assert_eq!(refs.len(), 2);
        assert!(refs[0].ends_with("/1"));
        assert!(refs[1].ends_with("/0"));
    }

    #[test]
    fn test_sel_entry_schemas_diverge() {
        let v1 = br#"{
            "Id": "1",
            "Severity": "Informational",
            "Message": "System is turning on.",
            "Created": "2018-09-07T10:17:42-05:00"
        }"#;
        let record = sel_entry_v1_record("/sel/1", v1).unwrap();
        assert_eq!(record.health, Health::Ok);
        assert!(
            matches!(record.payload, Payload::EventLogEntry { ref message_id, .. } if message_id.is_none())
        );

        let v2 = br#"{
            "Id": "1",
            "Severity": "OK",
            "Message": "System is turning on.",
            "MessageId": "SEL0518",
            "Created": "2020-01-12T20:14:01-06:00"
        }"#;
        let record = sel_entry_v2_record("/sel/1", v2).unwrap();
        assert_eq!(record.health, Health::Ok);
        assert!(
            matches!(record.payload, Payload::EventLogEntry { ref message_id, .. } if message_id.as_deref() == Some("SEL0518"))
        );
    }

    #[test]
    fn test_account_record() {
        let body = br#"{
            "Id": "2",
            "UserName": "root",
            "RoleId": "Administrator",
            "Enabled": true
        }"#;
        let record = account_record("/a", body).unwrap();
        assert_eq!(record.name, "root");
        assert_eq!(record.state, State::Enabled);
        assert_eq!(
            record.payload,
            Payload::Account {
                role: "Administrator".to_string(),
                enabled: true,
            }
        );
    }

    #[test]
    fn test_power_counts_decode() {
        let body = br#"{
            "PowerSupplies": [{"Name": "PS1 Status", "Status": {"Health": "OK", "State": "Enabled"}}],
            "PowerSupplies@odata.count": 1,
            "Redundancy": [],
            "Redundancy@odata.count": 0,
            "Voltages": [{"Name": "CPU1 VCORE PG", "Status": {"Health": "OK", "State": "Enabled"}}],
            "Voltages@odata.count": 1
        }"#;
        let power: Power = decode_json("/power", body).unwrap();
        assert_eq!(power.power_supplies_count, Some(1));
        assert_eq!(power.redundancy_count, Some(0));
        assert_eq!(power.voltages.len(), 1);
    }

    #[test]
    fn test_adapter_rejects_structural_mismatch() {
        // Expected object, got array.
        let err = processor_record("/p", b"[]").unwrap_err();
        assert!(matches!(err, RedfishError::Decode { .. }));

        let err = sel_entry_v2_record("/sel", b"\"nope\"").unwrap_err();
        assert!(matches!(err, RedfishError::Decode { .. }));
    }
}
