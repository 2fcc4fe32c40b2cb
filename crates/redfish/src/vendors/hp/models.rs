//! iLO wire models and schema adapters.
//!
//! iLO predates parts of the standard schema, so several keys diverge from
//! the Dell shapes: the system resource carries `Memory`/`Processors`
//! summaries instead of `MemorySummary`/`ProcessorSummary`, interfaces use
//! `MacAddress` (not `MACAddress`), and drives report `CapacityMiB` rather
//! than bytes. Adapters normalize all of that away.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::RedfishError;
use crate::model::{
    decode_json, name_or_id, Health, NormalizedRecord, ODataId, Payload, PowerState, Status,
    SubsystemMember,
};

const BYTES_PER_MIB: u64 = 1024 * 1024;

// ============================================================================
// System resource
// ============================================================================

/// `/redfish/v1/Systems/1`.
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
    pub memory: MemorySummary,
    #[serde(default)]
    pub processors: ProcessorSummary,
    #[serde(default)]
    pub boot: Boot,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct MemorySummary {
    /// iLO reports whole gigabytes.
    #[serde(rename = "TotalSystemMemoryGB", default)]
    pub total_system_memory_gb: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ProcessorSummary {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub processor_family: String,
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
    /// iLO casing; Dell spells this `MACAddress`.
    #[serde(default)]
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

/// Smart Storage array controller; drives live in a linked collection
/// rather than inline references.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ArrayController {
    #[serde(default)]
    links: ControllerLinks,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ControllerLinks {
    #[serde(default)]
    physical_drives: Option<ODataId>,
}

/// Extract the drive-collection address from an array controller, when the
/// controller exposes one.
pub(crate) fn physical_drives_path(
    path: &str,
    bytes: &[u8],
) -> Result<Option<String>, RedfishError> {
    let controller: ArrayController = decode_json(path, bytes)?;
    Ok(controller.links.physical_drives.map(|link| link.odata_id))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DiskDrive {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "CapacityMiB", default)]
    capacity_mib: u64,
    #[serde(default)]
    status: Status,
}

/// Adapter: disk drive member -> normalized record, capacity converted to
/// bytes.
pub(crate) fn disk_drive_record(
    path: &str,
    bytes: &[u8],
) -> Result<NormalizedRecord, RedfishError> {
    let drive: DiskDrive = decode_json(path, bytes)?;
    Ok(NormalizedRecord {
        name: name_or_id(drive.name, drive.id),
        health: drive.status.health_or_unknown(),
        state: drive.status.state_or_unknown(),
        payload: Payload::StorageDevice {
            capacity_bytes: drive.capacity_mib * BYTES_PER_MIB,
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

/// Integrated Management Log entry. iLO kept one schema across releases.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ImlEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    severity: Option<Health>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    created: String,
}

/// Adapter: IML entry -> normalized record.
pub(crate) fn iml_entry_record(
    path: &str,
    bytes: &[u8],
) -> Result<NormalizedRecord, RedfishError> {
    let entry: ImlEntry = decode_json(path, bytes)?;
    Ok(NormalizedRecord {
        name: entry.id.clone(),
        health: entry.severity.unwrap_or(Health::Unknown),
        state: crate::model::State::Unknown,
        payload: Payload::EventLogEntry {
            id: entry.id,
            message: entry.message,
            message_id: None,
            created: entry.created,
        },
    })
}

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

// ============================================================================
// Power / thermal resources
// ============================================================================

/// `/redfish/v1/Chassis/1/Power`.
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

/// `/redfish/v1/Chassis/1/Thermal`.
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

/// BIOS settings resource: a flat `Attributes` map.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AttributeSet {
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
}
