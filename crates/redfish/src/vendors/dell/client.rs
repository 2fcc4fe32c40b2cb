//! iDRAC client implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, info};

use super::models;
use crate::error::RedfishError;
use crate::health::{aggregate, SubsystemView};
use crate::model::{
    decode_json, Health, HealthRecord, NormalizedRecord, PowerState, SystemSummary,
};
use crate::transport::Transport;
use crate::vendors::traits::{Bmc, ResetRequest, ResetType};
use crate::version::{resolve_event_log_schema, EventLogSchema};
use crate::walker;

const SYSTEM_PATH: &str = "/redfish/v1/Systems/System.Embedded.1";
const RESET_PATH: &str = "/redfish/v1/Systems/System.Embedded.1/Actions/ComputerSystem.Reset";
const PROCESSORS_PATH: &str = "/redfish/v1/Systems/System.Embedded.1/Processors";
const ETHERNET_PATH: &str = "/redfish/v1/Systems/System.Embedded.1/EthernetInterfaces";
const STORAGE_PATH: &str = "/redfish/v1/Systems/System.Embedded.1/Storage";
const BIOS_PATH: &str = "/redfish/v1/Systems/System.Embedded.1/Bios";
const POWER_PATH: &str = "/redfish/v1/Chassis/System.Embedded.1/Power";
const THERMAL_PATH: &str = "/redfish/v1/Chassis/System.Embedded.1/Thermal";
const FIRMWARE_INVENTORY_PATH: &str = "/redfish/v1/UpdateService/FirmwareInventory";
const SEL_ENTRIES_PATH: &str = "/redfish/v1/Managers/iDRAC.Embedded.1/LogServices/Sel/Entries";
const ACCOUNTS_PATH: &str = "/redfish/v1/Managers/iDRAC.Embedded.1/Accounts";
const MANAGER_ATTRIBUTES_PATH: &str = "/redfish/v1/Managers/iDRAC.Embedded.1/Attributes";
const LIFECYCLE_ATTRIBUTES_PATH: &str =
    "/redfish/v1/Managers/LifecycleController.Embedded.1/Attributes";
const SYSTEM_ATTRIBUTES_PATH: &str = "/redfish/v1/Managers/System.Embedded.1/Attributes";

/// Firmware inventory members describing running component versions;
/// `Previous-`/`Available-` members are rollback and staging slots.
const INSTALLED_MARKER: &str = "Installed-";

/// Dell iDRAC client.
#[derive(Clone)]
pub struct DellBmc {
    /// Transport bound to the controller.
    transport: Transport,
}

impl DellBmc {
    /// Create a client over an established transport.
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    async fn system(&self) -> Result<models::ComputerSystem, RedfishError> {
        let body = self.transport.get(SYSTEM_PATH).await?.into_body()?;
        decode_json(SYSTEM_PATH, &body)
    }

    async fn reset(&self, reset_type: ResetType) -> Result<(), RedfishError> {
        info!(reset_type = ?reset_type, "system reset");
        let request = ResetRequest { reset_type };
        self.transport
            .post_json(RESET_PATH, &request)
            .await?
            .into_body()?;
        Ok(())
    }

    async fn attribute_registry(
        &self,
        path: &str,
    ) -> Result<HashMap<String, serde_json::Value>, RedfishError> {
        let body = self.transport.get(path).await?.into_body()?;
        let set: models::AttributeSet = decode_json(path, &body)?;
        Ok(set.attributes)
    }

    /// iDRAC (management controller) attribute registry.
    ///
    /// # Errors
    /// Transport, status, or decode errors.
    pub async fn manager_attributes(
        &self,
    ) -> Result<HashMap<String, serde_json::Value>, RedfishError> {
        self.attribute_registry(MANAGER_ATTRIBUTES_PATH).await
    }

    /// Lifecycle controller attribute registry.
    ///
    /// # Errors
    /// Transport, status, or decode errors.
    pub async fn lifecycle_attributes(
        &self,
    ) -> Result<HashMap<String, serde_json::Value>, RedfishError> {
        self.attribute_registry(LIFECYCLE_ATTRIBUTES_PATH).await
    }

    /// System attribute registry.
    ///
    /// # Errors
    /// Transport, status, or decode errors.
    pub async fn system_attributes(
        &self,
    ) -> Result<HashMap<String, serde_json::Value>, RedfishError> {
        self.attribute_registry(SYSTEM_ATTRIBUTES_PATH).await
    }
}

#[async_trait]
impl Bmc for DellBmc {
    async fn power_on(&self) -> Result<(), RedfishError> {
        self.reset(ResetType::On).await
    }

    async fn power_off(&self) -> Result<(), RedfishError> {
        self.reset(ResetType::ForceOff).await
    }

    async fn power_cycle(&self) -> Result<(), RedfishError> {
        self.reset(ResetType::ForceRestart).await
    }

    async fn graceful_shutdown(&self) -> Result<(), RedfishError> {
        self.reset(ResetType::GracefulShutdown).await
    }

    async fn power_state(&self) -> Result<PowerState, RedfishError> {
        let system = self.system().await?;
        Ok(system.power_state.unwrap_or(PowerState::Unknown))
    }

    async fn check_login(&self) -> Result<Health, RedfishError> {
        let system = self.system().await?;
        Ok(system.status.health_or_unknown())
    }

    async fn mac_addresses(&self) -> Result<Vec<NormalizedRecord>, RedfishError> {
        walker::walk(
            &self.transport,
            ETHERNET_PATH,
            models::ethernet_interface_record,
        )
        .await
    }

    async fn processor_health(&self) -> Result<Vec<HealthRecord>, RedfishError> {
        let records =
            walker::walk(&self.transport, PROCESSORS_PATH, models::processor_record).await?;
        Ok(records.iter().map(NormalizedRecord::to_health).collect())
    }

    async fn power_health(&self) -> Result<Vec<HealthRecord>, RedfishError> {
        let body = self.transport.get(POWER_PATH).await?.into_body()?;
        let power: models::Power = decode_json(POWER_PATH, &body)?;
        Ok(aggregate(vec![
            SubsystemView::from_members(
                "power-supply",
                power.power_supplies_count,
                &power.power_supplies,
            ),
            SubsystemView::from_members("redundancy", power.redundancy_count, &power.redundancy),
            SubsystemView::from_members("voltage", power.voltages_count, &power.voltages),
        ]))
    }

    async fn thermal_health(&self) -> Result<Vec<HealthRecord>, RedfishError> {
        let body = self.transport.get(THERMAL_PATH).await?.into_body()?;
        let thermal: models::Thermal = decode_json(THERMAL_PATH, &body)?;
        Ok(aggregate(vec![
            SubsystemView::from_members("fan", thermal.fans_count, &thermal.fans),
            SubsystemView::from_members(
                "temperature",
                thermal.temperatures_count,
                &thermal.temperatures,
            ),
            SubsystemView::from_members(
                "redundancy",
                thermal.redundancy_count,
                &thermal.redundancy,
            ),
        ]))
    }

    async fn storage_health(&self) -> Result<Vec<NormalizedRecord>, RedfishError> {
        // Drives hang off per-controller resources; gather the refs in
        // controller order, then walk them as one sequence.
        let controllers = walker::fetch_envelope(&self.transport, STORAGE_PATH).await?;
        let mut drive_refs = Vec::new();
        for controller_path in controllers.members {
            let body = self.transport.get(&controller_path).await?.into_body()?;
            drive_refs.extend(models::storage_drive_refs(&controller_path, &body)?);
        }
        walker::walk_refs(&self.transport, drive_refs, models::drive_record).await
    }

    async fn firmware_health(&self) -> Result<Vec<HealthRecord>, RedfishError> {
        let records = self.firmware_inventory().await?;
        Ok(records.iter().map(NormalizedRecord::to_health).collect())
    }

    async fn firmware_inventory(&self) -> Result<Vec<NormalizedRecord>, RedfishError> {
        walker::walk_filtered(
            &self.transport,
            FIRMWARE_INVENTORY_PATH,
            |member| member.contains(INSTALLED_MARKER),
            models::firmware_record,
        )
        .await
    }

    async fn bios_attributes(
        &self,
    ) -> Result<HashMap<String, serde_json::Value>, RedfishError> {
        self.attribute_registry(BIOS_PATH).await
    }

    async fn boot_order(&self) -> Result<Vec<String>, RedfishError> {
        let system = self.system().await?;
        Ok(system.boot.boot_order)
    }

    async fn system_event_log(
        &self,
        firmware_version: &str,
    ) -> Result<Vec<NormalizedRecord>, RedfishError> {
        let schema = resolve_event_log_schema(firmware_version)?;
        debug!(firmware_version = %firmware_version, schema = ?schema, "event log schema selected");
        let decode = match schema {
            EventLogSchema::V1 => models::sel_entry_v1_record,
            EventLogSchema::V2 => models::sel_entry_v2_record,
        };
        walker::walk(&self.transport, SEL_ENTRIES_PATH, decode).await
    }

    async fn accounts(&self) -> Result<Vec<NormalizedRecord>, RedfishError> {
        walker::walk(&self.transport, ACCOUNTS_PATH, models::account_record).await
    }

    async fn system_summary(&self) -> Result<SystemSummary, RedfishError> {
        let system = self.system().await?;
        Ok(SystemSummary {
            health: system.status.health_or_unknown(),
            memory_gib: system.memory_summary.total_system_memory_gib,
            model: system.model,
            power_state: system.power_state.unwrap_or(PowerState::Unknown),
            processor_count: system.processor_summary.count,
            processor_family: system.processor_summary.model,
            serial_number: system.serial_number,
        })
    }
}
