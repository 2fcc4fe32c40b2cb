//! iLO client implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::info;

use super::models;
use crate::error::RedfishError;
use crate::health::{aggregate, SubsystemView};
use crate::model::{
    decode_json, Health, HealthRecord, NormalizedRecord, PowerState, SystemSummary,
};
use crate::transport::Transport;
use crate::vendors::traits::{Bmc, ResetRequest, ResetType};
use crate::walker;

const SYSTEM_PATH: &str = "/redfish/v1/Systems/1";
const RESET_PATH: &str = "/redfish/v1/Systems/1/Actions/ComputerSystem.Reset";
const PROCESSORS_PATH: &str = "/redfish/v1/Systems/1/Processors";
const ETHERNET_PATH: &str = "/redfish/v1/Systems/1/EthernetInterfaces";
const ARRAY_CONTROLLERS_PATH: &str = "/redfish/v1/Systems/1/SmartStorage/ArrayControllers";
const BIOS_PATH: &str = "/redfish/v1/Systems/1/Bios";
const POWER_PATH: &str = "/redfish/v1/Chassis/1/Power";
const THERMAL_PATH: &str = "/redfish/v1/Chassis/1/Thermal";
const FIRMWARE_INVENTORY_PATH: &str = "/redfish/v1/UpdateService/FirmwareInventory";
const IML_ENTRIES_PATH: &str = "/redfish/v1/Systems/1/LogServices/IML/Entries";
const ACCOUNTS_PATH: &str = "/redfish/v1/AccountService/Accounts";

/// HP/HPE iLO client.
#[derive(Clone)]
pub struct HpBmc {
    /// Transport bound to the controller.
    transport: Transport,
}

impl HpBmc {
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
}

#[async_trait]
impl Bmc for HpBmc {
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
        // Controllers link to a drive collection rather than embedding
        // drive refs; chase each link, then walk all drives as one
        // sequence in controller order.
        let controllers =
            walker::fetch_envelope(&self.transport, ARRAY_CONTROLLERS_PATH).await?;
        let mut drive_refs = Vec::new();
        for controller_path in controllers.members {
            let body = self.transport.get(&controller_path).await?.into_body()?;
            let Some(drives_path) = models::physical_drives_path(&controller_path, &body)?
            else {
                continue;
            };
            let drives = walker::fetch_envelope(&self.transport, &drives_path).await?;
            drive_refs.extend(drives.members);
        }
        walker::walk_refs(&self.transport, drive_refs, models::disk_drive_record).await
    }

    async fn firmware_health(&self) -> Result<Vec<HealthRecord>, RedfishError> {
        let records = self.firmware_inventory().await?;
        Ok(records.iter().map(NormalizedRecord::to_health).collect())
    }

    async fn firmware_inventory(&self) -> Result<Vec<NormalizedRecord>, RedfishError> {
        // iLO's inventory lists installed components only; no address
        // filter needed.
        walker::walk(
            &self.transport,
            FIRMWARE_INVENTORY_PATH,
            models::firmware_record,
        )
        .await
    }

    async fn bios_attributes(
        &self,
    ) -> Result<HashMap<String, serde_json::Value>, RedfishError> {
        let body = self.transport.get(BIOS_PATH).await?.into_body()?;
        let set: models::AttributeSet = decode_json(BIOS_PATH, &body)?;
        Ok(set.attributes)
    }

    async fn boot_order(&self) -> Result<Vec<String>, RedfishError> {
        let system = self.system().await?;
        Ok(system.boot.boot_order)
    }

    async fn system_event_log(
        &self,
        _firmware_version: &str,
    ) -> Result<Vec<NormalizedRecord>, RedfishError> {
        // The IML entry schema never forked across iLO releases, so the
        // firmware version does not influence decoding.
        walker::walk(&self.transport, IML_ENTRIES_PATH, models::iml_entry_record).await
    }

    async fn accounts(&self) -> Result<Vec<NormalizedRecord>, RedfishError> {
        walker::walk(&self.transport, ACCOUNTS_PATH, models::account_record).await
    }

    #[allow(clippy::cast_precision_loss)]
    async fn system_summary(&self) -> Result<SystemSummary, RedfishError> {
        let system = self.system().await?;
        Ok(SystemSummary {
            health: system.status.health_or_unknown(),
            // iLO reports whole gigabytes.
            memory_gib: system.memory.total_system_memory_gb as f64,
            model: system.model,
            power_state: system.power_state.unwrap_or(PowerState::Unknown),
            processor_count: system.processors.count,
            processor_family: system.processors.processor_family,
            serial_number: system.serial_number,
        })
    }
}
