//! Vendor operation trait and shared action types.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::RedfishError;
use crate::model::{Health, HealthRecord, NormalizedRecord, PowerState, SystemSummary};

/// Reset actions accepted by the standard `ComputerSystem.Reset` resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResetType {
    /// Power on.
    On,
    /// Immediate power off.
    ForceOff,
    /// Immediate restart.
    ForceRestart,
    /// Ask the host OS to shut down.
    GracefulShutdown,
}

/// Body for the system reset action.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResetRequest {
    /// Requested transition.
    pub reset_type: ResetType,
}

/// Operations every supported controller vendor provides.
///
/// Implementations own a [`crate::transport::Transport`] and map each
/// operation onto their vendor's resource addresses and schemas. All
/// outputs are normalized; errors follow the taxonomy in
/// [`crate::error::RedfishError`].
#[async_trait]
pub trait Bmc: Send + Sync {
    /// Power the system on (`ResetType=On`).
    async fn power_on(&self) -> Result<(), RedfishError>;

    /// Force the system off (`ResetType=ForceOff`).
    async fn power_off(&self) -> Result<(), RedfishError>;

    /// Hard restart (`ResetType=ForceRestart`).
    async fn power_cycle(&self) -> Result<(), RedfishError>;

    /// Ask the host OS to shut down (`ResetType=GracefulShutdown`).
    async fn graceful_shutdown(&self) -> Result<(), RedfishError>;

    /// Current chassis power state.
    async fn power_state(&self) -> Result<PowerState, RedfishError>;

    /// Credential and liveness probe: fetch the system resource and report
    /// its rollup health.
    async fn check_login(&self) -> Result<Health, RedfishError>;

    /// One record per host network interface, with MAC address payloads.
    async fn mac_addresses(&self) -> Result<Vec<NormalizedRecord>, RedfishError>;

    /// Per-socket processor health.
    async fn processor_health(&self) -> Result<Vec<HealthRecord>, RedfishError>;

    /// Power subsystem health: supplies, then redundancy, then voltages.
    async fn power_health(&self) -> Result<Vec<HealthRecord>, RedfishError>;

    /// Thermal health: fans, then temperatures, then redundancy.
    async fn thermal_health(&self) -> Result<Vec<HealthRecord>, RedfishError>;

    /// One record per physical drive, with capacity-in-bytes payloads.
    async fn storage_health(&self) -> Result<Vec<NormalizedRecord>, RedfishError>;

    /// Health rollup across installed firmware components.
    async fn firmware_health(&self) -> Result<Vec<HealthRecord>, RedfishError>;

    /// Installed firmware inventory: name, id, version, updateable flag.
    async fn firmware_inventory(&self) -> Result<Vec<NormalizedRecord>, RedfishError>;

    /// BIOS attribute registry.
    async fn bios_attributes(
        &self,
    ) -> Result<HashMap<String, serde_json::Value>, RedfishError>;

    /// Configured boot device order.
    async fn boot_order(&self) -> Result<Vec<String>, RedfishError>;

    /// System event log. The entry schema is selected from the supplied
    /// controller firmware version where vendors changed it across
    /// releases.
    async fn system_event_log(
        &self,
        firmware_version: &str,
    ) -> Result<Vec<NormalizedRecord>, RedfishError>;

    /// Controller user accounts.
    async fn accounts(&self) -> Result<Vec<NormalizedRecord>, RedfishError>;

    /// One-shot summary of the system resource.
    async fn system_summary(&self) -> Result<SystemSummary, RedfishError>;
}
