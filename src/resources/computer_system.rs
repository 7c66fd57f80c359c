// SPDX-License-Identifier: MIT OR Apache-2.0

//! Computer systems and their boot override settings.

use serde::{Deserialize, Serialize};

use crate::client::SharedClient;
use crate::common::{self, impl_resource, Entity, IndicatorLed, Link, ListResult, PowerState, Status};
use crate::error::Result;
use crate::resources::Chassis;
use crate::updatable_fields;

/// Whether a boot source override applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BootSourceOverrideEnabled {
    Disabled,
    Once,
    Continuous,
    #[serde(other)]
    Unknown,
}

/// Boot source to use instead of the normal boot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BootSource {
    None,
    Pxe,
    Floppy,
    Cd,
    Usb,
    Hdd,
    BiosSetup,
    Utilities,
    Diags,
    UefiShell,
    UefiTarget,
    SDCard,
    UefiHttp,
    RemoteDrive,
    UefiBootNext,
    Recovery,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BootSourceOverrideMode {
    Legacy,
    #[serde(rename = "UEFI")]
    Uefi,
    #[serde(other)]
    Unknown,
}

/// Boot settings. A PATCH carries only the members that changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boot {
    #[serde(rename = "BootSourceOverrideEnabled", default, skip_serializing_if = "Option::is_none")]
    pub boot_source_override_enabled: Option<BootSourceOverrideEnabled>,
    #[serde(rename = "BootSourceOverrideTarget", default, skip_serializing_if = "Option::is_none")]
    pub boot_source_override_target: Option<BootSource>,
    #[serde(rename = "BootSourceOverrideMode", default, skip_serializing_if = "Option::is_none")]
    pub boot_source_override_mode: Option<BootSourceOverrideMode>,
    #[serde(rename = "BootOrder", default, skip_serializing_if = "Vec::is_empty")]
    pub boot_order: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProcessorSummary {
    #[serde(rename = "Count", default)]
    pub count: Option<u32>,
    #[serde(rename = "Model", default)]
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MemorySummary {
    #[serde(rename = "TotalSystemMemoryGiB", default)]
    pub total_system_memory_gib: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ComputerSystemLinks {
    #[serde(rename = "Chassis", default)]
    pub chassis: Vec<Link>,
    #[serde(rename = "ManagedBy", default)]
    pub managed_by: Vec<Link>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComputerSystem {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "SystemType", default)]
    pub system_type: Option<String>,
    #[serde(rename = "Manufacturer", default)]
    pub manufacturer: Option<String>,
    #[serde(rename = "Model", default)]
    pub model: Option<String>,
    #[serde(rename = "SerialNumber", default)]
    pub serial_number: Option<String>,
    #[serde(rename = "UUID", default)]
    pub uuid: Option<String>,
    #[serde(rename = "BiosVersion", default)]
    pub bios_version: Option<String>,
    #[serde(rename = "AssetTag", default)]
    pub asset_tag: Option<String>,
    #[serde(rename = "HostName", default)]
    pub host_name: Option<String>,
    #[serde(rename = "IndicatorLED", default)]
    pub indicator_led: Option<IndicatorLed>,
    #[serde(rename = "LocationIndicatorActive", default)]
    pub location_indicator_active: Option<bool>,
    #[serde(rename = "PowerState", default)]
    pub power_state: Option<PowerState>,
    #[serde(rename = "Boot", default)]
    pub boot: Boot,
    #[serde(rename = "ProcessorSummary", default)]
    pub processor_summary: ProcessorSummary,
    #[serde(rename = "MemorySummary", default)]
    pub memory_summary: MemorySummary,
    #[serde(rename = "Status", default)]
    pub status: Status,
    #[serde(rename = "Links", default)]
    pub links: ComputerSystemLinks,
}

impl_resource!(ComputerSystem);
updatable_fields!(ComputerSystem {
    "AssetTag" => asset_tag,
    "HostName" => host_name,
    "IndicatorLED" => indicator_led,
    "LocationIndicatorActive" => location_indicator_active,
    "Boot" => boot as members,
});

impl ComputerSystem {
    pub async fn get(client: &SharedClient, uri: &str) -> Result<Self> {
        common::get_object(client, uri).await
    }

    pub async fn list_referenced(client: &SharedClient, link: &str) -> ListResult<Self> {
        common::list_referenced(client, link).await
    }

    pub async fn update(&self) -> Result<()> {
        common::update(self).await
    }

    /// Override the boot source for the next boot only.
    pub fn set_boot_once(&mut self, target: BootSource) {
        self.boot.boot_source_override_enabled = Some(BootSourceOverrideEnabled::Once);
        self.boot.boot_source_override_target = Some(target);
    }

    pub async fn chassis(&self) -> ListResult<Chassis> {
        self.entity.list_linked(&self.links.chassis).await
    }
}
