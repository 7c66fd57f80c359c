// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chassis: the physical containers of systems, PDUs and sensors.

use serde::{Deserialize, Serialize};

use crate::client::SharedClient;
use crate::common::{
    self, impl_resource, link_uri, Entity, IndicatorLed, Link, ListResult, PowerState, Status,
};
use crate::error::Result;
use crate::resources::{ComputerSystem, Manager, Sensor};
use crate::updatable_fields;

/// Physical form of a chassis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChassisType {
    Rack,
    Blade,
    Enclosure,
    StandAlone,
    RackMount,
    Card,
    Cartridge,
    Row,
    Pod,
    Expansion,
    Sidecar,
    Zone,
    Sled,
    Shelf,
    Drawer,
    Module,
    Component,
    IPBasedDrive,
    RackGroup,
    StorageEnclosure,
    ImmersionTank,
    HeatExchanger,
    PowerStrip,
    Other,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChassisLinks {
    #[serde(rename = "ComputerSystems", default)]
    pub computer_systems: Vec<Link>,
    #[serde(rename = "ManagedBy", default)]
    pub managed_by: Vec<Link>,
    #[serde(rename = "Contains", default)]
    pub contains: Vec<Link>,
    #[serde(rename = "ContainedBy", default)]
    pub contained_by: Option<Link>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chassis {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "ChassisType", default)]
    pub chassis_type: Option<ChassisType>,
    #[serde(rename = "Manufacturer", default)]
    pub manufacturer: Option<String>,
    #[serde(rename = "Model", default)]
    pub model: Option<String>,
    #[serde(rename = "SKU", default)]
    pub sku: Option<String>,
    #[serde(rename = "SerialNumber", default)]
    pub serial_number: Option<String>,
    #[serde(rename = "PartNumber", default)]
    pub part_number: Option<String>,
    #[serde(rename = "AssetTag", default)]
    pub asset_tag: Option<String>,
    #[serde(rename = "IndicatorLED", default)]
    pub indicator_led: Option<IndicatorLed>,
    #[serde(rename = "LocationIndicatorActive", default)]
    pub location_indicator_active: Option<bool>,
    #[serde(rename = "PowerState", default)]
    pub power_state: Option<PowerState>,
    #[serde(rename = "Status", default)]
    pub status: Status,
    #[serde(rename = "Sensors", default)]
    pub sensors: Option<Link>,
    #[serde(rename = "Links", default)]
    pub links: ChassisLinks,
}

impl_resource!(Chassis);
updatable_fields!(Chassis {
    "AssetTag" => asset_tag,
    "IndicatorLED" => indicator_led,
    "LocationIndicatorActive" => location_indicator_active,
});

impl Chassis {
    pub async fn get(client: &SharedClient, uri: &str) -> Result<Self> {
        common::get_object(client, uri).await
    }

    /// Every chassis in the collection at `link`.
    pub async fn list_referenced(client: &SharedClient, link: &str) -> ListResult<Self> {
        common::list_referenced(client, link).await
    }

    /// Send changed `AssetTag`, `IndicatorLED` and `LocationIndicatorActive`.
    pub async fn update(&self) -> Result<()> {
        common::update(self).await
    }

    pub async fn sensors(&self) -> ListResult<Sensor> {
        self.entity.list_referenced(link_uri(&self.sensors)).await
    }

    /// Systems housed in this chassis.
    pub async fn computer_systems(&self) -> ListResult<ComputerSystem> {
        self.entity.list_linked(&self.links.computer_systems).await
    }

    /// Managers responsible for this chassis.
    pub async fn managed_by(&self) -> ListResult<Manager> {
        self.entity.list_linked(&self.links.managed_by).await
    }
}
