// SPDX-License-Identifier: MIT OR Apache-2.0

//! Power equipment: the PDU inventory and the PDUs themselves.

use serde::{Deserialize, Serialize};

use crate::client::SharedClient;
use crate::common::{self, impl_resource, link_uri, Entity, Link, ListResult, Status};
use crate::error::Result;
use crate::resources::{Circuit, Outlet, Sensor};
use crate::updatable_fields;

/// The `PowerEquipment` resource linked from the service root.
#[derive(Debug, Clone, Deserialize)]
pub struct PowerEquipment {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "Status", default)]
    pub status: Status,
    #[serde(rename = "RackPDUs", default)]
    pub rack_pdus: Option<Link>,
    #[serde(rename = "FloorPDUs", default)]
    pub floor_pdus: Option<Link>,
    #[serde(rename = "TransferSwitches", default)]
    pub transfer_switches: Option<Link>,
}

impl_resource!(PowerEquipment);

impl PowerEquipment {
    pub async fn get(client: &SharedClient, uri: &str) -> Result<Self> {
        common::get_object(client, uri).await
    }

    pub async fn rack_pdus(&self) -> ListResult<PowerDistribution> {
        self.entity.list_referenced(link_uri(&self.rack_pdus)).await
    }

    pub async fn floor_pdus(&self) -> ListResult<PowerDistribution> {
        self.entity.list_referenced(link_uri(&self.floor_pdus)).await
    }

    pub async fn transfer_switches(&self) -> ListResult<PowerDistribution> {
        self.entity.list_referenced(link_uri(&self.transfer_switches)).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerEquipmentType {
    RackPDU,
    FloorPDU,
    ManualTransferSwitch,
    AutomaticTransferSwitch,
    Switchgear,
    PowerShelf,
    Bus,
    BatteryShelf,
    #[serde(other)]
    Unknown,
}

/// A power distribution unit or transfer switch.
#[derive(Debug, Clone, Deserialize)]
pub struct PowerDistribution {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "EquipmentType", default)]
    pub equipment_type: Option<PowerEquipmentType>,
    #[serde(rename = "Manufacturer", default)]
    pub manufacturer: Option<String>,
    #[serde(rename = "Model", default)]
    pub model: Option<String>,
    #[serde(rename = "SerialNumber", default)]
    pub serial_number: Option<String>,
    #[serde(rename = "FirmwareVersion", default)]
    pub firmware_version: Option<String>,
    #[serde(rename = "AssetTag", default)]
    pub asset_tag: Option<String>,
    #[serde(rename = "UserLabel", default)]
    pub user_label: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Status,
    #[serde(rename = "Mains", default)]
    pub mains: Option<Link>,
    #[serde(rename = "Branches", default)]
    pub branches: Option<Link>,
    #[serde(rename = "Feeders", default)]
    pub feeders: Option<Link>,
    #[serde(rename = "Outlets", default)]
    pub outlets: Option<Link>,
    #[serde(rename = "Sensors", default)]
    pub sensors: Option<Link>,
}

impl_resource!(PowerDistribution);
updatable_fields!(PowerDistribution {
    "AssetTag" => asset_tag,
    "UserLabel" => user_label,
});

impl PowerDistribution {
    pub async fn get(client: &SharedClient, uri: &str) -> Result<Self> {
        common::get_object(client, uri).await
    }

    pub async fn list_referenced(client: &SharedClient, link: &str) -> ListResult<Self> {
        common::list_referenced(client, link).await
    }

    pub async fn update(&self) -> Result<()> {
        common::update(self).await
    }

    /// Input circuits.
    pub async fn mains(&self) -> ListResult<Circuit> {
        self.entity.list_referenced(link_uri(&self.mains)).await
    }

    /// Branch circuits.
    pub async fn branches(&self) -> ListResult<Circuit> {
        self.entity.list_referenced(link_uri(&self.branches)).await
    }

    pub async fn feeders(&self) -> ListResult<Circuit> {
        self.entity.list_referenced(link_uri(&self.feeders)).await
    }

    pub async fn outlets(&self) -> ListResult<Outlet> {
        self.entity.list_referenced(link_uri(&self.outlets)).await
    }

    pub async fn sensors(&self) -> ListResult<Sensor> {
        self.entity.list_referenced(link_uri(&self.sensors)).await
    }
}
