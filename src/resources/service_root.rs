// SPDX-License-Identifier: MIT OR Apache-2.0

//! The service root, the entry point of every Redfish service.

use serde::Deserialize;

use crate::client::SharedClient;
use crate::common::{self, impl_resource, link_uri, Entity, Link, ListResult};
use crate::error::Result;
use crate::resources::{Chassis, ComputerSystem, Manager, PowerEquipment};

/// Well-known URI of the service root.
pub const SERVICE_ROOT: &str = "/redfish/v1";

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceRoot {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "RedfishVersion", default)]
    pub redfish_version: Option<String>,
    #[serde(rename = "UUID", default)]
    pub uuid: Option<String>,
    #[serde(rename = "Vendor", default)]
    pub vendor: Option<String>,
    #[serde(rename = "Product", default)]
    pub product: Option<String>,
    #[serde(rename = "Chassis", default)]
    pub chassis: Option<Link>,
    #[serde(rename = "Systems", default)]
    pub systems: Option<Link>,
    #[serde(rename = "Managers", default)]
    pub managers: Option<Link>,
    #[serde(rename = "PowerEquipment", default)]
    pub power_equipment: Option<Link>,
}

impl_resource!(ServiceRoot);

/// Fetch the service root.
pub async fn get_service_root(client: &SharedClient) -> Result<ServiceRoot> {
    common::get_object(client, SERVICE_ROOT).await
}

impl ServiceRoot {
    pub async fn get(client: &SharedClient) -> Result<Self> {
        get_service_root(client).await
    }

    pub async fn chassis(&self) -> ListResult<Chassis> {
        self.entity.list_referenced(link_uri(&self.chassis)).await
    }

    pub async fn systems(&self) -> ListResult<ComputerSystem> {
        self.entity.list_referenced(link_uri(&self.systems)).await
    }

    pub async fn managers(&self) -> ListResult<Manager> {
        self.entity.list_referenced(link_uri(&self.managers)).await
    }

    /// The power equipment inventory, if the service exposes one.
    pub async fn power_equipment(&self) -> Result<Option<PowerEquipment>> {
        let uri = link_uri(&self.power_equipment);
        if uri.is_empty() {
            return Ok(None);
        }
        let client = self.entity.client()?;
        PowerEquipment::get(client, uri).await.map(Some)
    }
}
