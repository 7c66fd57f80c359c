// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::client::SharedClient;
use crate::common::{self, impl_resource, Entity, ListResult, PowerState, Status};
use crate::error::Result;
use crate::updatable_fields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManagerType {
    ManagementController,
    EnclosureManager,
    #[serde(rename = "BMC")]
    Bmc,
    RackManager,
    AuxiliaryController,
    Service,
    FabricManager,
    #[serde(other)]
    Unknown,
}

/// A management controller, usually the BMC itself.
#[derive(Debug, Clone, Deserialize)]
pub struct Manager {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "ManagerType", default)]
    pub manager_type: Option<ManagerType>,
    #[serde(rename = "Model", default)]
    pub model: Option<String>,
    #[serde(rename = "FirmwareVersion", default)]
    pub firmware_version: Option<String>,
    #[serde(rename = "UUID", default)]
    pub uuid: Option<String>,
    #[serde(rename = "DateTime", default)]
    pub date_time: Option<String>,
    #[serde(rename = "DateTimeLocalOffset", default)]
    pub date_time_local_offset: Option<String>,
    #[serde(rename = "ServiceIdentification", default)]
    pub service_identification: Option<String>,
    #[serde(rename = "PowerState", default)]
    pub power_state: Option<PowerState>,
    #[serde(rename = "Status", default)]
    pub status: Status,
}

impl_resource!(Manager);
updatable_fields!(Manager {
    "DateTime" => date_time,
    "DateTimeLocalOffset" => date_time_local_offset,
    "ServiceIdentification" => service_identification,
});

impl Manager {
    pub async fn get(client: &SharedClient, uri: &str) -> Result<Self> {
        common::get_object(client, uri).await
    }

    pub async fn list_referenced(client: &SharedClient, link: &str) -> ListResult<Self> {
        common::list_referenced(client, link).await
    }

    pub async fn update(&self) -> Result<()> {
        common::update(self).await
    }
}
