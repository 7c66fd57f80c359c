// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::Deserialize;

use crate::client::SharedClient;
use crate::common::{self, impl_resource, Entity, ListResult, PowerState, Status};
use crate::error::Result;
use crate::updatable_fields;

#[derive(Debug, Clone, Deserialize)]
pub struct Outlet {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "OutletType", default)]
    pub outlet_type: Option<String>,
    #[serde(rename = "NominalVoltage", default)]
    pub nominal_voltage: Option<String>,
    #[serde(rename = "RatedCurrentAmps", default)]
    pub rated_current_amps: Option<f64>,
    #[serde(rename = "PowerState", default)]
    pub power_state: Option<PowerState>,
    #[serde(rename = "UserLabel", default)]
    pub user_label: Option<String>,
    #[serde(rename = "LocationIndicatorActive", default)]
    pub location_indicator_active: Option<bool>,
    #[serde(rename = "PowerOnDelaySeconds", default)]
    pub power_on_delay_seconds: Option<f64>,
    #[serde(rename = "PowerOffDelaySeconds", default)]
    pub power_off_delay_seconds: Option<f64>,
    #[serde(rename = "Status", default)]
    pub status: Status,
}

impl_resource!(Outlet);
updatable_fields!(Outlet {
    "UserLabel" => user_label,
    "LocationIndicatorActive" => location_indicator_active,
    "PowerOnDelaySeconds" => power_on_delay_seconds,
    "PowerOffDelaySeconds" => power_off_delay_seconds,
});

impl Outlet {
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
