// SPDX-License-Identifier: MIT OR Apache-2.0

//! Electrical circuits: mains, branches and feeders of a PDU.

use serde::{Deserialize, Serialize};

use crate::client::SharedClient;
use crate::common::{self, impl_resource, Entity, Link, ListResult, PowerState, Status};
use crate::error::Result;
use crate::resources::Outlet;
use crate::updatable_fields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CircuitType {
    Mains,
    Branch,
    Subfeed,
    Feeder,
    Bus,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakerState {
    Normal,
    Tripped,
    Off,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CircuitLinks {
    #[serde(rename = "Outlets", default)]
    pub outlets: Vec<Link>,
    #[serde(rename = "BranchCircuit", default)]
    pub branch_circuit: Option<Link>,
    #[serde(rename = "SourceCircuit", default)]
    pub source_circuit: Option<Link>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Circuit {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "CircuitType", default)]
    pub circuit_type: Option<CircuitType>,
    #[serde(rename = "PhaseWiringType", default)]
    pub phase_wiring_type: Option<String>,
    #[serde(rename = "NominalVoltage", default)]
    pub nominal_voltage: Option<String>,
    #[serde(rename = "RatedCurrentAmps", default)]
    pub rated_current_amps: Option<f64>,
    #[serde(rename = "BreakerState", default)]
    pub breaker_state: Option<BreakerState>,
    #[serde(rename = "PowerState", default)]
    pub power_state: Option<PowerState>,
    #[serde(rename = "CriticalCircuit", default)]
    pub critical_circuit: Option<bool>,
    #[serde(rename = "UserLabel", default)]
    pub user_label: Option<String>,
    #[serde(rename = "LocationIndicatorActive", default)]
    pub location_indicator_active: Option<bool>,
    #[serde(rename = "Status", default)]
    pub status: Status,
    #[serde(rename = "Links", default)]
    pub links: CircuitLinks,
}

impl_resource!(Circuit);
updatable_fields!(Circuit {
    "CriticalCircuit" => critical_circuit,
    "UserLabel" => user_label,
    "LocationIndicatorActive" => location_indicator_active,
});

impl Circuit {
    pub async fn get(client: &SharedClient, uri: &str) -> Result<Self> {
        common::get_object(client, uri).await
    }

    pub async fn list_referenced(client: &SharedClient, link: &str) -> ListResult<Self> {
        common::list_referenced(client, link).await
    }

    /// Send changed `CriticalCircuit`, `UserLabel` and `LocationIndicatorActive`.
    pub async fn update(&self) -> Result<()> {
        common::update(self).await
    }

    /// Outlets fed by this circuit.
    pub async fn outlets(&self) -> ListResult<Outlet> {
        self.entity.list_linked(&self.links.outlets).await
    }
}
