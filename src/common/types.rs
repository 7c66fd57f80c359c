// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property types shared across Redfish schemas.

use serde::{Deserialize, Serialize};

/// A reference to another resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "@odata.id", default)]
    pub odata_id: String,
}

impl Link {
    pub fn new(odata_id: impl Into<String>) -> Self {
        Self {
            odata_id: odata_id.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.odata_id.is_empty()
    }
}

/// Link to an optional navigation property: `None` and an empty link both
/// mean "absent".
pub(crate) fn link_uri(link: &Option<Link>) -> &str {
    link.as_ref().map(|l| l.odata_id.as_str()).unwrap_or_default()
}

/// Health of a resource or its subordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Health {
    #[serde(rename = "OK")]
    Ok,
    Warning,
    Critical,
    #[serde(other)]
    Unknown,
}

/// Known state of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    Enabled,
    Disabled,
    StandbyOffline,
    StandbySpare,
    InTest,
    Starting,
    Absent,
    UnavailableOffline,
    Deferring,
    Quiesced,
    Updating,
    Qualified,
    #[serde(other)]
    Unknown,
}

/// The `Status` object most resources carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    #[serde(rename = "State", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,
    #[serde(rename = "Health", default, skip_serializing_if = "Option::is_none")]
    pub health: Option<Health>,
    #[serde(rename = "HealthRollup", default, skip_serializing_if = "Option::is_none")]
    pub health_rollup: Option<Health>,
}

impl Status {
    /// Whether the resource reports itself enabled and healthy.
    pub fn is_healthy(&self) -> bool {
        self.state == Some(State::Enabled) && self.health == Some(Health::Ok)
    }
}

/// Indicator LED state. Deprecated by Redfish in favour of
/// `LocationIndicatorActive`, but still the only control on many BMCs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorLed {
    Lit,
    Blinking,
    Off,
    #[serde(other)]
    Unknown,
}

/// Power state of a system, chassis, outlet or circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerState {
    On,
    Off,
    PoweringOn,
    PoweringOff,
    Paused,
    #[serde(other)]
    Unknown,
}
