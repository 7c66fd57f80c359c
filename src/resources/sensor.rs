// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::client::SharedClient;
use crate::common::{self, impl_resource, Entity, ListResult, Status};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingType {
    Temperature,
    Humidity,
    Power,
    EnergykWh,
    EnergyJoules,
    EnergyWh,
    ChargeAh,
    Voltage,
    Current,
    Frequency,
    Pressure,
    PressurekPa,
    LiquidLevel,
    Rotational,
    AirFlow,
    LiquidFlow,
    Barometric,
    Altitude,
    Percent,
    AbsoluteHumidity,
    Heat,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Threshold {
    #[serde(rename = "Reading", default)]
    pub reading: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Thresholds {
    #[serde(rename = "UpperCritical", default)]
    pub upper_critical: Option<Threshold>,
    #[serde(rename = "UpperCaution", default)]
    pub upper_caution: Option<Threshold>,
    #[serde(rename = "LowerCaution", default)]
    pub lower_caution: Option<Threshold>,
    #[serde(rename = "LowerCritical", default)]
    pub lower_critical: Option<Threshold>,
}

/// A sensor reading. Sensors are read-only.
#[derive(Debug, Clone, Deserialize)]
pub struct Sensor {
    #[serde(flatten)]
    pub entity: Entity,
    #[serde(rename = "ReadingType", default)]
    pub reading_type: Option<ReadingType>,
    #[serde(rename = "Reading", default)]
    pub reading: Option<f64>,
    #[serde(rename = "ReadingUnits", default)]
    pub reading_units: Option<String>,
    #[serde(rename = "PhysicalContext", default)]
    pub physical_context: Option<String>,
    #[serde(rename = "Thresholds", default)]
    pub thresholds: Thresholds,
    #[serde(rename = "Status", default)]
    pub status: Status,
}

impl_resource!(Sensor);

impl Sensor {
    pub async fn get(client: &SharedClient, uri: &str) -> Result<Self> {
        common::get_object(client, uri).await
    }

    pub async fn list_referenced(client: &SharedClient, link: &str) -> ListResult<Self> {
        common::list_referenced(client, link).await
    }

    /// Whether the reading is at or past a critical threshold.
    pub fn is_critical(&self) -> bool {
        let Some(reading) = self.reading else {
            return false;
        };
        let upper = self
            .thresholds
            .upper_critical
            .as_ref()
            .and_then(|t| t.reading);
        let lower = self
            .thresholds
            .lower_critical
            .as_ref()
            .and_then(|t| t.reading);
        upper.is_some_and(|u| reading >= u) || lower.is_some_and(|l| reading <= l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_and_thresholds() {
        let sensor: Sensor = serde_json::from_str(
            r#"{
                "@odata.id": "/redfish/v1/Chassis/1U/Sensors/CPU1Temp",
                "Id": "CPU1Temp",
                "ReadingType": "Temperature",
                "Reading": 91,
                "ReadingUnits": "Cel",
                "Thresholds": {
                    "UpperCritical": {"Reading": 90},
                    "UpperCaution": {"Reading": 80}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(sensor.reading_type, Some(ReadingType::Temperature));
        assert_eq!(sensor.reading, Some(91.0));
        assert!(sensor.is_critical());
    }

    #[test]
    fn test_no_reading_is_not_critical() {
        let sensor: Sensor = serde_json::from_str(r#"{"Id":"Fan1"}"#).unwrap();
        assert!(!sensor.is_critical());
    }
}
