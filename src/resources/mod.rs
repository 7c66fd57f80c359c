// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strongly typed wrappers for Redfish resources.
//!
//! Each resource decodes the properties this crate understands and ignores
//! the rest. Resources that accept writes declare which properties a PATCH
//! may carry; see [`crate::common::Updatable`].

mod chassis;
mod circuit;
mod computer_system;
mod manager;
mod outlet;
mod power_distribution;
mod sensor;
mod service_root;

pub use chassis::{Chassis, ChassisLinks, ChassisType};
pub use circuit::{BreakerState, Circuit, CircuitLinks, CircuitType};
pub use computer_system::{
    Boot, BootSource, BootSourceOverrideEnabled, BootSourceOverrideMode, ComputerSystem,
    ComputerSystemLinks, MemorySummary, ProcessorSummary,
};
pub use manager::{Manager, ManagerType};
pub use outlet::Outlet;
pub use power_distribution::{PowerDistribution, PowerEquipment, PowerEquipmentType};
pub use sensor::{ReadingType, Sensor, Threshold, Thresholds};
pub use service_root::{get_service_root, ServiceRoot, SERVICE_ROOT};
