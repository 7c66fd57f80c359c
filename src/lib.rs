// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod client;
pub mod common;
pub mod config;
pub mod error;
pub mod resources;
pub mod runtime;
pub mod testkit;

pub use client::{Client, RedfishClient, RedfishClientConfig, SharedClient};
pub use common::{FailureReport, ListError, ListResult, Resource, Updatable};
pub use config::{RedfishConfig, RedfishProfile};
pub use error::{RedfishError, Result, ServiceError};
pub use resources::{get_service_root, ServiceRoot};

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
