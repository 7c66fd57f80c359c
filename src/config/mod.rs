// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration management for Redfish clients
//!
//! Connection settings live in a YAML profile file so scripts and tools can
//! share them.
//!
//! ```yaml
//! profile: lab
//! profiles:
//!   lab:
//!     endpoint: https://10.0.0.2
//!     username: admin
//!     password: secret
//!     insecure: true
//! ```
//!
//! # Environment Variables
//!
//! - `REDFISHCONFIG` - Path to the profile file (default: `~/.redfish/config`)
//! - `REDFISH_PROFILE` - Override the active profile
//! - `REDFISH_ENDPOINT` - Override the endpoint of the active profile
//! - `REDFISH_USERNAME` / `REDFISH_PASSWORD` - Override credentials
//! - `REDFISH_INSECURE` - Skip certificate verification
//!
//! # Example
//!
//! ```no_run
//! use redfish_api_rs::config::RedfishConfig;
//! use redfish_api_rs::RedfishClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RedfishConfig::load_with_env()?;
//!
//! if let Some(profile) = config.active_profile() {
//!     let client = RedfishClient::new(profile.to_client_config())?;
//! }
//! # Ok(())
//! # }
//! ```

mod redfishconfig;

pub use redfishconfig::{
    RedfishConfig, RedfishProfile, ENV_REDFISHCONFIG, ENV_REDFISH_ENDPOINT, ENV_REDFISH_INSECURE,
    ENV_REDFISH_PASSWORD, ENV_REDFISH_PROFILE, ENV_REDFISH_USERNAME,
};
