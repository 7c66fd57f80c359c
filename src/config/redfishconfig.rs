// SPDX-License-Identifier: MIT OR Apache-2.0

//! Redfish profile file parser
//!
//! A profile file (typically `~/.redfish/config`) names the services a user
//! talks to and how to reach them.
//!
//! # Example
//!
//! ```no_run
//! use redfish_api_rs::config::RedfishConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RedfishConfig::load_default()?;
//!
//! if let Some(profile) = config.active_profile() {
//!     println!("Endpoint: {}", profile.endpoint);
//! }
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::client::RedfishClientConfig;
use crate::error::{RedfishError, Result};

/// Path to the profile file.
pub const ENV_REDFISHCONFIG: &str = "REDFISHCONFIG";
/// Name of the profile to use instead of the file's `profile`.
pub const ENV_REDFISH_PROFILE: &str = "REDFISH_PROFILE";
pub const ENV_REDFISH_ENDPOINT: &str = "REDFISH_ENDPOINT";
pub const ENV_REDFISH_USERNAME: &str = "REDFISH_USERNAME";
pub const ENV_REDFISH_PASSWORD: &str = "REDFISH_PASSWORD";
/// `1`, `true` or `yes` disables certificate verification.
pub const ENV_REDFISH_INSECURE: &str = "REDFISH_INSECURE";

const DEFAULT_PROFILE: &str = "default";

/// The whole profile file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RedfishConfig {
    /// The currently active profile name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    #[serde(default)]
    pub profiles: HashMap<String, RedfishProfile>,
}

/// Connection settings for one Redfish service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RedfishProfile {
    /// Base URL of the service, e.g. `https://bmc.example.com`
    pub endpoint: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Path to a PEM bundle trusted for this service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl RedfishConfig {
    /// Load configuration from the default location (~/.redfish/config)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The home directory cannot be determined
    /// - The config file cannot be read
    /// - The config file is malformed
    #[allow(clippy::result_large_err)]
    pub fn load_default() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is malformed YAML
    #[allow(clippy::result_large_err)]
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RedfishError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    #[allow(clippy::result_large_err)]
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| RedfishError::Config(format!("Failed to parse config YAML: {}", e)))
    }

    /// Get the default config file path (~/.redfish/config)
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined
    #[allow(clippy::result_large_err)]
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| {
            RedfishError::Config("Could not determine home directory".to_string())
        })?;

        Ok(home.join(".redfish").join("config"))
    }

    /// Get the path to the config file, respecting the REDFISHCONFIG environment variable
    #[allow(clippy::result_large_err)]
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(env_path) = std::env::var(ENV_REDFISHCONFIG) {
            Ok(PathBuf::from(env_path))
        } else {
            Self::default_path()
        }
    }

    /// Load the profile file and apply `REDFISH_*` environment overrides.
    ///
    /// A missing file is not an error when `REDFISH_ENDPOINT` is set; the
    /// result then holds a single `default` profile built from the
    /// environment.
    #[allow(clippy::result_large_err)]
    pub fn load_with_env() -> Result<Self> {
        let path = Self::config_path()?;
        let loaded = if path.exists() {
            Some(Self::load_from_path(&path)?)
        } else {
            None
        };
        Self::with_overrides(loaded, |key| std::env::var(key).ok())
    }

    #[allow(clippy::result_large_err)]
    fn with_overrides<F>(loaded: Option<Self>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(ENV_REDFISH_ENDPOINT).filter(|e| !e.is_empty());
        let mut config = match (loaded, &endpoint) {
            (Some(config), _) => config,
            (None, Some(_)) => Self::default(),
            (None, None) => {
                return Err(RedfishError::Config(format!(
                    "No config file found and {} is not set",
                    ENV_REDFISH_ENDPOINT
                )))
            }
        };

        if let Some(name) = lookup(ENV_REDFISH_PROFILE).filter(|n| !n.is_empty()) {
            config.profile = Some(name);
        }
        let name = config
            .profile
            .clone()
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

        let has_overrides = endpoint.is_some()
            || [ENV_REDFISH_USERNAME, ENV_REDFISH_PASSWORD, ENV_REDFISH_INSECURE]
                .iter()
                .any(|key| lookup(key).is_some());
        if !has_overrides {
            return Ok(config);
        }

        if !config.profiles.contains_key(&name) && endpoint.is_none() {
            return Err(RedfishError::Config(format!(
                "Profile '{}' not found and {} is not set",
                name, ENV_REDFISH_ENDPOINT
            )));
        }
        let profile = config.profiles.entry(name.clone()).or_default();
        if let Some(endpoint) = endpoint {
            profile.endpoint = endpoint;
        }
        if let Some(username) = lookup(ENV_REDFISH_USERNAME) {
            profile.username = Some(username);
        }
        if let Some(password) = lookup(ENV_REDFISH_PASSWORD) {
            profile.password = Some(password);
        }
        if let Some(insecure) = lookup(ENV_REDFISH_INSECURE) {
            profile.insecure = matches!(
                insecure.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }
        config.profile = Some(name);

        Ok(config)
    }

    /// Get the currently active profile
    ///
    /// Returns `None` if no active profile is set or if it doesn't exist
    pub fn active_profile(&self) -> Option<&RedfishProfile> {
        self.profile
            .as_ref()
            .and_then(|name| self.profiles.get(name))
    }

    pub fn get_profile(&self, name: &str) -> Option<&RedfishProfile> {
        self.profiles.get(name)
    }

    /// List all available profile names
    pub fn profile_names(&self) -> Vec<&String> {
        self.profiles.keys().collect()
    }
}

impl RedfishProfile {
    /// Transport configuration for this profile.
    #[must_use]
    pub fn to_client_config(&self) -> RedfishClientConfig {
        let mut config = RedfishClientConfig {
            endpoint: self.endpoint.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            ca_path: self.ca.clone(),
            insecure: self.insecure,
            ..Default::default()
        };
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        config
    }
}
