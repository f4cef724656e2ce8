//! Configuration schema types
//!
//! This module defines the configuration structure for fraudshare. Every
//! section has defaults so the job can run from environment variables alone.

use crate::config::SecretString;
use crate::domain::{CollaboratorId, FraudShareError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main fraudshare configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FraudShareConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Data engine connection
    #[serde(default)]
    pub data_engine: DataEngineConfig,

    /// Pipeline parameters
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FraudShareConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> std::result::Result<(), String> {
        self.application.validate()?;
        self.data_engine.validate()?;
        self.pipeline.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Data engine connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEngineConfig {
    /// Base URL of the data engine API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent with every request (optional)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub token: Option<SecretString>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl DataEngineConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.base_url.is_empty() {
            return Err("data_engine.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("data_engine.base_url must start with http:// or https://".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("data_engine.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for DataEngineConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Bank identifier used to filter provider queries
    #[serde(default = "default_bank_id")]
    pub bank_id: String,

    /// Logical labels of the providers, in processing order
    #[serde(default = "default_provider_labels")]
    pub provider_labels: Vec<String>,

    /// Logical label of the consumer
    #[serde(default = "default_consumer_label")]
    pub consumer_label: String,

    /// Maximum number of status re-polls per lifecycle transition
    #[serde(default = "default_max_tries")]
    pub max_tries: u32,

    /// Seconds to sleep between status polls
    #[serde(default = "default_sleep_seconds")]
    pub sleep_seconds: u64,

    /// Collaborator IDs by label, used when no `ID_<LABEL>` variable is set
    #[serde(default)]
    pub collaborator_ids: HashMap<String, String>,
}

impl PipelineConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.bank_id.trim().is_empty() {
            return Err("pipeline.bank_id cannot be empty".to_string());
        }

        if self.provider_labels.is_empty() {
            return Err("pipeline.provider_labels cannot be empty".to_string());
        }

        if let Some(label) = self
            .provider_labels
            .iter()
            .chain(std::iter::once(&self.consumer_label))
            .find(|label| label.trim().is_empty())
        {
            return Err(format!("pipeline contains an empty collaborator label: '{label}'"));
        }

        if self.provider_labels.contains(&self.consumer_label) {
            return Err(format!(
                "pipeline.consumer_label '{}' is also listed as a provider",
                self.consumer_label
            ));
        }

        if self.max_tries == 0 {
            return Err("pipeline.max_tries must be > 0".to_string());
        }

        Ok(())
    }

    /// Resolve the collaborator ID for a logical label
    ///
    /// The `ID_<LABEL>` environment variable wins over the
    /// `collaborator_ids` table.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if neither source provides a usable ID.
    pub fn resolve_collaborator(&self, label: &str) -> Result<CollaboratorId> {
        let env_key = format!("ID_{label}");
        let raw = std::env::var(&env_key)
            .ok()
            .or_else(|| self.collaborator_ids.get(label).cloned())
            .ok_or_else(|| {
                FraudShareError::Configuration(format!(
                    "No collaborator ID for '{label}': set {env_key} or pipeline.collaborator_ids.{label}"
                ))
            })?;

        CollaboratorId::new(raw).map_err(|e| {
            FraudShareError::Configuration(format!("Invalid collaborator ID for '{label}': {e}"))
        })
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            bank_id: default_bank_id(),
            provider_labels: default_provider_labels(),
            consumer_label: default_consumer_label(),
            max_tries: default_max_tries(),
            sleep_seconds: default_sleep_seconds(),
            collaborator_ids: HashMap::new(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> std::result::Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_bank_id() -> String {
    "QPSBDEB1".to_string()
}

fn default_provider_labels() -> Vec<String> {
    vec!["BANKALIST".to_string(), "BANKBLIST".to_string()]
}

fn default_consumer_label() -> String {
    "BANKBAGG".to_string()
}

fn default_max_tries() -> u32 {
    10
}

fn default_sleep_seconds() -> u64 {
    1
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
