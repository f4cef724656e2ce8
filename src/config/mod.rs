//! Configuration management for fraudshare.
//!
//! Configuration comes from an optional TOML file plus environment variables.
//! Every setting has a default, so a deployment that only exports the
//! collaborator IDs (`ID_BANKALIST`, `ID_BANKBLIST`, `ID_BANKBAGG`) runs as-is.
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`DataEngineConfig`] - Data engine URL, token and timeout
//! - [`PipelineConfig`] - Bank ID, collaborator labels and poll budget
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [data_engine]
//! base_url = "https://engine.example.com"
//! token = "${DV_TOKEN}"
//!
//! [pipeline]
//! bank_id = "QPSBDEB1"
//! provider_labels = ["BANKALIST", "BANKBLIST"]
//! consumer_label = "BANKBAGG"
//! max_tries = 10
//! sleep_seconds = 1
//! ```
//!
//! # Environment Variables
//!
//! `${VAR_NAME}` placeholders in the file are substituted from the
//! environment. `DATA_ENGINE_URL`, `DV_TOKEN`, `BANK_ID`, `MAX_TRIES` and
//! `SLEEP_S` override the file, as do the `FRAUDSHARE_*` variables.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, DataEngineConfig, FraudShareConfig, LoggingConfig, PipelineConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
