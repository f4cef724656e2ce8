//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Console output
//! - JSON-formatted local file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use fraudshare::logging::init_logging;
//! use fraudshare::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of a pipeline step
///
/// # Example
///
/// ```no_run
/// use fraudshare::log_step_start;
/// use fraudshare::core::pipeline::PipelineStep;
///
/// log_step_start!(PipelineStep::MountProviders);
/// ```
#[macro_export]
macro_rules! log_step_start {
    ($step:expr) => {
        tracing::info!(step = %$step, "Starting pipeline step");
    };
}

/// Log the successful end of a pipeline step
///
/// # Example
///
/// ```no_run
/// use fraudshare::log_step_success;
/// use fraudshare::core::pipeline::PipelineStep;
///
/// log_step_success!(PipelineStep::MountProviders);
/// log_step_success!(PipelineStep::ExportResults, "successfully exported results");
/// ```
#[macro_export]
macro_rules! log_step_success {
    ($step:expr) => {
        tracing::info!(step = %$step, "Pipeline step succeeded");
    };
    ($step:expr, $message:expr) => {
        tracing::info!(step = %$step, "{}", $message);
    };
}
