//! Domain error types
//!
//! This module defines the error hierarchy for fraudshare. Errors are
//! domain-specific and don't expose third-party types.

use super::record::CollaboratorRole;
use thiserror::Error;

/// Main fraudshare error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum FraudShareError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Data engine transport or response errors
    #[error("Data engine error: {0}")]
    DataEngine(#[from] DataEngineError),

    /// Collaborator lifecycle failures
    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Data engine errors
///
/// Errors that occur while talking to the data engine API.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum DataEngineError {
    /// Failed to build a client or reach the server
    #[error("Failed to connect to data engine: {0}")]
    ConnectionFailed(String),

    /// Request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Response body did not have the expected shape
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Query returned a non-success status
    #[error("Query failed: {status} - {message}")]
    QueryFailed { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Reasons a collaborator lifecycle operation did not succeed
///
/// Every driver operation reports one of these instead of a bare boolean so
/// the pipeline can log exactly why a step stopped.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The collaborator reported the `error` status while being polled
    #[error("collaborator {collaborator_id} entered the error state while waiting for '{expected}'")]
    ErrorState {
        collaborator_id: String,
        expected: String,
    },

    /// The expected status was not reached within the poll budget
    #[error(
        "collaborator {collaborator_id} did not reach '{expected}' after {tries} tries (last status: {})",
        .last_status.as_deref().unwrap_or("<unreadable>")
    )]
    RetriesExhausted {
        collaborator_id: String,
        expected: String,
        last_status: Option<String>,
        tries: u32,
    },

    /// The validation start call did not answer with a report id
    #[error("could not start quality validation for {role} {collaborator_id}: {detail}")]
    ValidationNotStarted {
        collaborator_id: String,
        role: CollaboratorRole,
        detail: String,
    },

    /// No finished quality report appeared within the fixed budget
    #[error("quality report {report_id} was not finished after {tries} tries")]
    ReportUnavailable { report_id: String, tries: u32 },

    /// The quality report listed failed or errored rules
    #[error("quality check failed for {role} {collaborator_id}: {failed} failed, {errored} errored")]
    QualityCheckFailed {
        collaborator_id: String,
        role: CollaboratorRole,
        failed: usize,
        errored: usize,
    },

    /// A client handle could not be acquired or the call itself failed
    #[error("data engine call '{operation}' failed for {collaborator_id}: {source}")]
    Call {
        operation: &'static str,
        collaborator_id: String,
        #[source]
        source: DataEngineError,
    },

    /// Provider query results could not be decoded
    #[error("could not decode query results from {collaborator_id}: {detail}")]
    Decode {
        collaborator_id: String,
        detail: String,
    },

    /// Aggregated rows could not be encoded for appending
    #[error("could not encode rows for {collaborator_id}: {detail}")]
    Encode {
        collaborator_id: String,
        detail: String,
    },
}

impl LifecycleError {
    /// Wrap a data engine error raised by `operation` on a collaborator
    pub fn call(
        operation: &'static str,
        collaborator_id: impl Into<String>,
        source: DataEngineError,
    ) -> Self {
        LifecycleError::Call {
            operation,
            collaborator_id: collaborator_id.into(),
            source,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for FraudShareError {
    fn from(err: std::io::Error) -> Self {
        FraudShareError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for FraudShareError {
    fn from(err: serde_json::Error) -> Self {
        FraudShareError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for FraudShareError {
    fn from(err: toml::de::Error) -> Self {
        FraudShareError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<reqwest::Error> for DataEngineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            DataEngineError::Timeout(err.to_string())
        } else if err.is_builder() {
            DataEngineError::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            DataEngineError::InvalidResponse(err.to_string())
        } else {
            DataEngineError::ConnectionFailed(err.to_string())
        }
    }
}
