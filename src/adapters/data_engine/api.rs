//! Data engine API trait definitions
//!
//! [`DataEngineApi`] abstracts the remote dataset-hosting service: collaborator
//! lifecycle calls (mount, status, query, append, export) and quality
//! validation. [`ClientFactory`] hands out one short-lived handle per remote
//! operation so no connection state is shared between steps.

use super::models::{MountBody, QueryBody};
use crate::domain::{CollaboratorId, DataEngineError, QualityReport, ReportId};
use async_trait::async_trait;

/// Result type for raw data engine calls
pub type ApiResult<T> = std::result::Result<T, DataEngineError>;

/// Status code and raw body of a synchronous state-changing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status_code: u16,
    pub body: String,
}

impl ApiResponse {
    /// Create a new response
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    /// The `204 No Content` answer every state-changing call expects
    pub fn no_content() -> Self {
        Self::new(204, "")
    }

    /// Returns true for the expected `204 No Content`
    pub fn is_expected(&self) -> bool {
        self.status_code == 204
    }
}

/// One observation of a collaborator's lifecycle status
///
/// `status` is `None` when the response could not be read (non-2xx or a body
/// without a status field). Such a sample still counts as a poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSample {
    pub status_code: u16,
    pub status: Option<String>,
    pub body: String,
}

impl StatusSample {
    /// A readable sample reporting `status`
    pub fn readable(status: impl Into<String>) -> Self {
        let status = status.into();
        Self {
            status_code: 200,
            body: format!(r#"{{"status":"{status}"}}"#),
            status: Some(status),
        }
    }

    /// An unreadable sample
    pub fn unreadable(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            status: None,
            body: body.into(),
        }
    }
}

/// Answer to a quality validation start request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationStart {
    /// Validation is running and its report can be fetched under this ID
    Started(ReportId),
    /// Anything other than the "validation started" shape
    Rejected { status_code: u16, body: String },
}

/// Answer to a quality report fetch
#[derive(Debug, Clone, PartialEq)]
pub enum ReportPoll {
    Finished(QualityReport),
    Pending,
}

/// Remote dataset lifecycle and quality API
///
/// Implementations only translate calls to the wire. They never retry and
/// never interpret lifecycle status; that is left to the lifecycle driver.
#[async_trait]
pub trait DataEngineApi: Send + Sync {
    /// Mount (or initialize) a collaborator
    async fn mount(&self, id: &CollaboratorId, body: &MountBody) -> ApiResult<ApiResponse>;

    /// Read the collaborator's current lifecycle status
    async fn status(&self, id: &CollaboratorId) -> ApiResult<StatusSample>;

    /// Run a structured query, returning CSV text with a header row
    async fn query(&self, id: &CollaboratorId, body: &QueryBody) -> ApiResult<String>;

    /// Append a CSV file to a collaborator
    async fn append(
        &self,
        id: &CollaboratorId,
        payload: Vec<u8>,
        file_name: &str,
    ) -> ApiResult<ApiResponse>;

    /// Export a collaborator to its configured destination
    async fn export(&self, id: &CollaboratorId) -> ApiResult<ApiResponse>;

    /// Start a quality validation run
    async fn start_validation(&self, id: &CollaboratorId) -> ApiResult<ValidationStart>;

    /// Fetch a quality report
    async fn get_report(&self, report_id: &ReportId) -> ApiResult<ReportPoll>;
}

/// Source of short-lived data engine handles
pub trait ClientFactory: Send + Sync {
    /// Acquire a fresh client handle for a single remote operation
    fn create_client(&self) -> ApiResult<Box<dyn DataEngineApi>>;
}
