//! Data engine adapter
//!
//! The data engine hosts every collaborator dataset. This module defines the
//! boundary traits the core depends on, the wire models, and the HTTP
//! implementation used in production.

pub mod api;
pub mod http;
pub mod models;

pub use api::{
    ApiResponse, ApiResult, ClientFactory, DataEngineApi, ReportPoll, StatusSample,
    ValidationStart,
};
pub use http::{HttpClientFactory, HttpDataEngineClient};
pub use models::{ColumnSpec, MountBody, QueryBody};
