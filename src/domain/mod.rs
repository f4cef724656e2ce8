//! Domain models and types for fraudshare.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`CollaboratorId`], [`ReportId`])
//! - **Record models** ([`FraudRecord`], [`AggregatedAccount`], [`QualityReport`])
//! - **Error types** ([`FraudShareError`], [`DataEngineError`], [`LifecycleError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations outside the lifecycle driver return
//! [`Result<T, FraudShareError>`]:
//!
//! ```rust,no_run
//! use fraudshare::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = fraudshare::config::load_config(Some("fraudshare.toml"))?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{DataEngineError, FraudShareError, LifecycleError};
pub use ids::{CollaboratorId, ReportId};
pub use record::{
    AggregatedAccount, CollaboratorRole, FraudRecord, QualityReport, RecordSet,
    FRAUD_RECORD_COLUMNS, OUTPUT_COLUMNS, OUTPUT_COLUMN_TYPE,
};
pub use result::Result;
