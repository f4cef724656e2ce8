//! Fraud record and aggregated account models
//!
//! A [`FraudRecord`] is one row read back from a provider query. Rows from all
//! providers are concatenated into a [`RecordSet`] and grouped into one
//! [`AggregatedAccount`] per account number before being appended to the
//! consumer.

use serde::{Deserialize, Serialize};

/// Column names selected from every provider, in query order
pub const FRAUD_RECORD_COLUMNS: [&str; 4] = [
    "account_number",
    "reporter_bic",
    "critical_account",
    "date_added",
];

/// Columns declared on the consumer when it is initialized, in append order
pub const OUTPUT_COLUMNS: [&str; 5] = [
    "account_number",
    "reporter_bic_list",
    "date_added_list",
    "critical_account_list",
    "line_count",
];

/// Column type used for every output column
pub const OUTPUT_COLUMN_TYPE: &str = "VARCHAR";

/// One flagged account row reported by a provider
///
/// All fields are kept as the opaque text the provider returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudRecord {
    pub account_number: String,
    pub reporter_bic: String,
    pub critical_account: String,
    pub date_added: String,
}

impl FraudRecord {
    /// Create a new record
    pub fn new(
        account_number: impl Into<String>,
        reporter_bic: impl Into<String>,
        critical_account: impl Into<String>,
        date_added: impl Into<String>,
    ) -> Self {
        Self {
            account_number: account_number.into(),
            reporter_bic: reporter_bic.into(),
            critical_account: critical_account.into(),
            date_added: date_added.into(),
        }
    }
}

/// Ordered rows drawn from one or more providers
pub type RecordSet = Vec<FraudRecord>;

/// One output row per distinct account number
///
/// The three list fields hold the per-row values in the order the rows were
/// first seen, so `reporter_bic_list[i]`, `date_added_list[i]` and
/// `critical_account_list[i]` all come from the same input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedAccount {
    pub account_number: String,
    pub reporter_bic_list: Vec<String>,
    pub date_added_list: Vec<String>,
    pub critical_account_list: Vec<String>,
    pub line_count: usize,
}

impl AggregatedAccount {
    /// Start an empty group for an account number
    pub fn new(account_number: impl Into<String>) -> Self {
        Self {
            account_number: account_number.into(),
            reporter_bic_list: Vec::new(),
            date_added_list: Vec::new(),
            critical_account_list: Vec::new(),
            line_count: 0,
        }
    }

    /// Add one contributing row to the group
    pub fn push(&mut self, record: &FraudRecord) {
        self.reporter_bic_list.push(record.reporter_bic.clone());
        self.date_added_list.push(record.date_added.clone());
        self.critical_account_list
            .push(record.critical_account.clone());
        self.line_count += 1;
    }

    /// Render the row as CSV fields in [`OUTPUT_COLUMNS`] order
    ///
    /// List cells are encoded as JSON arrays of strings.
    pub fn to_csv_fields(&self) -> serde_json::Result<[String; 5]> {
        Ok([
            self.account_number.clone(),
            serde_json::to_string(&self.reporter_bic_list)?,
            serde_json::to_string(&self.date_added_list)?,
            serde_json::to_string(&self.critical_account_list)?,
            self.line_count.to_string(),
        ])
    }
}

/// Role a collaborator plays in the sharing workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollaboratorRole {
    /// Supplies input records
    Provider,
    /// Receives the aggregated output
    Consumer,
}

impl std::fmt::Display for CollaboratorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollaboratorRole::Provider => write!(f, "provider"),
            CollaboratorRole::Consumer => write!(f, "consumer"),
        }
    }
}

/// Outcome of a finished quality validation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Rules that failed
    #[serde(default)]
    pub fail: Vec<serde_json::Value>,

    /// Rules that could not be evaluated
    #[serde(default)]
    pub error: Vec<serde_json::Value>,
}

impl QualityReport {
    /// A report is clean when nothing failed and nothing errored
    pub fn is_clean(&self) -> bool {
        self.fail.is_empty() && self.error.is_empty()
    }
}
