//! Data engine API models
//!
//! Request and response structures for the data engine REST API. These models
//! are separate from domain models and only handle the wire format.

use crate::domain::{QualityReport, FRAUD_RECORD_COLUMNS, OUTPUT_COLUMNS, OUTPUT_COLUMN_TYPE};
use serde::{Deserialize, Serialize};

/// Column declaration sent when initializing a consumer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,

    #[serde(rename = "type")]
    pub column_type: String,
}

/// Body of a mount request
///
/// Providers are mounted with an empty body. Consumers are mounted with the
/// column schema they should be created with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<ColumnSpec>>,
}

impl MountBody {
    /// Empty mount body, used for providers
    pub fn empty() -> Self {
        Self::default()
    }

    /// Mount body declaring the given columns
    pub fn with_columns(columns: Vec<ColumnSpec>) -> Self {
        Self {
            columns: Some(columns),
        }
    }

    /// Mount body declaring the aggregated output schema
    pub fn output_schema() -> Self {
        Self::with_columns(
            OUTPUT_COLUMNS
                .iter()
                .map(|name| ColumnSpec {
                    name: (*name).to_string(),
                    column_type: OUTPUT_COLUMN_TYPE.to_string(),
                })
                .collect(),
        )
    }
}

/// Reference to a collaborator property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRef {
    pub property: String,
}

impl PropertyRef {
    fn new(property: &str) -> Self {
        Self {
            property: property.to_string(),
        }
    }
}

/// One selected property of a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectItem {
    pub property: PropertyRef,
}

/// String literal operand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringValue {
    #[serde(rename = "stringValue")]
    pub string_value: String,
}

/// Equality predicate between a property and a string literal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EqualsClause {
    #[serde(rename = "equalA")]
    pub equal_a: PropertyRef,

    #[serde(rename = "equalB")]
    pub equal_b: StringValue,
}

/// Structured query sent to a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryBody {
    pub select: Vec<SelectItem>,

    #[serde(rename = "where")]
    pub filter: EqualsClause,
}

impl QueryBody {
    /// Query for the flagged accounts reported against `bank_id`
    pub fn fraudulent_accounts(bank_id: &str) -> Self {
        Self {
            select: FRAUD_RECORD_COLUMNS
                .iter()
                .map(|column| SelectItem {
                    property: PropertyRef::new(column),
                })
                .collect(),
            filter: EqualsClause {
                equal_a: PropertyRef::new("bank_id"),
                equal_b: StringValue {
                    string_value: bank_id.to_string(),
                },
            },
        }
    }
}

/// Status endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Response of a successfully started quality validation
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationStartedResponse {
    pub id: String,
}

/// Quality report endpoint response
///
/// A report is finished once both rule collections are present.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportResponse {
    #[serde(default)]
    pub fail: Option<Vec<serde_json::Value>>,

    #[serde(default)]
    pub error: Option<Vec<serde_json::Value>>,
}

impl ReportResponse {
    /// Convert into a finished report, or `None` while it is still pending
    pub fn into_finished(self) -> Option<QualityReport> {
        match (self.fail, self.error) {
            (Some(fail), Some(error)) => Some(QualityReport { fail, error }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_mount_body_serializes_to_empty_object() {
        let body = serde_json::to_value(MountBody::empty()).unwrap();
        assert_eq!(body, json!({}));
    }

    #[test]
    fn test_output_schema_mount_body() {
        let body = serde_json::to_value(MountBody::output_schema()).unwrap();
        assert_eq!(
            body,
            json!({
                "columns": [
                    {"name": "account_number", "type": "VARCHAR"},
                    {"name": "reporter_bic_list", "type": "VARCHAR"},
                    {"name": "date_added_list", "type": "VARCHAR"},
                    {"name": "critical_account_list", "type": "VARCHAR"},
                    {"name": "line_count", "type": "VARCHAR"}
                ]
            })
        );
    }

    #[test]
    fn test_fraudulent_accounts_query_shape() {
        let body = serde_json::to_value(QueryBody::fraudulent_accounts("QPSBDEB1")).unwrap();
        assert_eq!(
            body,
            json!({
                "select": [
                    {"property": {"property": "account_number"}},
                    {"property": {"property": "reporter_bic"}},
                    {"property": {"property": "critical_account"}},
                    {"property": {"property": "date_added"}}
                ],
                "where": {
                    "equalA": {"property": "bank_id"},
                    "equalB": {"stringValue": "QPSBDEB1"}
                }
            })
        );
    }

    #[test]
    fn test_report_response_finished() {
        let resp: ReportResponse =
            serde_json::from_value(json!({"fail": [], "error": ["boom"]})).unwrap();
        let report = resp.into_finished().unwrap();
        assert!(report.fail.is_empty());
        assert_eq!(report.error.len(), 1);
    }

    #[test]
    fn test_report_response_pending() {
        let resp: ReportResponse = serde_json::from_value(json!({"state": "running"})).unwrap();
        assert!(resp.into_finished().is_none());
    }
}
