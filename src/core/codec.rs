//! CSV encoding of provider results and consumer payloads
//!
//! Providers answer queries with comma-delimited CSV that carries a header
//! row. The consumer expects the opposite: no header, columns in
//! [`OUTPUT_COLUMNS`](crate::domain::OUTPUT_COLUMNS) order.

use crate::domain::{AggregatedAccount, FraudRecord, FraudShareError, RecordSet, Result};

/// Decode a provider query result into records
///
/// Columns are matched by header name; extra columns are ignored. An empty
/// body decodes to an empty record set.
///
/// # Errors
///
/// Returns a serialization error if a required column is missing or a row
/// cannot be read.
pub fn decode_fraud_records(csv_text: &str) -> Result<RecordSet> {
    if csv_text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .from_reader(csv_text.as_bytes());

    reader
        .deserialize::<FraudRecord>()
        .enumerate()
        .map(|(idx, row)| {
            row.map_err(|e| {
                FraudShareError::Serialization(format!("Failed to read row {}: {e}", idx + 1))
            })
        })
        .collect()
}

/// Encode aggregated rows as a header-less CSV payload
///
/// # Errors
///
/// Returns a serialization error if a row cannot be written.
pub fn encode_aggregated_accounts(rows: &[AggregatedAccount]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .has_headers(false)
        .from_writer(Vec::new());

    for row in rows {
        writer
            .write_record(row.to_csv_fields()?)
            .map_err(|e| FraudShareError::Serialization(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| FraudShareError::Serialization(e.to_string()))
}
