//! Grouping of provider records into one row per account

use crate::domain::{AggregatedAccount, FraudRecord};
use std::collections::BTreeMap;

/// Group records by account number
///
/// Produces exactly one [`AggregatedAccount`] per distinct account number.
/// Within an account, list values keep the order in which their rows appear
/// in `records`. Accounts are returned in ascending account-number order.
pub fn aggregate(records: &[FraudRecord]) -> Vec<AggregatedAccount> {
    let mut groups: BTreeMap<&str, AggregatedAccount> = BTreeMap::new();

    for record in records {
        groups
            .entry(record.account_number.as_str())
            .or_insert_with(|| AggregatedAccount::new(record.account_number.as_str()))
            .push(record);
    }

    groups.into_values().collect()
}
