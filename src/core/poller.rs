//! Remote state polling
//!
//! [`wait_for_status`] re-reads a collaborator's lifecycle status until it
//! reaches the expected value, the collaborator reports [`ERROR_STATUS`], or
//! the [`PollBudget`] runs out. Every call keeps its own try counter.

use crate::adapters::data_engine::DataEngineApi;
use crate::config::PipelineConfig;
use crate::domain::{CollaboratorId, LifecycleError};
use std::time::Duration;

/// Status value that ends a poll immediately
pub const ERROR_STATUS: &str = "error";

/// Upper bound on one wait-for-status loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollBudget {
    /// Re-polls allowed after the initial status read
    pub max_tries: u32,

    /// Pause before every re-poll
    pub sleep_interval: Duration,
}

impl PollBudget {
    /// Create a budget
    pub fn new(max_tries: u32, sleep_interval: Duration) -> Self {
        Self {
            max_tries,
            sleep_interval,
        }
    }

    /// Budget configured for lifecycle transitions (`MAX_TRIES`, `SLEEP_S`)
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.max_tries, Duration::from_secs(config.sleep_seconds))
    }
}

/// Successful end of a poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    /// Status that was reached
    pub status: String,

    /// Re-polls used; equal to the number of sleeps
    pub tries: u32,
}

/// Wait until `id` reports `expected`
///
/// Reads the status once, then sleeps and re-reads while the status differs
/// from `expected` and fewer than `budget.max_tries` re-polls have been made.
/// An unreadable status sample is logged and counted like any other.
///
/// # Errors
///
/// - [`LifecycleError::ErrorState`] as soon as the collaborator reports
///   [`ERROR_STATUS`], without sleeping again
/// - [`LifecycleError::RetriesExhausted`] when the budget runs out
pub async fn wait_for_status(
    api: &dyn DataEngineApi,
    id: &CollaboratorId,
    expected: &str,
    budget: PollBudget,
) -> Result<PollOutcome, LifecycleError> {
    let mut status = fetch_status(api, id).await;
    let mut tries: u32 = 0;

    while status.as_deref() != Some(expected) && tries < budget.max_tries {
        if status.as_deref() == Some(ERROR_STATUS) {
            return Err(error_state(id, expected));
        }

        tracing::debug!(
            collaborator_id = %id,
            expected_status = expected,
            status = status.as_deref().unwrap_or("<unreadable>"),
            tries = tries,
            max_tries = budget.max_tries,
            "Waiting for collaborator status"
        );

        tokio::time::sleep(budget.sleep_interval).await;
        status = fetch_status(api, id).await;
        tries += 1;
    }

    match status {
        Some(status) if status == expected => {
            tracing::debug!(
                collaborator_id = %id,
                status = %status,
                tries = tries,
                "Collaborator reached expected status"
            );
            Ok(PollOutcome { status, tries })
        }
        Some(status) if status == ERROR_STATUS => Err(error_state(id, expected)),
        last_status => {
            tracing::error!(
                collaborator_id = %id,
                expected_status = expected,
                last_status = last_status.as_deref().unwrap_or("<unreadable>"),
                tries = tries,
                "Collaborator did not reach expected status"
            );
            Err(LifecycleError::RetriesExhausted {
                collaborator_id: id.to_string(),
                expected: expected.to_string(),
                last_status,
                tries,
            })
        }
    }
}

fn error_state(id: &CollaboratorId, expected: &str) -> LifecycleError {
    tracing::error!(
        collaborator_id = %id,
        expected_status = expected,
        "Error for collaborator"
    );
    LifecycleError::ErrorState {
        collaborator_id: id.to_string(),
        expected: expected.to_string(),
    }
}

/// Read one status sample; failures are logged and yield `None`
async fn fetch_status(api: &dyn DataEngineApi, id: &CollaboratorId) -> Option<String> {
    match api.status(id).await {
        Ok(sample) => {
            if !(200..300).contains(&sample.status_code) || sample.status.is_none() {
                tracing::error!(
                    collaborator_id = %id,
                    status_code = sample.status_code,
                    body = %sample.body,
                    "Unreadable collaborator status"
                );
            }
            sample.status
        }
        Err(e) => {
            tracing::error!(
                collaborator_id = %id,
                error = %e,
                "Collaborator status request failed"
            );
            None
        }
    }
}
