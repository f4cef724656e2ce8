//! Collaborator lifecycle driver
//!
//! Each operation acquires its own client handle, issues one state-changing
//! call and then trusts the polled status rather than the synchronous
//! response code: an unexpected code is logged with the response body, and
//! the poll that follows decides whether the operation succeeded.

use super::codec::{decode_fraud_records, encode_aggregated_accounts};
use super::poller::{wait_for_status, PollBudget};
use crate::adapters::data_engine::{
    ApiResponse, ClientFactory, DataEngineApi, MountBody, QueryBody, ReportPoll, ValidationStart,
};
use crate::domain::{
    AggregatedAccount, CollaboratorId, CollaboratorRole, DataEngineError, LifecycleError,
    QualityReport, RecordSet, ReportId,
};
use std::sync::Arc;
use std::time::Duration;

/// Status of a mounted provider, and of a consumer after an append
pub const STATUS_MOUNTED: &str = "mounted";

/// Status of a consumer whose schema has been created
pub const STATUS_INITIALIZED: &str = "initialized";

/// Status of an exported consumer
pub const STATUS_EXPORTED: &str = "exported";

/// File name the append payload is uploaded under
pub const APPEND_FILE_NAME: &str = "data.csv";

/// Report polls allowed per validation run
pub const QUALITY_REPORT_MAX_TRIES: u32 = 10;

/// Pause before every report poll
pub const QUALITY_REPORT_SLEEP: Duration = Duration::from_secs(1);

/// Drives collaborators through mount, validation, append and export
pub struct LifecycleDriver {
    factory: Arc<dyn ClientFactory>,
    budget: PollBudget,
    quality_budget: PollBudget,
}

impl LifecycleDriver {
    /// Create a driver polling status transitions with `budget`
    ///
    /// Quality reports use their own fixed budget
    /// ([`QUALITY_REPORT_MAX_TRIES`], [`QUALITY_REPORT_SLEEP`]).
    pub fn new(factory: Arc<dyn ClientFactory>, budget: PollBudget) -> Self {
        Self {
            factory,
            budget,
            quality_budget: PollBudget::new(QUALITY_REPORT_MAX_TRIES, QUALITY_REPORT_SLEEP),
        }
    }

    /// Replace the quality report budget
    pub fn with_quality_budget(mut self, budget: PollBudget) -> Self {
        self.quality_budget = budget;
        self
    }

    /// Budget used for status transitions
    pub fn budget(&self) -> PollBudget {
        self.budget
    }

    fn client(
        &self,
        operation: &'static str,
        id: &CollaboratorId,
        role: CollaboratorRole,
    ) -> Result<Box<dyn DataEngineApi>, LifecycleError> {
        self.factory.create_client().map_err(|e| {
            tracing::error!(
                collaborator_id = %id,
                role = %role,
                operation = operation,
                error = %e,
                "Could not create data engine client"
            );
            LifecycleError::call(operation, id.as_str(), e)
        })
    }

    /// Mount a provider and wait until it is `mounted`
    pub async fn mount_provider(&self, id: &CollaboratorId) -> Result<(), LifecycleError> {
        let role = CollaboratorRole::Provider;
        let api = self.client("mount", id, role)?;
        let response = api.mount(id, &MountBody::empty()).await;
        log_unexpected(id, role, "error mounting provider", response);

        wait_for_status(api.as_ref(), id, STATUS_MOUNTED, self.budget).await?;
        Ok(())
    }

    /// Initialize a consumer with `schema` and wait until it is `initialized`
    pub async fn initialize_consumer(
        &self,
        id: &CollaboratorId,
        schema: &MountBody,
    ) -> Result<(), LifecycleError> {
        let role = CollaboratorRole::Consumer;
        let api = self.client("mount", id, role)?;
        let response = api.mount(id, schema).await;
        log_unexpected(id, role, "error during consumer initialization", response);

        wait_for_status(api.as_ref(), id, STATUS_INITIALIZED, self.budget).await?;
        Ok(())
    }

    /// Run `query` against a provider and decode the returned rows
    pub async fn query_provider(
        &self,
        id: &CollaboratorId,
        query: &QueryBody,
    ) -> Result<RecordSet, LifecycleError> {
        let role = CollaboratorRole::Provider;
        let api = self.client("query", id, role)?;
        let csv_text = api.query(id, query).await.map_err(|e| {
            tracing::error!(collaborator_id = %id, role = %role, error = %e, "Query failed");
            LifecycleError::call("query", id.as_str(), e)
        })?;

        let records = decode_fraud_records(&csv_text).map_err(|e| LifecycleError::Decode {
            collaborator_id: id.to_string(),
            detail: e.to_string(),
        })?;

        tracing::debug!(
            collaborator_id = %id,
            role = %role,
            rows = records.len(),
            "Query returned rows"
        );
        Ok(records)
    }

    /// Append `rows` to a consumer and wait until it is `mounted` again
    ///
    /// The consumer reports `mounted` once the append has been absorbed;
    /// there is no separate post-append status.
    pub async fn append_results(
        &self,
        id: &CollaboratorId,
        rows: &[AggregatedAccount],
    ) -> Result<(), LifecycleError> {
        let payload = encode_aggregated_accounts(rows).map_err(|e| LifecycleError::Encode {
            collaborator_id: id.to_string(),
            detail: e.to_string(),
        })?;

        let role = CollaboratorRole::Consumer;
        let api = self.client("append", id, role)?;
        let response = api.append(id, payload, APPEND_FILE_NAME).await;
        log_unexpected(id, role, "error during data insertion", response);

        wait_for_status(api.as_ref(), id, STATUS_MOUNTED, self.budget).await?;
        Ok(())
    }

    /// Export a consumer and wait until it is `exported`
    pub async fn export_results(&self, id: &CollaboratorId) -> Result<(), LifecycleError> {
        let role = CollaboratorRole::Consumer;
        let api = self.client("export", id, role)?;
        let response = api.export(id).await;
        log_unexpected(id, role, "error during export", response);

        wait_for_status(api.as_ref(), id, STATUS_EXPORTED, self.budget).await?;
        Ok(())
    }

    /// Run a quality validation and require a clean report
    ///
    /// Providers and the consumer are validated the same way; `role` only
    /// labels logs and errors. Fails without polling when the validation
    /// cannot be started.
    pub async fn validate_collaborator(
        &self,
        id: &CollaboratorId,
        role: CollaboratorRole,
    ) -> Result<(), LifecycleError> {
        let api = self.client("start_validation", id, role)?;

        let report_id = match api.start_validation(id).await {
            Ok(ValidationStart::Started(report_id)) => report_id,
            Ok(ValidationStart::Rejected { status_code, body }) => {
                tracing::error!(
                    collaborator_id = %id,
                    role = %role,
                    status_code = status_code,
                    body = %body,
                    "Could not start quality validation"
                );
                return Err(LifecycleError::ValidationNotStarted {
                    collaborator_id: id.to_string(),
                    role,
                    detail: format!("status {status_code}: {body}"),
                });
            }
            Err(e) => {
                tracing::error!(
                    collaborator_id = %id,
                    role = %role,
                    error = %e,
                    "Could not start quality validation"
                );
                return Err(LifecycleError::ValidationNotStarted {
                    collaborator_id: id.to_string(),
                    role,
                    detail: e.to_string(),
                });
            }
        };

        let report = self.wait_for_report(api.as_ref(), &report_id).await?;
        tracing::info!(
            collaborator_id = %id,
            role = %role,
            report_id = %report_id,
            fail = ?report.fail,
            error = ?report.error,
            "Quality report received"
        );

        if report.is_clean() {
            Ok(())
        } else {
            Err(LifecycleError::QualityCheckFailed {
                collaborator_id: id.to_string(),
                role,
                failed: report.fail.len(),
                errored: report.error.len(),
            })
        }
    }

    /// Sleep-then-fetch until the report is finished or the budget runs out
    async fn wait_for_report(
        &self,
        api: &dyn DataEngineApi,
        report_id: &ReportId,
    ) -> Result<QualityReport, LifecycleError> {
        let mut tries: u32 = 0;

        while tries < self.quality_budget.max_tries {
            tokio::time::sleep(self.quality_budget.sleep_interval).await;
            tries += 1;

            match api.get_report(report_id).await {
                Ok(ReportPoll::Finished(report)) => return Ok(report),
                Ok(ReportPoll::Pending) => {
                    tracing::debug!(report_id = %report_id, tries = tries, "Quality report pending");
                }
                Err(e) => {
                    tracing::warn!(
                        report_id = %report_id,
                        tries = tries,
                        error = %e,
                        "Quality report request failed"
                    );
                }
            }
        }

        tracing::error!(report_id = %report_id, tries = tries, "Could not get quality report");
        Err(LifecycleError::ReportUnavailable {
            report_id: report_id.to_string(),
            tries,
        })
    }
}

/// Log a state-changing call that did not answer `204 No Content`
fn log_unexpected(
    id: &CollaboratorId,
    role: CollaboratorRole,
    context: &str,
    response: Result<ApiResponse, DataEngineError>,
) {
    match response {
        Ok(response) if response.is_expected() => {}
        Ok(response) => {
            tracing::error!(
                collaborator_id = %id,
                role = %role,
                status_code = response.status_code,
                body = %response.body,
                "{context}"
            );
        }
        Err(e) => {
            tracing::error!(collaborator_id = %id, role = %role, error = %e, "{context}");
        }
    }
}
