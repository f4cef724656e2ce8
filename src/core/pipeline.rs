//! Fraudulent accounts pipeline
//!
//! The fixed nine-step sequence that pulls flagged accounts from every
//! provider, aggregates them and publishes the result through the consumer.
//! Steps run strictly one after another; the first failure stops the run and
//! is reported with the step it happened in.

use super::aggregate::aggregate;
use super::lifecycle::LifecycleDriver;
use super::poller::PollBudget;
use crate::adapters::data_engine::{ClientFactory, HttpClientFactory, MountBody, QueryBody};
use crate::config::{FraudShareConfig, PipelineConfig};
use crate::domain::{CollaboratorId, CollaboratorRole, FraudShareError, RecordSet, Result};
use crate::{log_step_start, log_step_success};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Steps of the pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStep {
    ResolveCollaborators,
    MountProviders,
    ValidateProviders,
    InitializeConsumer,
    QueryProviders,
    Aggregate,
    AppendResults,
    ValidateConsumer,
    ExportResults,
}

impl PipelineStep {
    /// All steps in execution order
    pub const ALL: [PipelineStep; 9] = [
        PipelineStep::ResolveCollaborators,
        PipelineStep::MountProviders,
        PipelineStep::ValidateProviders,
        PipelineStep::InitializeConsumer,
        PipelineStep::QueryProviders,
        PipelineStep::Aggregate,
        PipelineStep::AppendResults,
        PipelineStep::ValidateConsumer,
        PipelineStep::ExportResults,
    ];

    /// Short machine-friendly name
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStep::ResolveCollaborators => "resolve_collaborators",
            PipelineStep::MountProviders => "mount_providers",
            PipelineStep::ValidateProviders => "validate_providers",
            PipelineStep::InitializeConsumer => "initialize_consumer",
            PipelineStep::QueryProviders => "query_providers",
            PipelineStep::Aggregate => "aggregate",
            PipelineStep::AppendResults => "append_results",
            PipelineStep::ValidateConsumer => "validate_consumer",
            PipelineStep::ExportResults => "export_results",
        }
    }

    /// Operator-facing message logged when the run stops at this step
    pub fn failure_message(&self) -> &'static str {
        match self {
            PipelineStep::ResolveCollaborators => {
                "could not resolve collaborator IDs. Stopping execution."
            }
            PipelineStep::MountProviders => "could not mount provider. Stopping execution.",
            PipelineStep::ValidateProviders => {
                "validation of provider didn't succeed. Stopping execution."
            }
            PipelineStep::InitializeConsumer => {
                "could not initialize consumer. Stopping execution."
            }
            PipelineStep::QueryProviders => {
                "could not load fraudulent accounts from provider. Stopping execution."
            }
            PipelineStep::Aggregate => "could not aggregate fraudulent accounts. Stopping execution.",
            PipelineStep::AppendResults => "could not append results. Stopping execution.",
            PipelineStep::ValidateConsumer => "could not validate consumer. Stopping execution.",
            PipelineStep::ExportResults => "could not export results. Stopping execution.",
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A run that stopped before completing
#[derive(Debug, Error)]
#[error("pipeline stopped at {step}: {source}")]
pub struct PipelineError {
    pub step: PipelineStep,
    #[source]
    pub source: FraudShareError,
}

/// Collaborator IDs a run operates on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collaborators {
    /// Providers in processing order
    pub providers: Vec<CollaboratorId>,
    pub consumer: CollaboratorId,
}

impl Collaborators {
    /// Resolve every configured label to a collaborator ID
    ///
    /// # Errors
    ///
    /// Returns a configuration error for the first label without an ID.
    pub fn resolve(config: &PipelineConfig) -> Result<Self> {
        let providers = config
            .provider_labels
            .iter()
            .map(|label| config.resolve_collaborator(label))
            .collect::<Result<Vec<_>>>()?;
        let consumer = config.resolve_collaborator(&config.consumer_label)?;

        Ok(Self {
            providers,
            consumer,
        })
    }
}

/// Summary of a completed run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub collaborators: Collaborators,

    /// Rows read from all providers
    pub records_read: usize,

    /// Aggregated rows appended to the consumer
    pub accounts_appended: usize,

    pub duration: Duration,
}

/// The fraudulent accounts sharing pipeline
pub struct FraudulentAccountsPipeline {
    driver: LifecycleDriver,
    config: PipelineConfig,
}

impl FraudulentAccountsPipeline {
    /// Create a pipeline on top of an existing driver
    pub fn new(driver: LifecycleDriver, config: PipelineConfig) -> Self {
        Self { driver, config }
    }

    /// Create a pipeline talking HTTP to the configured data engine
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the data engine URL is unusable.
    pub fn from_config(config: &FraudShareConfig) -> Result<Self> {
        let factory: Arc<dyn ClientFactory> = Arc::new(HttpClientFactory::new(&config.data_engine)?);
        let driver = LifecycleDriver::new(factory, PollBudget::from_config(&config.pipeline));
        Ok(Self::new(driver, config.pipeline.clone()))
    }

    /// Execute every step in order, stopping at the first failure
    ///
    /// # Errors
    ///
    /// Returns a [`PipelineError`] naming the step that failed. Effects of
    /// earlier steps are not rolled back.
    pub async fn run(&self) -> std::result::Result<PipelineReport, PipelineError> {
        let start_time = Instant::now();
        tracing::info!("get fraudulent accounts started");

        log_step_start!(PipelineStep::ResolveCollaborators);
        let collaborators = Collaborators::resolve(&self.config)
            .map_err(|e| halt(PipelineStep::ResolveCollaborators, e))?;
        log_step_success!(PipelineStep::ResolveCollaborators);

        log_step_start!(PipelineStep::MountProviders);
        for provider in &collaborators.providers {
            self.driver
                .mount_provider(provider)
                .await
                .map_err(|e| halt(PipelineStep::MountProviders, e.into()))?;
        }
        log_step_success!(PipelineStep::MountProviders, "successfully initialized providers");

        log_step_start!(PipelineStep::ValidateProviders);
        for provider in &collaborators.providers {
            self.driver
                .validate_collaborator(provider, CollaboratorRole::Provider)
                .await
                .map_err(|e| halt(PipelineStep::ValidateProviders, e.into()))?;
        }
        log_step_success!(PipelineStep::ValidateProviders, "successfully validated providers");

        log_step_start!(PipelineStep::InitializeConsumer);
        self.driver
            .initialize_consumer(&collaborators.consumer, &MountBody::output_schema())
            .await
            .map_err(|e| halt(PipelineStep::InitializeConsumer, e.into()))?;
        log_step_success!(PipelineStep::InitializeConsumer, "successfully initialized consumer");

        log_step_start!(PipelineStep::QueryProviders);
        let query = QueryBody::fraudulent_accounts(&self.config.bank_id);
        let mut records: RecordSet = Vec::new();
        for provider in &collaborators.providers {
            let rows = self
                .driver
                .query_provider(provider, &query)
                .await
                .map_err(|e| halt(PipelineStep::QueryProviders, e.into()))?;
            records.extend(rows);
        }
        log_step_success!(
            PipelineStep::QueryProviders,
            "successfully loaded fraudulent accounts"
        );

        log_step_start!(PipelineStep::Aggregate);
        let accounts = aggregate(&records);
        tracing::debug!(
            records = records.len(),
            accounts = accounts.len(),
            "Aggregated provider rows"
        );
        log_step_success!(
            PipelineStep::Aggregate,
            "successfully aggregated fraudulent accounts"
        );

        log_step_start!(PipelineStep::AppendResults);
        self.driver
            .append_results(&collaborators.consumer, &accounts)
            .await
            .map_err(|e| halt(PipelineStep::AppendResults, e.into()))?;
        log_step_success!(
            PipelineStep::AppendResults,
            "successfully appended results to consumer"
        );

        log_step_start!(PipelineStep::ValidateConsumer);
        self.driver
            .validate_collaborator(&collaborators.consumer, CollaboratorRole::Consumer)
            .await
            .map_err(|e| halt(PipelineStep::ValidateConsumer, e.into()))?;
        log_step_success!(PipelineStep::ValidateConsumer, "validated consumer");

        log_step_start!(PipelineStep::ExportResults);
        self.driver
            .export_results(&collaborators.consumer)
            .await
            .map_err(|e| halt(PipelineStep::ExportResults, e.into()))?;
        log_step_success!(PipelineStep::ExportResults, "successfully exported results");

        let report = PipelineReport {
            collaborators,
            records_read: records.len(),
            accounts_appended: accounts.len(),
            duration: start_time.elapsed(),
        };

        tracing::info!(
            records_read = report.records_read,
            accounts_appended = report.accounts_appended,
            duration_ms = report.duration.as_millis() as u64,
            "Pipeline completed"
        );

        Ok(report)
    }
}

/// Log the step-specific stop message and build the error
fn halt(step: PipelineStep, source: FraudShareError) -> PipelineError {
    tracing::error!(step = %step, error = %source, "{}", step.failure_message());
    PipelineError { step, source }
}
