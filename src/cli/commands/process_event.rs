//! Process-event command implementation
//!
//! Feeds one event through the dispatcher. Without arguments the event is
//! `{"type": "EX_GET_FRAUDULENT_ACCOUNTS"}`, i.e. one full pipeline run.

use crate::config::FraudShareConfig;
use crate::core::dispatch::{EventDispatcher, EventOutcome, EX_GET_FRAUDULENT_ACCOUNTS};
use crate::core::pipeline::FraudulentAccountsPipeline;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the process-event command
#[derive(Args, Debug)]
pub struct ProcessEventArgs {
    /// Event as inline JSON
    #[arg(long, conflicts_with = "event_file")]
    pub event: Option<String>,

    /// Path to a file containing the event JSON
    #[arg(long, value_name = "PATH")]
    pub event_file: Option<PathBuf>,
}

impl ProcessEventArgs {
    /// Read the event to process
    pub fn load_event(&self) -> anyhow::Result<serde_json::Value> {
        if let Some(raw) = &self.event {
            return serde_json::from_str(raw).context("Failed to parse --event JSON");
        }

        if let Some(path) = &self.event_file {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read event file {}", path.display()))?;
            return serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse event file {}", path.display()));
        }

        Ok(serde_json::json!({ "type": EX_GET_FRAUDULENT_ACCOUNTS }))
    }

    /// Execute the process-event command
    pub async fn execute(&self, config: FraudShareConfig) -> anyhow::Result<i32> {
        let event = self.load_event()?;
        tracing::info!(event = %event, "Processing event");

        let pipeline = FraudulentAccountsPipeline::from_config(&config)?;
        let dispatcher = EventDispatcher::new(pipeline);

        let outcome = dispatcher.process_event(&event).await;
        match &outcome {
            EventOutcome::Completed(report) => {
                println!(
                    "✅ Shared {} accounts from {} rows ({} providers) in {:.1}s",
                    report.accounts_appended,
                    report.records_read,
                    report.collaborators.providers.len(),
                    report.duration.as_secs_f64()
                );
            }
            EventOutcome::Halted(step) => {
                println!("❌ Pipeline stopped at step: {step}");
            }
            EventOutcome::Ignored(event_type) => {
                println!("ℹ️  Event type '{event_type}' is not handled, nothing to do");
            }
            EventOutcome::Failed(reason) => {
                println!("❌ Event processing failed: {reason}");
            }
        }

        Ok(outcome.exit_code())
    }
}
