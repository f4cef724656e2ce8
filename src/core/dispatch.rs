//! Inbound event dispatch
//!
//! An event is a JSON mapping carrying a `type` tag. Known tags are routed to
//! their handler; any other tag value, string or not, is ignored. This is the only place where
//! failures are swallowed: whatever happens while handling, the event counts
//! as processed and the outcome is only visible in the logs and the returned
//! [`EventOutcome`].

use super::pipeline::{FraudulentAccountsPipeline, PipelineReport, PipelineStep};
use futures::FutureExt;
use serde_json::Value;
use std::panic::AssertUnwindSafe;

/// Type tag of the fraudulent accounts sharing event
pub const EX_GET_FRAUDULENT_ACCOUNTS: &str = "EX_GET_FRAUDULENT_ACCOUNTS";

/// Key holding the event type tag
pub const EVENT_TYPE_KEY: &str = "type";

/// Events this service knows how to handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    GetFraudulentAccounts,
}

impl EventKind {
    /// Map a type tag to its kind, `None` for unknown tags
    pub fn from_type(event_type: &str) -> Option<Self> {
        match event_type {
            EX_GET_FRAUDULENT_ACCOUNTS => Some(EventKind::GetFraudulentAccounts),
            _ => None,
        }
    }
}

/// What happened to one event
#[derive(Debug)]
pub enum EventOutcome {
    /// The handler ran to completion
    Completed(PipelineReport),
    /// The pipeline stopped at a step
    Halted(PipelineStep),
    /// The type tag is not handled here
    Ignored(String),
    /// The event is not a mapping, has no type tag, or the handler panicked
    Failed(String),
}

impl EventOutcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            EventOutcome::Completed(_) | EventOutcome::Ignored(_) => 0,
            EventOutcome::Halted(_) => 3,
            EventOutcome::Failed(_) => 5,
        }
    }
}

/// Routes events to the fraudulent accounts pipeline
pub struct EventDispatcher {
    pipeline: FraudulentAccountsPipeline,
}

impl EventDispatcher {
    /// Create a dispatcher
    pub fn new(pipeline: FraudulentAccountsPipeline) -> Self {
        Self { pipeline }
    }

    /// Handle one event
    ///
    /// Never fails: malformed events, pipeline failures and panics in the
    /// handler are logged and reported through the outcome.
    pub async fn process_event(&self, event: &Value) -> EventOutcome {
        tracing::info!("event_processor started");

        let outcome = match AssertUnwindSafe(self.dispatch(event)).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                tracing::error!(
                    panic = %message,
                    backtrace = %std::backtrace::Backtrace::force_capture(),
                    "error in event_processor"
                );
                EventOutcome::Failed(message)
            }
        };

        tracing::info!("done processing event");
        outcome
    }

    async fn dispatch(&self, event: &Value) -> EventOutcome {
        let Some(fields) = event.as_object() else {
            tracing::error!(event = %event, "error in event_processor: event is not a mapping");
            return EventOutcome::Failed("invalid event: not a mapping".to_string());
        };

        let Some(tag) = fields.get(EVENT_TYPE_KEY) else {
            tracing::error!(event = %event, "error in event_processor: missing event type");
            return EventOutcome::Failed(format!("invalid event: missing '{EVENT_TYPE_KEY}'"));
        };

        match tag.as_str().and_then(EventKind::from_type) {
            Some(EventKind::GetFraudulentAccounts) => self.get_fraudulent_accounts().await,
            None => {
                let event_type = tag
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| tag.to_string());
                tracing::debug!(event_type = %event_type, "Ignoring unhandled event type");
                EventOutcome::Ignored(event_type)
            }
        }
    }

    async fn get_fraudulent_accounts(&self) -> EventOutcome {
        match self.pipeline.run().await {
            Ok(report) => EventOutcome::Completed(report),
            Err(e) => {
                tracing::error!(error = ?e, "error in event_processor");
                EventOutcome::Halted(e.step)
            }
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
