// fraudshare - Multi-party fraudulent account sharing over a data engine
// Copyright (c) 2025 fraudshare Contributors
// Licensed under the MIT License

//! # fraudshare - fraudulent account sharing
//!
//! fraudshare lets several banks pool the accounts they have flagged as
//! fraudulent without handing raw data to each other. Every party is a
//! *collaborator* on a remote data engine: providers expose their flagged
//! accounts, one consumer receives the aggregated result.
//!
//! ## Overview
//!
//! On an `EX_GET_FRAUDULENT_ACCOUNTS` event the crate:
//! - **Mounts** every provider and waits for the engine to report `mounted`
//! - **Validates** each provider through a data-quality report
//! - **Initializes** the consumer with the output schema
//! - **Queries** every provider for rows reported by the configured bank
//! - **Aggregates** the rows into one row per account number
//! - **Appends**, validates and finally **exports** the consumer
//!
//! Every state change on the engine is asynchronous; the crate observes it
//! by polling the collaborator status with a bounded budget.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Poller, lifecycle driver, aggregation, pipeline and dispatcher
//! - [`adapters`] - Data engine client (HTTP) behind a trait
//! - [`domain`] - Identifiers, records and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fraudshare::config::load_config;
//! use fraudshare::core::dispatch::EventDispatcher;
//! use fraudshare::core::pipeline::FraudulentAccountsPipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config(Some("fraudshare.toml"))?;
//!     let pipeline = FraudulentAccountsPipeline::from_config(&config)?;
//!     let dispatcher = EventDispatcher::new(pipeline);
//!
//!     let event = serde_json::json!({"type": "EX_GET_FRAUDULENT_ACCOUNTS"});
//!     let outcome = dispatcher.process_event(&event).await;
//!     println!("exit code {}", outcome.exit_code());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library code returns [`domain::FraudShareError`]; lifecycle operations
//! return the more specific [`domain::LifecycleError`]. A failed run is a
//! [`core::pipeline::PipelineError`] naming the step it stopped at.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
