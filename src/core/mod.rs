//! Core business logic for fraudshare.
//!
//! # Modules
//!
//! - [`poller`] - Bounded wait-for-status polling
//! - [`lifecycle`] - Collaborator mount, validation, append and export
//! - [`aggregate`] - Grouping of provider records per account
//! - [`codec`] - CSV decoding of query results and encoding of payloads
//! - [`pipeline`] - The fixed fraudulent accounts pipeline
//! - [`dispatch`] - Event type routing
//!
//! # Pipeline
//!
//! 1. **Resolve** provider and consumer collaborator IDs
//! 2. **Mount** every provider
//! 3. **Validate** every provider
//! 4. **Initialize** the consumer with the output schema
//! 5. **Query** every provider
//! 6. **Aggregate** rows per account number
//! 7. **Append** the aggregated rows to the consumer
//! 8. **Validate** the consumer
//! 9. **Export** the consumer
//!
//! # Example
//!
//! ```rust,no_run
//! use fraudshare::config::load_config;
//! use fraudshare::core::dispatch::EventDispatcher;
//! use fraudshare::core::pipeline::FraudulentAccountsPipeline;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(None::<&str>)?;
//! let pipeline = FraudulentAccountsPipeline::from_config(&config)?;
//! let dispatcher = EventDispatcher::new(pipeline);
//!
//! let event = serde_json::json!({"type": "EX_GET_FRAUDULENT_ACCOUNTS"});
//! let outcome = dispatcher.process_event(&event).await;
//! println!("exit code: {}", outcome.exit_code());
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod codec;
pub mod dispatch;
pub mod lifecycle;
pub mod pipeline;
pub mod poller;
