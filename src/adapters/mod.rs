//! External system integrations for fraudshare.
//!
//! - [`data_engine`] - Remote dataset hosting and quality validation API
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the core can be
//! exercised against scripted implementations. The core only sees
//! [`data_engine::ClientFactory`] and [`data_engine::DataEngineApi`].
//!
//! ```rust,no_run
//! use fraudshare::adapters::data_engine::{ClientFactory, HttpClientFactory};
//! use fraudshare::config::DataEngineConfig;
//! use fraudshare::domain::CollaboratorId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = HttpClientFactory::new(&DataEngineConfig::default())?;
//! let client = factory.create_client()?;
//! let sample = client.status(&CollaboratorId::new("bank-a")?).await?;
//! println!("status: {:?}", sample.status);
//! # Ok(())
//! # }
//! ```

pub mod data_engine;
