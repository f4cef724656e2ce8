//! Validate config command implementation

use crate::config::FraudShareConfig;
use crate::core::pipeline::Collaborators;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also require every collaborator ID to be resolvable
    #[arg(long)]
    pub check_collaborators: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// The configuration has already been loaded and validated; this prints
    /// the resolved values.
    pub fn execute(&self, config: &FraudShareConfig) -> anyhow::Result<i32> {
        tracing::info!("Validating configuration");

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Data Engine: {}", config.data_engine.base_url);
        println!(
            "  Token: {}",
            match &config.data_engine.token {
                Some(token) if !token.expose_secret().is_empty() => "set",
                _ => "not set",
            }
        );
        println!("  Bank ID: {}", config.pipeline.bank_id);
        println!("  Providers: {}", config.pipeline.provider_labels.join(", "));
        println!("  Consumer: {}", config.pipeline.consumer_label);
        println!(
            "  Poll Budget: {} tries, {}s interval",
            config.pipeline.max_tries, config.pipeline.sleep_seconds
        );

        if self.check_collaborators {
            match Collaborators::resolve(&config.pipeline) {
                Ok(collaborators) => {
                    for (label, id) in config
                        .pipeline
                        .provider_labels
                        .iter()
                        .zip(&collaborators.providers)
                    {
                        println!("  Provider {label}: {id}");
                    }
                    println!(
                        "  Consumer {}: {}",
                        config.pipeline.consumer_label, collaborators.consumer
                    );
                }
                Err(e) => {
                    println!("❌ Collaborator resolution failed");
                    println!("   Error: {e}");
                    return Ok(2);
                }
            }
        }

        println!();
        Ok(0)
    }
}
