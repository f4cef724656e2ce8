// fraudshare - Multi-party fraudulent account sharing over a data engine
// Copyright (c) 2025 fraudshare Contributors
// Licensed under the MIT License

use fraudshare::cli::{Cli, Commands};
use fraudshare::config::{load_config, FraudShareConfig, LoggingConfig};
use fraudshare::logging::init_logging;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // The config decides the log level and file logging, so it is loaded
    // before logging exists; a load failure is reported after init.
    let config = load_config(cli.config.as_deref());

    let (log_level, logging_config) = match &config {
        Ok(config) => (
            cli.log_level
                .clone()
                .unwrap_or_else(|| config.application.log_level.clone()),
            config.logging.clone(),
        ),
        Err(_) => (
            cli.log_level.clone().unwrap_or_else(|| "info".to_string()),
            LoggingConfig::default(),
        ),
    };

    let logging_guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "fraudshare - fraudulent account sharing"
    );

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Configuration error");
            println!("❌ Failed to load configuration");
            println!("   Error: {e}");
            process::exit(2);
        }
    };

    let exit_code = match execute_command(&cli, config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e:#}");
            5
        }
    };

    // process::exit skips destructors, so flush file logs first
    drop(logging_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, config: FraudShareConfig) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::ProcessEvent(args) => args.execute(config).await,
        Commands::ValidateConfig(args) => args.execute(&config),
    }
}
