//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for fraudshare using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// fraudshare - multi-party fraudulent account sharing
#[derive(Parser, Debug)]
#[command(name = "fraudshare")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (environment only when omitted)
    #[arg(short, long, env = "FRAUDSHARE_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process one event (runs the sharing pipeline by default)
    ProcessEvent(commands::process_event::ProcessEventArgs),

    /// Validate configuration
    ValidateConfig(commands::validate::ValidateArgs),
}
