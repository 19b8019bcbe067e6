//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for geodatabr using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// geodatabr - Brazilian territorial division dataset exporter
#[derive(Parser, Debug)]
#[command(name = "geodatabr")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "geodatabr.toml", env = "GEODATABR_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GEODATABR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a dataset edition to a file format
    Export(commands::export::ExportArgs),

    /// List the supported export formats
    Formats(commands::formats::FormatsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
