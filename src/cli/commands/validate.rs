//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the geodatabr configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        // Loading runs substitution, overrides and validation
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Export Format: {}", config.export.format);
        println!("  Minify: {}", config.export.minify);
        println!("  Locale: {}", config.export.locale);
        println!(
            "  Output: {}",
            config.export.output.as_deref().unwrap_or("-")
        );
        println!("  SQL Dialect: {}", config.sql.dialect);
        println!("  SQL Indexes: {}", config.sql.create_indexes);

        if config.datasets.is_empty() {
            println!("  Datasets: none configured");
        } else {
            println!("  Datasets:");
            for dataset in &config.datasets {
                let marker = if !dataset.path.exists() {
                    " (missing)"
                } else {
                    ""
                };
                println!(
                    "    - {}: {}{}",
                    dataset.edition,
                    dataset.path.display(),
                    marker
                );
            }
        }

        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}
