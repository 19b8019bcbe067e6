//! Export command implementation
//!
//! This module implements the `export` command, rendering one dataset
//! edition in the requested format.

use super::report_failure;
use crate::config::{load_config, GeodataConfig};
use crate::core::export::{ExportCoordinator, ExportRequest, OutputTarget};
use crate::domain::{Edition, Result};
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Dataset edition (year); defaults to the latest configured edition
    #[arg(short, long)]
    pub edition: Option<Edition>,

    /// Output format (see `geodatabr formats`)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Produce compact output
    #[arg(short, long)]
    pub minify: bool,

    /// Write to FILE instead of stdout; without a value writes `dtb<extension>`
    #[arg(
        short,
        long = "out",
        value_name = "FILE",
        num_args = 0..=1,
        default_missing_value = "auto"
    )]
    pub out: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting export command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => return Ok(report_failure(&e, "Failed to load configuration")),
        };

        let request = self.to_request(&config);
        match run(&config, &request) {
            Ok(()) => Ok(0),
            Err(e) => Ok(report_failure(&e, "Export failed")),
        }
    }

    /// Merge command-line overrides over the configured export defaults
    pub fn to_request(&self, config: &GeodataConfig) -> ExportRequest {
        let mut request = ExportRequest::from_config(&config.export);
        request.edition = self.edition;
        if let Some(format) = &self.format {
            request.format = format.clone();
        }
        if self.minify {
            request.minify = true;
        }
        if let Some(out) = &self.out {
            request.output = OutputTarget::parse(out);
        }
        request
    }
}

fn run(config: &GeodataConfig, request: &ExportRequest) -> Result<()> {
    let coordinator = ExportCoordinator::from_config(config, request)?;
    let summary = coordinator.execute(request)?;
    summary.log_summary();

    if summary.destination != "stdout" {
        eprintln!(
            "Exported {} records of {} to {} ({} bytes, {:.2}s)",
            summary.total_records(),
            summary.edition,
            summary.destination,
            summary.bytes_written,
            summary.duration.as_secs_f64()
        );
    }
    Ok(())
}
