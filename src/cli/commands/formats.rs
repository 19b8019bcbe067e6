//! Formats command implementation
//!
//! Lists the export formats the exporter registry knows about.

use crate::core::export::ExportFormat;
use clap::Args;

/// Arguments for the formats command
#[derive(Args, Debug)]
pub struct FormatsArgs {}

impl FormatsArgs {
    /// Execute the formats command
    pub fn execute(&self) -> anyhow::Result<i32> {
        print!("{}", Self::render());
        Ok(0)
    }

    fn render() -> String {
        let mut listing = String::from("Available formats:\n");
        for format in ExportFormat::ALL {
            listing.push_str(&format!(
                "  {:<9}{:<10}{}\n",
                format.identifier(),
                format.extension(),
                format.description()
            ));
        }
        listing
    }
}
