//! Export summary and reporting
//!
//! This module defines the structure reporting what one export produced.

use crate::core::export::ExportFormat;
use crate::domain::{Dataset, Edition, EntityKind};
use std::time::Duration;

/// Summary of an export operation
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Format rendered
    pub format: ExportFormat,

    /// Dataset edition exported
    pub edition: Edition,

    /// Whether compact output was requested
    pub minify: bool,

    /// Records per table, root to leaf
    pub record_counts: Vec<(EntityKind, usize)>,

    /// Size of the payload in bytes
    pub bytes_written: usize,

    /// Where the payload went (`stdout` or a file path)
    pub destination: String,

    /// Duration of the export
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a summary with no records and nothing written
    pub fn new(format: ExportFormat, edition: Edition, minify: bool) -> Self {
        Self {
            format,
            edition,
            minify,
            record_counts: EntityKind::ALL.iter().map(|kind| (*kind, 0)).collect(),
            bytes_written: 0,
            destination: String::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Count the records of every table in the dataset
    pub fn with_record_counts(mut self, dataset: &Dataset) -> Self {
        self.record_counts = EntityKind::ALL
            .iter()
            .map(|kind| (*kind, dataset.record_count(*kind)))
            .collect();
        self
    }

    /// Record the payload size and destination
    pub fn with_output(mut self, bytes_written: usize, destination: impl Into<String>) -> Self {
        self.bytes_written = bytes_written;
        self.destination = destination.into();
        self
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Records exported for one table
    pub fn records(&self, kind: EntityKind) -> usize {
        self.record_counts
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Records exported across every table
    pub fn total_records(&self) -> usize {
        self.record_counts.iter().map(|(_, count)| count).sum()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            format = %self.format,
            edition = %self.edition,
            minify = self.minify,
            total_records = self.total_records(),
            bytes_written = self.bytes_written,
            destination = %self.destination,
            duration_ms = self.duration.as_millis(),
            "Export summary"
        );

        for (kind, count) in &self.record_counts {
            tracing::debug!(table = %kind, records = count, "Table exported");
        }
    }
}
