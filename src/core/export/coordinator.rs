//! Export coordinator - orchestrates one export run
//!
//! The coordinator resolves the requested format before touching any data,
//! then loads the dataset from its repository, validates the tree, renders
//! the payload and writes it to the requested target.

use crate::adapters::dataset::{create_repository, DatasetRepository};
use crate::config::{ExportConfig, GeodataConfig};
use crate::core::export::summary::ExportSummary;
use crate::core::export::{create_exporter, ExportFormat, ExportSettings};
use crate::domain::{Edition, GeodataError, Result};
use crate::{log_export_complete, log_export_start};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

/// Where an export payload is written
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputTarget {
    /// Standard output
    #[default]
    Stdout,
    /// An explicit file path
    Path(PathBuf),
    /// `dtb<extension>` in the working directory
    Auto,
}

impl OutputTarget {
    /// Parse a destination: `-` is stdout, `auto` is the default file name,
    /// anything else is a path
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "-" => OutputTarget::Stdout,
            "auto" => OutputTarget::Auto,
            path => OutputTarget::Path(PathBuf::from(path)),
        }
    }

    /// File the payload goes to, or `None` for stdout
    pub fn resolve(&self, format: ExportFormat) -> Option<PathBuf> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::Path(path) => Some(path.clone()),
            OutputTarget::Auto => Some(PathBuf::from(format!("dtb{}", format.extension()))),
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => write!(f, "stdout"),
            OutputTarget::Path(path) => write!(f, "{}", path.display()),
            OutputTarget::Auto => write!(f, "auto"),
        }
    }
}

/// One export to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Edition to export; `None` selects the latest configured edition
    pub edition: Option<Edition>,
    /// Format identifier, resolved when the export runs
    pub format: String,
    pub minify: bool,
    pub output: OutputTarget,
}

impl ExportRequest {
    /// Request built from the `[export]` configuration defaults
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            edition: None,
            format: config.format.clone(),
            minify: config.minify,
            output: config
                .output
                .as_deref()
                .map(OutputTarget::parse)
                .unwrap_or_default(),
        }
    }
}

/// Export coordinator
pub struct ExportCoordinator {
    settings: ExportSettings,
    repository: Box<dyn DatasetRepository>,
}

impl ExportCoordinator {
    /// Create a coordinator over a repository
    pub fn new(settings: ExportSettings, repository: Box<dyn DatasetRepository>) -> Self {
        Self {
            settings,
            repository,
        }
    }

    /// Create a coordinator for a request from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unsupported format or locale, or
    /// when no dataset is configured for the requested edition.
    pub fn from_config(config: &GeodataConfig, request: &ExportRequest) -> Result<Self> {
        ExportFormat::from_str(&request.format)?;
        let settings = ExportSettings::from_config(config)?;
        let repository = create_repository(config, request.edition)?;
        Ok(Self::new(settings, repository))
    }

    /// Edition served by the underlying repository
    pub fn edition(&self) -> Edition {
        self.repository.edition()
    }

    /// Execute the export, writing stdout payloads to the process stdout
    ///
    /// # Errors
    ///
    /// See [`ExportCoordinator::execute_with`].
    pub fn execute(&self, request: &ExportRequest) -> Result<ExportSummary> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.execute_with(request, &mut handle)
    }

    /// Execute the export
    ///
    /// This:
    /// 1. Resolves the format (before any data is loaded)
    /// 2. Loads the dataset from the repository
    /// 3. Validates the entity tree
    /// 4. Renders the payload
    /// 5. Writes it to the request's target, using `stdout` for
    ///    [`OutputTarget::Stdout`]
    ///
    /// # Errors
    ///
    /// Returns the first failure of any step. Nothing is written unless the
    /// payload rendered completely.
    pub fn execute_with(
        &self,
        request: &ExportRequest,
        stdout: &mut dyn Write,
    ) -> Result<ExportSummary> {
        let start_time = Instant::now();

        let format = ExportFormat::from_str(&request.format)?;
        let edition = self.repository.edition();
        if let Some(requested) = request.edition {
            if requested != edition {
                return Err(GeodataError::Configuration(format!(
                    "Requested edition {} but the repository serves edition {}",
                    requested, edition
                )));
            }
        }
        let exporter = create_exporter(format, &self.settings);

        log_export_start!(format, edition, request.minify);

        let dataset = self.repository.load()?;
        dataset.validate()?;
        tracing::debug!(dataset = %dataset.name(), "Dataset loaded and validated");

        let payload = exporter.export(&dataset, request.minify)?;
        let destination = write_payload(&request.output, format, &payload, stdout)?;

        let summary = ExportSummary::new(format, dataset.edition, request.minify)
            .with_record_counts(&dataset)
            .with_output(payload.len(), destination)
            .with_duration(start_time.elapsed());

        log_export_complete!(summary.bytes_written, summary.duration);
        Ok(summary)
    }
}

/// Write the payload and describe where it went
fn write_payload(
    target: &OutputTarget,
    format: ExportFormat,
    payload: &[u8],
    stdout: &mut dyn Write,
) -> Result<String> {
    match target.resolve(format) {
        None => {
            if format.is_binary() {
                tracing::warn!(format = %format, "Writing binary payload to stdout");
            }
            stdout.write_all(payload)?;
            stdout.flush()?;
            Ok("stdout".to_string())
        }
        Some(path) => {
            fs::write(&path, payload).map_err(|e| {
                GeodataError::Io(format!("Failed to write {}: {}", path.display(), e))
            })?;
            tracing::debug!(path = %path.display(), bytes = payload.len(), "Payload written");
            Ok(path.display().to_string())
        }
    }
}
