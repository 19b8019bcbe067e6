//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console logs on stderr
//! - Configurable log levels, overridable with `RUST_LOG`
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use geodatabr::logging::init_logging;
//! use geodatabr::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(format = "json", "Export started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export operation
///
/// # Example
///
/// ```no_run
/// use geodatabr::log_export_start;
/// use geodatabr::core::export::ExportFormat;
/// use geodatabr::domain::Edition;
///
/// let edition = Edition::new(2016).unwrap();
/// log_export_start!(ExportFormat::Sql, edition, true);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($format:expr, $edition:expr, $minify:expr) => {
        tracing::info!(
            format = %$format,
            edition = %$edition,
            minify = $minify,
            "Starting export"
        );
    };
}

/// Log the completion of an export operation
///
/// # Example
///
/// ```no_run
/// use geodatabr::log_export_complete;
/// use std::time::Duration;
///
/// let bytes = 4096;
/// let duration = Duration::from_millis(120);
/// log_export_complete!(bytes, duration);
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($bytes:expr, $duration:expr) => {
        tracing::info!(
            bytes = $bytes,
            duration_ms = $duration.as_millis(),
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use geodatabr::log_error_with_context;
/// use geodatabr::domain::GeodataError;
///
/// let error = GeodataError::Configuration("Unsupported export format".to_string());
/// log_error_with_context!(&error, "Failed to resolve exporter");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            kind = $error.kind(),
            context = $context,
            "Error occurred"
        );
    };
}
