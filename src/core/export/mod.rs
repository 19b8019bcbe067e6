//! Export orchestration and per-format exporters
//!
//! This module provides the export side of geodatabr:
//! - [`ExportFormat`]: the registry of supported output formats
//! - [`Exporter`]: the capability every format implements
//! - [`create_exporter`]: factory selecting an exporter by format
//! - [`ExportCoordinator`]: load, validate, render and write one export
//! - [`ExportSummary`]: what an export produced

pub mod coordinator;
pub mod formats;
pub mod summary;

pub use coordinator::{ExportCoordinator, ExportRequest, OutputTarget};
pub use formats::sql::{SqlDialect, SqlSettings};
pub use summary::ExportSummary;

use crate::config::GeodataConfig;
use crate::core::localize::Localization;
use crate::core::serialize::SerializerOptions;
use crate::domain::{Dataset, GeodataError, Result};
use std::fmt;
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Json,
    Yaml,
    Php,
    Plist,
    Xml,
    Sql,
    Sqlite3,
}

impl ExportFormat {
    /// Every registered format, in listing order
    pub const ALL: [ExportFormat; 8] = [
        ExportFormat::Csv,
        ExportFormat::Json,
        ExportFormat::Yaml,
        ExportFormat::Php,
        ExportFormat::Plist,
        ExportFormat::Xml,
        ExportFormat::Sql,
        ExportFormat::Sqlite3,
    ];

    /// Identifier accepted on the command line and in configuration
    pub fn identifier(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Yaml => "yaml",
            ExportFormat::Php => "php",
            ExportFormat::Plist => "plist",
            ExportFormat::Xml => "xml",
            ExportFormat::Sql => "sql",
            ExportFormat::Sqlite3 => "sqlite3",
        }
    }

    /// Conventional file extension, dot included
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => ".csv",
            ExportFormat::Json => ".json",
            ExportFormat::Yaml => ".yaml",
            ExportFormat::Php => ".phpd",
            ExportFormat::Plist => ".plist",
            ExportFormat::Xml => ".xml",
            ExportFormat::Sql => ".sql",
            ExportFormat::Sqlite3 => ".sqlite3",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "Comma-separated values (single flattened table)",
            ExportFormat::Json => "JavaScript Object Notation",
            ExportFormat::Yaml => "YAML Ain't Markup Language",
            ExportFormat::Php => "PHP serialized data",
            ExportFormat::Plist => "Apple property list",
            ExportFormat::Xml => "Tagged XML database dump",
            ExportFormat::Sql => "SQL schema and data script",
            ExportFormat::Sqlite3 => "SQLite 3 database file",
        }
    }

    /// Whether the payload is binary rather than text
    pub fn is_binary(&self) -> bool {
        matches!(self, ExportFormat::Sqlite3)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for ExportFormat {
    type Err = GeodataError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|format| format.identifier() == wanted)
            .copied()
            .ok_or_else(|| {
                GeodataError::Configuration(format!(
                    "Unsupported export format '{}'. Must be one of: {}",
                    s,
                    Self::ALL
                        .iter()
                        .map(ExportFormat::identifier)
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

/// Renders a dataset into one output format
///
/// Implementations build their own serializer from the dataset, so every call
/// works on freshly computed, independently owned records.
pub trait Exporter {
    /// The format this exporter produces
    fn format(&self) -> ExportFormat;

    /// Render the dataset
    ///
    /// # Errors
    ///
    /// Returns a serialization error if rendering fails. No partial output is
    /// returned.
    fn export(&self, dataset: &Dataset, minify: bool) -> Result<Vec<u8>>;
}

/// Settings shared by every exporter
#[derive(Debug, Clone)]
pub struct ExportSettings {
    /// Translate table names and keys
    pub localization: Option<Localization>,
    /// Target dialect of the SQL script
    pub sql_dialect: SqlDialect,
    /// Emit indexes on foreign-key columns
    pub create_indexes: bool,
}

impl ExportSettings {
    /// Settings from the `[export]` and `[sql]` configuration sections
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unsupported locale.
    pub fn from_config(config: &GeodataConfig) -> Result<Self> {
        Ok(Self {
            localization: Some(Localization::for_locale(&config.export.locale)?),
            sql_dialect: config.sql.dialect,
            create_indexes: config.sql.create_indexes,
        })
    }

    pub(crate) fn serializer_options(&self) -> SerializerOptions<'_> {
        SerializerOptions::new(self.localization.as_ref())
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            localization: None,
            sql_dialect: SqlDialect::Standard,
            create_indexes: true,
        }
    }
}

/// Create the exporter registered for a format
///
/// # Examples
///
/// ```
/// use geodatabr::core::export::{create_exporter, ExportFormat, ExportSettings};
/// use geodatabr::domain::{Dataset, Edition, State};
///
/// let dataset = Dataset::new(Edition::new(2016).unwrap(), vec![State::new(12, "Acre")]);
/// let exporter = create_exporter(ExportFormat::Json, &ExportSettings::default());
/// let bytes = exporter.export(&dataset, true).unwrap();
/// assert_eq!(bytes, br#"{"states":{"12":{"name":"Acre"}}}"#);
/// ```
pub fn create_exporter(format: ExportFormat, settings: &ExportSettings) -> Box<dyn Exporter> {
    tracing::debug!(format = %format, "Creating exporter");
    let settings = settings.clone();
    match format {
        ExportFormat::Csv => Box::new(formats::csv::CsvExporter::new(settings)),
        ExportFormat::Json => Box::new(formats::json::JsonExporter::new(settings)),
        ExportFormat::Yaml => Box::new(formats::yaml::YamlExporter::new(settings)),
        ExportFormat::Php => Box::new(formats::php::PhpExporter::new(settings)),
        ExportFormat::Plist => Box::new(formats::plist::PlistExporter::new(settings)),
        ExportFormat::Xml => Box::new(formats::xml::XmlExporter::new(settings)),
        ExportFormat::Sql => Box::new(formats::sql::SqlExporter::new(settings)),
        ExportFormat::Sqlite3 => Box::new(formats::sqlite::SqliteExporter::new(settings)),
    }
}

/// Resolve a format identifier and create its exporter
///
/// # Errors
///
/// Returns a configuration error for unregistered identifiers, before any
/// exporter is built.
pub fn exporter_for(identifier: &str, settings: &ExportSettings) -> Result<Box<dyn Exporter>> {
    let format = ExportFormat::from_str(identifier)?;
    Ok(create_exporter(format, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("csv", ExportFormat::Csv ; "csv")]
    #[test_case("JSON", ExportFormat::Json ; "uppercase json")]
    #[test_case(" yaml ", ExportFormat::Yaml ; "padded yaml")]
    #[test_case("sqlite3", ExportFormat::Sqlite3 ; "sqlite3")]
    fn test_format_from_str(input: &str, expected: ExportFormat) {
        assert_eq!(ExportFormat::from_str(input).unwrap(), expected);
    }

    #[test]
    fn test_unknown_format_is_configuration_error() {
        let err = ExportFormat::from_str("unknown-format").unwrap_err();
        assert!(matches!(err, GeodataError::Configuration(_)));
        assert!(err.to_string().contains("unknown-format"));
    }

    #[test]
    fn test_exporter_for_unknown_format() {
        let result = exporter_for("unknown-format", &ExportSettings::default());
        assert!(matches!(result, Err(GeodataError::Configuration(_))));
    }

    #[test]
    fn test_registry_covers_every_format() {
        let settings = ExportSettings::default();
        for format in ExportFormat::ALL {
            assert_eq!(create_exporter(format, &settings).format(), format);
            assert!(format.extension().starts_with('.'));
        }
    }

    #[test]
    fn test_settings_from_config() {
        let mut config = GeodataConfig::default();
        config.export.locale = "pt_BR".to_string();
        config.sql.dialect = SqlDialect::Sqlite;
        config.sql.create_indexes = false;

        let settings = ExportSettings::from_config(&config).unwrap();
        assert_eq!(
            settings.localization.as_ref().map(Localization::locale),
            Some("pt_BR")
        );
        assert_eq!(settings.sql_dialect, SqlDialect::Sqlite);
        assert!(!settings.create_indexes);
    }

    #[test]
    fn test_extensions() {
        assert_eq!(ExportFormat::Php.extension(), ".phpd");
        assert_eq!(ExportFormat::Xml.extension(), ".xml");
        assert_eq!(ExportFormat::Sqlite3.extension(), ".sqlite3");
        assert!(ExportFormat::Sqlite3.is_binary());
        assert!(!ExportFormat::Sql.is_binary());
    }
}
