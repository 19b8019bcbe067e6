//! Configuration schema types
//!
//! This module defines the configuration structure for geodatabr. Every
//! section is optional in the TOML file and falls back to its defaults.

use crate::core::export::{ExportFormat, SqlDialect};
use crate::core::localize::SUPPORTED_LOCALES;
use crate::domain::Edition;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::str::FromStr;

/// Main geodatabr configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeodataConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Default export settings, overridable on the command line
    #[serde(default)]
    pub export: ExportConfig,

    /// SQL script settings
    #[serde(default)]
    pub sql: SqlConfig,

    /// Dataset files, one per edition
    #[serde(default)]
    pub datasets: Vec<DatasetConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GeodataConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;

        let mut editions = HashSet::new();
        for dataset in &self.datasets {
            dataset.validate()?;
            if !editions.insert(dataset.edition) {
                return Err(format!(
                    "Duplicate dataset configured for edition {}",
                    dataset.edition
                ));
            }
        }

        self.logging.validate()?;
        Ok(())
    }

    /// Dataset configured for an edition, if any
    pub fn dataset(&self, edition: Edition) -> Option<&DatasetConfig> {
        self.datasets.iter().find(|d| d.edition == edition)
    }

    /// Most recent configured edition
    pub fn latest_edition(&self) -> Option<Edition> {
        self.datasets.iter().map(|d| d.edition).max()
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Export defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output format identifier (csv, json, yaml, php, plist, xml, sql, sqlite3)
    #[serde(default = "default_format")]
    pub format: String,

    /// Produce compact output
    #[serde(default)]
    pub minify: bool,

    /// Locale of table names and keys (en, pt_BR)
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Destination: `-` for stdout, `auto` for `dtb<extension>`, or a path
    #[serde(default)]
    pub output: Option<String>,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        ExportFormat::from_str(&self.format).map_err(|e| e.to_string())?;

        if !SUPPORTED_LOCALES.contains(&self.locale.as_str()) {
            return Err(format!(
                "Invalid export.locale '{}'. Must be one of: {}",
                self.locale,
                SUPPORTED_LOCALES.join(", ")
            ));
        }

        if matches!(&self.output, Some(output) if output.trim().is_empty()) {
            return Err("export.output cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            minify: false,
            locale: default_locale(),
            output: None,
        }
    }
}

/// SQL script configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqlConfig {
    /// Target dialect of the `sql` format (standard or sqlite)
    #[serde(default = "default_dialect")]
    pub dialect: SqlDialect,

    /// Create indexes on foreign-key columns
    #[serde(default = "default_true")]
    pub create_indexes: bool,
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            dialect: default_dialect(),
            create_indexes: true,
        }
    }
}

/// A dataset file for one edition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Edition (year) the file holds
    pub edition: Edition,

    /// Path to the dataset JSON file
    pub path: PathBuf,
}

impl DatasetConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err(format!(
                "datasets.path cannot be empty (edition {})",
                self.edition
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "json".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_dialect() -> SqlDialect {
    SqlDialect::Standard
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edition(year: u16) -> Edition {
        Edition::new(year).unwrap()
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_config_validation() {
        let mut config = ExportConfig::default();
        assert!(config.validate().is_ok());

        config.format = "unknown-format".to_string();
        assert!(config.validate().unwrap_err().contains("unknown-format"));

        config.format = "sqlite3".to_string();
        config.locale = "fr".to_string();
        assert!(config.validate().is_err());

        config.locale = "pt_BR".to_string();
        config.output = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_editions_rejected() {
        let mut config = GeodataConfig::default();
        config.datasets = vec![
            DatasetConfig {
                edition: edition(2016),
                path: PathBuf::from("a.json"),
            },
            DatasetConfig {
                edition: edition(2016),
                path: PathBuf::from("b.json"),
            },
        ];
        assert!(config.validate().unwrap_err().contains("Duplicate dataset"));
    }

    #[test]
    fn test_dataset_lookup() {
        let mut config = GeodataConfig::default();
        config.datasets = vec![
            DatasetConfig {
                edition: edition(2014),
                path: PathBuf::from("dtb_2014.json"),
            },
            DatasetConfig {
                edition: edition(2016),
                path: PathBuf::from("dtb_2016.json"),
            },
        ];
        assert_eq!(config.latest_edition(), Some(edition(2016)));
        assert_eq!(
            config.dataset(edition(2014)).map(|d| d.path.clone()),
            Some(PathBuf::from("dtb_2014.json"))
        );
        assert!(config.dataset(edition(2015)).is_none());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "hourly".to_string();
        config.local_enabled = true;
        config.local_path = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults_from_empty_toml() {
        let config: GeodataConfig = toml::from_str("").unwrap();
        assert_eq!(config.export.format, "json");
        assert_eq!(config.export.locale, "en");
        assert_eq!(config.sql.dialect, SqlDialect::Standard);
        assert!(config.sql.create_indexes);
        assert!(config.datasets.is_empty());
        assert!(config.validate().is_ok());
    }
}
