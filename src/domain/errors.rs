//! Domain error types
//!
//! This module defines the error hierarchy for geodatabr. Every failure is
//! reported as one of a small set of discriminated kinds so that the CLI can
//! surface the kind and abort the run. Third-party error types never leak
//! through the public API; they are converted into [`GeodataError`] here.

use thiserror::Error;

/// Main geodatabr error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum GeodataError {
    /// Unknown or unsupported settings, such as an unregistered output format
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The entity tree violates an ancestor-reference or uniqueness invariant
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// An exporter failed while rendering its payload
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl GeodataError {
    /// Stable label for the error kind, suitable for user-facing reports
    pub fn kind(&self) -> &'static str {
        match self {
            GeodataError::Configuration(_) => "ConfigurationError",
            GeodataError::DataIntegrity(_) => "DataIntegrityError",
            GeodataError::Serialization(_) => "SerializationError",
            GeodataError::Io(_) => "IoError",
        }
    }

    /// Process exit code used by the CLI for this kind of failure
    pub fn exit_code(&self) -> i32 {
        match self {
            GeodataError::Configuration(_) => 2,
            GeodataError::DataIntegrity(_) => 3,
            GeodataError::Serialization(_) => 4,
            GeodataError::Io(_) => 5,
        }
    }
}

impl From<std::io::Error> for GeodataError {
    fn from(err: std::io::Error) -> Self {
        GeodataError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GeodataError {
    fn from(err: serde_json::Error) -> Self {
        GeodataError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for GeodataError {
    fn from(err: serde_yaml::Error) -> Self {
        GeodataError::Serialization(format!("YAML error: {err}"))
    }
}

impl From<csv::Error> for GeodataError {
    fn from(err: csv::Error) -> Self {
        GeodataError::Serialization(format!("CSV error: {err}"))
    }
}

impl From<quick_xml::Error> for GeodataError {
    fn from(err: quick_xml::Error) -> Self {
        GeodataError::Serialization(format!("XML error: {err}"))
    }
}

impl From<rusqlite::Error> for GeodataError {
    fn from(err: rusqlite::Error) -> Self {
        GeodataError::Serialization(format!("SQLite error: {err}"))
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for GeodataError {
    fn from(err: toml::de::Error) -> Self {
        GeodataError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeodataError::Configuration("Unsupported output format".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: Unsupported output format"
        );
    }

    #[test]
    fn test_error_kind_labels() {
        assert_eq!(
            GeodataError::Configuration(String::new()).kind(),
            "ConfigurationError"
        );
        assert_eq!(
            GeodataError::DataIntegrity(String::new()).kind(),
            "DataIntegrityError"
        );
        assert_eq!(
            GeodataError::Serialization(String::new()).kind(),
            "SerializationError"
        );
        assert_eq!(GeodataError::Io(String::new()).kind(), "IoError");
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            GeodataError::Configuration(String::new()).exit_code(),
            GeodataError::DataIntegrity(String::new()).exit_code(),
            GeodataError::Serialization(String::new()).exit_code(),
            GeodataError::Io(String::new()).exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: GeodataError = io_err.into();
        assert!(matches!(err, GeodataError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: GeodataError = json_err.into();
        assert!(matches!(err, GeodataError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: GeodataError = toml_err.into();
        assert!(matches!(err, GeodataError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let err = GeodataError::DataIntegrity("orphan row".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
