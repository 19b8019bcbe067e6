//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::GeodataConfig;
use crate::core::export::SqlDialect;
use crate::domain::errors::GeodataError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into GeodataConfig
/// 4. Applies environment variable overrides (GEODATABR_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use geodatabr::config::loader::load_config;
///
/// let config = load_config("geodatabr.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<GeodataConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(GeodataError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        GeodataError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from TOML text
///
/// # Errors
///
/// Same as [`load_config`], minus file access.
pub fn load_config_str(contents: &str) -> Result<GeodataConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: GeodataConfig = toml::from_str(&contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        GeodataError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| GeodataError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(GeodataError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using GEODATABR_* prefix
///
/// Environment variables follow the pattern: GEODATABR_<SECTION>_<KEY>
/// For example: GEODATABR_EXPORT_FORMAT, GEODATABR_SQL_DIALECT
fn apply_env_overrides(config: &mut GeodataConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("GEODATABR_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("GEODATABR_EXPORT_FORMAT") {
        config.export.format = val;
    }
    if let Ok(val) = std::env::var("GEODATABR_EXPORT_MINIFY") {
        config.export.minify = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("GEODATABR_EXPORT_LOCALE") {
        config.export.locale = val;
    }
    if let Ok(val) = std::env::var("GEODATABR_EXPORT_OUTPUT") {
        config.export.output = Some(val);
    }

    // SQL overrides
    if let Ok(val) = std::env::var("GEODATABR_SQL_DIALECT") {
        config.sql.dialect = SqlDialect::from_str(&val)?;
    }
    if let Ok(val) = std::env::var("GEODATABR_SQL_CREATE_INDEXES") {
        config.sql.create_indexes = val.parse().unwrap_or(true);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("GEODATABR_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("GEODATABR_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("GEODATABR_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Edition;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("GEODATABR_TEST_DATA_DIR", "/srv/dtb");
        let input = "path = \"${GEODATABR_TEST_DATA_DIR}/dtb_2016.json\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "path = \"/srv/dtb/dtb_2016.json\"\n");
        std::env::remove_var("GEODATABR_TEST_DATA_DIR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("GEODATABR_TEST_MISSING_VAR");
        let input = "path = \"${GEODATABR_TEST_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("GEODATABR_TEST_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# path = \"${GEODATABR_TEST_COMMENTED_VAR}\"";
        assert_eq!(substitute_env_vars(input).unwrap(), format!("{input}\n"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(GeodataError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[export]
format = "csv"
locale = "pt_BR"

[sql]
dialect = "sqlite"

[[datasets]]
edition = 2016
path = "data/dtb_2016.json"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.export.locale, "pt_BR");
        assert_eq!(config.sql.dialect, SqlDialect::Sqlite);
        assert_eq!(config.datasets.len(), 1);
        assert_eq!(config.datasets[0].edition, Edition::new(2016).unwrap());
        assert_eq!(config.datasets[0].path, PathBuf::from("data/dtb_2016.json"));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let err = load_config_str("[export\nformat = ").unwrap_err();
        assert!(matches!(err, GeodataError::Configuration(_)));
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let err = load_config_str("[export]\nlocale = \"fr\"\n").unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("GEODATABR_LOGGING_LOCAL_PATH", "/tmp/geodatabr-logs");
        let config = load_config_str("").unwrap();
        std::env::remove_var("GEODATABR_LOGGING_LOCAL_PATH");
        assert_eq!(config.logging.local_path, "/tmp/geodatabr-logs");
    }
}
