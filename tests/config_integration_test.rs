//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` so they do not
//! interfere with each other.

use geodatabr::config::load_config;
use geodatabr::core::export::SqlDialect;
use geodatabr::domain::Edition;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("GEODATABR_APPLICATION_LOG_LEVEL");
    std::env::remove_var("GEODATABR_EXPORT_FORMAT");
    std::env::remove_var("GEODATABR_EXPORT_MINIFY");
    std::env::remove_var("GEODATABR_SQL_DIALECT");
    std::env::remove_var("TEST_GEODATABR_DATA_DIR");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"

[export]
format = "sqlite3"
minify = true
locale = "pt_BR"
output = "auto"

[sql]
dialect = "sqlite"
create_indexes = false

[[datasets]]
edition = 2014
path = "data/dtb_2014.json"

[[datasets]]
edition = 2016
path = "data/dtb_2016.json"

[logging]
local_enabled = true
local_path = "/var/log/geodatabr"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.export.format, "sqlite3");
    assert!(config.export.minify);
    assert_eq!(config.export.locale, "pt_BR");
    assert_eq!(config.export.output.as_deref(), Some("auto"));
    assert_eq!(config.sql.dialect, SqlDialect::Sqlite);
    assert!(!config.sql.create_indexes);
    assert_eq!(config.datasets.len(), 2);
    assert_eq!(config.latest_edition(), Some(Edition::new(2016).unwrap()));
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config("[[datasets]]\nedition = 2016\npath = \"dtb.json\"\n");
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.export.format, "json");
    assert!(!config.export.minify);
    assert_eq!(config.export.locale, "en");
    assert!(config.export.output.is_none());
    assert_eq!(config.sql.dialect, SqlDialect::Standard);
    assert!(config.sql.create_indexes);
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "./logs");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_GEODATABR_DATA_DIR", "/srv/ibge");

    let temp_file = write_config(
        "# path = \"${TEST_GEODATABR_UNSET_IN_COMMENT}\"\n[[datasets]]\nedition = 2016\npath = \"${TEST_GEODATABR_DATA_DIR}/dtb_2016.json\"\n",
    );
    let config = load_config(temp_file.path()).unwrap();
    cleanup_env_vars();

    assert_eq!(
        config.datasets[0].path,
        PathBuf::from("/srv/ibge/dtb_2016.json")
    );
}

#[test]
fn test_missing_env_var_fails() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        "[[datasets]]\nedition = 2016\npath = \"${TEST_GEODATABR_DATA_DIR}/dtb.json\"\n",
    );
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_GEODATABR_DATA_DIR"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("GEODATABR_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("GEODATABR_EXPORT_FORMAT", "xml");
    std::env::set_var("GEODATABR_EXPORT_MINIFY", "true");
    std::env::set_var("GEODATABR_SQL_DIALECT", "sqlite3");

    let temp_file = write_config("[export]\nformat = \"csv\"\n");
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    let config = result.unwrap();
    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.export.format, "xml");
    assert!(config.export.minify);
    assert_eq!(config.sql.dialect, SqlDialect::Sqlite);
}

#[test]
fn test_invalid_override_fails() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("GEODATABR_SQL_DIALECT", "oracle");

    let temp_file = write_config("");
    let result = load_config(temp_file.path());
    cleanup_env_vars();

    assert!(result.is_err());
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    for content in [
        "[application]\nlog_level = \"verbose\"\n",
        "[export]\nformat = \"unknown-format\"\n",
        "[export]\nlocale = \"es\"\n",
        "[sql]\ndialect = \"oracle\"\n",
        "[logging]\nlocal_rotation = \"weekly\"\n",
        "[[datasets]]\nedition = 1500\npath = \"old.json\"\n",
        "[[datasets]]\nedition = 2016\npath = \"a.json\"\n[[datasets]]\nedition = 2016\npath = \"b.json\"\n",
    ] {
        let temp_file = write_config(content);
        let err = load_config(temp_file.path()).unwrap_err();
        assert_eq!(err.exit_code(), 2, "accepted invalid config:\n{content}");
    }
}
