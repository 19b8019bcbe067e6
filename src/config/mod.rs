//! Configuration management for geodatabr.
//!
//! # Overview
//!
//! geodatabr uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `GEODATABR_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use geodatabr::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("geodatabr.toml")?;
//!
//! println!("Default format: {}", config.export.format);
//! for dataset in &config.datasets {
//!     println!("{} -> {}", dataset.edition, dataset.path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ExportConfig`] - Default format, minify flag, locale and output
//! - [`SqlConfig`] - SQL dialect and index creation
//! - [`DatasetConfig`] - Dataset file per edition
//! - [`LoggingConfig`] - Local JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! format = "sql"
//! minify = false
//! locale = "en"
//!
//! [sql]
//! dialect = "standard"
//! create_indexes = true
//!
//! [[datasets]]
//! edition = 2016
//! path = "${GEODATABR_DATA_DIR}/dtb_2016.json"
//!
//! [logging]
//! local_enabled = false
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_str};
pub use schema::{
    ApplicationConfig, DatasetConfig, ExportConfig, GeodataConfig, LoggingConfig, SqlConfig,
};
