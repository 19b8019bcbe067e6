//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "geodatabr.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("Initializing geodatabr configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point [[datasets]] at your dataset JSON files");
                println!("  2. Validate configuration: geodatabr validate-config");
                println!("  3. List formats: geodatabr formats");
                println!("  4. Run export: geodatabr export --format sql --out");
                println!();
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, output = %self.output, "Failed to write configuration file");
                println!("Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# geodatabr configuration file

[application]
log_level = "info"

[export]
format = "json"
minify = false
locale = "en"

[sql]
dialect = "standard"
create_indexes = true

[[datasets]]
edition = 2016
path = "data/dtb_2016.json"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# geodatabr configuration file
#
# Every section is optional. Values may reference environment variables
# with ${VAR_NAME}, and any key can be overridden at runtime with
# GEODATABR_<SECTION>_<KEY>, e.g. GEODATABR_EXPORT_FORMAT=sql.

[application]
# trace | debug | info | warn | error
log_level = "info"

[export]
# csv | json | yaml | php | plist | xml | sql | sqlite3
format = "json"

# Compact output (no indentation or optional whitespace)
minify = false

# Table and field names: "en" (states, state_id, name)
# or "pt_BR" (uf, id_uf, nome)
locale = "en"

# "-" writes to stdout, "auto" writes dtb.<extension>,
# anything else is a file path
# output = "auto"

[sql]
# "standard" escapes quotes with a backslash and adds constraints after
# the data; "sqlite" doubles quotes and declares constraints inline
dialect = "standard"

# Create an index on every foreign-key column
create_indexes = true

# One entry per dataset edition. The latest edition is exported unless
# --edition is given.
[[datasets]]
edition = 2016
path = "${GEODATABR_DATA_DIR}/dtb_2016.json"

# [[datasets]]
# edition = 2014
# path = "${GEODATABR_DATA_DIR}/dtb_2014.json"

[logging]
# JSON log files, in addition to the console log on stderr
local_enabled = false
local_path = "./logs"
# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_str;
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "geodatabr.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "geodatabr.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config_is_loadable() {
        let config = load_config_str(&InitArgs::generate_minimal_config()).unwrap();
        assert_eq!(config.datasets.len(), 1);
        assert_eq!(config.export.format, "json");
    }

    #[test]
    fn test_generate_config_with_examples() {
        std::env::set_var("GEODATABR_DATA_DIR", "/srv/dtb");
        let content = InitArgs::generate_config_with_examples();
        let config = load_config_str(&content).unwrap();
        assert!(content.contains("# geodatabr configuration file"));
        assert_eq!(
            config.datasets[0].path,
            std::path::PathBuf::from("/srv/dtb/dtb_2016.json")
        );
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("geodatabr.toml");
        fs::write(&output, "# existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "# existing");

        let forced = InitArgs { force: true, ..args };
        assert_eq!(forced.execute().unwrap(), 0);
        assert!(fs::read_to_string(&output).unwrap().contains("[[datasets]]"));
    }
}
