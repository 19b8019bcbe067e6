//! Core logic for geodatabr.
//!
//! # Modules
//!
//! - [`serialize`] - Record-oriented views of the entity tree (hierarchical and flattened)
//! - [`localize`] - Table and field name catalogs
//! - [`export`] - Output formats, the exporter registry and export orchestration
//!
//! # Export Workflow
//!
//! 1. **Resolve**: Look up the requested format (unknown formats fail here)
//! 2. **Load**: Read the dataset edition from its repository
//! 3. **Validate**: Check ancestor references and id uniqueness
//! 4. **Render**: Serialize the tree and encode it in the target format
//! 5. **Write**: Send the payload to stdout or a file
//! 6. **Report**: Produce an export summary
//!
//! # Example
//!
//! ```rust,no_run
//! use geodatabr::config::load_config;
//! use geodatabr::core::export::{ExportCoordinator, ExportRequest};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("geodatabr.toml")?;
//! let request = ExportRequest::from_config(&config.export);
//!
//! let coordinator = ExportCoordinator::from_config(&config, &request)?;
//! let summary = coordinator.execute(&request)?;
//!
//! eprintln!("{} records, {} bytes", summary.total_records(), summary.bytes_written);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod localize;
pub mod serialize;
