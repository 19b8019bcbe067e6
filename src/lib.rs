// geodatabr - Brazilian territorial division dataset exporter
// Copyright (c) 2025 geodatabr Contributors
// Licensed under the MIT License

//! # geodatabr - Brazilian territorial division exporter
//!
//! geodatabr exports the official Brazilian territorial division (states,
//! mesoregions, microregions, municipalities, districts and subdistricts)
//! into interchange formats for application developers.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Loading** a dataset edition as a typed entity tree
//! - **Serializing** the tree into per-table records, hierarchical or flattened
//! - **Exporting** those records as CSV, JSON, YAML, PHP serialize, property
//!   list, tagged XML, a SQL script or an SQLite 3 database
//!
//! ## Architecture
//!
//! geodatabr follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Serializers, exporters and export orchestration
//! - [`adapters`] - Dataset sources
//! - [`domain`] - Entity schema, entity tree and error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use geodatabr::adapters::dataset::{DatasetRepository, JsonDatasetRepository};
//! use geodatabr::core::export::{create_exporter, ExportFormat, ExportSettings};
//! use geodatabr::domain::Edition;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repository = JsonDatasetRepository::new("data/dtb_2016.json", Edition::new(2016)?);
//!     let dataset = repository.load()?;
//!     dataset.validate()?;
//!
//!     let exporter = create_exporter(ExportFormat::Sql, &ExportSettings::default());
//!     let script = exporter.export(&dataset, false)?;
//!     std::fs::write("dtb.sql", script)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Serialization
//!
//! Every exporter works from one of two record views of the tree:
//!
//! - [`core::serialize::Serializer`] yields one table per entity level, each
//!   record carrying its id, ancestor ids and name
//! - [`core::serialize::FlattenedSerializer`] yields a single table with one
//!   row per entity and the id and name of every ancestor, used by CSV
//!
//! ```rust
//! use geodatabr::core::serialize::{Serializer, SerializerOptions};
//! use geodatabr::domain::{Dataset, Edition, State};
//!
//! let mut state = State::new(53, "Distrito Federal");
//! state.add_mesoregion(5301, "Distrito Federal");
//! let dataset = Dataset::new(Edition::new(2016).unwrap(), vec![state]);
//!
//! let serializer = Serializer::new(&dataset, SerializerOptions::new(None));
//! let tables = serializer.serialize();
//! assert_eq!(tables[1].name, "mesoregions");
//! assert_eq!(tables[1].records[0].keys().collect::<Vec<_>>(), ["id", "state_id", "name"]);
//! ```
//!
//! ## Error Handling
//!
//! geodatabr uses the [`domain::GeodataError`] type for all errors. Each
//! error carries a discriminated kind that the CLI reports before aborting:
//!
//! ```rust
//! use geodatabr::core::export::ExportFormat;
//! use geodatabr::domain::GeodataError;
//! use std::str::FromStr;
//!
//! let err = ExportFormat::from_str("unknown-format").unwrap_err();
//! assert!(matches!(err, GeodataError::Configuration(_)));
//! assert_eq!(err.kind(), "ConfigurationError");
//! ```
//!
//! ## Logging
//!
//! geodatabr uses structured logging with the `tracing` crate. Console logs
//! go to stderr so that stdout can carry export payloads.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
