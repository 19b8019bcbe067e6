//! External data sources for geodatabr.
//!
//! - [`dataset`] - Dataset repositories (trait-based)
//!
//! # Design Pattern
//!
//! Adapters isolate where territorial data comes from, so exporters and the
//! coordinator can be tested against in-memory repositories.
//!
//! ```rust,no_run
//! use geodatabr::adapters::dataset::{DatasetRepository, JsonDatasetRepository};
//! use geodatabr::domain::Edition;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = JsonDatasetRepository::new("data/dtb_2016.json", Edition::new(2016)?);
//! let dataset = repository.load()?;
//! println!("{} states", dataset.states.len());
//! # Ok(())
//! # }
//! ```

pub mod dataset;
