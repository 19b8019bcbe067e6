//! Dataset sources
//!
//! - [`traits`] - The [`DatasetRepository`] abstraction
//! - [`json`] - Repository reading a local JSON file
//! - [`factory`] - Repository selection from configuration

pub mod factory;
pub mod json;
pub mod traits;

pub use factory::create_repository;
pub use json::JsonDatasetRepository;
pub use traits::DatasetRepository;
