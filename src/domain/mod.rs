//! Domain models and types for geodatabr.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Entity schema** ([`EntityKind`], [`Field`]): table names and field lists
//! - **Entity models** ([`State`], [`Mesoregion`], ... [`Subdistrict`])
//! - **The loaded tree** ([`Dataset`]) with per-level iterators
//! - **Error types** ([`GeodataError`]) and the [`Result`] alias
//!
//! # Building a tree
//!
//! Child records inherit every ancestor key from the record they are added to:
//!
//! ```rust
//! use geodatabr::domain::{Dataset, Edition, Entity, State};
//!
//! let mut state = State::new(11, "Rondônia");
//! state
//!     .add_mesoregion(1101, "Madeira-Guaporé")
//!     .add_microregion(11001, "Porto Velho");
//!
//! let dataset = Dataset::new(Edition::new(2016).unwrap(), vec![state]);
//! let micro = dataset.microregions().next().unwrap();
//! assert_eq!(micro.ancestor_ids(), vec![1101, 11]);
//! ```

pub mod dataset;
pub mod entities;
pub mod errors;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod result;
pub mod schema;

// Re-export commonly used types for convenience
pub use dataset::Dataset;
pub use entities::{District, Entity, Mesoregion, Microregion, Municipality, State, Subdistrict};
pub use errors::GeodataError;
pub use ids::Edition;
pub use result::Result;
pub use schema::{EntityKind, Field};
