//! Dataset source abstraction

use crate::domain::{Dataset, Edition, Result};

/// Supplies the entity tree of one dataset edition
///
/// Implementations return a fully populated tree in stable source order. The
/// tree is loaded fresh on every call and is owned by the caller.
pub trait DatasetRepository {
    /// Edition this repository serves
    fn edition(&self) -> Edition;

    /// Load the complete entity tree
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the source cannot be read, or a data integrity
    /// error if its records do not form a valid tree.
    fn load(&self) -> Result<Dataset>;
}
