//! Dataset repository factory
//!
//! This module provides factory functions to create dataset repositories
//! based on configuration.

use crate::adapters::dataset::json::JsonDatasetRepository;
use crate::adapters::dataset::traits::DatasetRepository;
use crate::config::schema::GeodataConfig;
use crate::domain::{Edition, GeodataError, Result};

/// Create the repository serving an edition
///
/// # Arguments
///
/// * `config` - The geodatabr configuration
/// * `edition` - Requested edition; `None` selects the latest configured one
///
/// # Errors
///
/// Returns a configuration error if no dataset is configured for the edition
pub fn create_repository(
    config: &GeodataConfig,
    edition: Option<Edition>,
) -> Result<Box<dyn DatasetRepository>> {
    let edition = match edition.or_else(|| config.latest_edition()) {
        Some(edition) => edition,
        None => {
            return Err(GeodataError::Configuration(
                "No dataset editions configured. Add a [[datasets]] entry".to_string(),
            ))
        }
    };

    let dataset = config.dataset(edition).ok_or_else(|| {
        let available = config
            .datasets
            .iter()
            .map(|d| d.edition.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        GeodataError::Configuration(format!(
            "No dataset configured for edition {}. Available editions: {}",
            edition, available
        ))
    })?;

    tracing::info!(
        edition = %edition,
        path = %dataset.path.display(),
        "Creating JSON dataset repository"
    );
    Ok(Box::new(JsonDatasetRepository::new(
        dataset.path.clone(),
        edition,
    )))
}
