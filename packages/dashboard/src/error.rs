//! Controller errors.

use crime_dashboard_dataset::DatasetError;
use crime_dashboard_filter_models::FilterError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the dashboard's fallible entry points.
///
/// Transitions built from typed [`FilterChange`] values never fail; only
/// construction from configuration and string-driven transitions do.
///
/// [`FilterChange`]: crime_dashboard_filter_models::FilterChange
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The dataset could not be loaded.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// A filter dimension or value could not be parsed.
    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterError),
}
