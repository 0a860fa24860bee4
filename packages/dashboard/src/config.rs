//! TOML configuration for the dashboard.
//!
//! ```toml
//! [limits]
//! city_ranking = 10
//! crime_types = 8
//! cross_tab_cities = 6
//! cross_tab_crime_types = 6
//! ```
//!
//! Every field is optional and falls back to [`DashboardLimits::default`].

use std::path::{Path, PathBuf};

use crime_dashboard_analytics_models::DashboardLimits;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`DashboardConfig`].
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A top-N limit is zero.
    #[error("Limit '{name}' must be greater than zero")]
    InvalidLimit {
        /// Name of the offending limit.
        name: &'static str,
    },
}

/// Dashboard configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Top-N sizes for the ranked visuals.
    pub limits: DashboardLimits,
}

impl DashboardConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::InvalidLimit`] if any limit is zero.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed, or
    /// validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded dashboard config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a given file cannot be loaded.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Checks that every limit is positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLimit`] naming the first zero limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = &self.limits;
        for (name, value) in [
            ("city_ranking", limits.city_ranking),
            ("crime_types", limits.crime_types),
            ("cross_tab_cities", limits.cross_tab_cities),
            ("cross_tab_crime_types", limits.cross_tab_crime_types),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidLimit { name });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = DashboardConfig::from_toml_str("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.limits.city_ranking, 10);
        assert_eq!(config.limits.crime_types, 8);
    }

    #[test]
    fn partial_limits_override() {
        let config = DashboardConfig::from_toml_str(
            r"
            [limits]
            city_ranking = 5
            cross_tab_crime_types = 4
            ",
        )
        .unwrap();
        assert_eq!(config.limits.city_ranking, 5);
        assert_eq!(config.limits.cross_tab_crime_types, 4);
        assert_eq!(config.limits.cross_tab_cities, 6);
    }

    #[test]
    fn rejects_zero_limit() {
        let err = DashboardConfig::from_toml_str("[limits]\ncrime_types = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidLimit {
                name: "crime_types"
            }
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            DashboardConfig::from_toml_str("[limits\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            DashboardConfig::load(Path::new("/nonexistent/dashboard.toml")),
            Err(ConfigError::Io { .. })
        ));
        assert_eq!(
            DashboardConfig::load_or_default(None).unwrap(),
            DashboardConfig::default()
        );
    }
}
