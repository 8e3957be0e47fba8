//! Configuration management for roadwatch.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::location::{
    DeniedLocationProvider, FixedLocationProvider, LocationProvider, UnavailableLocationProvider,
};
use crate::obstacle::{Position, LATITUDE_RANGE, LONGITUDE_RANGE};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "roadwatch";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "roadwatch.db";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ROADWATCH_`, sections separated
///    by `__`, e.g. `ROADWATCH_STORAGE__DATABASE_PATH`)
/// 2. TOML config file at `~/.config/roadwatch/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Location configuration.
    pub location: LocationConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/roadwatch/roadwatch.db`
    pub database_path: Option<PathBuf>,
    /// Key the obstacle document is stored under.
    pub key: String,
}

/// How the current position is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationMode {
    /// Report the configured latitude/longitude.
    Fixed,
    /// Behave as if location permission was refused.
    Denied,
    /// No positioning source.
    #[default]
    Unavailable,
}

/// Location-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Which provider answers position requests.
    pub mode: LocationMode,
    /// Latitude reported in `fixed` mode.
    pub latitude: Option<f64>,
    /// Longitude reported in `fixed` mode.
    pub longitude: Option<f64>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            key: crate::store::OBSTACLES_KEY.to_string(),
        }
    }
}

impl LocationConfig {
    /// The configured position, if both coordinates are set and valid.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Position::new(latitude, longitude).ok(),
            _ => None,
        }
    }

    /// Build the provider selected by `mode`.
    ///
    /// # Errors
    ///
    /// Returns an error if `fixed` mode has no valid position.
    pub fn build_provider(&self) -> Result<Box<dyn LocationProvider>> {
        match self.mode {
            LocationMode::Fixed => {
                let position = self.position().ok_or_else(|| Error::ConfigValidation {
                    message: "location mode 'fixed' requires latitude and longitude".to_string(),
                })?;
                Ok(Box::new(FixedLocationProvider::new(position)))
            }
            LocationMode::Denied => Ok(Box::new(DeniedLocationProvider)),
            LocationMode::Unavailable => Ok(Box::new(UnavailableLocationProvider)),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `ROADWATCH_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("ROADWATCH_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.key.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "storage key must not be empty".to_string(),
            });
        }

        let location = &self.location;
        match (location.latitude, location.longitude) {
            (None, None) => {}
            (Some(latitude), Some(longitude)) => {
                if !LATITUDE_RANGE.contains(&latitude) {
                    return Err(Error::ConfigValidation {
                        message: format!("location latitude {latitude} is outside -90..=90"),
                    });
                }
                if !LONGITUDE_RANGE.contains(&longitude) {
                    return Err(Error::ConfigValidation {
                        message: format!("location longitude {longitude} is outside -180..=180"),
                    });
                }
            }
            _ => {
                return Err(Error::ConfigValidation {
                    message: "location latitude and longitude must be set together".to_string(),
                });
            }
        }

        if location.mode == LocationMode::Fixed && location.position().is_none() {
            return Err(Error::ConfigValidation {
                message: "location mode 'fixed' requires latitude and longitude".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }
}
