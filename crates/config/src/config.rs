//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for the plank application.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{ConfigError, Result};
use crate::logging::LoggingConfig;
use crate::persistence::{find_config_file, read_config_file, write_config_file};
use crate::storage::StorageConfig;

/// Overrides the storage data directory.
pub const ENV_DATA_DIR: &str = "PLANK_DATA_DIR";

/// Enables (`1`, `true`, `yes`, `on`) or disables (`0`, `false`, `no`, `off`)
/// persistence.
pub const ENV_PERSIST: &str = "PLANK_PERSIST";

/// Overrides the log level.
pub const ENV_LOG: &str = "PLANK_LOG";

/// The main configuration struct for the plank application.
///
/// # Examples
///
/// ```
/// use plank_config::{Config, StorageConfig};
///
/// let config = Config::default();
/// assert!(config.storage.persist);
///
/// let config = Config {
///     storage: StorageConfig::in_memory(),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where and whether tasks are persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Diagnostic log settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads configuration from the default file locations, then applies
    /// environment overrides.
    ///
    /// Without a config file the built-in defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be read
    /// or parsed, if an environment override is malformed, or if the result
    /// fails validation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use plank_config::Config;
    ///
    /// # async fn example() -> plank_config::Result<()> {
    /// let config = Config::load().await?;
    /// println!("persisting: {}", config.storage.persist);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub async fn load() -> Result<Self> {
        let mut config = match find_config_file() {
            Some(path) => {
                debug!(?path, "loading config file");
                read_config_file(&path)?
            }
            None => Self::default(),
        };
        config.apply_env_with(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific file, without environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or fails
    /// validation.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the log level is not recognized.
    pub fn validate(&self) -> Result<()> {
        self.logging.validate()?;
        Ok(())
    }

    /// Applies environment overrides using `lookup` to read variables.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if [`ENV_PERSIST`] is not a
    /// recognized boolean.
    ///
    /// # Examples
    ///
    /// ```
    /// use plank_config::Config;
    ///
    /// let mut config = Config::default();
    /// config
    ///     .apply_env_with(|name| (name == "PLANK_PERSIST").then(|| "off".to_string()))
    ///     .unwrap();
    /// assert!(!config.storage.persist);
    /// ```
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(dir) = var(ENV_DATA_DIR) {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(value) = var(ENV_PERSIST) {
            self.storage.persist = parse_bool(&value).ok_or_else(|| ConfigError::InvalidEnvVar {
                name: ENV_PERSIST.to_string(),
                value: value.clone(),
            })?;
        }
        if let Some(level) = var(ENV_LOG) {
            self.logging.level = level.trim().to_string();
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
