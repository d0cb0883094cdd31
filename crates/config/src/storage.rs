//! Task storage configuration.
//!
//! This module provides the [`StorageConfig`] type which selects between
//! eager on-disk persistence and the in-memory mode where nothing survives a
//! restart.
//!
//! # Data Directory
//!
//! When persistence is enabled and no directory is configured, tasks are
//! stored under the platform data directory:
//!
//! - Linux: `~/.local/share/plank/`
//! - macOS: `~/Library/Application Support/plank/`
//! - Windows: `C:\Users\<User>\AppData\Roaming\plank\`

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Application directory name under the platform data directory.
pub const DATA_DIR_NAME: &str = "plank";

/// Configuration for where and whether tasks are persisted.
///
/// # Examples
///
/// ```
/// use plank_config::StorageConfig;
///
/// let config = StorageConfig::default();
/// assert!(config.persist);
/// assert!(config.data_dir.is_none());
///
/// let config = StorageConfig::in_memory();
/// assert!(!config.persist);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Whether every change is written to disk.
    ///
    /// When false, the board starts from the sample tasks on every launch
    /// and changes only live for the session.
    #[serde(default = "default_persist")]
    pub persist: bool,

    /// Directory holding the persisted tasks.
    ///
    /// Defaults to the platform data directory when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_persist() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            persist: default_persist(),
            data_dir: None,
        }
    }
}

impl StorageConfig {
    /// Creates a configuration that persists into `dir`.
    #[must_use]
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self {
            persist: true,
            data_dir: Some(dir.into()),
        }
    }

    /// Creates a configuration with persistence disabled.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            persist: false,
            data_dir: None,
        }
    }

    /// Returns the directory tasks are stored in.
    ///
    /// The configured directory wins; otherwise the platform data directory
    /// joined with [`DATA_DIR_NAME`] is used.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is configured and the platform data
    /// directory cannot be determined.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use plank_config::StorageConfig;
    ///
    /// let config = StorageConfig::at("/tmp/board");
    /// assert_eq!(config.resolve_data_dir().unwrap(), Path::new("/tmp/board"));
    /// ```
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|d| d.join(DATA_DIR_NAME))
                .ok_or(ConfigError::NoHomeDirectory),
        }
    }
}
