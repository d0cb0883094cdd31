//! Logging configuration.
//!
//! The terminal is owned by the board while the application runs, so log
//! output goes to a file. This module provides the [`LoggingConfig`] type
//! describing the level filter and the file location.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Accepted log levels, lowest verbosity last.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Default log file name inside the data directory.
pub const DEFAULT_LOG_FILE: &str = "plank.log";

/// Configuration for diagnostic logging.
///
/// # Examples
///
/// ```
/// use plank_config::LoggingConfig;
///
/// let config = LoggingConfig::default();
/// assert_eq!(config.level, "info");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level that is written, one of [`LOG_LEVELS`].
    #[serde(default = "default_level")]
    pub level: String,

    /// Log file path. Defaults to [`DEFAULT_LOG_FILE`] in the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Returns the log file path, placing it in `data_dir` unless configured.
    #[must_use]
    pub fn resolve_file(&self, data_dir: &Path) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| data_dir.join(DEFAULT_LOG_FILE))
    }

    /// Validates the logging configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the level is not one of [`LOG_LEVELS`].
    pub fn validate(&self) -> Result<()> {
        let level = self.level.to_ascii_lowercase();
        if LOG_LEVELS.contains(&level.as_str()) {
            Ok(())
        } else {
            Err(ConfigError::InvalidLogLevel {
                level: self.level.clone(),
                expected: LOG_LEVELS.join(", "),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_validation_is_case_insensitive() {
        let config = LoggingConfig {
            level: "DEBUG".to_string(),
            file: None,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_level_is_rejected() {
        let config = LoggingConfig {
            level: "loud".to_string(),
            file: None,
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn log_file_defaults_into_data_dir() {
        let config = LoggingConfig::default();
        assert_eq!(
            config.resolve_file(Path::new("/data")),
            PathBuf::from("/data/plank.log")
        );
    }

    #[test]
    fn configured_log_file_wins() {
        let config = LoggingConfig {
            level: "info".to_string(),
            file: Some(PathBuf::from("/var/log/plank.log")),
        };
        assert_eq!(
            config.resolve_file(Path::new("/data")),
            PathBuf::from("/var/log/plank.log")
        );
    }
}
