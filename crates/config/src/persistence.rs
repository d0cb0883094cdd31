//! Configuration file discovery, reading and writing.
//!
//! Files may be JSON5 (comments and trailing commas allowed) or plain JSON.
//! Configuration is always written back as pretty-printed JSON, which every
//! JSON5 reader accepts.
//!
//! # Search Order
//!
//! 1. Working directory: `./plank.json5`, then `./plank.json`
//! 2. User config directory: `~/.config/plank/config.json5`, then
//!    `~/.config/plank/config.json`

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, Result};

/// File names looked up in the working directory, in priority order.
pub const CONFIG_FILE_NAMES: &[&str] = &["plank.json5", "plank.json"];

/// Directory name under the platform config directory.
pub const USER_CONFIG_DIR: &str = "plank";

/// File names looked up in the user config directory, in priority order.
pub const USER_CONFIG_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Returns every candidate config path, highest priority first.
///
/// The list is the same whether or not the files exist.
#[must_use]
pub fn config_search_paths() -> Vec<PathBuf> {
    let local = CONFIG_FILE_NAMES.iter().map(PathBuf::from);
    let user = user_config_dir()
        .ok()
        .into_iter()
        .flat_map(|dir| USER_CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)));
    local.chain(user).collect()
}

/// Returns the first existing config file from [`config_search_paths`].
///
/// # Examples
///
/// ```no_run
/// use plank_config::persistence::find_config_file;
///
/// match find_config_file() {
///     Some(path) => println!("using {}", path.display()),
///     None => println!("using built-in defaults"),
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let found = config_search_paths().into_iter().find(|p| p.is_file());
    debug!(?found, "config file lookup");
    found
}

/// Returns the user configuration directory, e.g. `~/.config/plank/`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(USER_CONFIG_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Reads and deserializes a JSON5 or JSON configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content does not
/// deserialize into `T`.
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(serde_json5::from_str(&content)?)
}

/// Serializes `value` as pretty JSON and writes it to `path`.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    let content = serde_json::to_string_pretty(value)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, content).map_err(write_err)
}
