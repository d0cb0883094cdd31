//! Key-value storage backends.
//!
//! The task store persists its state as a single string value under a fixed
//! key. This module defines the [`KeyValueStore`] seam and its two
//! implementations:
//!
//! - [`FileStore`]: one JSON file per key inside a data directory, replaced
//!   atomically on every write
//! - [`MemoryStore`]: an in-process map that forgets everything on exit
//!
//! # Directory Structure
//!
//! ```text
//! ~/.local/share/plank/       # Linux
//! ~/Library/Application Support/plank/  # macOS
//! └── kanban_tasks.json
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, instrument, warn};

use crate::error::{Result, StoreError};

/// A string-valued key-value store.
///
/// Reads and writes are synchronous. A successful [`set`](Self::set) is
/// visible to every later [`get`](Self::get) on the same backend.
pub trait KeyValueStore: fmt::Debug {
    /// Returns the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written. A failed write leaves
    /// the previous value in place.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// File-backed store: each key maps to `<dir>/<key>.json`.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so readers never observe a partially written value.
///
/// # Examples
///
/// ```no_run
/// use plank_store::{FileStore, KeyValueStore};
///
/// # fn example() -> plank_store::Result<()> {
/// let mut store = FileStore::open("/tmp/plank-data")?;
/// store.set("greeting", "\"hello\"")?;
/// assert_eq!(store.get("greeting")?.as_deref(), Some("\"hello\""));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    #[instrument(skip_all)]
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.exists() {
            debug!(?dir, "creating data directory");
            fs::create_dir_all(&dir).map_err(|e| StoreError::Write {
                path: dir.clone(),
                source: e,
            })?;
        }
        Ok(Self { dir })
    }

    /// Returns the directory this store writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file path backing `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] if the key is empty or could escape
    /// the data directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    /// Invalid UTF-8 is decoded lossily and left for the caller to reject.
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(content) => Ok(Some(content)),
                Err(e) => {
                    warn!(?path, "stored value is not valid UTF-8");
                    Ok(Some(String::from_utf8_lossy(e.as_bytes()).into_owned()))
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(?path, "stored value not found");
                Ok(None)
            }
            Err(e) => Err(StoreError::Read { path, source: e }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let write_err = |source| StoreError::Write {
            path: path.clone(),
            source,
        };

        let mut file = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        file.write_all(value.as_bytes()).map_err(write_err)?;
        file.as_file().sync_all().map_err(write_err)?;
        file.persist(&path).map_err(|e| write_err(e.error))?;

        debug!(?path, bytes = value.len(), "stored value replaced");
        Ok(())
    }
}

/// In-memory store used when persistence is disabled.
///
/// # Examples
///
/// ```
/// use plank_store::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// assert_eq!(store.get("key").unwrap(), None);
///
/// store.set("key", "value").unwrap();
/// assert_eq!(store.get("key").unwrap().as_deref(), Some("value"));
/// assert_eq!(store.write_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with one value.
    #[must_use]
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self { values, writes: 0 }
    }

    /// Returns how many writes this store has accepted.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
