//! Error types for task storage.
//!
//! This module defines the errors that can occur while reading, writing, and
//! mutating the persisted task sequence.

use std::path::PathBuf;

use plank_protocol::{TaskId, ValidationError};

/// Errors that can occur during task store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to read a stored value.
    #[error("failed to read stored value at {path}: {source}")]
    Read {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a stored value.
    #[error("failed to write stored value at {path}: {source}")]
    Write {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A storage key cannot be mapped onto the backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Failed to serialize the task sequence.
    #[error("failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The submitted task fields were rejected.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// No task with the given id exists.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The largest id is already taken, so no new task can be created.
    #[error("no task ids left after {0}")]
    IdsExhausted(TaskId),
}

impl StoreError {
    /// Returns `true` if this error only means the target task is gone.
    ///
    /// Callers treat this case as a no-op rather than a failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TaskNotFound(_))
    }
}

/// A specialized Result type for task store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
