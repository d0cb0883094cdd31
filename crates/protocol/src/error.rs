//! Error types for the plank-protocol crate.
//!
//! This module defines the validation errors that can occur when turning
//! user input into protocol types.

use thiserror::Error;

/// Errors raised when user-supplied task fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A task title was empty after trimming surrounding whitespace.
    #[error("invalid task title: title cannot be empty")]
    EmptyTitle,

    /// A status string did not name one of the board columns.
    #[error("unknown task status: {0:?} (expected todo, doing or done)")]
    UnknownStatus(String),
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ValidationError>;
