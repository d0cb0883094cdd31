//! Shared protocol types for the plank application.
//!
//! This crate defines the core types used across all plank components,
//! including tasks, the board projection, messages, and error types.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`task`]: Task identifiers, statuses, drafts, and the `Task` struct
//! - [`board`]: Status columns and the `BoardView` projection
//! - [`defaults`]: The built-in sample tasks
//! - [`message`]: TUI event messages
//! - [`error`]: Validation errors
//!
//! # Examples
//!
//! Validating user input and projecting tasks onto the board:
//!
//! ```
//! use plank_protocol::{BoardView, Task, TaskDraft, TaskId, TaskStatus};
//!
//! let draft = TaskDraft::new("  Write tests ", "", TaskStatus::Todo)
//!     .validated()
//!     .expect("title is not blank");
//!
//! let mut task = Task::new(TaskId::new(1), "placeholder", "", TaskStatus::Done);
//! task.apply(draft);
//!
//! let tasks = vec![task];
//! let view = BoardView::project(&tasks);
//! assert_eq!(view.column(TaskStatus::Todo).label(), "TODO (1)");
//! ```

pub mod board;
pub mod defaults;
pub mod error;
pub mod message;
pub mod task;

// Re-export primary types at crate root for convenience
pub use board::{BoardView, Column};
pub use error::{Result, ValidationError};
pub use message::Message;
pub use task::{Task, TaskDraft, TaskId, TaskStatus};
