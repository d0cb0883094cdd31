//! Task storage for the plank application.
//!
//! This crate owns the persisted task sequence. It is the only component that
//! writes task state; the UI reads through it and sends every mutation
//! through it.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`backend`]: The key-value storage seam with file and memory backends
//! - [`store`]: The `TaskStore` with load, save, create, update, and delete
//! - [`error`]: Error types for storage operations
//!
//! # Persisted Format
//!
//! The sequence is stored under the key `kanban_tasks` as a JSON array:
//!
//! ```json
//! [
//!   { "id": 1, "title": "Launch Epic Career 🚀", "description": "", "status": "todo" }
//! ]
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use plank_protocol::{TaskDraft, TaskStatus};
//! use plank_store::{FileStore, TaskStore};
//!
//! # fn main() -> plank_store::Result<()> {
//! let backend = FileStore::open("/tmp/plank")?;
//! let mut store = TaskStore::open(backend)?;
//!
//! store.create(TaskDraft::new("Write tests", "", TaskStatus::Todo))?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod error;
pub mod store;

// Re-export primary types at crate root for convenience
pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::{Result, StoreError};
pub use store::{TASKS_STORAGE_KEY, TaskStore};
