//! Terminal UI for the plank task board.
//!
//! This crate provides a Ratatui-based interface that shows tasks in three
//! lanes (TODO, DOING, DONE) and lets the user add, edit, move and delete
//! them with the keyboard or mouse.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`app`]: Main application struct, message routing and run loop
//! - [`state`]: Board selection, overlays and the status line
//! - [`editor`]: The add/edit form and its text inputs
//! - [`event`]: Terminal events to [`Message`](plank_protocol::Message) mapping
//! - [`layout`]: Size constants shared by rendering and hit-testing
//! - [`terminal`]: Terminal setup, teardown, and panic handling
//! - [`widgets`]: Rendering functions
//!
//! # Example
//!
//! ```no_run
//! use plank_store::{MemoryStore, TaskStore};
//! use plank_tui::{App, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let store = TaskStore::open(MemoryStore::new())?;
//!     let mut app = App::new(store);
//!     let result = app.run(&mut terminal).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod editor;
pub mod event;
pub mod layout;
pub mod state;
pub mod terminal;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use app::App;
pub use editor::TaskEditor;
pub use state::{AppState, StatusLine};
