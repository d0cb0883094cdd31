//! Built-in sample tasks.
//!
//! The task store falls back to these when no persisted board exists or the
//! persisted board cannot be read.
//!
//! # Examples
//!
//! ```
//! use plank_protocol::defaults::default_tasks;
//!
//! let tasks = default_tasks();
//! assert_eq!(tasks.len(), 8);
//! assert_eq!(tasks[0].title, "Launch Epic Career 🚀");
//! ```

use crate::task::{Task, TaskId, TaskStatus};

/// Titles and statuses of the sample tasks, in id order starting at 1.
const SAMPLES: [(&str, TaskStatus); 8] = [
    ("Launch Epic Career 🚀", TaskStatus::Todo),
    ("Conquer React 🧬", TaskStatus::Todo),
    ("Understand Databases ⚙️", TaskStatus::Todo),
    ("Crush Frameworks 🖼️", TaskStatus::Todo),
    ("Master JavaScript 💛", TaskStatus::Doing),
    ("Never Give Up 🏆", TaskStatus::Doing),
    ("Explore ES6 Features 🚀", TaskStatus::Done),
    ("Have fun 🥳", TaskStatus::Done),
];

/// Returns the eight sample tasks with ids 1 through 8.
///
/// Four tasks are `todo`, two are `doing` and two are `done`. All
/// descriptions are empty.
#[must_use]
pub fn default_tasks() -> Vec<Task> {
    SAMPLES
        .iter()
        .zip(1u64..)
        .map(|((title, status), id)| Task::new(TaskId::new(id), *title, "", *status))
        .collect()
}
