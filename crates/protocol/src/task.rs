//! Task-related types for the board.
//!
//! This module defines the core task types used throughout the plank application,
//! including task identifiers, statuses, drafts, and the task structure itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Unique identifier for a task.
///
/// Identifiers are small positive integers assigned by the task store. They
/// serialize as plain JSON numbers.
///
/// # Examples
///
/// ```
/// use plank_protocol::TaskId;
///
/// let id = TaskId::new(9);
/// assert_eq!(id.get(), 9);
/// assert_eq!(id.to_string(), "9");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Wraps a raw identifier value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the identifier following this one, or `None` if this is the
    /// largest representable id.
    ///
    /// # Examples
    ///
    /// ```
    /// use plank_protocol::TaskId;
    ///
    /// assert_eq!(TaskId::new(8).checked_successor(), Some(TaskId::new(9)));
    /// assert_eq!(TaskId::new(u64::MAX).checked_successor(), None);
    /// ```
    #[must_use]
    pub const fn checked_successor(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TaskId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// The workflow status of a task.
///
/// The status determines which board column a task is shown in. The order
/// of the variants is the left-to-right order of the columns.
///
/// # Examples
///
/// ```
/// use plank_protocol::TaskStatus;
///
/// let status: TaskStatus = "doing".parse().unwrap();
/// assert_eq!(status, TaskStatus::Doing);
/// assert_eq!(status.label(), "DOING");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet.
    #[default]
    Todo,
    /// Currently being worked on.
    Doing,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Returns all statuses in board order.
    ///
    /// # Examples
    ///
    /// ```
    /// use plank_protocol::TaskStatus;
    ///
    /// let all = TaskStatus::all();
    /// assert_eq!(all.len(), 3);
    /// assert_eq!(all[0], TaskStatus::Todo);
    /// ```
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Todo, Self::Doing, Self::Done]
    }

    /// Returns the column header label for this status.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::Doing => "DOING",
            Self::Done => "DONE",
        }
    }

    /// Returns the persisted string form of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
        }
    }

    /// Returns the index of this status's column (0-2).
    ///
    /// # Examples
    ///
    /// ```
    /// use plank_protocol::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Todo.index(), 0);
    /// assert_eq!(TaskStatus::Done.index(), 2);
    /// ```
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::Doing => 1,
            Self::Done => 2,
        }
    }

    /// Creates a `TaskStatus` from a column index.
    ///
    /// Returns `None` if the index is out of range (>= 3).
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Todo),
            1 => Some(Self::Doing),
            2 => Some(Self::Done),
            _ => None,
        }
    }

    /// Returns the next status, wrapping from `Done` back to `Todo`.
    ///
    /// # Examples
    ///
    /// ```
    /// use plank_protocol::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Todo.next(), TaskStatus::Doing);
    /// assert_eq!(TaskStatus::Done.next(), TaskStatus::Todo);
    /// ```
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Todo => Self::Doing,
            Self::Doing => Self::Done,
            Self::Done => Self::Todo,
        }
    }

    /// Returns the previous status, wrapping from `Todo` back to `Done`.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Todo => Self::Done,
            Self::Doing => Self::Todo,
            Self::Done => Self::Doing,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Self::Todo),
            "doing" => Ok(Self::Doing),
            "done" => Ok(Self::Done),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// A task on the board.
///
/// The serialized form is exactly the persisted record:
/// `{"id": 1, "title": "...", "description": "...", "status": "todo"}`.
///
/// # Examples
///
/// ```
/// use plank_protocol::{Task, TaskId, TaskStatus};
///
/// let task = Task::new(TaskId::new(1), "Write tests", "", TaskStatus::Todo);
/// let json = serde_json::to_string(&task).unwrap();
/// assert_eq!(json, r#"{"id":1,"title":"Write tests","description":"","status":"todo"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned at creation and never changed.
    pub id: TaskId,
    /// Short summary of the task. Never empty.
    pub title: String,
    /// Free-form details. May be empty.
    #[serde(default)]
    pub description: String,
    /// Which column the task is shown in.
    pub status: TaskStatus,
}

impl Task {
    /// Creates a task from its parts.
    ///
    /// No validation is performed; use [`TaskDraft::validated`] for user input.
    #[must_use]
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
        status: TaskStatus,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            status,
        }
    }

    /// Overwrites the mutable fields with those of a validated draft.
    ///
    /// The identifier is left untouched.
    pub fn apply(&mut self, draft: TaskDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.status = draft.status;
    }

    /// Returns a draft carrying this task's current field values.
    #[must_use]
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
        }
    }
}

/// The user-editable fields of a task, before an identifier is assigned.
///
/// Drafts are produced by the task editor and consumed by the task store's
/// create and update operations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskDraft {
    /// Proposed title.
    pub title: String,
    /// Proposed description.
    pub description: String,
    /// Proposed status.
    pub status: TaskStatus,
}

impl TaskDraft {
    /// Creates a draft from its parts.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        status: TaskStatus,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status,
        }
    }

    /// Normalizes and validates the draft.
    ///
    /// Surrounding whitespace is trimmed from the title and the description.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTitle`] if the title is empty after
    /// trimming.
    ///
    /// # Examples
    ///
    /// ```
    /// use plank_protocol::{TaskDraft, TaskStatus, ValidationError};
    ///
    /// let draft = TaskDraft::new("  Ship it  ", " soon ", TaskStatus::Doing);
    /// let valid = draft.validated().unwrap();
    /// assert_eq!(valid.title, "Ship it");
    /// assert_eq!(valid.description, "soon");
    ///
    /// let blank = TaskDraft::new("   ", "", TaskStatus::Todo);
    /// assert_eq!(blank.validated(), Err(ValidationError::EmptyTitle));
    /// ```
    pub fn validated(self) -> Result<Self, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(Self {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_status_default_is_todo() {
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
    }

    #[test]
    fn task_status_json_format() {
        let json = serde_json::to_string(&TaskStatus::Doing).expect("serialize");
        assert_eq!(json, r#""doing""#);

        let parsed: TaskStatus = serde_json::from_str(r#""done""#).expect("deserialize");
        assert_eq!(parsed, TaskStatus::Done);
    }

    #[test]
    fn task_status_rejects_unknown_values() {
        assert!(serde_json::from_str::<TaskStatus>(r#""blocked""#).is_err());
        assert_eq!(
            "Todo".parse::<TaskStatus>(),
            Err(ValidationError::UnknownStatus("Todo".to_string()))
        );
    }

    #[test]
    fn task_status_cycles_wrap() {
        for status in TaskStatus::all() {
            assert_eq!(status.next().previous(), status);
        }
        assert_eq!(TaskStatus::Todo.previous(), TaskStatus::Done);
    }

    #[test]
    fn task_status_index_roundtrip() {
        for status in TaskStatus::all() {
            assert_eq!(TaskStatus::from_index(status.index()), Some(status));
        }
        assert_eq!(TaskStatus::from_index(3), None);
    }

    #[test]
    fn task_id_successor_stops_at_max() {
        assert_eq!(TaskId::new(0).checked_successor(), Some(TaskId::new(1)));
        assert_eq!(TaskId::new(u64::MAX).checked_successor(), None);
    }

    #[test]
    fn task_id_serializes_as_number() {
        let json = serde_json::to_string(&TaskId::new(42)).expect("serialize");
        assert_eq!(json, "42");
    }

    #[test]
    fn task_deserializes_without_description() {
        let task: Task =
            serde_json::from_str(r#"{"id":3,"title":"Read","status":"todo"}"#).expect("parse");
        assert_eq!(task.description, "");
    }

    #[test]
    fn task_apply_keeps_id() {
        let mut task = Task::new(TaskId::new(5), "Old", "desc", TaskStatus::Doing);
        task.apply(TaskDraft::new("New", "", TaskStatus::Done));

        assert_eq!(task.id, TaskId::new(5));
        assert_eq!(task.title, "New");
        assert_eq!(task.description, "");
        assert_eq!(task.status, TaskStatus::Done);
    }

    #[test]
    fn draft_rejects_whitespace_title() {
        let draft = TaskDraft::new(" \t\n ", "something", TaskStatus::Done);
        assert_eq!(draft.validated(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn to_draft_mirrors_task() {
        let task = Task::new(TaskId::new(2), "Title", "Body", TaskStatus::Done);
        let draft = task.to_draft();
        assert_eq!(draft, TaskDraft::new("Title", "Body", TaskStatus::Done));
    }
}
