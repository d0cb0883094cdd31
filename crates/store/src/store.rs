//! The persisted task sequence.
//!
//! [`TaskStore`] exclusively owns the ordered list of tasks and mirrors it into
//! a [`KeyValueStore`] under [`TASKS_STORAGE_KEY`]. Every mutation rewrites the
//! whole sequence immediately; there is no batching.
//!
//! # Examples
//!
//! ```
//! use plank_protocol::{TaskDraft, TaskId, TaskStatus};
//! use plank_store::{MemoryStore, TaskStore};
//!
//! # fn main() -> plank_store::Result<()> {
//! // An empty backend falls back to the eight sample tasks.
//! let mut store = TaskStore::open(MemoryStore::new())?;
//! assert_eq!(store.len(), 8);
//!
//! let task = store.create(TaskDraft::new("Write tests", "", TaskStatus::Todo))?;
//! assert_eq!(task.id, TaskId::new(9));
//!
//! store.update(TaskId::new(5), TaskDraft::new("Master JavaScript 💛", "", TaskStatus::Done))?;
//! store.delete(TaskId::new(1))?;
//! assert_eq!(store.len(), 8);
//! # Ok(())
//! # }
//! ```

use std::collections::HashSet;

use plank_protocol::defaults::default_tasks;
use plank_protocol::{Task, TaskDraft, TaskId};
use tracing::{debug, error, instrument, warn};

use crate::backend::KeyValueStore;
use crate::error::{Result, StoreError};

/// Key under which the task sequence is persisted.
pub const TASKS_STORAGE_KEY: &str = "kanban_tasks";

/// Reasons a persisted sequence is rejected and replaced by the defaults.
#[derive(Debug, thiserror::Error)]
enum Corruption {
    #[error("not a valid task list: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate task id {0}")]
    DuplicateId(TaskId),
    #[error("task {0} has a blank title")]
    BlankTitle(TaskId),
}

/// Parses a persisted sequence, rejecting structurally invalid data.
fn parse_tasks(raw: &str) -> std::result::Result<Vec<Task>, Corruption> {
    let tasks: Vec<Task> = serde_json::from_str(raw)?;
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id) {
            return Err(Corruption::DuplicateId(task.id));
        }
        if task.title.trim().is_empty() {
            return Err(Corruption::BlankTitle(task.id));
        }
    }
    Ok(tasks)
}

/// Owner of the task sequence and its persisted mirror.
///
/// The store is the only writer of persisted task state. Callers read through
/// [`tasks`](Self::tasks) and [`get`](Self::get) and mutate through
/// [`create`](Self::create), [`update`](Self::update) and
/// [`delete`](Self::delete).
#[derive(Debug)]
pub struct TaskStore<S> {
    backend: S,
    tasks: Vec<Task>,
    /// Highest id ever held by this store, so deleted ids are not handed out again.
    high_water: TaskId,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Creates a store over `backend` and loads the persisted sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read, or if the defaults
    /// cannot be written after a fallback.
    pub fn open(backend: S) -> Result<Self> {
        let mut store = Self {
            backend,
            tasks: Vec::new(),
            high_water: TaskId::default(),
        };
        store.load()?;
        Ok(store)
    }

    /// Reloads the sequence from the backend.
    ///
    /// Missing or corrupt data is replaced by the built-in sample tasks, which
    /// are persisted immediately so later loads are stable. Corruption is
    /// logged, never returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read, or if the defaults
    /// cannot be written.
    #[instrument(skip(self))]
    pub fn load(&mut self) -> Result<&[Task]> {
        let stored = match self.backend.get(TASKS_STORAGE_KEY)? {
            Some(raw) => match parse_tasks(&raw) {
                Ok(tasks) => Some(tasks),
                Err(reason) => {
                    warn!(%reason, "persisted tasks are unreadable, falling back to defaults");
                    None
                }
            },
            None => {
                debug!("no persisted tasks, using defaults");
                None
            }
        };

        match stored {
            Some(tasks) => {
                debug!(tasks = tasks.len(), "loaded persisted tasks");
                self.replace(tasks);
            }
            None => {
                self.replace(default_tasks());
                self.save()?;
            }
        }
        Ok(&self.tasks)
    }

    /// Writes the whole sequence to the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the backend write fails. The
    /// previously persisted value is left intact in that case.
    #[instrument(skip(self), fields(tasks = self.tasks.len()))]
    pub fn save(&mut self) -> Result<()> {
        let content = serde_json::to_string(&self.tasks)?;
        self.backend.set(TASKS_STORAGE_KEY, &content)?;
        debug!("tasks saved");
        Ok(())
    }

    /// Validates `draft`, appends it as a new task, and persists.
    ///
    /// The new id is one past the highest id this store has seen, which is
    /// `max(existing ids) + 1` for a freshly loaded sequence, or `1` when the
    /// sequence has always been empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] for a blank title,
    /// [`StoreError::IdsExhausted`] if the highest id is `u64::MAX`, or a
    /// storage error if the sequence cannot be persisted. The sequence is
    /// unchanged on error.
    pub fn create(&mut self, draft: TaskDraft) -> Result<Task> {
        let draft = draft.validated()?;
        let id = self
            .next_id()
            .ok_or_else(|| StoreError::IdsExhausted(self.highest_id()))?;
        let task = Task::new(id, draft.title, draft.description, draft.status);

        let previous = self.tasks.clone();
        self.tasks.push(task.clone());
        self.persist_or_restore(previous)?;

        self.high_water = self.high_water.max(id);
        debug!(%id, "task created");
        Ok(task)
    }

    /// Overwrites the mutable fields of task `id` and persists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] for a blank title,
    /// [`StoreError::TaskNotFound`] if no task has this id, or a storage error
    /// if the sequence cannot be persisted. The sequence is unchanged on error.
    pub fn update(&mut self, id: TaskId, draft: TaskDraft) -> Result<&Task> {
        let draft = draft.validated()?;
        let idx = self.index_of(id)?;

        let previous = self.tasks.clone();
        self.tasks[idx].apply(draft);
        self.persist_or_restore(previous)?;

        debug!(%id, "task updated");
        Ok(&self.tasks[idx])
    }

    /// Removes task `id` and persists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TaskNotFound`] if no task has this id, or a
    /// storage error if the sequence cannot be persisted. The sequence is
    /// unchanged on error.
    pub fn delete(&mut self, id: TaskId) -> Result<Task> {
        let idx = self.index_of(id)?;

        let previous = self.tasks.clone();
        let removed = self.tasks.remove(idx);
        self.persist_or_restore(previous)?;

        debug!(%id, "task deleted");
        Ok(removed)
    }

    /// Returns the tasks in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the task with the given id, if any.
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if there are no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the id the next created task will receive, or `None` once the
    /// id space is used up.
    #[must_use]
    pub fn next_id(&self) -> Option<TaskId> {
        self.highest_id().checked_successor()
    }

    fn highest_id(&self) -> TaskId {
        let max_existing = self.tasks.iter().map(|t| t.id).max().unwrap_or_default();
        max_existing.max(self.high_water)
    }

    /// Returns a reference to the storage backend.
    #[must_use]
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Installs a freshly loaded sequence.
    fn replace(&mut self, tasks: Vec<Task>) {
        if let Some(max) = tasks.iter().map(|t| t.id).max() {
            self.high_water = self.high_water.max(max);
        }
        self.tasks = tasks;
    }

    fn index_of(&self, id: TaskId) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::TaskNotFound(id))
    }

    /// Saves, putting `previous` back in memory if the write fails.
    fn persist_or_restore(&mut self, previous: Vec<Task>) -> Result<()> {
        if let Err(err) = self.save() {
            error!(error = %err, "failed to persist tasks, reverting change");
            self.tasks = previous;
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStore;
    use plank_protocol::{BoardView, TaskStatus, ValidationError};

    /// A backend whose writes can be switched off.
    #[derive(Debug, Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: bool,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes {
                return Err(StoreError::Write {
                    path: key.into(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.inner.set(key, value)
        }
    }

    fn default_store() -> TaskStore<MemoryStore> {
        TaskStore::open(MemoryStore::new()).unwrap()
    }

    fn persisted(store: &TaskStore<MemoryStore>) -> Vec<Task> {
        let raw = store.backend().get(TASKS_STORAGE_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn load_without_state_returns_and_persists_defaults() {
        let store = default_store();

        assert_eq!(store.tasks(), default_tasks().as_slice());
        assert_eq!(store.backend().write_count(), 1);
        assert_eq!(persisted(&store), default_tasks());
    }

    #[test]
    fn load_corrupt_json_falls_back_to_defaults() {
        let backend = MemoryStore::with_value(TASKS_STORAGE_KEY, "{not json");
        let store = TaskStore::open(backend).unwrap();

        assert_eq!(store.tasks(), default_tasks().as_slice());
        assert_eq!(persisted(&store), default_tasks());
    }

    #[test]
    fn load_unknown_status_is_corrupt() {
        let raw = r#"[{"id":1,"title":"A","description":"","status":"blocked"}]"#;
        let store = TaskStore::open(MemoryStore::with_value(TASKS_STORAGE_KEY, raw)).unwrap();

        assert_eq!(store.len(), 8);
    }

    #[test]
    fn load_duplicate_ids_is_corrupt() {
        let raw = r#"[
            {"id":1,"title":"A","description":"","status":"todo"},
            {"id":1,"title":"B","description":"","status":"done"}
        ]"#;
        let store = TaskStore::open(MemoryStore::with_value(TASKS_STORAGE_KEY, raw)).unwrap();

        assert_eq!(store.tasks(), default_tasks().as_slice());
    }

    #[test]
    fn create_after_max_id_is_refused() {
        let raw = r#"[{"id":18446744073709551615,"title":"A","description":"","status":"todo"}]"#;
        let mut store = TaskStore::open(MemoryStore::with_value(TASKS_STORAGE_KEY, raw)).unwrap();
        let writes = store.backend().write_count();
        assert_eq!(store.next_id(), None);

        let err = store
            .create(TaskDraft::new("B", "", TaskStatus::Todo))
            .unwrap_err();

        assert!(matches!(err, StoreError::IdsExhausted(id) if id == TaskId::new(u64::MAX)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.backend().write_count(), writes);
        // The persisted board is untouched and still loads
        assert_eq!(persisted(&store), store.tasks());
    }

    #[test]
    fn load_keeps_valid_persisted_tasks() {
        let raw = r#"[{"id":4,"title":"Only one","description":"x","status":"doing"}]"#;
        let store = TaskStore::open(MemoryStore::with_value(TASKS_STORAGE_KEY, raw)).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.tasks()[0].title, "Only one");
        assert_eq!(store.backend().write_count(), 0);
        assert_eq!(store.next_id(), Some(TaskId::new(5)));
    }

    #[test]
    fn load_empty_list_is_respected() {
        let store = TaskStore::open(MemoryStore::with_value(TASKS_STORAGE_KEY, "[]")).unwrap();

        assert!(store.is_empty());
        assert_eq!(store.next_id(), Some(TaskId::new(1)));
    }

    #[test]
    fn create_from_defaults_gets_id_nine() {
        let mut store = default_store();
        let task = store
            .create(TaskDraft::new("Write tests", "", TaskStatus::Todo))
            .unwrap();

        assert_eq!(task.id, TaskId::new(9));
        let view = BoardView::project(store.tasks());
        assert_eq!(view.column(TaskStatus::Todo).len(), 5);
        assert_eq!(persisted(&store).last(), Some(&task));
    }

    #[test]
    fn create_trims_fields() {
        let mut store = default_store();
        let task = store
            .create(TaskDraft::new("  Padded  ", "  body ", TaskStatus::Done))
            .unwrap();

        assert_eq!(task.title, "Padded");
        assert_eq!(task.description, "body");
    }

    #[test]
    fn create_blank_title_changes_nothing() {
        let mut store = default_store();
        let writes = store.backend().write_count();

        let err = store
            .create(TaskDraft::new("   ", "desc", TaskStatus::Todo))
            .unwrap_err();

        assert!(matches!(err, StoreError::Invalid(ValidationError::EmptyTitle)));
        assert_eq!(store.tasks(), default_tasks().as_slice());
        assert_eq!(store.backend().write_count(), writes);
    }

    #[test]
    fn update_moves_task_between_columns() {
        let mut store = default_store();
        let before = BoardView::project(store.tasks()).counts();

        let updated = store
            .update(
                TaskId::new(5),
                TaskDraft::new("Master JavaScript 💛", "", TaskStatus::Done),
            )
            .unwrap()
            .clone();

        let after = BoardView::project(store.tasks()).counts();
        assert_eq!(after[1], before[1] - 1);
        assert_eq!(after[2], before[2] + 1);
        assert_eq!(updated.title, "Master JavaScript 💛");
        assert_eq!(updated.description, "");
        assert_eq!(persisted(&store), store.tasks());
    }

    #[test]
    fn update_keeps_position_in_sequence() {
        let mut store = default_store();
        store
            .update(TaskId::new(2), TaskDraft::new("Renamed", "", TaskStatus::Done))
            .unwrap();

        assert_eq!(store.tasks()[1].id, TaskId::new(2));
        assert_eq!(store.tasks()[1].title, "Renamed");
    }

    #[test]
    fn update_missing_task_is_not_found() {
        let mut store = default_store();
        let err = store
            .update(TaskId::new(42), TaskDraft::new("x", "", TaskStatus::Todo))
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(store.tasks(), default_tasks().as_slice());
    }

    #[test]
    fn update_blank_title_is_rejected() {
        let mut store = default_store();
        let err = store
            .update(TaskId::new(1), TaskDraft::new("", "", TaskStatus::Done))
            .unwrap_err();

        assert!(matches!(err, StoreError::Invalid(_)));
        assert_eq!(store.get(TaskId::new(1)).unwrap().status, TaskStatus::Todo);
    }

    #[test]
    fn delete_removes_exactly_one_task() {
        let mut store = default_store();
        let removed = store.delete(TaskId::new(3)).unwrap();

        assert_eq!(removed.id, TaskId::new(3));
        let expected: Vec<Task> = default_tasks()
            .into_iter()
            .filter(|t| t.id != TaskId::new(3))
            .collect();
        assert_eq!(store.tasks(), expected.as_slice());
        assert_eq!(persisted(&store), expected);
    }

    #[test]
    fn delete_missing_task_is_not_found() {
        let mut store = default_store();
        assert!(store.delete(TaskId::new(0)).unwrap_err().is_not_found());
        assert_eq!(store.len(), 8);
    }

    #[test]
    fn deleted_max_id_is_not_reused_in_session() {
        let mut store = default_store();
        store.delete(TaskId::new(8)).unwrap();

        let task = store
            .create(TaskDraft::new("Fresh", "", TaskStatus::Todo))
            .unwrap();
        assert_eq!(task.id, TaskId::new(9));
    }

    #[test]
    fn failed_write_restores_previous_sequence() {
        let mut store = TaskStore::open(FlakyStore::default()).unwrap();
        store.backend.fail_writes = true;

        let err = store
            .create(TaskDraft::new("Lost", "", TaskStatus::Todo))
            .unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert_eq!(store.tasks(), default_tasks().as_slice());

        assert!(store.delete(TaskId::new(1)).is_err());
        assert_eq!(store.len(), 8);
    }

    #[test]
    fn reload_sees_saved_state() {
        let mut store = default_store();
        store
            .create(TaskDraft::new("Persist me", "", TaskStatus::Doing))
            .unwrap();

        let snapshot = store.tasks().to_vec();
        store.load().unwrap();
        assert_eq!(store.tasks(), snapshot.as_slice());
    }
}
