//! Task editor state machine.
//!
//! The editor is a modal form used both to create a task and to edit an
//! existing one. It is constructed once and reopened in either mode; the
//! submit path reads the mode from the editor's own state.
//!
//! ```text
//! Closed ──open_create()──▶ Create ─┐
//!   ▲  ──open_edit(task)──▶ Edit(id)┤ submit() with blank title: stays open
//!   └──── cancel() / successful submit() ◀──────────────────────────┘
//! ```

use plank_protocol::{Task, TaskDraft, TaskId, TaskStatus};
use plank_store::{KeyValueStore, StoreError, TaskStore};
use tracing::debug;

/// Message shown when a submit is attempted with a blank title.
pub const EMPTY_TITLE_MESSAGE: &str = "Please enter a task title.";

/// What the editor is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// The editor is not showing.
    #[default]
    Closed,
    /// Drafting a new task.
    Create,
    /// Editing the task with the given id.
    Edit(TaskId),
}

/// Form fields, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    /// The single-line title input.
    #[default]
    Title,
    /// The description input.
    Description,
    /// The status selector.
    Status,
}

impl Field {
    /// Returns the next field, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Status,
            Self::Status => Self::Title,
        }
    }

    /// Returns the previous field, wrapping around.
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            Self::Title => Self::Status,
            Self::Description => Self::Title,
            Self::Status => Self::Description,
        }
    }

    /// Returns the label drawn next to the field.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Status => "Status",
        }
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new task was appended.
    Created(Task),
    /// The bound task was rewritten.
    Updated(TaskId),
    /// The bound task no longer exists; nothing changed.
    Missing(TaskId),
    /// The title was blank; the editor stays open with its values.
    Rejected,
}

/// A single-line text buffer with a byte-offset cursor on a char boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    /// Creates an input holding `value` with the cursor at the end.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    /// Returns the current text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the cursor position in bytes.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the cursor position in characters.
    #[must_use]
    pub fn cursor_chars(&self) -> usize {
        self.value[..self.cursor].chars().count()
    }

    /// Inserts a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        if let Some((prev, _)) = self.value[..self.cursor].char_indices().next_back() {
            self.value.remove(prev);
            self.cursor = prev;
        }
    }

    /// Moves the cursor one character left.
    pub fn move_left(&mut self) {
        if let Some((prev, _)) = self.value[..self.cursor].char_indices().next_back() {
            self.cursor = prev;
        }
    }

    /// Moves the cursor one character right.
    pub fn move_right(&mut self) {
        if let Some(ch) = self.value[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }
}

/// The task editor.
///
/// # Examples
///
/// ```
/// use plank_protocol::TaskStatus;
/// use plank_store::{MemoryStore, TaskStore};
/// use plank_tui::editor::{SubmitOutcome, TaskEditor};
///
/// let mut store = TaskStore::open(MemoryStore::new()).unwrap();
/// let mut editor = TaskEditor::new();
///
/// editor.open_create();
/// assert_eq!(editor.heading(), "Add New Task");
/// for ch in "Write docs".chars() {
///     editor.input(ch);
/// }
///
/// let outcome = editor.submit(&mut store).unwrap();
/// assert!(matches!(outcome, Some(SubmitOutcome::Created(ref t)) if t.title == "Write docs"));
/// assert!(!editor.is_open());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaskEditor {
    mode: EditorMode,
    title: TextInput,
    description: TextInput,
    status: TaskStatus,
    focus: Field,
    error: Option<String>,
}

impl TaskEditor {
    /// Creates a closed editor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current mode.
    #[must_use]
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Returns `true` while the modal is showing.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.mode != EditorMode::Closed
    }

    /// Opens an empty form for a new `todo` task.
    pub fn open_create(&mut self) {
        self.reset(EditorMode::Create, TaskDraft::default());
    }

    /// Opens the form pre-filled from `task`.
    pub fn open_edit(&mut self, task: &Task) {
        self.reset(EditorMode::Edit(task.id), task.to_draft());
    }

    /// Closes the editor without touching the store.
    pub fn cancel(&mut self) {
        self.mode = EditorMode::Closed;
        self.error = None;
    }

    /// Returns the modal heading.
    #[must_use]
    pub fn heading(&self) -> &'static str {
        match self.mode {
            EditorMode::Edit(_) => "Edit Task",
            EditorMode::Create | EditorMode::Closed => "Add New Task",
        }
    }

    /// Returns the label of the submit control.
    #[must_use]
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            EditorMode::Edit(_) => "Save Changes",
            EditorMode::Create | EditorMode::Closed => "Create Task",
        }
    }

    /// Returns the focused field.
    #[must_use]
    pub fn focus(&self) -> Field {
        self.focus
    }

    /// Moves focus to the next field.
    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    /// Moves focus to the previous field.
    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Returns the title input.
    #[must_use]
    pub fn title(&self) -> &TextInput {
        &self.title
    }

    /// Returns the description input.
    #[must_use]
    pub fn description(&self) -> &TextInput {
        &self.description
    }

    /// Returns the selected status.
    #[must_use]
    pub fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the validation or storage message shown in the modal.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Types a character into the focused text field.
    ///
    /// On the status field, a space cycles to the next status and other
    /// characters are ignored.
    pub fn input(&mut self, ch: char) {
        match self.focus {
            Field::Status if ch == ' ' => self.status = self.status.next(),
            Field::Status => {}
            _ => {
                if let Some(input) = self.focused_input() {
                    input.insert_char(ch);
                }
            }
        }
    }

    /// Deletes the character before the cursor in the focused text field.
    pub fn backspace(&mut self) {
        if let Some(input) = self.focused_input() {
            input.backspace();
        }
    }

    /// Moves the cursor in a text field, or cycles the status selector.
    pub fn move_cursor(&mut self, delta: i32) {
        if self.focus == Field::Status {
            self.status = if delta < 0 {
                self.status.previous()
            } else {
                self.status.next()
            };
            return;
        }
        if let Some(input) = self.focused_input() {
            if delta < 0 {
                input.move_left();
            } else {
                input.move_right();
            }
        }
    }

    /// Returns the current form values as an unvalidated draft.
    #[must_use]
    pub fn draft(&self) -> TaskDraft {
        TaskDraft::new(self.title.value(), self.description.value(), self.status)
    }

    /// Submits the form to the store.
    ///
    /// Returns `Ok(None)` if the editor is closed. A blank title yields
    /// [`SubmitOutcome::Rejected`], shows [`EMPTY_TITLE_MESSAGE`] and leaves
    /// the form open. A successful create or update closes the editor, as
    /// does an update whose task has disappeared.
    ///
    /// # Errors
    ///
    /// Returns the store error if the change could not be persisted. The
    /// editor stays open with its values so the user can retry.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        store: &mut TaskStore<S>,
    ) -> Result<Option<SubmitOutcome>, StoreError> {
        if !self.is_open() {
            return Ok(None);
        }
        let draft = self.draft();
        if draft.title.trim().is_empty() {
            self.error = Some(EMPTY_TITLE_MESSAGE.to_string());
            return Ok(Some(SubmitOutcome::Rejected));
        }

        let result = match self.mode {
            EditorMode::Closed => return Ok(None),
            EditorMode::Create => store.create(draft).map(SubmitOutcome::Created),
            EditorMode::Edit(id) => match store.update(id, draft) {
                Ok(_) => Ok(SubmitOutcome::Updated(id)),
                Err(e) if e.is_not_found() => {
                    debug!(%id, "edited task no longer exists");
                    Ok(SubmitOutcome::Missing(id))
                }
                Err(e) => Err(e),
            },
        };

        match result {
            Ok(outcome) => {
                self.cancel();
                Ok(Some(outcome))
            }
            Err(e) => {
                self.error = Some(format!("Could not save: {e}"));
                Err(e)
            }
        }
    }

    fn reset(&mut self, mode: EditorMode, draft: TaskDraft) {
        self.mode = mode;
        self.title = TextInput::with_value(draft.title);
        self.description = TextInput::with_value(draft.description);
        self.status = draft.status;
        self.focus = Field::Title;
        self.error = None;
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            Field::Title => Some(&mut self.title),
            Field::Description => Some(&mut self.description),
            Field::Status => None,
        }
    }
}
