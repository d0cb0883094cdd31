//! TUI message types for event handling.
//!
//! This module defines the message enum used for communication between
//! the TUI input handler and the application controller.

use serde::{Deserialize, Serialize};

/// Messages that represent user actions in the TUI.
///
/// These messages are produced by the input handler and consumed by
/// the application controller to update the UI and the task store.
///
/// # Examples
///
/// ```
/// use plank_protocol::Message;
///
/// let msg = Message::NavigateRight;
/// assert!(msg.is_navigation());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Move selection to the left column.
    NavigateLeft,
    /// Move selection to the right column.
    NavigateRight,
    /// Move selection up within the current column.
    NavigateUp,
    /// Move selection down within the current column.
    NavigateDown,
    /// Open the editor for the highlighted task.
    Select,
    /// Escape: close an overlay or clear the selection (contextual).
    Escape,
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Mouse click at coordinates (column, row).
    ClickAt {
        /// Column (x coordinate) of the click.
        column: u16,
        /// Row (y coordinate) of the click.
        row: u16,
    },

    // --- Board actions ---
    /// Open the editor to draft a new task.
    AddTask,
    /// Ask to delete the highlighted task.
    RequestDelete,
    /// Confirm the pending deletion.
    ConfirmDelete,
    /// Abandon the pending deletion.
    CancelDelete,

    // --- Editor messages ---
    /// Move focus to the next form field.
    EditorNextField,
    /// Move focus to the previous form field.
    EditorPrevField,
    /// Move the cursor (or cycle the status) by `delta`.
    EditorMove {
        /// Direction to move (positive = right, negative = left).
        delta: i32,
    },
    /// Input a character into the focused field.
    EditorInput {
        /// The character that was input.
        ch: char,
    },
    /// Delete the character before the cursor.
    EditorBackspace,
    /// Submit the form.
    EditorSubmit,
    /// Close the editor without submitting.
    EditorCancel,
}

impl Message {
    /// Returns `true` if this message is a navigation action.
    ///
    /// # Examples
    ///
    /// ```
    /// use plank_protocol::Message;
    ///
    /// assert!(Message::NavigateLeft.is_navigation());
    /// assert!(!Message::Select.is_navigation());
    /// ```
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::NavigateLeft | Self::NavigateRight | Self::NavigateUp | Self::NavigateDown
        )
    }

    /// Returns `true` if this message should terminate the application.
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Returns `true` if this message is only meaningful while the editor is open.
    ///
    /// # Examples
    ///
    /// ```
    /// use plank_protocol::Message;
    ///
    /// assert!(Message::EditorSubmit.is_editor());
    /// assert!(Message::EditorInput { ch: 'x' }.is_editor());
    /// assert!(!Message::AddTask.is_editor());
    /// ```
    #[must_use]
    pub fn is_editor(&self) -> bool {
        matches!(
            self,
            Self::EditorNextField
                | Self::EditorPrevField
                | Self::EditorMove { .. }
                | Self::EditorInput { .. }
                | Self::EditorBackspace
                | Self::EditorSubmit
                | Self::EditorCancel
        )
    }
}
