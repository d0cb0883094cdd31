//! Application state management.
//!
//! This module defines the board-level UI state: which lane and card are
//! selected, which overlays are showing, and the status line. The task data
//! itself lives in the store; navigation methods take the current
//! [`BoardView`] so the selection is always measured against what is drawn.

use plank_protocol::{BoardView, Task, TaskId, TaskStatus};

/// Number of lanes on the board.
pub const LANE_COUNT: usize = 3;

/// A one-line message shown at the bottom of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    /// The message text.
    pub text: String,
    /// Whether the message reports a failure.
    pub is_error: bool,
}

impl StatusLine {
    /// Creates an informational message.
    #[must_use]
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// Creates an error message.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

/// The application state.
///
/// # Examples
///
/// ```
/// use plank_protocol::{BoardView, defaults::default_tasks};
/// use plank_tui::AppState;
///
/// let tasks = default_tasks();
/// let view = BoardView::project(&tasks);
///
/// let mut state = AppState::new();
/// state.navigate_down(&view);
/// assert_eq!(state.selected_task(&view).map(|t| t.id.get()), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Index of the currently selected lane (0-2).
    pub selected_lane: usize,
    /// Index of the selected card within the current lane, if any.
    pub selected_task: Option<usize>,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    /// Task awaiting delete confirmation.
    pub pending_delete: Option<TaskId>,
    /// Message for the status line.
    pub status: Option<StatusLine>,
}

impl AppState {
    /// Creates a state with the first lane focused and nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the status of the selected lane.
    #[must_use]
    pub fn selected_status(&self) -> TaskStatus {
        TaskStatus::from_index(self.selected_lane).unwrap_or_default()
    }

    /// Toggles the help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Dismisses the help overlay if it is visible.
    ///
    /// Returns `true` if help was visible and has been dismissed.
    #[must_use]
    pub fn dismiss_help(&mut self) -> bool {
        std::mem::take(&mut self.help_visible)
    }

    /// Moves the lane selection to the left, wrapping around if needed.
    pub fn navigate_left(&mut self, view: &BoardView<'_>) {
        self.selected_lane = (self.selected_lane + LANE_COUNT - 1) % LANE_COUNT;
        self.clamp_selection(view);
    }

    /// Moves the lane selection to the right, wrapping around if needed.
    pub fn navigate_right(&mut self, view: &BoardView<'_>) {
        self.selected_lane = (self.selected_lane + 1) % LANE_COUNT;
        self.clamp_selection(view);
    }

    /// Moves the card selection up within the current lane, wrapping to the
    /// bottom.
    pub fn navigate_up(&mut self, view: &BoardView<'_>) {
        let len = self.lane_len(view);
        self.selected_task = match (len, self.selected_task) {
            (0, _) => None,
            (_, Some(idx)) if idx > 0 => Some(idx - 1),
            (_, Some(_)) => Some(len - 1),
            (_, None) => Some(0),
        };
    }

    /// Moves the card selection down within the current lane, wrapping to
    /// the top.
    pub fn navigate_down(&mut self, view: &BoardView<'_>) {
        let len = self.lane_len(view);
        self.selected_task = match (len, self.selected_task) {
            (0, _) => None,
            (_, Some(idx)) if idx + 1 < len => Some(idx + 1),
            _ => Some(0),
        };
    }

    /// Returns the selected task, if the selection points at one.
    #[must_use]
    pub fn selected_task<'a>(&self, view: &BoardView<'a>) -> Option<&'a Task> {
        view.column_at(self.selected_lane)?
            .get(self.selected_task?)
    }

    /// Returns the id of the selected task.
    #[must_use]
    pub fn selected_task_id(&self, view: &BoardView<'_>) -> Option<TaskId> {
        self.selected_task(view).map(|t| t.id)
    }

    /// Moves the selection onto the task with the given id.
    ///
    /// Returns `false` and leaves the selection unchanged if the task is not
    /// on the board.
    pub fn select_task(&mut self, view: &BoardView<'_>, id: TaskId) -> bool {
        match view.locate(id) {
            Some((status, row)) => {
                self.selected_lane = status.index();
                self.selected_task = Some(row);
                true
            }
            None => false,
        }
    }

    /// Clears the current card selection.
    pub fn clear_selection(&mut self) {
        self.selected_task = None;
    }

    /// Ensures the card selection is valid for the current lane.
    ///
    /// Called after navigation and after every store mutation.
    pub fn clamp_selection(&mut self, view: &BoardView<'_>) {
        let len = self.lane_len(view);
        if len == 0 {
            self.selected_task = None;
        } else if let Some(idx) = self.selected_task
            && idx >= len
        {
            self.selected_task = Some(len - 1);
        }
    }

    /// Sets the status line.
    pub fn set_status(&mut self, status: StatusLine) {
        self.status = Some(status);
    }

    fn lane_len(&self, view: &BoardView<'_>) -> usize {
        view.column_at(self.selected_lane).map_or(0, |c| c.len())
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_nav() -> impl Strategy<Value = u8> {
        0u8..4
    }

    prop_compose! {
        fn arb_tasks()(statuses in prop::collection::vec(0usize..3, 0..20)) -> Vec<Task> {
            statuses
                .into_iter()
                .zip(1u64..)
                .map(|(idx, id)| {
                    let status = TaskStatus::from_index(idx).unwrap_or_default();
                    Task::new(TaskId::new(id), format!("task {id}"), "", status)
                })
                .collect()
        }
    }

    proptest! {
        /// Any sequence of navigation keys leaves the selection pointing at a
        /// real card, or at nothing.
        #[test]
        fn navigation_keeps_selection_valid(
            tasks in arb_tasks(),
            moves in prop::collection::vec(arb_nav(), 0..40),
        ) {
            let view = BoardView::project(&tasks);
            let mut state = AppState::new();
            for m in moves {
                match m {
                    0 => state.navigate_left(&view),
                    1 => state.navigate_right(&view),
                    2 => state.navigate_up(&view),
                    _ => state.navigate_down(&view),
                }
                prop_assert!(state.selected_lane < LANE_COUNT);
                if let Some(idx) = state.selected_task {
                    prop_assert!(state.selected_task(&view).is_some());
                    prop_assert_eq!(
                        state.selected_task(&view).map(|t| t.status),
                        Some(state.selected_status())
                    );
                    prop_assert!(idx < view.counts()[state.selected_lane]);
                }
            }
        }
    }
}
