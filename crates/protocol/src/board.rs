//! Board projection types.
//!
//! This module partitions a task sequence into the three status columns shown
//! on the board. The projection borrows the tasks and is rebuilt on every
//! render, so it always reflects the current sequence.

use crate::task::{Task, TaskId, TaskStatus};

/// One status column of the board.
///
/// Tasks keep the relative order they have in the full sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column<'a> {
    /// The status shared by every task in this column.
    pub status: TaskStatus,
    /// Tasks in this column, top to bottom.
    pub tasks: Vec<&'a Task>,
}

impl<'a> Column<'a> {
    /// Creates an empty column for the given status.
    #[must_use]
    pub const fn new(status: TaskStatus) -> Self {
        Self {
            status,
            tasks: Vec::new(),
        }
    }

    /// Returns the number of tasks in this column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the column holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the header label with the live count, e.g. `"TODO (4)"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use plank_protocol::{BoardView, TaskStatus, defaults::default_tasks};
    ///
    /// let tasks = default_tasks();
    /// let view = BoardView::project(&tasks);
    /// assert_eq!(view.column(TaskStatus::Todo).label(), "TODO (4)");
    /// ```
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.status.label(), self.len())
    }

    /// Returns the task at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'a Task> {
        self.tasks.get(index).copied()
    }

    /// Returns the position of the task with the given id within this column.
    #[must_use]
    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }
}

/// The full board: one [`Column`] per status, in board order.
///
/// # Examples
///
/// ```
/// use plank_protocol::{BoardView, Task, TaskId, TaskStatus};
///
/// let tasks = vec![
///     Task::new(TaskId::new(1), "Plan", "", TaskStatus::Todo),
///     Task::new(TaskId::new(2), "Build", "", TaskStatus::Doing),
///     Task::new(TaskId::new(3), "Review", "", TaskStatus::Todo),
/// ];
///
/// let view = BoardView::project(&tasks);
/// let todo = view.column(TaskStatus::Todo);
/// assert_eq!(todo.len(), 2);
/// assert_eq!(todo.tasks[1].title, "Review");
/// assert_eq!(view.total(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView<'a> {
    columns: [Column<'a>; 3],
}

impl<'a> BoardView<'a> {
    /// Partitions `tasks` by status, preserving sequence order within each column.
    #[must_use]
    pub fn project(tasks: &'a [Task]) -> Self {
        let mut columns = TaskStatus::all().map(Column::new);
        for task in tasks {
            columns[task.status.index()].tasks.push(task);
        }
        Self { columns }
    }

    /// Returns the column for the given status.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &Column<'a> {
        &self.columns[status.index()]
    }

    /// Returns the column at a board index (0-2), if in range.
    #[must_use]
    pub fn column_at(&self, index: usize) -> Option<&Column<'a>> {
        self.columns.get(index)
    }

    /// Returns all columns in board order.
    #[must_use]
    pub fn columns(&self) -> &[Column<'a>; 3] {
        &self.columns
    }

    /// Returns the per-column task counts in board order.
    #[must_use]
    pub fn counts(&self) -> [usize; 3] {
        [
            self.columns[0].len(),
            self.columns[1].len(),
            self.columns[2].len(),
        ]
    }

    /// Returns the total number of tasks across all columns.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts().iter().sum()
    }

    /// Locates a task by id, returning its column status and row.
    #[must_use]
    pub fn locate(&self, id: TaskId) -> Option<(TaskStatus, usize)> {
        self.columns
            .iter()
            .find_map(|col| col.position(id).map(|row| (col.status, row)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_tasks;

    #[test]
    fn project_empty_sequence() {
        let view = BoardView::project(&[]);
        assert_eq!(view.counts(), [0, 0, 0]);
        assert!(view.columns().iter().all(Column::is_empty));
    }

    #[test]
    fn project_defaults_counts() {
        let tasks = default_tasks();
        let view = BoardView::project(&tasks);

        assert_eq!(view.counts(), [4, 2, 2]);
        assert_eq!(view.column(TaskStatus::Todo).label(), "TODO (4)");
        assert_eq!(view.column(TaskStatus::Doing).label(), "DOING (2)");
        assert_eq!(view.column(TaskStatus::Done).label(), "DONE (2)");
    }

    #[test]
    fn project_preserves_sequence_order() {
        let tasks = vec![
            Task::new(TaskId::new(3), "c", "", TaskStatus::Done),
            Task::new(TaskId::new(1), "a", "", TaskStatus::Done),
            Task::new(TaskId::new(2), "b", "", TaskStatus::Done),
        ];
        let view = BoardView::project(&tasks);
        let titles: Vec<&str> = view
            .column(TaskStatus::Done)
            .tasks
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, ["c", "a", "b"]);
    }

    #[test]
    fn locate_finds_task() {
        let tasks = default_tasks();
        let view = BoardView::project(&tasks);

        assert_eq!(view.locate(TaskId::new(6)), Some((TaskStatus::Doing, 1)));
        assert_eq!(view.locate(TaskId::new(99)), None);
    }

    #[test]
    fn column_at_out_of_range() {
        let view = BoardView::project(&[]);
        assert!(view.column_at(2).is_some());
        assert!(view.column_at(3).is_none());
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn arb_tasks()(statuses in prop::collection::vec(0usize..3, 0..30)) -> Vec<Task> {
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
        /// Column counts always add up to the length of the sequence.
        #[test]
        fn counts_sum_to_total(tasks in arb_tasks()) {
            let view = BoardView::project(&tasks);
            prop_assert_eq!(view.total(), tasks.len());
        }

        /// Every task lands in the column matching its status.
        #[test]
        fn tasks_land_in_their_status_column(tasks in arb_tasks()) {
            let view = BoardView::project(&tasks);
            for column in view.columns() {
                prop_assert!(column.tasks.iter().all(|t| t.status == column.status));
            }
        }
    }
}
