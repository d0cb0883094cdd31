//! Main application struct and run loop.
//!
//! [`App`] wires the task store, the board state and the editor together.
//! It routes each [`Message`] to whichever surface is on top (editor, then
//! delete confirmation, then help, then the board) and never edits tasks
//! itself: every mutation goes through the store.

use plank_protocol::{BoardView, Message, TaskId};
use plank_store::{KeyValueStore, StoreError, TaskStore};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use tracing::{debug, error, info};

use crate::{
    AppState,
    editor::{SubmitOutcome, TaskEditor},
    event::{KeyMode, event_to_message, poll_event},
    layout::{HEADER_HEIGHT, MIN_HEIGHT, MIN_HEIGHT_WITH_HEADER, MIN_WIDTH, STATUS_BAR_HEIGHT},
    state::StatusLine,
    terminal::AppTerminal,
    widgets::{
        LanePosition, confirm_area, editor_area, lane::card_index_at, lane_areas,
        render_board, render_confirm_dialog, render_editor, render_help_overlay,
        render_status_bar,
    },
};

/// The main application struct.
///
/// Generic over the storage backend so tests can run against an in-memory
/// store.
#[derive(Debug)]
pub struct App<S: KeyValueStore = Box<dyn KeyValueStore>> {
    store: TaskStore<S>,
    state: AppState,
    editor: TaskEditor,
    should_quit: bool,
    /// Last known terminal area, used for modal hit-testing.
    last_area: Rect,
    /// Board area of the last render, used for card hit-testing.
    board_area: Rect,
    /// Whether the header was shown in the last render.
    header_visible: bool,
}

impl<S: KeyValueStore> App<S> {
    /// Creates an application around an opened task store.
    ///
    /// # Examples
    ///
    /// ```
    /// use plank_store::{MemoryStore, TaskStore};
    /// use plank_tui::App;
    ///
    /// let store = TaskStore::open(MemoryStore::new()).unwrap();
    /// let app = App::new(store);
    /// assert_eq!(app.store().len(), 8);
    /// ```
    #[must_use]
    pub fn new(store: TaskStore<S>) -> Self {
        Self {
            store,
            state: AppState::new(),
            editor: TaskEditor::new(),
            should_quit: false,
            last_area: Rect::default(),
            board_area: Rect::default(),
            header_visible: true,
        }
    }

    /// Returns the task store.
    #[must_use]
    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    /// Returns the board state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns the task editor.
    #[must_use]
    pub fn editor(&self) -> &TaskEditor {
        &self.editor
    }

    /// Returns `true` once a quit has been requested.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the keymap matching what is currently on screen.
    #[must_use]
    pub fn key_mode(&self) -> KeyMode {
        if self.editor.is_open() {
            KeyMode::Editor
        } else if self.state.pending_delete.is_some() {
            KeyMode::Confirm
        } else {
            KeyMode::Board
        }
    }

    /// Updates the application based on a message.
    ///
    /// `Quit` always quits. Otherwise the topmost surface handles the
    /// message: the editor while it is open, then a pending delete
    /// confirmation, then the help overlay (where any other message just
    /// dismisses it), then the board.
    pub fn update(&mut self, msg: Message) {
        if msg.is_terminating() {
            self.should_quit = true;
            return;
        }

        if self.editor.is_open() {
            self.update_editor(msg);
        } else if self.state.pending_delete.is_some() {
            self.update_confirm(msg);
        } else if self.state.help_visible {
            match msg {
                Message::ToggleHelp | Message::Escape => self.state.toggle_help(),
                _ => {
                    let _ = self.state.dismiss_help();
                }
            }
        } else {
            self.update_board(msg);
        }
    }

    fn update_board(&mut self, msg: Message) {
        let view = BoardView::project(self.store.tasks());
        match msg {
            Message::NavigateLeft => self.state.navigate_left(&view),
            Message::NavigateRight => self.state.navigate_right(&view),
            Message::NavigateUp => self.state.navigate_up(&view),
            Message::NavigateDown => self.state.navigate_down(&view),
            Message::Select => {
                if let Some(task) = self.state.selected_task(&view) {
                    debug!(id = %task.id, "opening editor");
                    self.editor.open_edit(task);
                }
            }
            Message::AddTask => self.editor.open_create(),
            Message::RequestDelete => {
                self.state.pending_delete = self.state.selected_task_id(&view);
            }
            Message::Escape => self.state.clear_selection(),
            Message::ToggleHelp => self.state.toggle_help(),
            Message::ClickAt { column, row } => self.handle_board_click(column, row),
            _ => {}
        }
    }

    fn update_editor(&mut self, msg: Message) {
        match msg {
            Message::EditorNextField => self.editor.next_field(),
            Message::EditorPrevField => self.editor.prev_field(),
            Message::EditorMove { delta } => self.editor.move_cursor(delta),
            Message::EditorInput { ch } => self.editor.input(ch),
            Message::EditorBackspace => self.editor.backspace(),
            Message::EditorCancel | Message::Escape => self.editor.cancel(),
            Message::EditorSubmit => self.submit_editor(),
            Message::ClickAt { column, row } => {
                if !editor_area(self.last_area).contains((column, row).into()) {
                    self.editor.cancel();
                }
            }
            _ => {}
        }
    }

    fn update_confirm(&mut self, msg: Message) {
        match msg {
            Message::ConfirmDelete => self.confirm_delete(),
            Message::CancelDelete | Message::Escape => self.state.pending_delete = None,
            Message::ClickAt { column, row } => {
                if !confirm_area(self.last_area).contains((column, row).into()) {
                    self.state.pending_delete = None;
                }
            }
            _ => {}
        }
    }

    fn submit_editor(&mut self) {
        match self.editor.submit(&mut self.store) {
            Ok(Some(SubmitOutcome::Created(task))) => {
                info!(id = %task.id, "task created");
                self.state
                    .set_status(StatusLine::info(format!("Created \"{}\"", task.title)));
                self.focus_task(task.id);
            }
            Ok(Some(SubmitOutcome::Updated(id))) => {
                info!(%id, "task updated");
                self.state.set_status(StatusLine::info("Saved changes"));
                self.focus_task(id);
            }
            Ok(Some(SubmitOutcome::Missing(_))) => self.refresh_selection(),
            Ok(Some(SubmitOutcome::Rejected) | None) => {}
            Err(e) => self.report_store_error("save task", &e),
        }
    }

    fn confirm_delete(&mut self) {
        let Some(id) = self.state.pending_delete.take() else {
            return;
        };
        match self.store.delete(id) {
            Ok(task) => {
                info!(%id, "task deleted");
                self.state
                    .set_status(StatusLine::info(format!("Deleted \"{}\"", task.title)));
            }
            Err(e) if e.is_not_found() => debug!(%id, "deleted task was already gone"),
            Err(e) => self.report_store_error("delete task", &e),
        }
        self.refresh_selection();
    }

    fn report_store_error(&mut self, action: &str, e: &StoreError) {
        error!(error = %e, "failed to {action}");
        self.state
            .set_status(StatusLine::error(format!("Could not {action}: {e}")));
    }

    /// Selects the given task, falling back to clamping the current selection.
    fn focus_task(&mut self, id: TaskId) {
        let view = BoardView::project(self.store.tasks());
        if !self.state.select_task(&view, id) {
            self.state.clamp_selection(&view);
        }
    }

    fn refresh_selection(&mut self) {
        let view = BoardView::project(self.store.tasks());
        self.state.clamp_selection(&view);
    }

    /// Opens the editor for the card under the click, if any.
    fn handle_board_click(&mut self, column: u16, row: u16) {
        if !self.board_area.contains((column, row).into()) {
            return;
        }

        let view = BoardView::project(self.store.tasks());
        let areas = lane_areas(self.board_area);
        let Some(lane_idx) = areas
            .iter()
            .position(|a| a.contains((column, row).into()))
        else {
            return;
        };

        let position = match lane_idx {
            0 => LanePosition::First,
            1 => LanePosition::Middle,
            _ => LanePosition::Last,
        };
        let Some(lane) = view.column_at(lane_idx) else {
            return;
        };
        // The scroll offset depends on the selection the lane was drawn with.
        let drawn_selection = (self.state.selected_lane == lane_idx)
            .then_some(self.state.selected_task)
            .flatten();

        if let Some(task_idx) = card_index_at(
            areas[lane_idx],
            position,
            lane.len(),
            drawn_selection,
            column,
            row,
        ) && let Some(task) = lane.get(task_idx)
        {
            self.state.selected_lane = lane_idx;
            self.state.selected_task = Some(task_idx);
            debug!(id = %task.id, "card clicked");
            self.editor.open_edit(task);
        }
    }

    /// Renders the application UI to the given frame.
    ///
    /// Below the minimum size a "terminal too small" message is shown; when
    /// height is tight the header is hidden.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.last_area = area;

        if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
            self.header_visible = false;
            self.board_area = Rect::default();
            render_terminal_too_small(frame, area);
            return;
        }

        self.header_visible = area.height >= MIN_HEIGHT_WITH_HEADER;
        let header_height = if self.header_visible { HEADER_HEIGHT } else { 0 };
        let [header_area, board_area, status_area] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .areas(area);
        self.board_area = board_area;

        if self.header_visible {
            self.render_header(frame, header_area);
        }

        let view = BoardView::project(self.store.tasks());
        let buf = frame.buffer_mut();
        render_board(
            &view,
            self.state.selected_lane,
            self.state.selected_task,
            board_area,
            buf,
        );
        render_status_bar(self.state.status.as_ref(), status_area, buf);

        if let Some(task) = self.state.pending_delete.and_then(|id| self.store.get(id)) {
            render_confirm_dialog(task, area, buf);
        }
        render_editor(&self.editor, area, buf);
        if self.state.help_visible {
            render_help_overlay(area, buf);
        }
    }

    /// Renders the header bar with title, task count and help cue.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [title_area, help_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(17)]).areas(inner);

        let count = self.store.len();
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "plank",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::styled("Kanban Board", Style::default().fg(Color::White)),
            Span::styled(
                format!("  {count} task{}", if count == 1 { "" } else { "s" }),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        frame.render_widget(title, title_area);

        let help_cue = Paragraph::new(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" for help", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(help_cue, help_area);
    }

    /// Runs the main application loop until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail. Storage failures are
    /// reported in the status line and do not end the loop.
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        info!(tasks = self.store.len(), "board ready");
        while !self.should_quit {
            terminal.draw(|frame| self.view(frame))?;

            if let Some(event) = poll_event()?
                && let Some(msg) = event_to_message(&event, self.key_mode())
            {
                self.update(msg);
            }
        }
        Ok(())
    }
}

/// Renders a message indicating the terminal is too small.
fn render_terminal_too_small(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal too small ({}×{})\nMinimum: {}×{} (w×h)",
        area.width, area.height, MIN_WIDTH, MIN_HEIGHT
    );
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    let vertical_offset = area.height.saturating_sub(2) / 2;
    let centered = Rect {
        y: area.y + vertical_offset,
        height: area.height.saturating_sub(vertical_offset),
        ..area
    };
    frame.render_widget(paragraph, centered);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{EMPTY_TITLE_MESSAGE, EditorMode};
    use plank_protocol::TaskStatus;
    use plank_store::MemoryStore;
    use ratatui::{Terminal, backend::TestBackend};

    fn app() -> App<MemoryStore> {
        App::new(TaskStore::open(MemoryStore::new()).unwrap())
    }

    /// Renders once at the given size so hit-testing areas are known.
    fn render(app: &mut App<MemoryStore>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();
        crate::test_utils::buffer_to_string(terminal.backend().buffer())
    }

    fn type_text(app: &mut App<MemoryStore>, text: &str) {
        for ch in text.chars() {
            app.update(Message::EditorInput { ch });
        }
    }

    fn counts(app: &App<MemoryStore>) -> [usize; 3] {
        BoardView::project(app.store().tasks()).counts()
    }

    #[test]
    fn app_starts_with_default_board() {
        let app = app();
        assert!(!app.should_quit());
        assert_eq!(counts(&app), [4, 2, 2]);
        assert_eq!(app.key_mode(), KeyMode::Board);
    }

    #[test]
    fn quit_works_from_every_mode() {
        let mut app = app();
        app.update(Message::AddTask);
        app.update(Message::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn navigation_updates_state() {
        let mut app = app();
        app.update(Message::NavigateRight);
        assert_eq!(app.state().selected_lane, 1);
        app.update(Message::NavigateDown);
        assert_eq!(app.state().selected_task, Some(0));
        app.update(Message::NavigateLeft);
        assert_eq!(app.state().selected_lane, 0);
    }

    #[test]
    fn select_without_task_does_nothing() {
        let mut app = app();
        app.update(Message::Select);
        assert!(!app.editor().is_open());
    }

    #[test]
    fn add_task_flow() {
        let mut app = app();
        app.update(Message::AddTask);
        assert_eq!(app.key_mode(), KeyMode::Editor);
        assert_eq!(app.editor().heading(), "Add New Task");

        type_text(&mut app, "Write docs");
        app.update(Message::EditorSubmit);

        assert!(!app.editor().is_open());
        assert_eq!(counts(&app), [5, 2, 2]);
        let created = app.store().get(TaskId::new(9)).expect("created task");
        assert_eq!(created.title, "Write docs");
        assert_eq!(created.status, TaskStatus::Todo);
        // The new task is selected
        assert_eq!(app.state().selected_lane, 0);
        assert_eq!(app.state().selected_task, Some(4));
        assert_eq!(
            app.state().status,
            Some(StatusLine::info("Created \"Write docs\""))
        );
    }

    #[test]
    fn blank_title_keeps_editor_open() {
        let mut app = app();
        app.update(Message::AddTask);
        type_text(&mut app, "   ");
        app.update(Message::EditorSubmit);

        assert!(app.editor().is_open());
        assert_eq!(app.editor().error(), Some(EMPTY_TITLE_MESSAGE));
        assert_eq!(app.store().len(), 8);
    }

    #[test]
    fn edit_moves_task_to_done() {
        let mut app = app();
        // Select "Master JavaScript" (id 5)
        app.update(Message::NavigateRight);
        app.update(Message::NavigateDown);
        app.update(Message::Select);
        assert_eq!(app.editor().mode(), EditorMode::Edit(TaskId::new(5)));
        assert_eq!(app.editor().heading(), "Edit Task");

        app.update(Message::EditorPrevField);
        app.update(Message::EditorMove { delta: 1 });
        app.update(Message::EditorSubmit);

        assert_eq!(counts(&app), [4, 1, 3]);
        // Selection follows the task into the Done lane, where it keeps its
        // place in the sequence ahead of tasks 7 and 8.
        assert_eq!(app.state().selected_lane, 2);
        assert_eq!(app.state().selected_task, Some(0));
    }

    #[test]
    fn cancel_leaves_store_untouched() {
        let mut app = app();
        app.update(Message::AddTask);
        type_text(&mut app, "discard me");
        app.update(Message::EditorCancel);

        assert!(!app.editor().is_open());
        assert_eq!(app.store().len(), 8);
    }

    #[test]
    fn editor_swallows_board_keys() {
        let mut app = app();
        app.update(Message::AddTask);
        app.update(Message::NavigateRight);
        app.update(Message::RequestDelete);

        assert_eq!(app.state().selected_lane, 0);
        assert_eq!(app.state().pending_delete, None);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut app = app();
        app.update(Message::NavigateLeft); // Done lane
        app.update(Message::NavigateDown); // "Explore ES6 Features"
        app.update(Message::RequestDelete);
        assert_eq!(app.state().pending_delete, Some(TaskId::new(7)));
        assert_eq!(app.key_mode(), KeyMode::Confirm);

        app.update(Message::CancelDelete);
        assert_eq!(app.store().len(), 8);

        app.update(Message::RequestDelete);
        app.update(Message::ConfirmDelete);
        assert_eq!(app.store().len(), 7);
        assert!(app.store().get(TaskId::new(7)).is_none());
        assert_eq!(counts(&app), [4, 2, 1]);
        // Selection clamps onto the remaining card
        assert_eq!(app.state().selected_task, Some(0));
    }

    #[test]
    fn delete_without_selection_does_nothing() {
        let mut app = app();
        app.update(Message::RequestDelete);
        assert_eq!(app.state().pending_delete, None);
    }

    #[test]
    fn help_dismisses_on_any_key() {
        let mut app = app();
        app.update(Message::ToggleHelp);
        assert!(app.state().help_visible);

        app.update(Message::NavigateRight);
        assert!(!app.state().help_visible);
        // Navigation was swallowed
        assert_eq!(app.state().selected_lane, 0);
    }

    #[test]
    fn escape_clears_selection() {
        let mut app = app();
        app.update(Message::NavigateDown);
        app.update(Message::Escape);
        assert_eq!(app.state().selected_task, None);
        assert!(!app.should_quit());
    }

    #[test]
    fn click_on_card_opens_editor() {
        let mut app = app();
        render(&mut app, 90, 30);

        // Header is 3 rows, lane top border is row 3, first card starts at row 4.
        // Middle lane spans columns 30-59.
        app.update(Message::ClickAt { column: 40, row: 9 });

        assert_eq!(app.state().selected_lane, 1);
        assert_eq!(app.state().selected_task, Some(1));
        assert_eq!(app.editor().mode(), EditorMode::Edit(TaskId::new(6)));
    }

    #[test]
    fn click_on_empty_space_does_nothing() {
        let mut app = app();
        render(&mut app, 90, 30);

        app.update(Message::ClickAt { column: 40, row: 20 });
        app.update(Message::ClickAt { column: 40, row: 1 });
        assert!(!app.editor().is_open());
    }

    #[test]
    fn click_outside_editor_dismisses_it() {
        let mut app = app();
        render(&mut app, 90, 30);
        app.update(Message::AddTask);

        // Inside the modal: stays open
        let modal = editor_area(Rect::new(0, 0, 90, 30));
        app.update(Message::ClickAt {
            column: modal.x + 1,
            row: modal.y + 1,
        });
        assert!(app.editor().is_open());

        app.update(Message::ClickAt { column: 0, row: 0 });
        assert!(!app.editor().is_open());
        assert_eq!(app.store().len(), 8);
    }

    #[test]
    fn click_outside_confirm_cancels_delete() {
        let mut app = app();
        render(&mut app, 90, 30);
        app.update(Message::NavigateDown);
        app.update(Message::RequestDelete);

        app.update(Message::ClickAt { column: 0, row: 0 });
        assert_eq!(app.state().pending_delete, None);
        assert_eq!(app.store().len(), 8);
    }

    #[test]
    fn view_shows_board_and_header() {
        let mut app = app();
        let content = render(&mut app, 90, 30);

        assert!(app.header_visible);
        assert!(content.contains("plank"));
        assert!(content.contains("8 tasks"));
        assert!(content.contains("TODO (4)"));
        assert!(content.contains("DOING (2)"));
        assert!(content.contains("DONE (2)"));
    }

    #[test]
    fn view_hides_header_in_compact_mode() {
        let mut app = app();
        let content = render(&mut app, 90, 11);

        assert!(!app.header_visible);
        assert!(content.contains("TODO (4)"));
    }

    #[test]
    fn view_shows_too_small_message() {
        let mut app = app();
        let content = render(&mut app, 30, 8);

        assert!(!app.header_visible);
        assert!(content.contains("Terminal too small"));
    }

    #[test]
    fn view_draws_open_overlays() {
        let mut app = app();
        app.update(Message::NavigateDown);
        app.update(Message::RequestDelete);
        let content = render(&mut app, 90, 30);
        assert!(content.contains("Delete Task"));

        app.update(Message::CancelDelete);
        app.update(Message::AddTask);
        let content = render(&mut app, 90, 30);
        assert!(content.contains("Add New Task"));
    }

    #[test]
    fn status_line_reports_deletion() {
        let mut app = app();
        app.update(Message::NavigateDown);
        app.update(Message::RequestDelete);
        app.update(Message::ConfirmDelete);

        let content = render(&mut app, 100, 30);
        assert!(content.contains("Deleted \"Launch Epic Career"));
        assert!(content.contains("7 tasks"));
    }
}
