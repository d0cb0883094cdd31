//! Event handling and key mappings.
//!
//! Terminal events are turned into [`Message`]s. Which keymap applies
//! depends on what is on screen, see [`KeyMode`].

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use plank_protocol::Message;

/// Default poll timeout for events.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Which keymap is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
    /// Board navigation (also used while help is showing).
    #[default]
    Board,
    /// The task editor modal is open.
    Editor,
    /// A delete confirmation is pending.
    Confirm,
}

/// Polls for a terminal event with the default timeout.
///
/// Returns `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts an event (keyboard or mouse) to an application message.
///
/// Key releases are ignored so each key press yields exactly one message.
#[must_use]
pub fn event_to_message(event: &Event, mode: KeyMode) -> Option<Message> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => match mode {
            KeyMode::Board => key_to_message(*key),
            KeyMode::Editor => key_to_editor_message(*key),
            KeyMode::Confirm => key_to_confirm_message(*key),
        },
        Event::Mouse(mouse) => mouse_to_message(mouse),
        _ => None,
    }
}

/// Converts a mouse event to an application message.
///
/// Only left-button presses are handled.
#[must_use]
fn mouse_to_message(mouse: &crossterm::event::MouseEvent) -> Option<Message> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Message::ClickAt {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}

fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Converts a key event on the board to a message.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `Ctrl+C` | Quit |
/// | `Esc` | Escape (close overlay or clear selection) |
/// | Arrows | Navigate |
/// | `Enter` or `Space` | Edit the selected task |
/// | `a` or `n` | Add a task |
/// | `d` or `Delete` | Delete the selected task |
/// | `?` | Toggle help |
#[must_use]
pub fn key_to_message(key: KeyEvent) -> Option<Message> {
    if is_ctrl_c(key) {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),

        KeyCode::Left => Some(Message::NavigateLeft),
        KeyCode::Right => Some(Message::NavigateRight),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),

        KeyCode::Enter | KeyCode::Char(' ') => Some(Message::Select),
        KeyCode::Char('a' | 'n') => Some(Message::AddTask),
        KeyCode::Char('d') | KeyCode::Delete => Some(Message::RequestDelete),
        KeyCode::Char('?') => Some(Message::ToggleHelp),

        _ => None,
    }
}

/// Converts a key event in the editor modal to a message.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `Ctrl+C` | Quit |
/// | `Esc` | Cancel |
/// | `Enter` | Submit |
/// | `Tab` / `Down` | Next field |
/// | `Shift+Tab` / `Up` | Previous field |
/// | `Left` / `Right` | Move cursor, or cycle status |
/// | `Backspace` | Delete before cursor |
/// | Any char | Input |
#[must_use]
pub fn key_to_editor_message(key: KeyEvent) -> Option<Message> {
    if is_ctrl_c(key) {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Esc => Some(Message::EditorCancel),
        KeyCode::Enter => Some(Message::EditorSubmit),
        KeyCode::Tab | KeyCode::Down => Some(Message::EditorNextField),
        KeyCode::BackTab | KeyCode::Up => Some(Message::EditorPrevField),
        KeyCode::Left => Some(Message::EditorMove { delta: -1 }),
        KeyCode::Right => Some(Message::EditorMove { delta: 1 }),
        KeyCode::Backspace => Some(Message::EditorBackspace),
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(Message::EditorInput { ch })
        }
        _ => None,
    }
}

/// Converts a key event while a delete confirmation is pending.
///
/// `y`/`Enter` confirm, `n`/`Esc` cancel.
#[must_use]
pub fn key_to_confirm_message(key: KeyEvent) -> Option<Message> {
    if is_ctrl_c(key) {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Message::ConfirmDelete),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Message::CancelDelete),
        _ => None,
    }
}
