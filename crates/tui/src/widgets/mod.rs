//! Widget components for the plank TUI.
//!
//! Every widget is a plain function rendering borrowed state into a
//! [`Buffer`](ratatui::buffer::Buffer). The whole screen is rebuilt on every
//! frame, so rendering is idempotent and widgets keep no state of their own.
//!
//! # Modules
//!
//! - [`board`]: The three-lane board
//! - [`lane`]: A single lane with its header and cards
//! - [`task_card`]: A task card, colored by status
//! - [`editor`]: The add/edit task modal
//! - [`confirm`]: The delete confirmation dialog
//! - [`help`]: The keybinding overlay
//! - [`status_bar`]: The bottom status line
//!
//! # Example
//!
//! ```
//! use plank_protocol::{BoardView, defaults::default_tasks};
//! use plank_tui::widgets;
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//!
//! let tasks = default_tasks();
//! let view = BoardView::project(&tasks);
//!
//! let area = Rect::new(0, 0, 80, 24);
//! let mut buf = Buffer::empty(area);
//! widgets::render_board(&view, 0, Some(0), area, &mut buf);
//! ```

use ratatui::layout::Rect;

pub mod board;
pub mod confirm;
pub mod editor;
pub mod help;
pub mod lane;
pub mod status_bar;
pub mod task_card;

pub use board::{lane_areas, render_board};
pub use confirm::{confirm_area, render_confirm_dialog};
pub use editor::{editor_area, render_editor};
pub use help::render_help_overlay;
pub use lane::{LanePosition, render_lane};
pub use status_bar::render_status_bar;
pub use task_card::{render_task_card, status_color};

/// Creates a rectangle of the given size centered within `area`.
///
/// The size is clamped to the available area.
///
/// # Examples
///
/// ```
/// use plank_tui::widgets::centered_rect;
/// use ratatui::layout::Rect;
///
/// let popup = centered_rect(20, 10, Rect::new(0, 0, 80, 24));
/// assert_eq!(popup, Rect::new(30, 7, 20, 10));
/// ```
#[must_use]
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Truncates a string to `max_width` characters, adding an ellipsis if
/// anything was cut.
pub(crate) fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width > 3 {
        let truncated: String = s.chars().take(max_width - 3).collect();
        format!("{truncated}...")
    } else {
        s.chars().take(max_width).collect()
    }
}
