//! Task card rendering widget.
//!
//! A card shows the task title and the first line of its description inside
//! a bordered box colored by status.

use plank_protocol::{Task, TaskStatus};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::truncate_string;

/// Returns the border color for a task status.
///
/// # Examples
///
/// ```
/// use plank_protocol::TaskStatus;
/// use plank_tui::widgets::status_color;
/// use ratatui::style::Color;
///
/// assert_eq!(status_color(TaskStatus::Doing), Color::Blue);
/// ```
#[must_use]
pub const fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Todo => Color::DarkGray,
        TaskStatus::Doing => Color::Blue,
        TaskStatus::Done => Color::Green,
    }
}

/// Brighter variant of [`status_color`] for the selected card.
const fn status_color_bright(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Todo => Color::Gray,
        TaskStatus::Doing => Color::LightBlue,
        TaskStatus::Done => Color::LightGreen,
    }
}

/// Renders a task card to the buffer.
///
/// The selected card gets a thick border in a brighter color and a bold
/// title.
///
/// ```text
/// ┌────────────────┐
/// │Title           │
/// │first line...   │
/// └────────────────┘
/// ```
pub fn render_task_card(task: &Task, is_selected: bool, area: Rect, buf: &mut Buffer) {
    if area.width < 4 || area.height < 3 {
        return;
    }

    let (border_color, border_type, title_style, desc_style) = if is_selected {
        let bright = status_color_bright(task.status);
        (
            bright,
            BorderType::Thick,
            Style::default().fg(bright).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::White),
        )
    } else {
        (
            status_color(task.status),
            BorderType::Plain,
            Style::default().fg(Color::White),
            Style::default().fg(Color::DarkGray),
        )
    };

    let inner_width = usize::from(area.width.saturating_sub(2));
    let first_line = task.description.lines().next().unwrap_or_default();

    let content = vec![
        Line::from(Span::styled(
            truncate_string(&task.title, inner_width),
            title_style,
        )),
        Line::from(Span::styled(
            truncate_string(first_line, inner_width),
            desc_style,
        )),
    ];

    Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(border_type)
                .border_style(Style::default().fg(border_color)),
        )
        .render(area, buf);
}
