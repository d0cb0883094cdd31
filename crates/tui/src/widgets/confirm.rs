//! Delete confirmation dialog.

use plank_protocol::Task;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::{centered_rect, truncate_string};
use crate::layout::{CONFIRM_HEIGHT, CONFIRM_WIDTH};

/// Returns the dialog area within the full terminal `area`.
#[must_use]
pub fn confirm_area(area: Rect) -> Rect {
    centered_rect(CONFIRM_WIDTH, CONFIRM_HEIGHT, area)
}

/// Renders the dialog asking whether to delete `task`.
///
/// ```text
/// ╭ Delete Task ───────────────────╮
/// │                                │
/// │     Delete "Have fun 🥳"?      │
/// │                                │
/// │     y Delete     n Cancel      │
/// ╰────────────────────────────────╯
/// ```
pub fn render_confirm_dialog(task: &Task, area: Rect, buf: &mut Buffer) {
    let popup = confirm_area(area);
    Clear.render(popup, buf);

    let block = Block::default()
        .title(Span::styled(
            " Delete Task ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Red));

    // Quotes and the question mark take 4 columns.
    let max_title = usize::from(popup.width.saturating_sub(2 + 4 + 7));
    let key_style = Style::default().fg(Color::Yellow);
    let hint_style = Style::default().fg(Color::DarkGray);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("Delete \""),
            Span::styled(
                truncate_string(&task.title, max_title),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("\"?"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", key_style),
            Span::styled(" Delete     ", hint_style),
            Span::styled("n", key_style),
            Span::styled(" Cancel", hint_style),
        ]),
    ];

    Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .render(popup, buf);
}
