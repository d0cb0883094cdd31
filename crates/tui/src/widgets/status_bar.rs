//! Status bar rendering widget.
//!
//! A single line at the bottom of the screen: the latest status message on
//! the left, keybinding hints on the right.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::state::StatusLine;

/// Hints shown on the right, as `(key, action)` pairs.
const HINTS: &[(&str, &str)] = &[
    ("a", "Add"),
    ("Enter", "Edit"),
    ("d", "Delete"),
    ("?", "Help"),
    ("Ctrl+C", "Quit"),
];

/// Renders the status bar.
///
/// # Examples
///
/// ```
/// use plank_tui::state::StatusLine;
/// use plank_tui::widgets::render_status_bar;
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
///
/// let area = Rect::new(0, 0, 80, 1);
/// let mut buf = Buffer::empty(area);
/// render_status_bar(Some(&StatusLine::info("Saved")), area, &mut buf);
/// ```
pub fn render_status_bar(status: Option<&StatusLine>, area: Rect, buf: &mut Buffer) {
    let key_style = Style::default().fg(Color::Yellow);
    let text_style = Style::default().fg(Color::DarkGray);

    let hints: Vec<Span<'static>> = HINTS
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(*key, key_style),
                Span::styled(format!(" {action}  "), text_style),
            ]
        })
        .collect();
    let hints = Line::from(hints);
    let hints_width = u16::try_from(hints.width()).unwrap_or(u16::MAX);

    let [message_area, hints_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(hints_width)]).areas(area);

    if let Some(status) = status {
        let style = if status.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Cyan)
        };
        Paragraph::new(Line::from(Span::styled(format!(" {}", status.text), style)))
            .render(message_area, buf);
    }

    Paragraph::new(hints)
        .alignment(Alignment::Right)
        .render(hints_area, buf);
}
