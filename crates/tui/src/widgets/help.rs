//! Help overlay widget.
//!
//! Lists every keybinding when the user presses `?`.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::centered_rect;

const HELP_WIDTH: u16 = 40;

/// Key column width, padding included.
const KEY_WIDTH: usize = 14;

/// Keybinding sections: heading, then `(keys, action)` rows.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Board",
        &[
            ("← →", "Switch lane"),
            ("↑ ↓", "Select task"),
            ("Enter/Space", "Edit task"),
            ("a / n", "Add task"),
            ("d / Del", "Delete task"),
            ("Esc", "Clear selection"),
        ],
    ),
    (
        "Editor",
        &[
            ("Tab/Shift+Tab", "Next/prev field"),
            ("← →", "Move cursor / status"),
            ("Enter", "Save"),
            ("Esc", "Cancel"),
        ],
    ),
    ("General", &[("?", "Toggle help"), ("Ctrl+C", "Quit")]),
];

/// Renders a centered help overlay displaying all keybindings.
///
/// # Examples
///
/// ```
/// use plank_tui::widgets::render_help_overlay;
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
///
/// let area = Rect::new(0, 0, 80, 30);
/// let mut buf = Buffer::empty(area);
/// render_help_overlay(area, &mut buf);
/// ```
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let lines = build_help_lines();
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let popup = centered_rect(HELP_WIDTH, height, area);

    Clear.render(popup, buf);

    let block = Block::default()
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightYellow));

    Paragraph::new(lines).block(block).render(popup, buf);
}

fn build_help_lines() -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Green);
    let text_style = Style::default().fg(Color::White);
    let hint_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    let mut lines = Vec::new();
    for (heading, bindings) in SECTIONS {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(format!("  {heading}"), header_style)));
        for (keys, action) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<KEY_WIDTH$}"), key_style),
                Span::styled(*action, text_style),
            ]));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("  Press any key to close", hint_style)));
    lines
}
