//! Task editor modal widget.
//!
//! Draws the add/edit form on top of the board. The form content comes
//! entirely from [`TaskEditor`]; this module only lays it out.

use plank_protocol::TaskStatus;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::{centered_rect, task_card::status_color};
use crate::editor::{Field, TaskEditor, TextInput};
use crate::layout::{EDITOR_HEIGHT, EDITOR_WIDTH};

/// Returns the modal area within the full terminal `area`.
///
/// Clicks outside this area dismiss the editor.
#[must_use]
pub fn editor_area(area: Rect) -> Rect {
    centered_rect(EDITOR_WIDTH, EDITOR_HEIGHT, area)
}

/// Renders the editor modal centered in `area`.
///
/// Does nothing while the editor is closed.
///
/// # Layout
///
/// ```text
/// ╭ Add New Task ──────────────────────────╮
/// │                                        │
/// │ ▸ Title                                │
/// │   Write docs█                          │
/// │                                        │
/// │   Description                          │
/// │                                        │
/// │                                        │
/// │   Status   ◀ TODO ▶                    │
/// │                                        │
/// │   Please enter a task title.           │
/// │   Enter Create Task   Esc Cancel       │
/// ╰────────────────────────────────────────╯
/// ```
pub fn render_editor(editor: &TaskEditor, area: Rect, buf: &mut Buffer) {
    if !editor.is_open() {
        return;
    }

    let popup = editor_area(area);
    Clear.render(popup, buf);

    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", editor.heading()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(popup);
    block.render(popup, buf);

    let field_width = usize::from(inner.width.saturating_sub(4));
    let focus = editor.focus();

    let mut lines = vec![
        Line::from(""),
        field_label(Field::Title, focus),
        input_line(editor.title(), field_width, focus == Field::Title),
        Line::from(""),
        field_label(Field::Description, focus),
        input_line(
            editor.description(),
            field_width,
            focus == Field::Description,
        ),
        Line::from(""),
        status_line(editor.status(), focus == Field::Status),
        Line::from(""),
    ];

    lines.push(match editor.error() {
        Some(error) => Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(""),
    });

    let key_style = Style::default().fg(Color::Yellow);
    let hint_style = Style::default().fg(Color::DarkGray);
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled("Enter", key_style),
        Span::styled(format!(" {}   ", editor.submit_label()), hint_style),
        Span::styled("Tab", key_style),
        Span::styled(" Next field   ", hint_style),
        Span::styled("Esc", key_style),
        Span::styled(" Cancel", hint_style),
    ]));

    Paragraph::new(lines).render(inner, buf);
}

fn field_label(field: Field, focus: Field) -> Line<'static> {
    if field == focus {
        Line::from(Span::styled(
            format!("▸ {}", field.label()),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            format!("  {}", field.label()),
            Style::default().fg(Color::Gray),
        ))
    }
}

/// Renders a text input, scrolled horizontally so the cursor stays visible.
fn input_line(input: &TextInput, width: usize, focused: bool) -> Line<'static> {
    let chars: Vec<char> = input.value().chars().collect();
    let cursor = input.cursor_chars();
    let width = width.max(1);
    let start = (cursor + 1).saturating_sub(width);
    let end = chars.len().min(start + width);

    let text_style = Style::default().fg(Color::White);
    let collect = |range: std::ops::Range<usize>| chars[range].iter().collect::<String>();

    if !focused {
        return Line::from(vec![
            Span::raw("  "),
            Span::styled(collect(start..end), text_style),
        ]);
    }

    let at_cursor = chars.get(cursor).map_or_else(|| " ".to_string(), char::to_string);
    let after_start = (cursor + 1).min(end);
    Line::from(vec![
        Span::raw("  "),
        Span::styled(collect(start..cursor), text_style),
        Span::styled(at_cursor, text_style.add_modifier(Modifier::REVERSED)),
        Span::styled(collect(after_start..end), text_style),
    ])
}

fn status_line(status: TaskStatus, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let marker = if focused { "▸ " } else { "  " };
    let arrow_style = Style::default().fg(if focused { Color::Yellow } else { Color::DarkGray });

    Line::from(vec![
        Span::styled(format!("{marker}{}   ", Field::Status.label()), label_style),
        Span::styled("◀ ", arrow_style),
        Span::styled(
            status.label(),
            Style::default()
                .fg(status_color(status))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", arrow_style),
    ])
}
