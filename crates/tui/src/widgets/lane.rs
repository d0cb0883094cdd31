//! Lane rendering widget.
//!
//! A lane is one status column: a header with the live count followed by a
//! vertical list of task cards. Adjacent lanes share a single border.

use plank_protocol::Column;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::task_card::render_task_card;
use crate::layout::TASK_CARD_HEIGHT;

/// Position of a lane in the horizontal layout.
///
/// Determines which borders a lane draws so adjacent lanes share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanePosition {
    /// Leftmost lane: rounded corners on the left, no right border.
    First,
    /// Inner lane: T-connectors on the left, no right border.
    Middle,
    /// Rightmost lane: T-connectors on the left, rounded corners on the right.
    Last,
}

impl LanePosition {
    fn borders(self) -> Borders {
        match self {
            Self::First | Self::Middle => Borders::TOP | Borders::BOTTOM | Borders::LEFT,
            Self::Last => Borders::ALL,
        }
    }
}

/// Rounded corners on the left, no right border.
const BORDER_SET_FIRST: border::Set = border::Set {
    top_left: "╭",
    top_right: "─",
    bottom_left: "╰",
    bottom_right: "─",
    vertical_left: "│",
    vertical_right: " ",
    horizontal_top: "─",
    horizontal_bottom: "─",
};

/// T-connectors on the left, no right border.
const BORDER_SET_MIDDLE: border::Set = border::Set {
    top_left: "┬",
    top_right: "─",
    bottom_left: "┴",
    bottom_right: "─",
    vertical_left: "│",
    vertical_right: " ",
    horizontal_top: "─",
    horizontal_bottom: "─",
};

/// T-connectors on the left, rounded corners on the right.
const BORDER_SET_LAST: border::Set = border::Set {
    top_left: "┬",
    top_right: "╮",
    bottom_left: "┴",
    bottom_right: "╯",
    vertical_left: "│",
    vertical_right: "│",
    horizontal_top: "─",
    horizontal_bottom: "─",
};

/// Returns the area inside a lane's borders, where cards are drawn.
#[must_use]
pub fn lane_inner(area: Rect, position: LanePosition) -> Rect {
    Block::default().borders(position.borders()).inner(area)
}

/// Returns the index of the card drawn at `row`, if any.
///
/// `selected_idx` must be the selection used when the lane was drawn, since
/// it determines the scroll offset.
#[must_use]
pub fn card_index_at(
    area: Rect,
    position: LanePosition,
    len: usize,
    selected_idx: Option<usize>,
    column: u16,
    row: u16,
) -> Option<usize> {
    let inner = lane_inner(area, position);
    if !inner.contains((column, row).into()) {
        return None;
    }
    let visible = visible_cards(inner);
    let offset = calculate_scroll_offset(selected_idx, len, visible);
    let slot = usize::from((row - inner.y) / TASK_CARD_HEIGHT);
    let idx = offset + slot;
    (slot < visible && idx < len).then_some(idx)
}

/// Renders a single lane to the buffer.
///
/// # Arguments
///
/// * `column` - The tasks in this lane
/// * `is_focused` - Whether this lane currently has focus
/// * `selected_idx` - Index of the selected card within this lane, if any
/// * `area` - The rectangular area to render into
/// * `buf` - The buffer to render into
/// * `position` - The lane's position in the horizontal layout
/// * `prev_focused` - Whether the lane to the left is focused, which
///   highlights the shared border
///
/// # Examples
///
/// ```
/// use plank_protocol::{BoardView, TaskStatus, defaults::default_tasks};
/// use plank_tui::widgets::{LanePosition, render_lane};
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
///
/// let tasks = default_tasks();
/// let view = BoardView::project(&tasks);
///
/// let area = Rect::new(0, 0, 24, 15);
/// let mut buf = Buffer::empty(area);
/// render_lane(view.column(TaskStatus::Doing), true, Some(0), area, &mut buf, LanePosition::Middle, false);
/// ```
pub fn render_lane(
    column: &Column<'_>,
    is_focused: bool,
    selected_idx: Option<usize>,
    area: Rect,
    buf: &mut Buffer,
    position: LanePosition,
    prev_focused: bool,
) {
    let (border_style, title_style) = if is_focused {
        (
            Style::default().fg(Color::Cyan),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::White),
        )
    };

    let block = Block::default()
        .title(Span::styled(column.label(), title_style))
        .borders(position.borders())
        .border_set(match position {
            LanePosition::First => BORDER_SET_FIRST,
            LanePosition::Middle => BORDER_SET_MIDDLE,
            LanePosition::Last => BORDER_SET_LAST,
        })
        .border_style(border_style);

    let inner = block.inner(area);
    block.render(area, buf);

    // The left border is shared with the previous lane.
    if prev_focused && !is_focused && area.width > 0 {
        let highlight = Style::default().fg(Color::Cyan);
        for y in area.top()..area.bottom() {
            if let Some(cell) = buf.cell_mut((area.x, y)) {
                cell.set_style(highlight);
            }
        }
    }

    if column.is_empty() {
        render_empty_placeholder(inner, buf);
        return;
    }

    let visible = visible_cards(inner);
    let offset = calculate_scroll_offset(selected_idx, column.len(), visible);
    let shown = column.len().saturating_sub(offset).min(visible);

    let slots = Layout::vertical(
        (0..shown)
            .map(|_| Constraint::Length(TASK_CARD_HEIGHT))
            .chain(std::iter::once(Constraint::Min(0))),
    )
    .split(inner);

    for (slot, card_area) in slots.iter().take(shown).enumerate() {
        let idx = offset + slot;
        if let Some(task) = column.get(idx) {
            let is_selected = is_focused && selected_idx == Some(idx);
            render_task_card(task, is_selected, *card_area, buf);
        }
    }
}

/// Renders a placeholder message for empty lanes.
fn render_empty_placeholder(area: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::from(Span::styled(
        "No tasks",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )))
    .render(area, buf);
}

fn visible_cards(inner: Rect) -> usize {
    usize::from((inner.height / TASK_CARD_HEIGHT).max(1))
}

/// Calculates the scroll offset that keeps the selected card visible.
fn calculate_scroll_offset(
    selected_idx: Option<usize>,
    total: usize,
    visible: usize,
) -> usize {
    let Some(selected) = selected_idx else {
        return 0;
    };
    if total <= visible {
        return 0;
    }

    let max_offset = total - visible;
    selected.saturating_sub(visible / 2).min(max_offset)
}
