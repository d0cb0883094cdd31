//! Board rendering widget.
//!
//! Renders the three status lanes side by side with equal widths.

use plank_protocol::BoardView;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
};

use super::lane::{LanePosition, render_lane};

/// Splits the board area into the three lane areas, left to right.
///
/// Used both for drawing and for mapping mouse clicks back to lanes.
#[must_use]
pub fn lane_areas(area: Rect) -> [Rect; 3] {
    Layout::horizontal([Constraint::Ratio(1, 3); 3]).areas(area)
}

/// Renders the complete board to the buffer.
///
/// # Arguments
///
/// * `view` - The board projection to draw
/// * `selected_lane` - Index of the focused lane (0-2)
/// * `selected_task` - Index of the selected card within the focused lane
/// * `area` - The rectangular area to render into
/// * `buf` - The buffer to render into
///
/// # Layout
///
/// ```text
/// ╭TODO (4)──────┬DOING (2)─────┬DONE (2)──────╮
/// │┌────────────┐│┌────────────┐│┌────────────┐│
/// ││Task 1      │││Task 5      │││Task 7      ││
/// ││            │││            │││            ││
/// │└────────────┘│└────────────┘│└────────────┘│
/// ╰──────────────┴──────────────┴──────────────╯
/// ```
pub fn render_board(
    view: &BoardView<'_>,
    selected_lane: usize,
    selected_task: Option<usize>,
    area: Rect,
    buf: &mut Buffer,
) {
    let areas = lane_areas(area);
    let last = areas.len() - 1;

    for (i, (column, lane_area)) in view.columns().iter().zip(areas).enumerate() {
        let is_focused = selected_lane == i;
        let position = match i {
            0 => LanePosition::First,
            i if i == last => LanePosition::Last,
            _ => LanePosition::Middle,
        };
        let prev_focused = i > 0 && selected_lane == i - 1;
        let selection = if is_focused { selected_task } else { None };

        render_lane(
            column,
            is_focused,
            selection,
            lane_area,
            buf,
            position,
            prev_focused,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;
    use plank_protocol::defaults::default_tasks;

    #[test]
    fn render_empty_board() {
        let view = BoardView::project(&[]);
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);

        render_board(&view, 0, None, area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("TODO (0)"));
        assert!(content.contains("DOING (0)"));
        assert!(content.contains("DONE (0)"));
        assert!(content.contains("No tasks"));
    }

    #[test]
    fn render_default_board_counts() {
        let tasks = default_tasks();
        let view = BoardView::project(&tasks);
        let area = Rect::new(0, 0, 90, 24);
        let mut buf = Buffer::empty(area);

        render_board(&view, 0, Some(0), area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("TODO (4)"));
        assert!(content.contains("DOING (2)"));
        assert!(content.contains("DONE (2)"));
        assert!(content.contains("Have fun"));
    }

    #[test]
    fn render_is_idempotent() {
        let tasks = default_tasks();
        let view = BoardView::project(&tasks);
        let area = Rect::new(0, 0, 90, 24);

        let mut first = Buffer::empty(area);
        render_board(&view, 1, Some(1), area, &mut first);
        let mut second = first.clone();
        render_board(&view, 1, Some(1), area, &mut second);

        assert_eq!(first, second);
    }

    #[test]
    fn lane_areas_cover_board() {
        let area = Rect::new(0, 3, 90, 20);
        let [a, b, c] = lane_areas(area);

        assert_eq!(a.x, 0);
        assert_eq!(a.width + b.width + c.width, 90);
        assert_eq!(c.x + c.width, 90);
        assert!([a, b, c].iter().all(|r| r.y == 3 && r.height == 20));
    }

    #[test]
    fn render_board_narrow_terminal() {
        let tasks = default_tasks();
        let view = BoardView::project(&tasks);
        let area = Rect::new(0, 0, 20, 6);
        let mut buf = Buffer::empty(area);

        // Should not panic with a narrow area
        render_board(&view, 2, Some(1), area, &mut buf);
    }
}
