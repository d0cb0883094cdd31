//! Centralized layout measurements for the TUI.
//!
//! These values are shared between rendering and mouse hit-testing, so both
//! always agree on where things are drawn.

/// Height of the header bar in rows.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the status line at the bottom of the screen.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of each task card in rows: two borders, the title and one line of
/// description.
pub const TASK_CARD_HEIGHT: u16 = 4;

/// Width of the task editor modal.
pub const EDITOR_WIDTH: u16 = 60;

/// Height of the task editor modal.
pub const EDITOR_HEIGHT: u16 = 14;

/// Width of the delete confirmation dialog.
pub const CONFIRM_WIDTH: u16 = 46;

/// Height of the delete confirmation dialog.
pub const CONFIRM_HEIGHT: u16 = 7;

/// Minimum terminal height for useful rendering.
///
/// Below this height, a "terminal too small" message is shown instead. The
/// board needs a lane header, one card and the status line; the editor
/// modal shrinks to fit.
pub const MIN_HEIGHT: u16 = 10;

/// Minimum terminal height for rendering with the header.
///
/// Between `MIN_HEIGHT` and this value the header is hidden to reclaim space.
pub const MIN_HEIGHT_WITH_HEADER: u16 = MIN_HEIGHT + HEADER_HEIGHT;

/// Minimum terminal width for useful rendering.
///
/// Each of the three lanes needs about 12 columns for borders and truncated
/// titles to be readable.
pub const MIN_WIDTH: u16 = 36;
