//! Terminal lifecycle: raw mode, alternate screen and mouse capture.
//!
//! The board owns the whole screen while it runs. [`setup_terminal`] takes
//! it over, [`restore_terminal`] hands it back, and [`install_panic_hook`]
//! makes sure a panic hands it back too.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

/// The terminal type the board draws to.
pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Error type for terminal operations.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    /// The terminal could not be taken over.
    #[error("failed to set up terminal: {0}")]
    Setup(#[source] io::Error),

    /// The terminal could not be handed back.
    #[error("failed to restore terminal: {0}")]
    Restore(#[source] io::Error),
}

/// Enters raw mode and the alternate screen, with mouse capture on.
///
/// If entering the alternate screen fails, raw mode is switched off again
/// before returning.
///
/// # Errors
///
/// Returns [`TerminalError::Setup`] if any terminal operation fails.
///
/// # Examples
///
/// ```no_run
/// use plank_tui::terminal;
///
/// # fn example() -> Result<(), plank_tui::terminal::TerminalError> {
/// let mut terminal = terminal::setup_terminal()?;
/// // draw the board...
/// terminal::restore_terminal(&mut terminal)?;
/// # Ok(())
/// # }
/// ```
pub fn setup_terminal() -> Result<AppTerminal, TerminalError> {
    enable_raw_mode().map_err(TerminalError::Setup)?;

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        let _ = disable_raw_mode();
        return Err(TerminalError::Setup(e));
    }

    Terminal::new(CrosstermBackend::new(stdout)).map_err(TerminalError::Setup)
}

/// Leaves raw mode and the alternate screen and shows the cursor again.
///
/// # Errors
///
/// Returns [`TerminalError::Restore`] if any terminal operation fails.
pub fn restore_terminal(terminal: &mut AppTerminal) -> Result<(), TerminalError> {
    reset(terminal.backend_mut()).map_err(TerminalError::Restore)
}

/// Installs a panic hook that restores the terminal before the panic message
/// is printed.
///
/// The previously installed hook runs after restoration, so call this once,
/// before [`setup_terminal`].
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = reset(&mut io::stdout());
        original_hook(panic_info);
    }));
}

fn reset(out: &mut impl Write) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(out, DisableMouseCapture, LeaveAlternateScreen, Show)
}
