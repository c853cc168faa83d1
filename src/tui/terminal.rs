//! Terminal setup and teardown utilities.

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{PumpwatchError, Result};

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initializes the terminal for TUI rendering.
///
/// Enables raw mode and bracketed paste, switches to the alternate screen
/// buffer, and installs a panic hook that restores the terminal before the
/// panic is reported.
///
/// # Errors
///
/// Returns an error if stdout is not a TTY or terminal initialization fails.
pub fn setup_terminal() -> Result<Tui> {
    if !io::stdout().is_terminal() {
        return Err(PumpwatchError::Io(
            "the tracker requires an interactive terminal (TTY)".to_string(),
        ));
    }

    enable_raw_mode().map_err(|e| PumpwatchError::Io(format!("failed to enable raw mode: {e}")))?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste).map_err(|e| {
        let _ = disable_raw_mode();
        PumpwatchError::Io(format!("failed to enter alternate screen: {e}"))
    })?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| {
        let _ = disable_raw_mode();
        PumpwatchError::Io(format!("failed to create terminal: {e}"))
    })?;

    install_panic_hook();

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// # Errors
///
/// Returns an error if terminal restoration fails.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(|e| PumpwatchError::Io(e.to_string()))?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )
        .map_err(|e| PumpwatchError::Io(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| PumpwatchError::Io(e.to_string()))?;
    Ok(())
}

/// Leaves raw mode and the alternate screen before the default panic
/// output is printed.
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        previous(info);
    }));
}
