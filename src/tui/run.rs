//! TUI entry point and terminal setup.

use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::CrosstermBackend, Terminal};
use tracing::warn;

use crate::fields::DuplicatePolicy;
use crate::tui::app::App;

/// Run `setup`, calling `restore` before returning if it fails.
pub(crate) fn or_restore<T>(setup: impl FnOnce() -> io::Result<T>, restore: impl FnOnce()) -> io::Result<T> {
    setup().inspect_err(|_| restore())
}

/// Best-effort return to cooked mode and the main screen.
fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        warn!(error = %e, "failed to disable raw mode");
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen) {
        warn!(error = %e, "failed to leave alternate screen");
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Initialise and run the terminal user interface until the user quits.
///
/// The terminal is restored before any error from setup or the event loop is
/// returned.
pub fn run_tui(policy: DuplicatePolicy) -> io::Result<()> {
    enable_raw_mode()?;
    let mut terminal = or_restore(setup_terminal, restore_terminal)?;

    let mut app = App::new(policy);
    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_restore_runs_only_on_setup_failure() {
        let restored = Cell::new(false);
        let err = or_restore(
            || Err::<(), _>(io::Error::new(io::ErrorKind::Other, "no tty")),
            || restored.set(true),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "no tty");
        assert!(restored.get());

        let restored = Cell::new(false);
        assert_eq!(or_restore(|| Ok(5), || restored.set(true)).unwrap(), 5);
        assert!(!restored.get());
    }
}
