//! Terminal management with RAII cleanup.
//!
//! `TerminalManager` puts the terminal into raw mode on the alternate
//! screen and restores it when dropped, whether the viewer exits normally
//! or unwinds from an error.
//!
//! ```no_run
//! use afdview::terminal::{setup_panic_hook, TerminalManager};
//!
//! fn main() -> color_eyre::Result<()> {
//!     setup_panic_hook();
//!     let mut term_manager = TerminalManager::new()?;
//!     let terminal = term_manager.terminal();
//!     // ... draw ...
//!     Ok(())
//! }
//! ```

mod panic;
mod setup;

pub use panic::setup_panic_hook;
pub use setup::{emergency_restore, enter_tui_mode, leave_tui_mode};

use color_eyre::Result;
use crossterm::terminal::enable_raw_mode;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

/// RAII guard that restores terminal state on drop.
pub struct TerminalGuard {
    /// Whether cleanup has already been performed
    cleaned_up: bool,
}

impl TerminalGuard {
    fn new() -> Self {
        Self { cleaned_up: false }
    }

    /// Restore the terminal now. Subsequent calls are no-ops.
    pub fn cleanup(&mut self) {
        if self.cleaned_up {
            return;
        }
        self.cleaned_up = true;
        leave_tui_mode(&mut io::stdout());
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Owns the ratatui terminal and the guard that restores it.
///
/// The panic hook from [`setup_panic_hook`] covers panics; this covers
/// every other exit path.
pub struct TerminalManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    guard: TerminalGuard,
}

impl TerminalManager {
    /// Enable raw mode, enter the alternate screen and clear it.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        // From here on the guard undoes whatever succeeded.
        let guard = TerminalGuard::new();

        let mut stdout = io::stdout();
        enter_tui_mode(&mut stdout)?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        Ok(Self { terminal, guard })
    }

    /// Get a mutable reference to the underlying terminal.
    pub fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }

    /// Restore the terminal before the manager is dropped.
    pub fn restore(&mut self) {
        self.guard.cleanup();
    }
}
