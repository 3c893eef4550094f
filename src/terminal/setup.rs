//! Terminal setup and teardown functions.
//!
//! Low-level helpers used by `TerminalManager` and the panic hook.

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Enter TUI mode: alternate screen with a hidden cursor.
///
/// Raw mode is enabled separately by the caller.
///
/// # Errors
///
/// Returns an error if any terminal commands fail.
pub fn enter_tui_mode<W: Write>(writer: &mut W) -> io::Result<()> {
    execute!(writer, EnterAlternateScreen, Hide)
}

/// Leave TUI mode and restore terminal to normal state.
///
/// Disables raw mode, leaves the alternate screen and shows the cursor.
/// Safe to call more than once; errors are ignored.
pub fn leave_tui_mode<W: Write>(writer: &mut W) {
    let _ = disable_raw_mode();
    let _ = execute!(writer, LeaveAlternateScreen, Show);
    let _ = writer.flush();
}

/// Restore terminal to a usable state after a panic or error.
pub fn emergency_restore() {
    leave_tui_mode(&mut io::stdout());
}
