//! Panic hook for terminal restoration.

use super::setup::emergency_restore;
use std::panic;

/// Install a panic hook that restores the terminal.
///
/// Call early in `main()`, before creating the `TerminalManager`. The hook
/// leaves the alternate screen first so the original hook's panic message
/// is readable.
pub fn setup_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        emergency_restore();
        original_hook(panic_info);
    }));
}
