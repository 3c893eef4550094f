//! Log setup.
//!
//! The viewer owns the terminal, so logs go to `~/.afdview/afdview.log`.
//! Filtering follows `AFDVIEW_LOG` (an `EnvFilter` directive string) and
//! defaults to `afdview=info`. Failing to set up logging never stops the
//! program; it just runs without logs.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::data_dir;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "AFDVIEW_LOG";

/// Filter used when `AFDVIEW_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "afdview=info";

/// Log file name inside the data directory.
const LOG_FILE: &str = "afdview.log";

/// Build the log filter from the environment.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing to the default log file.
///
/// Returns the log file path when logging is active.
pub fn init() -> Option<PathBuf> {
    let path = data_dir().ok()?.join(LOG_FILE);
    init_at(&path).then_some(path)
}

/// Install the global subscriber writing to `path`.
///
/// Returns `false` if the file cannot be opened or a subscriber is already
/// installed.
pub fn init_at(path: &Path) -> bool {
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return false;
        }
    }
    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok();
    if installed {
        tracing::info!(path = %path.display(), version = env!("CARGO_PKG_VERSION"), "logging initialized");
    }
    installed
}
