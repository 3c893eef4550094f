//! Errors raised by persistent state files.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to read or write a state file under `~/.afdview`.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The home directory could not be determined.
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    /// Filesystem error.
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but does not hold valid JSON.
    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::NoHomeDirectory => "STORAGE_NO_HOME",
            StorageError::Io { .. } => "STORAGE_IO",
            StorageError::Json { .. } => "STORAGE_JSON",
        }
    }
}
