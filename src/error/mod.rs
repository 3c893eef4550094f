//! Error handling for afdview.
//!
//! - **Error Categories**: high-level classification for retry decisions
//! - **Domain errors**: [`SourceError`] for loading, [`StorageError`] for state files
//! - **Unified type**: [`AfdError`] and the [`AfdResult`] alias
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, DNS, timeout | Yes |
//! | Server | NWS API 5xx | Yes |
//! | Unavailable | No product for the office | No |
//! | Client | Undecodable product | No |
//! | System | Filesystem errors | No |
//! | Configuration | Bad config or flags | No |

mod category;
mod source;
mod storage;

pub use category::ErrorCategory;
pub use source::SourceError;
pub use storage::StorageError;

use thiserror::Error;

use crate::traits::HttpError;

/// Type alias for Results using AfdError.
pub type AfdResult<T> = Result<T, AfdError>;

/// Unified error type for afdview.
#[derive(Debug, Error)]
pub enum AfdError {
    /// Loading a discussion failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Reading or writing a state file failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Invalid configuration or arguments.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal I/O failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

impl AfdError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            AfdError::Source(err) => match err {
                SourceError::Http(http) => match http {
                    HttpError::ServerError { status, .. } if *status >= 500 => {
                        ErrorCategory::Server
                    }
                    _ => ErrorCategory::Network,
                },
                SourceError::Status { status, .. } if *status >= 500 => ErrorCategory::Server,
                _ if err.is_not_available() => ErrorCategory::Unavailable,
                SourceError::File { .. } => ErrorCategory::System,
                _ => ErrorCategory::Client,
            },
            AfdError::Storage(_) | AfdError::Terminal(_) => ErrorCategory::System,
            AfdError::Config(_) => ErrorCategory::Configuration,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        format!("{}\n{}", self, self.category().recovery_hint())
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AfdError::Source(err) => err.error_code(),
            AfdError::Storage(err) => err.error_code(),
            AfdError::Config(_) => "CONFIG",
            AfdError::Terminal(_) => "TERMINAL_IO",
        }
    }
}
