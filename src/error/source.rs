//! Errors raised while loading a discussion.

use std::path::PathBuf;

use thiserror::Error;

use crate::traits::HttpError;

/// Failure to load a discussion from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport-level failure.
    #[error("Request failed: {0}")]
    Http(#[from] HttpError),

    /// The API answered with a non-success status.
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The office has no discussion product.
    #[error("No discussion available for {office}")]
    NotAvailable { office: String },

    /// The response or file could not be decoded.
    #[error("Invalid product data: {0}")]
    Decode(String),

    /// A local file could not be read.
    #[error("Failed to read {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SourceError::Http(_) => "SOURCE_HTTP",
            SourceError::Status { .. } => "SOURCE_STATUS",
            SourceError::NotAvailable { .. } => "SOURCE_NOT_AVAILABLE",
            SourceError::Decode(_) => "SOURCE_DECODE",
            SourceError::File { .. } => "SOURCE_FILE",
        }
    }

    /// Whether the failure means "no product" rather than "load failed".
    pub fn is_not_available(&self) -> bool {
        matches!(
            self,
            SourceError::NotAvailable { .. } | SourceError::Status { status: 404, .. }
        )
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Decode(err.to_string())
    }
}
