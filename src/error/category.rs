//! Error category classification.
//!
//! Categories drive retry decisions and the hint shown next to an error.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS or timeout problems. Retryable.
    Network,

    /// The NWS API answered with a 5xx status. Retryable after a delay.
    Server,

    /// The requested product does not exist right now.
    Unavailable,

    /// Malformed data or an unexpected response shape.
    Client,

    /// Filesystem and other OS errors.
    System,

    /// Invalid configuration or command-line input.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Unavailable => "unavailable",
            ErrorCategory::Client => "client",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Server => {
                "The weather service may be experiencing issues. Please try again later"
            }
            ErrorCategory::Unavailable => "Try again later or pick another office",
            ErrorCategory::Client => "The product could not be read. Please report this if it persists",
            ErrorCategory::System => "Check file permissions and available disk space",
            ErrorCategory::Configuration => "Check ~/.afdview/config.json and the command-line flags",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Unavailable.is_retryable());
        assert!(!ErrorCategory::Client.is_retryable());
        assert!(!ErrorCategory::System.is_retryable());
        assert!(!ErrorCategory::Configuration.is_retryable());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", ErrorCategory::Network), "network");
        assert_eq!(format!("{}", ErrorCategory::Unavailable), "unavailable");
    }

    #[test]
    fn test_category_recovery_hint() {
        assert!(ErrorCategory::Network.recovery_hint().contains("internet"));
        assert!(ErrorCategory::Configuration.recovery_hint().contains("config.json"));
    }
}
