//! Error category classification.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection refused, reset, DNS. Generally transient.
    Network,

    /// The backend answered with a failure (HTTP 5xx, `FAILED` command
    /// reply, rejected config write).
    Server,

    /// The backend answered but the payload was not what we expected.
    Data,

    /// A series could not be turned into a drawable chart.
    Rendering,

    /// Invalid settings or command-line arguments.
    Configuration,

    /// Local OS errors (terminal, scratch files, editor process).
    System,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Data => "data",
            ErrorCategory::Rendering => "rendering",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::System => "system",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check that the dashboard backend is reachable",
            ErrorCategory::Server => "Check the backend and sensor logs, then retry",
            ErrorCategory::Data => "The backend returned unexpected data",
            ErrorCategory::Rendering => "The chart data could not be drawn",
            ErrorCategory::Configuration => "Check the command-line arguments and SURIMON_* variables",
            ErrorCategory::System => "Check file permissions and the $EDITOR setting",
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
        assert!(!ErrorCategory::Data.is_retryable());
        assert!(!ErrorCategory::Rendering.is_retryable());
        assert!(!ErrorCategory::Configuration.is_retryable());
        assert!(!ErrorCategory::System.is_retryable());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::Network.to_string(), "network");
        assert_eq!(ErrorCategory::Rendering.to_string(), "rendering");
    }
}
