//! Result and error types for Navegar.

use thiserror::Error;

/// Result type for Navegar operations
pub type NavegarResult<T> = Result<T, NavegarError>;

/// Errors that can occur while driving a browser session
#[derive(Debug, Error)]
pub enum NavegarError {
    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Navigation error (page failed to load)
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// URL that failed
        url: String,
        /// Error message
        message: String,
    },

    /// Operation timed out
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Locator did not resolve to exactly one element
    #[error("Locator {locator} matched {matches} element(s), expected exactly 1")]
    ElementNotFound {
        /// Locator that failed to resolve
        locator: String,
        /// Number of elements that matched
        matches: usize,
    },

    /// Element resolved but cannot currently accept the interaction
    #[error("Element {locator} is not interactable: {reason}")]
    ElementNotInteractable {
        /// Locator of the unusable element
        locator: String,
        /// Why the element cannot be used (hidden, disabled, ...)
        reason: String,
    },

    /// Expected-outcome predicate evaluated to false
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Operation attempted on a closed session
    #[error("Session is closed; cannot {operation}")]
    SessionClosed {
        /// Operation that was attempted
        operation: String,
    },

    /// Operation attempted before any page was opened
    #[error("No page loaded; cannot {operation} before open()")]
    NotOpen {
        /// Operation that was attempted
        operation: String,
    },

    /// Page-level error
    #[error("Page error: {message}")]
    Page {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NavegarError {
    /// True for the failure kinds a test case can produce on its own
    /// (as opposed to harness/environment faults).
    #[must_use]
    pub const fn is_case_failure(&self) -> bool {
        matches!(
            self,
            Self::Navigation { .. }
                | Self::Timeout { .. }
                | Self::ElementNotFound { .. }
                | Self::ElementNotInteractable { .. }
                | Self::AssertionFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_not_found_reports_match_count() {
        let err = NavegarError::ElementNotFound {
            locator: "id=submit".to_string(),
            matches: 0,
        };
        assert!(err.to_string().contains("id=submit"));
        assert!(err.to_string().contains("matched 0"));
    }

    #[test]
    fn session_closed_names_operation() {
        let err = NavegarError::SessionClosed {
            operation: "fill".to_string(),
        };
        assert!(err.to_string().contains("closed"));
        assert!(err.to_string().contains("fill"));
    }

    #[test]
    fn case_failure_classification() {
        let assertion = NavegarError::AssertionFailed {
            message: "nope".to_string(),
        };
        assert!(assertion.is_case_failure());

        let lifecycle = NavegarError::SessionClosed {
            operation: "click".to_string(),
        };
        assert!(!lifecycle.is_case_failure());
    }
}
