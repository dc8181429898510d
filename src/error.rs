//! Error types for GlareScope
//!
//! This module provides structured error handling using thiserror. Load
//! failures never propagate as panics; they are captured in app state and
//! rendered as an inline status line.

use thiserror::Error;

/// Failure reported by a capture source.
///
/// An empty capture is not an error: it parses to an empty dataset and is
/// rendered as a distinct "No data" state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The source answered with a denied/absent status code
    #[error("HTTP {0}")]
    HttpStatus(u16),

    /// Transport-level failure with a free-form description
    #[error("{0}")]
    Other(String),
}

impl LoadError {
    /// Get a user-friendly message suitable for the chart status line
    pub fn user_message(&self) -> String {
        format!("Error: {}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = LoadError::HttpStatus(404);
        assert_eq!(err.user_message(), "Error: HTTP 404");
    }

    #[test]
    fn test_transport_message() {
        let err = LoadError::Other("connection reset".to_string());
        assert_eq!(err.user_message(), "Error: connection reset");
    }
}
