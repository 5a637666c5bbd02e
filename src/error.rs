//! Error types for akinator.

use std::time::Duration;

use thiserror::Error;

/// Main error type for akinator operations.
///
/// The game engines never let these escape their public operations: each one
/// is rendered into a [`Failed`](crate::game::Failed) result. The `try_*`
/// variants of the operations return them as-is.
#[derive(Error, Debug)]
pub enum AkinatorError {
    /// Network failure or unexpected HTTP status.
    #[error("{0}")]
    Transport(String),

    /// The request did not complete within its timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The remote reply is missing fields the game needs.
    #[error("{0}")]
    Protocol(String),

    /// The game id is unknown or its record has expired.
    #[error("Invalid game ID")]
    InvalidSession,

    /// Back-navigation was rejected. The reason is kept for logging only.
    #[error("Unable to go back")]
    Navigation { reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Session store serialization error.
    #[error("store serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,
}

impl AkinatorError {
    /// Whether this error came from the transport layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }

    pub(crate) fn navigation(reason: impl Into<String>) -> Self {
        Self::Navigation {
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for AkinatorError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Convenience Result type for akinator operations.
pub type Result<T> = std::result::Result<T, AkinatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_session_display() {
        assert_eq!(AkinatorError::InvalidSession.to_string(), "Invalid game ID");
    }

    #[test]
    fn test_navigation_hides_reason() {
        let err = AkinatorError::navigation("HTTP status 500");
        assert_eq!(err.to_string(), "Unable to go back");
        assert!(matches!(err, AkinatorError::Navigation { ref reason } if reason == "HTTP status 500"));
    }

    #[test]
    fn test_timeout_display() {
        let err = AkinatorError::Timeout(Duration::from_secs(120));
        assert!(err.to_string().contains("timed out"));
        assert!(err.to_string().contains("120"));
        assert!(err.is_transport());
    }

    #[test]
    fn test_protocol_is_not_transport() {
        let err = AkinatorError::Protocol("missing question".into());
        assert_eq!(err.to_string(), "missing question");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AkinatorError = io_err.into();
        assert!(matches!(err, AkinatorError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }
}
