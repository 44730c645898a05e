//! Error types for the sift client core.

use thiserror::Error;

/// Result type alias using sift's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for sift client operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP/network request failed before a response was produced
    #[error("Request error: {0}")]
    Request(String),

    /// The backend answered with an error status; the message is the
    /// backend's own text (e.g. an invalid-regex complaint) and is shown
    /// to the user verbatim
    #[error("Backend error: {0}")]
    Backend(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Authentication failed
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_request() {
        let err = Error::Request("connection refused".to_string());
        assert_eq!(err.to_string(), "Request error: connection refused");
    }

    #[test]
    fn test_error_display_backend() {
        let err = Error::Backend("fts5: syntax error".to_string());
        assert_eq!(err.to_string(), "Backend error: fts5: syntax error");
    }

    #[test]
    fn test_error_display_serialization() {
        let err = Error::Serialization("invalid JSON".to_string());
        assert_eq!(err.to_string(), "Serialization error: invalid JSON");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("empty keyword".to_string());
        assert_eq!(err.to_string(), "Invalid input: empty keyword");
    }

    #[test]
    fn test_error_display_unauthorized() {
        let err = Error::Unauthorized("bad credentials".to_string());
        assert_eq!(err.to_string(), "Unauthorized: bad credentials");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
