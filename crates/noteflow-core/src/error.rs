//! Error types for the NoteFlow client core.

use thiserror::Error;

/// Result type alias using the NoteFlow Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// HTTP status code treated as the "unauthorized" class.
pub const UNAUTHORIZED_STATUS: u16 = 401;

/// Core error type for NoteFlow client operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The remote API rejected the credential (HTTP 401 class).
    ///
    /// Carries the status so the session guard can distinguish the
    /// unauthorized class from other API failures without re-parsing.
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// The remote API returned a non-auth failure status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP/network request failed before a status was produced.
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (bad URL, missing env var).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error belongs to the unauthorized (401) class.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Error::Unauthorized { status, .. } if *status == UNAUTHORIZED_STATUS
        )
    }

    /// The HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Unauthorized { status, .. } | Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Build the appropriate variant for a failed HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        if status == UNAUTHORIZED_STATUS {
            Error::Unauthorized {
                status,
                message: message.into(),
            }
        } else {
            Error::Api {
                status,
                message: message.into(),
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_unauthorized() {
        let err = Error::Unauthorized {
            status: 401,
            message: "token expired".to_string(),
        };
        assert_eq!(err.to_string(), "Unauthorized (401): token expired");
    }

    #[test]
    fn test_error_display_api() {
        let err = Error::Api {
            status: 500,
            message: "internal".to_string(),
        };
        assert_eq!(err.to_string(), "API error (500): internal");
    }

    #[test]
    fn test_error_display_request() {
        let err = Error::Request("network unreachable".to_string());
        assert_eq!(err.to_string(), "Request error: network unreachable");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing base URL".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing base URL");
    }

    #[test]
    fn test_is_unauthorized_true_for_401() {
        let err = Error::from_status(401, "expired");
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_is_unauthorized_false_for_other_statuses() {
        assert!(!Error::from_status(403, "forbidden").is_unauthorized());
        assert!(!Error::from_status(500, "boom").is_unauthorized());
        assert!(!Error::Request("dns".to_string()).is_unauthorized());
    }

    #[test]
    fn test_from_status_maps_401_to_unauthorized() {
        let err = Error::from_status(401, "expired");
        assert!(matches!(err, Error::Unauthorized { status: 401, .. }));
    }

    #[test]
    fn test_from_status_maps_other_to_api() {
        let err = Error::from_status(404, "missing");
        assert!(matches!(err, Error::Api { status: 404, .. }));
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(Error::from_status(401, "").status(), Some(401));
        assert_eq!(Error::from_status(503, "").status(), Some(503));
        assert_eq!(Error::Internal("x".to_string()).status(), None);
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

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(get_result().unwrap(), 42);
    }
}
