//! Error normalization for remote calls.

use thiserror::Error;

/// Error type for API operations.
///
/// Every failure mode of a remote call collapses into one of these
/// variants; callers never see a raw HTTP response.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("server returned status {status}")]
    Remote {
        /// HTTP status code of the response.
        status: u16,
        /// Message extracted from the response body, if the server sent one.
        message: Option<String>,
    },

    /// The request never produced a response (connection, TLS, body decode).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// An authenticated endpoint was called without a credential.
    #[error("no credential available")]
    Unauthenticated,
}

impl ApiError {
    /// The server-provided message, when the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Remote { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// HTTP status of a remote rejection, if this was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;

/// Extract a human-readable message from an error response body.
///
/// The backend usually answers `{"message": "..."}`, occasionally
/// `{"error": "..."}`; anything else yields None.
pub(crate) fn extract_server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    for key in ["message", "error"] {
        if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
            if !message.is_empty() {
                return Some(message.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_key() {
        let body = r#"{"message": "incorrect email or password"}"#;
        assert_eq!(
            extract_server_message(body),
            Some("incorrect email or password".to_string())
        );
    }

    #[test]
    fn test_extract_error_key() {
        let body = r#"{"error": "token expired"}"#;
        assert_eq!(extract_server_message(body), Some("token expired".to_string()));
    }

    #[test]
    fn test_message_key_takes_precedence() {
        let body = r#"{"error": "secondary", "message": "primary"}"#;
        assert_eq!(extract_server_message(body), Some("primary".to_string()));
    }

    #[test]
    fn test_extract_ignores_non_string_and_empty() {
        assert_eq!(extract_server_message(r#"{"message": 42}"#), None);
        assert_eq!(extract_server_message(r#"{"message": ""}"#), None);
        assert_eq!(extract_server_message("not json"), None);
        assert_eq!(extract_server_message(r#"{"detail": "nope"}"#), None);
    }

    #[test]
    fn test_server_message_accessor() {
        let err = ApiError::Remote {
            status: 401,
            message: Some("token expired".to_string()),
        };
        assert_eq!(err.server_message(), Some("token expired"));
        assert_eq!(err.status(), Some(401));

        let bare = ApiError::Remote {
            status: 500,
            message: None,
        };
        assert_eq!(bare.server_message(), None);

        assert_eq!(ApiError::Unauthenticated.server_message(), None);
        assert_eq!(ApiError::Unauthenticated.status(), None);
    }
}
