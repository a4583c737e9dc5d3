/*
[INPUT]:  Error sources (HTTP, API, serialization, auth, session)
[OUTPUT]: Structured error types with user-facing messages and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Shown when the backend gives us nothing better to display.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Main error type for the TaskSmart client
#[derive(Error, Debug)]
pub enum TaskSmartError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (code {code}): {message}")]
    Api { code: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// No session, or the session token is past its expiry
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// Requested resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Input rejected before reaching the server
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TaskSmartError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            TaskSmartError::Http(_) | TaskSmartError::InvalidResponse(_) => true,
            TaskSmartError::Api { code, .. } => *code >= 500 || *code == 429,
            _ => false,
        }
    }

    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            TaskSmartError::Authentication { .. } | TaskSmartError::SessionExpired
        )
    }

    /// Message suitable for showing to the user.
    ///
    /// API errors carry the backend's own wording; everything else falls back
    /// to a generic sentence.
    pub fn user_message(&self) -> String {
        match self {
            TaskSmartError::Api { message, .. } if !message.is_empty() => message.clone(),
            TaskSmartError::Authentication { message } if !message.is_empty() => message.clone(),
            TaskSmartError::Validation(message) => message.clone(),
            TaskSmartError::SessionExpired => "Your session has expired. Please log in again.".to_string(),
            TaskSmartError::NotFound(message) if !message.is_empty() => message.clone(),
            TaskSmartError::Http(err) if err.is_connect() || err.is_timeout() => {
                "Unable to reach the TaskSmart server.".to_string()
            }
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// Create an error from a non-success status and optional body message
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED => TaskSmartError::Authentication { message },
            StatusCode::NOT_FOUND => TaskSmartError::NotFound(message),
            _ => TaskSmartError::Api {
                code: status.as_u16(),
                message,
            },
        }
    }
}

/// Result type alias for TaskSmart operations
pub type Result<T> = std::result::Result<T, TaskSmartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let server_err = TaskSmartError::Api {
            code: 503,
            message: "down".to_string(),
        };
        assert!(server_err.is_retryable());

        let bad_request = TaskSmartError::Api {
            code: 400,
            message: "Title is required".to_string(),
        };
        assert!(!bad_request.is_retryable());
        assert!(!TaskSmartError::SessionExpired.is_retryable());
    }

    #[test]
    fn test_error_is_auth_error() {
        assert!(TaskSmartError::SessionExpired.is_auth_error());
        assert!(
            TaskSmartError::Authentication {
                message: String::new()
            }
            .is_auth_error()
        );
        assert!(!TaskSmartError::NotFound("t-1".to_string()).is_auth_error());
    }

    #[test]
    fn test_from_status_maps_variants() {
        match TaskSmartError::from_status(StatusCode::UNAUTHORIZED, Some("bad token".to_string())) {
            TaskSmartError::Authentication { message } => assert_eq!(message, "bad token"),
            other => panic!("unexpected error: {other:?}"),
        }

        match TaskSmartError::from_status(StatusCode::CONFLICT, Some("Email taken".to_string())) {
            TaskSmartError::Api { code, message } => {
                assert_eq!(code, 409);
                assert_eq!(message, "Email taken");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_user_message_falls_back_to_generic() {
        let err = TaskSmartError::from_status(StatusCode::BAD_REQUEST, None);
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);

        let err = TaskSmartError::Api {
            code: 400,
            message: "Password too short".to_string(),
        };
        assert_eq!(err.user_message(), "Password too short");

        let err = TaskSmartError::InvalidResponse("garbled".to_string());
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_not_found_keeps_body_message() {
        let err = TaskSmartError::from_status(
            StatusCode::NOT_FOUND,
            Some("Guest user not found".to_string()),
        );
        assert_eq!(err.user_message(), "Guest user not found");

        let err = TaskSmartError::from_status(StatusCode::NOT_FOUND, None);
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }
}
