/**
 * Backend Error Types
 *
 * `BackendError` is the single error type returned by HTTP handlers and
 * middleware. Every failure of the chat path is turned into one of its
 * variants at the service boundary, so nothing reaches the transport layer
 * unhandled.
 *
 * # Status Mapping
 *
 * - validation / malformed body - 400 Bad Request
 * - not a channel participant - 401 Unauthorized
 * - persistence failure - 400 Bad Request
 * - missing or invalid session token - 401 Unauthorized
 * - unknown route - 404 Not Found
 */
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::chat::service::ChatError;
use crate::shared::SharedError;

/// Message returned to a non-participant trying to post
pub const NOT_PARTICIPANT_MESSAGE: &str = "only participants of this channel can chat";

/// Message returned when the store fails
pub const PERSISTENCE_MESSAGE: &str = "request could not be completed";

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use axum::http::StatusCode;
/// use channel_chat::backend::error::BackendError;
///
/// let err = BackendError::handler(StatusCode::UNAUTHORIZED, "Missing token");
/// assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status (auth failures, unknown routes)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Request-shape error from the shared validation layer
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Failure reported by the chat core
    #[error(transparent)]
    ChatError(#[from] ChatError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// 401 with the given reason
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    /// 404 for unknown routes
    pub fn not_found() -> Self {
        Self::handler(StatusCode::NOT_FOUND, "Not Found")
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::ChatError(ChatError::NotParticipant { .. }) => StatusCode::UNAUTHORIZED,
            Self::ChatError(ChatError::Persistence(_)) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the client-facing error message
    ///
    /// Persistence details stay in the logs.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::ChatError(ChatError::NotParticipant { .. }) => NOT_PARTICIPANT_MESSAGE.to_string(),
            Self::ChatError(ChatError::Persistence(_)) => PERSISTENCE_MESSAGE.to_string(),
        }
    }
}
