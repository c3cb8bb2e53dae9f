//! API client error types.

use thiserror::Error;

/// Errors raised when talking to the AMEP backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport error (connect, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request was rejected with 401.
    #[error("unauthorized — token missing, invalid, or expired")]
    Unauthorized,

    /// Backend returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Error message or response body.
        message: String,
    },
}

impl ApiError {
    /// Extract a user-presentable message from an API error body.
    ///
    /// The backend reports failures as `{"error": "..."}` (older endpoints
    /// use `"message"`). Returns `None` for transport errors or bodies that
    /// carry no such field, so callers can fall back to a generic message.
    #[must_use]
    pub fn server_message(&self) -> Option<String> {
        let Self::Api { message, .. } = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(message).ok()?;
        value
            .get("error")
            .or_else(|| value.get("message"))
            .and_then(serde_json::Value::as_str)
            .map(String::from)
    }
}
