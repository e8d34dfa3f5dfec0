//! Payment callback error types with HTTP status mapping.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur while processing a gateway callback.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// `x-callback-token` missing or different from the configured token.
    #[error("Invalid callback token")]
    InvalidToken,

    /// Body is not valid JSON.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),
}

impl WebhookError {
    /// Whether the gateway should retry delivery.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::Database(_))
    }

    /// 4xx stops gateway retries, 5xx asks for one.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::InvalidToken => StatusCode::UNAUTHORIZED,
            WebhookError::ParseError(_) => StatusCode::BAD_REQUEST,
            WebhookError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
