//! Error responses for the REST API.
//!
//! Domain errors become `{error_code, message}` JSON with a status derived
//! from the error code. Payment routes use their own `{error, detail?}`
//! body, see `premium::handlers`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,

        ErrorCode::ComicNotFound
        | ErrorCode::ChapterNotFound
        | ErrorCode::ProfileNotFound
        | ErrorCode::PaymentNotFound => StatusCode::NOT_FOUND,

        ErrorCode::DuplicateChapter | ErrorCode::DuplicateOrder | ErrorCode::AlreadyPremium => {
            StatusCode::CONFLICT
        }

        ErrorCode::Unauthorized | ErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,

        ErrorCode::AuthProviderError => StatusCode::BAD_REQUEST,
        ErrorCode::StorageError | ErrorCode::PaymentProviderError => StatusCode::BAD_GATEWAY,

        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Wrapper that turns a `DomainError` into a response.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.code);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        // Infrastructure details stay in the logs.
        let message = match self.0.code {
            ErrorCode::DatabaseError | ErrorCode::InternalError => "Internal server error".to_string(),
            _ => self.0.message,
        };
        let mut body = ErrorResponse::new(self.0.code.to_string(), message);
        if !self.0.details.is_empty() {
            body.details = serde_json::to_value(&self.0.details).ok();
        }
        (status, Json(body)).into_response()
    }
}
