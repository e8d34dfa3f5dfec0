//! Authentication types for the domain layer.
//!
//! An `AuthenticatedUser` is what the session validator extracts from a
//! Supabase access token. Nothing here depends on the token format.

use super::UserId;
use thiserror::Error;

/// Authenticated caller extracted from a validated access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,

    /// Email claim; OAuth accounts without an email carry an empty string.
    pub email: String,

    /// `user_metadata.display_name` when present in the token.
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
        }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Missing, malformed, or badly signed token.
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// 503 rather than 401: the token may still be good.
    pub fn is_outage(&self) -> bool {
        matches!(self, AuthError::ServiceUnavailable(_))
    }
}
