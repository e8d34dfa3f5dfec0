//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that validates Bearer tokens and records the outcome
//! - `RequireAuth` - Extractor that requires a signed-in reader
//! - `OptionalAuth` - Extractor for optional authentication
//! - `BearerSession` - Extractor for the payment routes and their `{error}` bodies
//! - `RequireAdmin` - Extractor that also checks the caller's profile role
//!
//! # Architecture
//!
//! The middleware never rejects. It stores either the `AuthenticatedUser` or
//! a `SessionFailure` in the request extensions and lets each route's
//! extractor decide what a missing or bad session means there; the catalog
//! stays readable with a stale token.
//!
//! ```text
//! Request → auth_middleware → AuthenticatedUser | SessionFailure | nothing
//!                                      ↓
//!                              Handler → extractor reads from extensions
//! ```

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{ApiError, ErrorResponse};
use crate::adapters::http::state::AppState;
use crate::domain::account::Profile;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// A bearer token was sent but did not validate.
#[derive(Debug, Clone)]
pub struct SessionFailure(pub AuthError);

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authentication middleware that validates Bearer tokens.
///
/// On success the `AuthenticatedUser` is inserted into the request
/// extensions; on failure a `SessionFailure`. Requests without a token pass
/// through untouched.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = bearer_token(request.headers()).map(str::to_owned);
    let outcome = match token {
        Some(token) => Some(validator.validate(&token).await),
        None => None,
    };

    match outcome {
        Some(Ok(user)) => {
            request.extensions_mut().insert(user);
        }
        Some(Err(e)) => {
            if e.is_outage() {
                tracing::error!(error = %e, "Session validation failed");
            } else {
                tracing::debug!(error = %e, "Rejected bearer token");
            }
            request.extensions_mut().insert(SessionFailure(e));
        }
        None => {}
    }

    next.run(request).await
}

/// Extractor that requires authentication.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
                return Ok(RequireAuth(user.clone()));
            }
            match parts.extensions.get::<SessionFailure>() {
                Some(SessionFailure(e)) => Err(AuthRejection::InvalidSession(e.clone())),
                None => Err(AuthRejection::Unauthenticated),
            }
        })
    }
}

/// Extractor for optional authentication.
///
/// `None` for anonymous callers and for callers whose token failed.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user = parts.extensions.get::<AuthenticatedUser>().cloned();
            Ok(OptionalAuth(user))
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No bearer token was provided.
    Unauthenticated,
    /// A token was provided but did not validate.
    InvalidSession(AuthError),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AuthRejection::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Authentication required".to_string())
            }
            AuthRejection::InvalidSession(e) if e.is_outage() => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Authentication service unavailable".to_string(),
            ),
            AuthRejection::InvalidSession(e) => (StatusCode::UNAUTHORIZED, e.to_string()),
        };

        (status, Json(ErrorResponse::new("UNAUTHORIZED", message))).into_response()
    }
}

/// Session extractor for the payment routes.
///
/// Rejects with the `{error}` body the QRIS client expects.
#[derive(Debug, Clone)]
pub struct BearerSession(pub AuthenticatedUser);

/// Rejection for `BearerSession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRejection {
    MissingToken,
    InvalidSession,
}

impl IntoResponse for SessionRejection {
    fn into_response(self) -> Response {
        let message = match self {
            SessionRejection::MissingToken => "Missing Bearer token",
            SessionRejection::InvalidSession => "Invalid session",
        };
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": message })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for BearerSession
where
    S: Send + Sync,
{
    type Rejection = SessionRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
                return Ok(BearerSession(user.clone()));
            }
            if parts.extensions.get::<SessionFailure>().is_some() {
                Err(SessionRejection::InvalidSession)
            } else {
                Err(SessionRejection::MissingToken)
            }
        })
    }
}

/// Extractor for admin-only routes.
///
/// 401 without a valid session, 403 when the caller's profile is missing or
/// not an admin.
#[derive(Debug, Clone)]
pub struct RequireAdmin {
    pub user: AuthenticatedUser,
    pub profile: Profile,
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = Response;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 AppState,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let RequireAuth(user) = RequireAuth::from_request_parts(parts, state)
                .await
                .map_err(IntoResponse::into_response)?;

            let profile = state
                .admin_gate()
                .require_admin(&user.id)
                .await
                .map_err(|e| ApiError(e).into_response())?;

            Ok(RequireAdmin { user, profile })
        })
    }
}
