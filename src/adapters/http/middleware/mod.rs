//! HTTP middleware for axum.
//!
//! - `auth` - Bearer-token middleware and the session extractors

pub mod auth;

pub use auth::{
    auth_middleware, AuthRejection, AuthState, BearerSession, OptionalAuth, RequireAdmin,
    RequireAuth, SessionFailure, SessionRejection,
};
