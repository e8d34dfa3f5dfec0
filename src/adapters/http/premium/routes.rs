//! Axum router configuration for premium endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{create_payment, payment_webhook, premium_status};

/// Premium routes, mounted under `/api`.
///
/// The webhook carries no bearer token; it is authenticated by the
/// callback token header instead.
pub fn premium_routes() -> Router<AppState> {
    Router::new()
        .route("/payments/create", post(create_payment))
        .route("/payments/webhook", post(payment_webhook))
        .route("/premium", get(premium_status))
}
