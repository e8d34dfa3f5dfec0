//! Top-level router: `/health` plus every `/api` route.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use super::account::account_routes;
use super::announcement::announcement_routes;
use super::catalog::catalog_routes;
use super::middleware::auth_middleware;
use super::premium::premium_routes;
use super::reading::reading_routes;
use super::state::AppState;

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Every `/api` route, before the state is attached.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .merge(reading_routes())
        .merge(account_routes())
        .merge(announcement_routes())
        .merge(premium_routes())
}

/// The application router with auth and body-limit layers applied.
///
/// Transport layers (tracing, CORS, timeouts) are added by the binary.
pub fn app_router(state: AppState) -> Router {
    let auth = middleware::from_fn_with_state(state.session_validator.clone(), auth_middleware);
    let body_limit = DefaultBodyLimit::max(state.settings.max_upload_bytes);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes().layer(auth))
        .layer(body_limit)
        .with_state(state)
}
