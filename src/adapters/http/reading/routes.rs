//! Axum router configuration for reading endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::adapters::http::state::AppState;

use super::handlers::{create_chapter, list_chapters, read_chapter};

/// Reading routes, mounted under `/api`.
pub fn reading_routes() -> Router<AppState> {
    Router::new()
        .route("/comics/:slug/chapters", get(list_chapters))
        .route("/comics/:slug/chapters/:number", get(read_chapter))
        .route("/admin/comics/:slug/chapters", post(create_chapter))
}
