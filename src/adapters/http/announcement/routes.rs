//! Axum router configuration for announcement endpoints.

use axum::{routing::get, Router};

use crate::adapters::http::state::AppState;

use super::handlers::{admin_list_announcements, create_announcement, list_announcements};

/// Announcement routes, mounted under `/api`.
pub fn announcement_routes() -> Router<AppState> {
    Router::new()
        .route("/announcements", get(list_announcements))
        .route(
            "/admin/announcements",
            get(admin_list_announcements).post(create_announcement),
        )
}
