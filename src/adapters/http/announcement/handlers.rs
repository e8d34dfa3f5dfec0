//! HTTP handlers for announcement endpoints.

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAdmin;
use crate::adapters::http::state::AppState;
use crate::application::handlers::announcement::{
    CreateAnnouncementCommand, ListAnnouncementsQuery,
};

use super::dto::{AnnouncementParams, AnnouncementResponse, CreateAnnouncementRequest};

/// GET /api/announcements
pub async fn list_announcements(
    State(state): State<AppState>,
    Query(params): Query<AnnouncementParams>,
) -> Result<impl IntoResponse, ApiError> {
    let announcements = state
        .list_announcements_handler()
        .handle(ListAnnouncementsQuery { search: params.q })
        .await?;
    let body: Vec<AnnouncementResponse> = announcements.into_iter().map(Into::into).collect();
    Ok(Json(body))
}

/// GET /api/admin/announcements
pub async fn admin_list_announcements(
    state: State<AppState>,
    _admin: RequireAdmin,
    params: Query<AnnouncementParams>,
) -> Result<impl IntoResponse, ApiError> {
    list_announcements(state, params).await
}

/// POST /api/admin/announcements
pub async fn create_announcement(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(request): Json<CreateAnnouncementRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let announcement = state
        .create_announcement_handler()
        .handle(CreateAnnouncementCommand {
            title: request.title,
            content: request.content,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(AnnouncementResponse::from(announcement))))
}
