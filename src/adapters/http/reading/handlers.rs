//! HTTP handlers for reading endpoints.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::extract::lenient_enum;
use crate::adapters::http::middleware::RequireAdmin;
use crate::adapters::http::state::AppState;
use crate::application::handlers::reading::{
    CreateChapterCommand, ListChaptersQuery, ReadChapterQuery,
};
use crate::domain::foundation::Timestamp;

use super::dto::{ChapterListParams, ChapterListResponse, CreateChapterRequest};

/// GET /api/comics/:slug/chapters
pub async fn list_chapters(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<ChapterListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListChaptersQuery {
        slug,
        search: params.q,
        order: lenient_enum(params.order.as_deref()),
    };
    let listing = state.list_chapters_handler().handle(query).await?;
    Ok(Json(ChapterListResponse::from(listing)))
}

/// GET /api/comics/:slug/chapters/:number
///
/// The number stays a raw string so any malformed value is a plain 404.
pub async fn read_chapter(
    State(state): State<AppState>,
    Path((slug, number)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let reader = state
        .read_chapter_handler()
        .handle(ReadChapterQuery { slug, number })
        .await?;
    Ok(Json(reader))
}

/// POST /api/admin/comics/:slug/chapters
pub async fn create_chapter(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(slug): Path<String>,
    Json(request): Json<CreateChapterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateChapterCommand {
        slug,
        number: request.number,
        title: request.title,
        volume: request.volume,
        released_at: request.released_at.map(Timestamp::from_datetime),
        pages: request.pages,
    };

    let chapter = state.create_chapter_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(chapter)))
}
