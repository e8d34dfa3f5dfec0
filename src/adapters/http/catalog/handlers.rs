//! HTTP handlers for catalog endpoints.

use axum::extract::{Json, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::{ApiError, ErrorResponse};
use crate::adapters::http::extract::{lenient_enum, MultipartForm};
use crate::adapters::http::middleware::{OptionalAuth, RequireAdmin};
use crate::adapters::http::state::AppState;
use crate::application::handlers::catalog::{
    AdminListComicsQuery, CreateComicCommand, GetComicByIdQuery, GetComicDetailQuery,
    GetMyRatingQuery, ListComicsQuery, PopularComicsQuery, RateComicCommand,
};
use crate::domain::foundation::{ComicId, DomainError};

use super::dto::{
    ComicDetailResponse, ComicListResponse, GenresResponse, ListComicsParams, MyRatingResponse,
    PopularParams, RateComicRequest, SearchParams,
};

// ════════════════════════════════════════════════════════════════════════════════
// Public Queries
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/comics
pub async fn list_comics(
    State(state): State<AppState>,
    Query(params): Query<ListComicsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ListComicsQuery {
        search: params.q,
        tag: params.tag,
        sort: lenient_enum(params.sort.as_deref()),
    };
    let result = state.list_comics_handler().handle(query).await?;
    Ok(Json(ComicListResponse::from(result)))
}

/// GET /api/comics/popular
pub async fn popular_comics(
    State(state): State<AppState>,
    Query(params): Query<PopularParams>,
) -> Result<impl IntoResponse, ApiError> {
    let comics = state
        .popular_comics_handler()
        .handle(PopularComicsQuery { limit: params.limit })
        .await?;
    Ok(Json(comics))
}

/// GET /api/comics/:slug
pub async fn get_comic_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state
        .comic_detail_handler()
        .handle(GetComicDetailQuery { slug })
        .await?;
    Ok(Json(ComicDetailResponse::from(detail)))
}

/// GET /api/books/:id
pub async fn get_comic_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let comic_id = parse_comic_id(&id)?;
    let comic = state
        .comic_by_id_handler()
        .handle(GetComicByIdQuery { comic_id })
        .await?;
    Ok(Json(comic))
}

/// GET /api/genres
pub async fn list_genres(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let genres = state.list_genres_handler().handle().await?;
    Ok(Json(GenresResponse { genres }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Ratings
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/comics/:id/rating
///
/// Signed-out readers get `{rating: null}` so the widget renders empty.
pub async fn get_my_rating(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let comic_id = parse_comic_id(&id)?;
    let Some(user) = user else {
        return Ok(Json(MyRatingResponse { rating: None }));
    };

    let rating = state
        .my_rating_handler()
        .handle(GetMyRatingQuery {
            user_id: user.id,
            comic_id,
        })
        .await?;
    Ok(Json(MyRatingResponse { rating }))
}

/// PUT /api/comics/:id/rating
pub async fn rate_comic(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<String>,
    Json(request): Json<RateComicRequest>,
) -> Result<impl IntoResponse, axum::response::Response> {
    let Some(user) = user else {
        let body = ErrorResponse::new("UNAUTHORIZED", "Log in to rate this comic.");
        return Err((StatusCode::UNAUTHORIZED, Json(body)).into_response());
    };
    let comic_id = parse_comic_id(&id).map_err(IntoResponse::into_response)?;

    let result = state
        .rate_comic_handler()
        .handle(RateComicCommand {
            user_id: user.id,
            comic_id,
            rating: request.rating,
        })
        .await
        .map_err(|e| ApiError(e).into_response())?;
    Ok(Json(result))
}

// ════════════════════════════════════════════════════════════════════════════════
// Admin
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/comics
pub async fn admin_list_comics(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse, ApiError> {
    let comics = state
        .admin_list_comics_handler()
        .handle(AdminListComicsQuery { search: params.q })
        .await?;
    Ok(Json(comics))
}

/// POST /api/admin/comics (multipart)
///
/// Fields: `title`, `description`, `author`, `last_chapter` (or `chapter`),
/// `genres` (repeated and/or comma-separated) and the `cover` file.
pub async fn create_comic(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut form = MultipartForm::read(multipart).await?;
    let cmd = CreateComicCommand {
        title: form.text("title").unwrap_or_default().to_string(),
        description: form.text("description").map(str::to_string),
        author: form.text("author").map(str::to_string),
        last_chapter: parse_last_chapter(&form)?,
        genres: form
            .texts("genres")
            .flat_map(|v| v.split(','))
            .map(str::to_string)
            .collect(),
        cover: form.take_file("cover"),
    };

    let comic = state.create_comic_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(comic)))
}

fn parse_comic_id(raw: &str) -> Result<ComicId, ApiError> {
    raw.parse::<ComicId>()
        .map_err(|e| ApiError(DomainError::from(e)))
}

fn parse_last_chapter(form: &MultipartForm) -> Result<i32, DomainError> {
    let raw = form
        .text("last_chapter")
        .or_else(|| form.text("chapter"))
        .map(str::trim)
        .filter(|v| !v.is_empty());
    match raw {
        None => Ok(0),
        Some(v) => v.parse::<i32>().ok().filter(|n| *n >= 0).ok_or_else(|| {
            DomainError::validation("last_chapter", "Chapter count must be a whole number")
        }),
    }
}
