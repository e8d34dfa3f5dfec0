//! Request and response bodies for catalog endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::catalog::{ComicDetail, ListComicsResult};
use crate::domain::catalog::{Comic, StarRating};
use crate::domain::reading::Chapter;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// `?q&tag&sort` on the browse page. `sort` is parsed leniently.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListComicsParams {
    pub q: Option<String>,
    pub tag: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PopularParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateComicRequest {
    pub rating: i64,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ComicListResponse {
    pub comics: Vec<Comic>,
    /// `All` followed by every genre in the catalog.
    pub tags: Vec<String>,
}

impl From<ListComicsResult> for ComicListResponse {
    fn from(result: ListComicsResult) -> Self {
        Self {
            comics: result.comics,
            tags: result.tags,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComicDetailResponse {
    pub comic: Comic,
    pub synopsis: String,
    pub chapters: Vec<Chapter>,
    pub total_chapters: i32,
    pub total_volumes: i32,
    pub first_chapter: i32,
    pub latest_chapter: i32,
}

impl From<ComicDetail> for ComicDetailResponse {
    fn from(detail: ComicDetail) -> Self {
        Self {
            comic: detail.comic,
            synopsis: detail.synopsis,
            chapters: detail.chapters,
            total_chapters: detail.total_chapters,
            total_volumes: detail.total_volumes,
            first_chapter: detail.first_chapter,
            latest_chapter: detail.latest_chapter,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenresResponse {
    pub genres: Vec<String>,
}

/// The caller's own rating; `null` when unrated or signed out.
#[derive(Debug, Clone, Serialize)]
pub struct MyRatingResponse {
    pub rating: Option<StarRating>,
}
