//! Request and response bodies for reading endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::handlers::reading::ChapterListing;
use crate::domain::reading::VolumeGroup;

/// `?q&order`; `order` is parsed leniently.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChapterListParams {
    pub q: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChapterListResponse {
    pub total_chapters: i32,
    pub volumes: Vec<VolumeGroup>,
}

impl From<ChapterListing> for ChapterListResponse {
    fn from(listing: ChapterListing) -> Self {
        Self {
            total_chapters: listing.total_chapters,
            volumes: listing.volumes,
        }
    }
}

/// Body of `POST /api/admin/comics/:slug/chapters`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChapterRequest {
    pub number: i32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub volume: Option<i32>,
    #[serde(default)]
    pub released_at: Option<DateTime<Utc>>,
    /// Image paths in reading order; bucket-relative or absolute URLs.
    #[serde(default)]
    pub pages: Vec<String>,
}
