//! Comic aggregate and the values needed to create one.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ComicId, Timestamp, ValidationError};

/// Fallback synopsis when a comic has neither a description nor a note.
pub const DEFAULT_SYNOPSIS: &str = "No synopsis yet.";

/// Publication status shown as a badge on the detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComicStatus {
    Ongoing,
    Completed,
}

impl ComicStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComicStatus::Ongoing => "Ongoing",
            ComicStatus::Completed => "Completed",
        }
    }

    /// Case-insensitive parse; unknown values are treated as absent.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ongoing" => Some(ComicStatus::Ongoing),
            "completed" => Some(ComicStatus::Completed),
            _ => None,
        }
    }
}

/// A comic as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comic {
    pub id: ComicId,
    pub title: String,
    pub slug: String,
    pub cover_url: Option<String>,
    pub description: Option<String>,
    /// Short "what's new" blurb shown on cards.
    pub note: Option<String>,
    pub author: Option<String>,
    pub genres: Vec<String>,
    pub status: Option<ComicStatus>,
    /// Average star rating, absent until someone rates.
    pub rating: Option<f64>,
    pub rating_count: i64,
    pub views: i64,
    /// Chapter count used when no chapter rows exist.
    pub last_chapter: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Comic {
    /// Slug lookup is trimmed and case-insensitive.
    pub fn matches_slug(&self, slug: &str) -> bool {
        normalize_slug(&self.slug) == normalize_slug(slug)
    }

    /// Description, then note, then [`DEFAULT_SYNOPSIS`].
    pub fn synopsis(&self) -> String {
        [self.description.as_deref(), self.note.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SYNOPSIS)
            .to_string()
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

pub fn normalize_slug(slug: &str) -> String {
    slug.trim().to_lowercase()
}

/// Derives a URL slug from a title: lowercase ASCII alphanumerics with any
/// other run of characters collapsed to a single `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Validated input for inserting a comic.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComic {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub last_chapter: i32,
    pub genres: Vec<String>,
    pub cover_url: String,
}

impl NewComic {
    /// Trims text fields, drops blank optionals and de-duplicates genres.
    pub fn new(
        title: &str,
        description: Option<&str>,
        author: Option<&str>,
        last_chapter: i32,
        genres: &[String],
        cover_url: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if last_chapter < 0 {
            return Err(ValidationError::out_of_range(
                "chapter",
                0,
                i32::MAX as i64,
                last_chapter as i64,
            ));
        }
        let slug = slugify(title);
        if slug.is_empty() {
            return Err(ValidationError::invalid_format(
                "title",
                "must contain at least one letter or digit",
            ));
        }
        Ok(Self {
            title: title.to_string(),
            slug,
            description: non_blank(description),
            author: non_blank(author),
            last_chapter,
            genres: dedupe_genres(genres),
            cover_url: cover_url.into(),
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Trimmed, non-blank genres in first-seen order.
pub fn dedupe_genres(genres: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(genres.len());
    for genre in genres.iter().map(|g| g.trim()).filter(|g| !g.is_empty()) {
        if !out.iter().any(|g| g == genre) {
            out.push(genre.to_string());
        }
    }
    out
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::{TimeZone, Utc};

    /// A comic with sensible defaults; tests override what they need.
    pub fn comic(id: i64, title: &str) -> Comic {
        let at = Timestamp::from_datetime(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        Comic {
            id: ComicId::from_db(id),
            title: title.to_string(),
            slug: slugify(title),
            cover_url: None,
            description: None,
            note: None,
            author: None,
            genres: Vec::new(),
            status: None,
            rating: None,
            rating_count: 0,
            views: 0,
            last_chapter: 0,
            created_at: at,
            updated_at: at,
        }
    }
}
