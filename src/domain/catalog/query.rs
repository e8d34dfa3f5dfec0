//! Catalog browsing: search, genre filter, sort orders and derived lists.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::comic::Comic;

/// Tag that disables genre filtering.
pub const ALL_TAG: &str = "All";

/// Number of comics in the "popular" strip.
pub const POPULAR_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSort {
    /// Most viewed first
    #[default]
    Popular,
    /// Most recently updated first
    Newest,
    /// Highest rated first, unrated counts as 0
    Rating,
    /// Title A to Z
    Az,
}

/// Browse request over the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub sort: CatalogSort,
}

impl CatalogQuery {
    /// Filters and sorts `comics`. Sorting is stable, so ties keep the
    /// repository order.
    pub fn apply(&self, comics: Vec<Comic>) -> Vec<Comic> {
        let needle = normalized_needle(self.search.as_deref());
        let tag = self
            .tag
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty() && *t != ALL_TAG);

        let mut out: Vec<Comic> = comics
            .into_iter()
            .filter(|c| needle.as_deref().map_or(true, |n| matches_search(c, n)))
            .filter(|c| tag.map_or(true, |t| c.has_genre(t)))
            .collect();

        match self.sort {
            CatalogSort::Popular => out.sort_by(|a, b| b.views.cmp(&a.views)),
            CatalogSort::Newest => out.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
            CatalogSort::Rating => out.sort_by(|a, b| {
                let (ra, rb) = (a.rating.unwrap_or(0.0), b.rating.unwrap_or(0.0));
                rb.partial_cmp(&ra).unwrap_or(Ordering::Equal)
            }),
            CatalogSort::Az => out.sort_by_key(|c| c.title.to_lowercase()),
        }
        out
    }
}

/// Trimmed, lowercased search text; blank means no search.
pub fn normalized_needle(search: Option<&str>) -> Option<String> {
    search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

/// Title, author or any genre contains `needle` (already lowercased).
pub fn matches_search(comic: &Comic, needle: &str) -> bool {
    comic.title.to_lowercase().contains(needle)
        || comic
            .author
            .as_deref()
            .is_some_and(|a| a.to_lowercase().contains(needle))
        || comic.genres.iter().any(|g| g.to_lowercase().contains(needle))
}

/// `"All"` followed by every distinct genre, sorted case-insensitively.
pub fn tag_list(comics: &[Comic]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for genre in comics.iter().flat_map(|c| c.genres.iter()) {
        if !tags.contains(genre) {
            tags.push(genre.clone());
        }
    }
    tags.sort_by_key(|t| t.to_lowercase());
    std::iter::once(ALL_TAG.to_string()).chain(tags).collect()
}

/// Most viewed comics, newer first on equal views.
pub fn popular(mut comics: Vec<Comic>, limit: usize) -> Vec<Comic> {
    comics.sort_by(|a, b| {
        b.views
            .cmp(&a.views)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    comics.truncate(limit);
    comics
}

/// Admin listing: newest created first, optional search.
pub fn admin_listing(mut comics: Vec<Comic>, search: Option<&str>) -> Vec<Comic> {
    comics.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    match normalized_needle(search) {
        Some(needle) => comics
            .into_iter()
            .filter(|c| matches_search(c, &needle))
            .collect(),
        None => comics,
    }
}

/// Flattens genre rows (each a list of names) keeping first-seen order.
pub fn flatten_genres(rows: Vec<Vec<String>>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in rows.into_iter().flatten() {
        let name = name.trim();
        if !name.is_empty() && !out.iter().any(|g| g == name) {
            out.push(name.to_string());
        }
    }
    out
}
