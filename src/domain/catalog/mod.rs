//! Catalog domain - comics, browsing and star ratings.

mod comic;
mod query;
mod rating;

#[cfg(test)]
pub(crate) use comic::fixtures;
pub use comic::{
    dedupe_genres, normalize_slug, slugify, Comic, ComicStatus, NewComic, DEFAULT_SYNOPSIS,
};
pub use query::{
    admin_listing, flatten_genres, matches_search, normalized_needle, popular, tag_list,
    CatalogQuery, CatalogSort, ALL_TAG, POPULAR_LIMIT,
};
pub use rating::{RatingSummary, StarRating};
