//! Comic repository port.
//!
//! The catalog is small enough that browsing loads every comic and filters
//! in memory; writes are single-row statements.

use async_trait::async_trait;

use crate::domain::catalog::{Comic, NewComic};
use crate::domain::foundation::{ComicId, DomainError};

#[async_trait]
pub trait ComicRepository: Send + Sync {
    /// Every comic, most viewed first.
    async fn list_all(&self) -> Result<Vec<Comic>, DomainError>;

    /// Lookup by slug; trimmed and case-insensitive.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Comic>, DomainError>;

    async fn find_by_id(&self, id: ComicId) -> Result<Option<Comic>, DomainError>;

    async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError>;

    /// Insert a comic and return the stored row.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the slug is already taken
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, comic: &NewComic) -> Result<Comic, DomainError>;

    /// Server-side `views = views + 1`.
    async fn increment_views(&self, id: ComicId) -> Result<(), DomainError>;

    /// Raw rows of the genre table; each row lists one or more names.
    async fn genre_rows(&self) -> Result<Vec<Vec<String>>, DomainError>;
}
