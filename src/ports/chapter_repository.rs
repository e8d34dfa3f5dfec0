//! Chapter and page repository port.

use async_trait::async_trait;

use crate::domain::foundation::{ChapterId, ComicId, DomainError};
use crate::domain::reading::{Chapter, NewChapter, Page};

#[async_trait]
pub trait ChapterRepository: Send + Sync {
    /// Stored chapters of a comic, in no particular order.
    async fn list_for_comic(&self, comic_id: ComicId) -> Result<Vec<Chapter>, DomainError>;

    async fn find(&self, comic_id: ComicId, number: i32) -> Result<Option<Chapter>, DomainError>;

    async fn pages(&self, chapter_id: ChapterId) -> Result<Vec<Page>, DomainError>;

    /// Inserts the chapter with its pages (numbered from 1) and raises the
    /// comic's `last_chapter` when needed, atomically.
    ///
    /// # Errors
    ///
    /// - `DuplicateChapter` if the comic already has that number
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, comic_id: ComicId, chapter: &NewChapter) -> Result<Chapter, DomainError>;
}
