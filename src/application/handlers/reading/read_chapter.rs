//! ReadChapterHandler - Query handler for the chapter reader.
//!
//! Every way of missing the chapter (bad number, unknown comic, number past
//! the end, no row, no pages) is reported as not found.

use std::sync::Arc;

use serde::Serialize;

use crate::application::handlers::catalog::find_comic;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::reading::{reader_pages, Chapter, ChapterNavigation, ReaderPage};
use crate::ports::{ChapterRepository, ComicRepository};

#[derive(Debug, Clone)]
pub struct ReadChapterQuery {
    pub slug: String,
    /// Raw path segment.
    pub number: String,
}

/// Comic fields the reader header needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReaderComic {
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterReader {
    pub comic: ReaderComic,
    pub chapter: Chapter,
    pub navigation: ChapterNavigation,
    pub pages: Vec<ReaderPage>,
}

/// Public storage endpoint and bucket holding page images.
#[derive(Debug, Clone)]
pub struct PageSource {
    pub storage_url: String,
    pub bucket: String,
}

pub struct ReadChapterHandler {
    comics: Arc<dyn ComicRepository>,
    chapters: Arc<dyn ChapterRepository>,
    source: PageSource,
}

fn not_found() -> DomainError {
    DomainError::new(ErrorCode::ChapterNotFound, "Chapter not found")
}

impl ReadChapterHandler {
    pub fn new(
        comics: Arc<dyn ComicRepository>,
        chapters: Arc<dyn ChapterRepository>,
        source: PageSource,
    ) -> Self {
        Self {
            comics,
            chapters,
            source,
        }
    }

    pub async fn handle(&self, query: ReadChapterQuery) -> Result<ChapterReader, DomainError> {
        let number: i32 = match query.number.trim().parse() {
            Ok(n) if n > 0 => n,
            _ => return Err(not_found()),
        };
        let comic = find_comic(self.comics.as_ref(), &query.slug).await?;

        let stored = self.chapters.list_for_comic(comic.id).await?;
        let total = if stored.is_empty() {
            comic.last_chapter
        } else {
            stored.len() as i32
        };
        let navigation = ChapterNavigation::new(number, total).ok_or_else(not_found)?;

        let chapter = stored
            .into_iter()
            .find(|c| c.number == number)
            .ok_or_else(not_found)?;
        let chapter_id = chapter.id.ok_or_else(not_found)?;

        let pages = self.chapters.pages(chapter_id).await?;
        if pages.is_empty() {
            return Err(not_found());
        }

        Ok(ChapterReader {
            comic: ReaderComic {
                title: comic.title,
                slug: comic.slug,
            },
            chapter,
            navigation,
            pages: reader_pages(pages, &self.source.storage_url, &self.source.bucket),
        })
    }
}
