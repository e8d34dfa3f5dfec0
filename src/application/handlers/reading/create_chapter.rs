//! CreateChapterHandler - Command handler for uploading a chapter (admin).

use std::sync::Arc;

use crate::application::handlers::catalog::find_comic;
use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::reading::{Chapter, NewChapter};
use crate::ports::{ChapterRepository, ComicRepository};

#[derive(Debug, Clone, Default)]
pub struct CreateChapterCommand {
    pub slug: String,
    pub number: i32,
    pub title: Option<String>,
    pub volume: Option<i32>,
    pub released_at: Option<Timestamp>,
    /// Page image paths or URLs in reading order.
    pub pages: Vec<String>,
}

pub struct CreateChapterHandler {
    comics: Arc<dyn ComicRepository>,
    chapters: Arc<dyn ChapterRepository>,
}

impl CreateChapterHandler {
    pub fn new(comics: Arc<dyn ComicRepository>, chapters: Arc<dyn ChapterRepository>) -> Self {
        Self { comics, chapters }
    }

    pub async fn handle(&self, cmd: CreateChapterCommand) -> Result<Chapter, DomainError> {
        let chapter = NewChapter::new(
            cmd.number,
            cmd.title.as_deref(),
            cmd.volume,
            cmd.released_at,
            cmd.pages,
        )?;
        let comic = find_comic(self.comics.as_ref(), &cmd.slug).await?;

        let stored = self.chapters.insert(comic.id, &chapter).await?;
        tracing::info!(
            comic_id = %comic.id,
            number = stored.number,
            pages = chapter.pages.len(),
            "Chapter created"
        );
        Ok(stored)
    }
}
