//! GetComicDetailHandler - Query handler for a comic's detail page.
//!
//! Loading the detail counts as a view. The counter is bumped server-side
//! after the read; a failed bump is logged and does not fail the page.

use std::sync::Arc;

use crate::domain::catalog::Comic;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::reading::{placeholder_chapters, total_volumes, Chapter};
use crate::ports::{ChapterRepository, ComicRepository};

#[derive(Debug, Clone)]
pub struct GetComicDetailQuery {
    pub slug: String,
}

/// Everything the detail page shows.
#[derive(Debug, Clone)]
pub struct ComicDetail {
    pub comic: Comic,
    pub synopsis: String,
    /// Stored chapters by number, or generated ones when none are stored.
    pub chapters: Vec<Chapter>,
    pub total_chapters: i32,
    pub total_volumes: i32,
    pub first_chapter: i32,
    pub latest_chapter: i32,
}

pub struct GetComicDetailHandler {
    comics: Arc<dyn ComicRepository>,
    chapters: Arc<dyn ChapterRepository>,
}

impl GetComicDetailHandler {
    pub fn new(comics: Arc<dyn ComicRepository>, chapters: Arc<dyn ChapterRepository>) -> Self {
        Self { comics, chapters }
    }

    pub async fn handle(&self, query: GetComicDetailQuery) -> Result<ComicDetail, DomainError> {
        let comic = find_comic(self.comics.as_ref(), &query.slug).await?;

        let mut chapters = self.chapters.list_for_comic(comic.id).await?;
        if chapters.is_empty() {
            chapters = placeholder_chapters(comic.last_chapter);
        }
        chapters.sort_by_key(|c| c.number);

        let total_chapters = if chapters.is_empty() {
            comic.last_chapter.max(0)
        } else {
            chapters.len() as i32
        };

        if let Err(e) = self.comics.increment_views(comic.id).await {
            tracing::warn!(comic_id = %comic.id, error = %e, "Failed to count comic view");
        }

        Ok(ComicDetail {
            synopsis: comic.synopsis(),
            chapters,
            total_chapters,
            total_volumes: total_volumes(total_chapters),
            first_chapter: 1,
            latest_chapter: total_chapters.max(1),
            comic,
        })
    }
}

/// Slug lookup shared by the comic-scoped handlers; blank or unknown slugs
/// are `ComicNotFound`.
pub(crate) async fn find_comic(
    comics: &dyn ComicRepository,
    slug: &str,
) -> Result<Comic, DomainError> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(DomainError::new(ErrorCode::ComicNotFound, "Comic not found"));
    }
    comics.find_by_slug(slug).await?.ok_or_else(|| {
        DomainError::new(ErrorCode::ComicNotFound, "Comic not found").with_detail("slug", slug)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDatabase;
    use crate::domain::catalog::fixtures::comic;
    use crate::domain::foundation::ComicId;

    fn handler(db: &Arc<InMemoryDatabase>) -> GetComicDetailHandler {
        GetComicDetailHandler::new(db.clone(), db.clone())
    }

    #[tokio::test]
    async fn generates_chapters_from_last_chapter() {
        let db = Arc::new(InMemoryDatabase::new());
        let mut c = comic(1, "Solo Leveling");
        c.last_chapter = 25;
        db.put_comic(c).await;

        let detail = handler(&db)
            .handle(GetComicDetailQuery { slug: " SOLO-leveling ".into() })
            .await
            .unwrap();

        assert_eq!(detail.total_chapters, 25);
        assert_eq!(detail.total_volumes, 3);
        assert_eq!(detail.chapters[24].title.as_deref(), Some("Chapter 25"));
        assert_eq!(detail.latest_chapter, 25);
        assert_eq!(detail.synopsis, "No synopsis yet.");
    }

    #[tokio::test]
    async fn stored_chapters_win_over_last_chapter() {
        let db = Arc::new(InMemoryDatabase::new());
        let mut c = comic(1, "Blue Box");
        c.last_chapter = 40;
        c.description = Some("  Ice hockey and badminton.  ".into());
        db.put_comic(c).await;
        for n in [2, 1] {
            db.put_chapter(ComicId::from_db(1), Chapter::placeholder(n), &["p.png"]).await;
        }

        let detail = handler(&db)
            .handle(GetComicDetailQuery { slug: "blue-box".into() })
            .await
            .unwrap();

        assert_eq!(detail.total_chapters, 2);
        assert_eq!(detail.total_volumes, 1);
        assert_eq!(detail.chapters[0].number, 1);
        assert_eq!(detail.synopsis, "Ice hockey and badminton.");
    }

    #[tokio::test]
    async fn empty_comic_still_links_to_chapter_one() {
        let db = Arc::new(InMemoryDatabase::new());
        db.put_comic(comic(1, "Fresh")).await;

        let detail = handler(&db)
            .handle(GetComicDetailQuery { slug: "fresh".into() })
            .await
            .unwrap();

        assert_eq!(detail.total_chapters, 0);
        assert_eq!(detail.total_volumes, 1);
        assert_eq!(detail.latest_chapter, 1);
    }

    #[tokio::test]
    async fn loading_detail_counts_a_view() {
        let db = Arc::new(InMemoryDatabase::new());
        db.put_comic(comic(1, "Solo Leveling")).await;

        for _ in 0..2 {
            handler(&db)
                .handle(GetComicDetailQuery { slug: "solo-leveling".into() })
                .await
                .unwrap();
        }

        let stored = db.find_by_id(ComicId::from_db(1)).await.unwrap().unwrap();
        assert_eq!(stored.views, 2);
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let db = Arc::new(InMemoryDatabase::new());
        let err = handler(&db)
            .handle(GetComicDetailQuery { slug: "missing".into() })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ComicNotFound);
    }
}
