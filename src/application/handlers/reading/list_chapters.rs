//! ListChaptersHandler - Query handler for the chapter list on a comic page.

use std::sync::Arc;

use crate::application::handlers::catalog::find_comic;
use crate::domain::foundation::DomainError;
use crate::domain::reading::{group_by_volume, placeholder_chapters, ChapterOrder, VolumeGroup};
use crate::ports::{ChapterRepository, ComicRepository};

#[derive(Debug, Clone, Default)]
pub struct ListChaptersQuery {
    pub slug: String,
    pub search: Option<String>,
    pub order: ChapterOrder,
}

#[derive(Debug, Clone)]
pub struct ChapterListing {
    /// Chapters before filtering.
    pub total_chapters: i32,
    pub volumes: Vec<VolumeGroup>,
}

pub struct ListChaptersHandler {
    comics: Arc<dyn ComicRepository>,
    chapters: Arc<dyn ChapterRepository>,
}

impl ListChaptersHandler {
    pub fn new(comics: Arc<dyn ComicRepository>, chapters: Arc<dyn ChapterRepository>) -> Self {
        Self { comics, chapters }
    }

    pub async fn handle(&self, query: ListChaptersQuery) -> Result<ChapterListing, DomainError> {
        let comic = find_comic(self.comics.as_ref(), &query.slug).await?;

        let mut chapters = self.chapters.list_for_comic(comic.id).await?;
        if chapters.is_empty() {
            chapters = placeholder_chapters(comic.last_chapter);
        }

        Ok(ChapterListing {
            total_chapters: chapters.len() as i32,
            volumes: group_by_volume(chapters, query.search.as_deref(), query.order),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDatabase;
    use crate::domain::catalog::fixtures::comic;
    use crate::domain::foundation::{ComicId, ErrorCode};
    use crate::domain::reading::Chapter;

    async fn handler_with_last_chapter(last: i32) -> ListChaptersHandler {
        let db = Arc::new(InMemoryDatabase::new());
        let mut c = comic(1, "Kingdom");
        c.last_chapter = last;
        db.put_comic(c).await;
        ListChaptersHandler::new(db.clone(), db)
    }

    #[tokio::test]
    async fn vol_search_returns_that_volume_only() {
        let handler = handler_with_last_chapter(35).await;

        let listing = handler
            .handle(ListChaptersQuery {
                slug: "kingdom".into(),
                search: Some("vol 2".into()),
                order: ChapterOrder::Oldest,
            })
            .await
            .unwrap();

        assert_eq!(listing.total_chapters, 35);
        assert_eq!(listing.volumes.len(), 1);
        let numbers: Vec<i32> = listing.volumes[0].chapters.iter().map(|c| c.number).collect();
        assert_eq!(numbers, (11..=20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn newest_first_groups_volumes_descending() {
        let handler = handler_with_last_chapter(12).await;

        let listing = handler
            .handle(ListChaptersQuery {
                slug: "kingdom".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        let volumes: Vec<i32> = listing.volumes.iter().map(|v| v.volume).collect();
        assert_eq!(volumes, vec![2, 1]);
        assert_eq!(listing.volumes[0].chapters[0].number, 12);
    }

    #[tokio::test]
    async fn explicit_volumes_are_respected() {
        let db = Arc::new(InMemoryDatabase::new());
        db.put_comic(comic(1, "Kingdom")).await;
        let mut special = Chapter::placeholder(3);
        special.volume = Some(7);
        db.put_chapter(ComicId::from_db(1), special, &["p.png"]).await;
        let handler = ListChaptersHandler::new(db.clone(), db);

        let listing = handler
            .handle(ListChaptersQuery {
                slug: "kingdom".into(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(listing.volumes[0].volume, 7);
    }

    #[tokio::test]
    async fn unknown_comic_is_not_found() {
        let handler = handler_with_last_chapter(1).await;
        let err = handler
            .handle(ListChaptersQuery {
                slug: "berserk".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ComicNotFound);
    }
}
