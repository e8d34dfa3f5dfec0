//! PopularComicsHandler - Query handler for the home page strip.

use std::sync::Arc;

use crate::domain::catalog::{popular, Comic, POPULAR_LIMIT};
use crate::domain::foundation::DomainError;
use crate::ports::ComicRepository;

#[derive(Debug, Clone, Default)]
pub struct PopularComicsQuery {
    /// Defaults to six.
    pub limit: Option<usize>,
}

pub struct PopularComicsHandler {
    comics: Arc<dyn ComicRepository>,
}

impl PopularComicsHandler {
    pub fn new(comics: Arc<dyn ComicRepository>) -> Self {
        Self { comics }
    }

    pub async fn handle(&self, query: PopularComicsQuery) -> Result<Vec<Comic>, DomainError> {
        let all = self.comics.list_all().await?;
        Ok(popular(all, query.limit.unwrap_or(POPULAR_LIMIT)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDatabase;
    use crate::domain::catalog::fixtures::comic;

    #[tokio::test]
    async fn returns_at_most_six_by_default() {
        let db = Arc::new(InMemoryDatabase::new());
        for id in 1..=8 {
            let mut c = comic(id, &format!("Comic {}", id));
            c.views = id * 100;
            db.put_comic(c).await;
        }

        let top = PopularComicsHandler::new(db)
            .handle(PopularComicsQuery::default())
            .await
            .unwrap();

        assert_eq!(top.len(), 6);
        assert_eq!(top[0].title, "Comic 8");
    }

    #[tokio::test]
    async fn equal_views_prefer_newer_comics() {
        let db = Arc::new(InMemoryDatabase::new());
        let older = comic(1, "Older");
        let mut newer = comic(2, "Newer");
        newer.created_at = older.created_at.add_days(1);
        db.put_comic(older).await;
        db.put_comic(newer).await;

        let top = PopularComicsHandler::new(db)
            .handle(PopularComicsQuery { limit: Some(1) })
            .await
            .unwrap();

        assert_eq!(top.len(), 1);
        assert_eq!(top[0].title, "Newer");
    }
}
