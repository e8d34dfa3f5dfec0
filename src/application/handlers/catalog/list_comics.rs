//! ListComicsHandler - Query handler for the catalog browse page.

use std::sync::Arc;

use crate::domain::catalog::{tag_list, CatalogQuery, CatalogSort, Comic};
use crate::domain::foundation::DomainError;
use crate::ports::ComicRepository;

/// Query for the browse page.
#[derive(Debug, Clone, Default)]
pub struct ListComicsQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub sort: CatalogSort,
}

/// Matching comics plus the genre tabs built from the whole catalog.
#[derive(Debug, Clone)]
pub struct ListComicsResult {
    pub comics: Vec<Comic>,
    pub tags: Vec<String>,
}

pub struct ListComicsHandler {
    comics: Arc<dyn ComicRepository>,
}

impl ListComicsHandler {
    pub fn new(comics: Arc<dyn ComicRepository>) -> Self {
        Self { comics }
    }

    pub async fn handle(&self, query: ListComicsQuery) -> Result<ListComicsResult, DomainError> {
        let all = self.comics.list_all().await?;
        let tags = tag_list(&all);
        let comics = CatalogQuery {
            search: query.search,
            tag: query.tag,
            sort: query.sort,
        }
        .apply(all);

        Ok(ListComicsResult { comics, tags })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDatabase;
    use crate::domain::catalog::fixtures::comic;

    async fn seeded() -> Arc<InMemoryDatabase> {
        let db = Arc::new(InMemoryDatabase::new());
        let mut a = comic(1, "Solo Leveling");
        a.genres = vec!["Action".into(), "Fantasy".into()];
        a.views = 10;
        let mut b = comic(2, "Blue Box");
        b.genres = vec!["Romance".into(), "Sports".into()];
        b.views = 50;
        let mut c = comic(3, "Chainsaw Man");
        c.genres = vec!["action".into()];
        c.views = 30;
        for item in [a, b, c] {
            db.put_comic(item).await;
        }
        db
    }

    #[tokio::test]
    async fn default_query_sorts_by_views_and_lists_tags() {
        let handler = ListComicsHandler::new(seeded().await);

        let result = handler.handle(ListComicsQuery::default()).await.unwrap();

        let titles: Vec<_> = result.comics.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Blue Box", "Chainsaw Man", "Solo Leveling"]);
        assert_eq!(
            result.tags,
            vec!["All", "action", "Action", "Fantasy", "Romance", "Sports"]
        );
    }

    #[tokio::test]
    async fn tag_filter_is_exact() {
        let handler = ListComicsHandler::new(seeded().await);

        let result = handler
            .handle(ListComicsQuery {
                tag: Some("Action".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(result.comics.len(), 1);
        assert_eq!(result.comics[0].title, "Solo Leveling");
    }

    #[tokio::test]
    async fn search_matches_genre_case_insensitively() {
        let handler = ListComicsHandler::new(seeded().await);

        let result = handler
            .handle(ListComicsQuery {
                search: Some("  ACTION ".into()),
                sort: CatalogSort::Az,
                ..Default::default()
            })
            .await
            .unwrap();

        let titles: Vec<_> = result.comics.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Chainsaw Man", "Solo Leveling"]);
    }
}
