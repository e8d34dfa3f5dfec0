//! AdminListComicsHandler - Query handler for the admin comic table.

use std::sync::Arc;

use crate::domain::catalog::{admin_listing, Comic};
use crate::domain::foundation::DomainError;
use crate::ports::ComicRepository;

#[derive(Debug, Clone, Default)]
pub struct AdminListComicsQuery {
    pub search: Option<String>,
}

pub struct AdminListComicsHandler {
    comics: Arc<dyn ComicRepository>,
}

impl AdminListComicsHandler {
    pub fn new(comics: Arc<dyn ComicRepository>) -> Self {
        Self { comics }
    }

    pub async fn handle(&self, query: AdminListComicsQuery) -> Result<Vec<Comic>, DomainError> {
        let all = self.comics.list_all().await?;
        Ok(admin_listing(all, query.search.as_deref()))
    }
}
