//! GetComicByIdHandler - Query handler for the `/books/{id}` page.

use std::sync::Arc;

use crate::domain::catalog::Comic;
use crate::domain::foundation::{ComicId, DomainError, ErrorCode};
use crate::ports::ComicRepository;

#[derive(Debug, Clone)]
pub struct GetComicByIdQuery {
    pub comic_id: ComicId,
}

pub struct GetComicByIdHandler {
    comics: Arc<dyn ComicRepository>,
}

impl GetComicByIdHandler {
    pub fn new(comics: Arc<dyn ComicRepository>) -> Self {
        Self { comics }
    }

    pub async fn handle(&self, query: GetComicByIdQuery) -> Result<Comic, DomainError> {
        self.comics
            .find_by_id(query.comic_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::ComicNotFound, "Comic not found"))
    }
}
