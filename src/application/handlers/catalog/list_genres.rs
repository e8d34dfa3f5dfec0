//! ListGenresHandler - Query handler for the genre picker.

use std::sync::Arc;

use crate::domain::catalog::flatten_genres;
use crate::domain::foundation::DomainError;
use crate::ports::ComicRepository;

pub struct ListGenresHandler {
    comics: Arc<dyn ComicRepository>,
}

impl ListGenresHandler {
    pub fn new(comics: Arc<dyn ComicRepository>) -> Self {
        Self { comics }
    }

    /// Distinct genre names in first-seen order.
    pub async fn handle(&self) -> Result<Vec<String>, DomainError> {
        Ok(flatten_genres(self.comics.genre_rows().await?))
    }
}
