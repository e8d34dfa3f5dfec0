//! RateComicHandler and GetMyRatingHandler - the star widget on a comic page.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::catalog::StarRating;
use crate::domain::foundation::{ComicId, DomainError, ErrorCode, UserId};
use crate::ports::{ComicRepository, RatingRepository};

/// Command to rate a comic; `rating` is the raw form value.
#[derive(Debug, Clone)]
pub struct RateComicCommand {
    pub user_id: UserId,
    pub comic_id: ComicId,
    pub rating: i64,
}

/// Aggregate after the vote plus the caller's own stars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateComicResult {
    pub average: Option<f64>,
    pub count: i64,
    pub my_rating: StarRating,
}

pub struct RateComicHandler {
    comics: Arc<dyn ComicRepository>,
    ratings: Arc<dyn RatingRepository>,
}

impl RateComicHandler {
    pub fn new(comics: Arc<dyn ComicRepository>, ratings: Arc<dyn RatingRepository>) -> Self {
        Self { comics, ratings }
    }

    pub async fn handle(&self, cmd: RateComicCommand) -> Result<RateComicResult, DomainError> {
        let rating = StarRating::new(cmd.rating)?;
        ensure_comic(self.comics.as_ref(), cmd.comic_id).await?;

        let summary = self.ratings.upsert(cmd.comic_id, &cmd.user_id, rating).await?;
        tracing::debug!(comic_id = %cmd.comic_id, rating = %rating, "Comic rated");

        Ok(RateComicResult {
            average: summary.average,
            count: summary.count,
            my_rating: rating,
        })
    }
}

#[derive(Debug, Clone)]
pub struct GetMyRatingQuery {
    pub user_id: UserId,
    pub comic_id: ComicId,
}

pub struct GetMyRatingHandler {
    comics: Arc<dyn ComicRepository>,
    ratings: Arc<dyn RatingRepository>,
}

impl GetMyRatingHandler {
    pub fn new(comics: Arc<dyn ComicRepository>, ratings: Arc<dyn RatingRepository>) -> Self {
        Self { comics, ratings }
    }

    /// `None` when the caller has not rated this comic.
    pub async fn handle(&self, query: GetMyRatingQuery) -> Result<Option<StarRating>, DomainError> {
        ensure_comic(self.comics.as_ref(), query.comic_id).await?;
        self.ratings.find(query.comic_id, &query.user_id).await
    }
}

async fn ensure_comic(comics: &dyn ComicRepository, id: ComicId) -> Result<(), DomainError> {
    match comics.find_by_id(id).await? {
        Some(_) => Ok(()),
        None => Err(DomainError::new(ErrorCode::ComicNotFound, "Comic not found")),
    }
}
