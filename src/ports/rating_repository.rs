//! Star rating repository port.

use async_trait::async_trait;

use crate::domain::catalog::{RatingSummary, StarRating};
use crate::domain::foundation::{ComicId, DomainError, UserId};

#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Upserts the user's vote on (comic, user), then refreshes the comic's
    /// stored average and count in the same transaction.
    async fn upsert(
        &self,
        comic_id: ComicId,
        user_id: &UserId,
        rating: StarRating,
    ) -> Result<RatingSummary, DomainError>;

    async fn find(&self, comic_id: ComicId, user_id: &UserId) -> Result<Option<StarRating>, DomainError>;
}
