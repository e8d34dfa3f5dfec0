//! PostgreSQL implementation of RatingRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::catalog::{RatingSummary, StarRating};
use crate::domain::foundation::{ComicId, DomainError, ErrorCode, UserId};
use crate::ports::RatingRepository;

const LOCK_COMIC_SQL: &str = "SELECT id FROM comics WHERE id = $1 FOR UPDATE";

pub struct PostgresRatingRepository {
    pool: PgPool,
}

impl PostgresRatingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

fn to_star(value: i16) -> Result<StarRating, DomainError> {
    StarRating::new(value as i64).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid stored rating: {}", e))
    })
}

#[async_trait]
impl RatingRepository for PostgresRatingRepository {
    async fn upsert(
        &self,
        comic_id: ComicId,
        user_id: &UserId,
        rating: StarRating,
    ) -> Result<RatingSummary, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("start transaction", e))?;

        // Raters of one comic queue here so each recompute sees every
        // committed vote.
        sqlx::query(LOCK_COMIC_SQL)
            .bind(comic_id.value())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("lock comic", e))?;

        sqlx::query(
            r#"
            INSERT INTO comic_ratings (comic_id, user_id, rating)
            VALUES ($1, $2, $3)
            ON CONFLICT (comic_id, user_id)
            DO UPDATE SET rating = EXCLUDED.rating, updated_at = NOW()
            "#,
        )
        .bind(comic_id.value())
        .bind(user_id.as_uuid())
        .bind(rating.value() as i16)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("save rating", e))?;

        let votes: Vec<(i16,)> = sqlx::query_as("SELECT rating FROM comic_ratings WHERE comic_id = $1")
            .bind(comic_id.value())
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| db_error("load ratings", e))?;
        let votes = votes
            .into_iter()
            .map(|(v,)| to_star(v))
            .collect::<Result<Vec<_>, _>>()?;
        let summary = RatingSummary::from_votes(&votes);

        sqlx::query("UPDATE comics SET rating = $2, rating_count = $3, updated_at = NOW() WHERE id = $1")
            .bind(comic_id.value())
            .bind(summary.average)
            .bind(summary.count)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("update comic rating", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("commit transaction", e))?;

        Ok(summary)
    }

    async fn find(&self, comic_id: ComicId, user_id: &UserId) -> Result<Option<StarRating>, DomainError> {
        let row: Option<(i16,)> =
            sqlx::query_as("SELECT rating FROM comic_ratings WHERE comic_id = $1 AND user_id = $2")
                .bind(comic_id.value())
                .bind(user_id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find rating", e))?;

        row.map(|(v,)| to_star(v)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recompute_holds_the_comic_row_lock() {
        assert!(LOCK_COMIC_SQL.ends_with("FOR UPDATE"));
        assert!(LOCK_COMIC_SQL.contains("FROM comics WHERE id = $1"));
    }

    #[test]
    fn out_of_range_stored_rating_is_a_database_error() {
        assert_eq!(to_star(6).unwrap_err().code, ErrorCode::DatabaseError);
        assert_eq!(to_star(4).unwrap().value(), 4);
    }
}
