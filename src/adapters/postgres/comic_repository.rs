//! PostgreSQL implementation of ComicRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::catalog::{Comic, ComicStatus, NewComic};
use crate::domain::foundation::{ComicId, DomainError, ErrorCode, Timestamp};
use crate::ports::ComicRepository;

const COMIC_COLUMNS: &str = "id, title, slug, cover_url, description, note, author, genres, \
     status, rating, rating_count, views, last_chapter, created_at, updated_at";

pub struct PostgresComicRepository {
    pool: PgPool,
}

impl PostgresComicRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a comic.
#[derive(Debug, sqlx::FromRow)]
struct ComicRow {
    id: i64,
    title: String,
    slug: String,
    cover_url: Option<String>,
    description: Option<String>,
    note: Option<String>,
    author: Option<String>,
    genres: Vec<String>,
    status: Option<String>,
    rating: Option<f64>,
    rating_count: i64,
    views: i64,
    last_chapter: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ComicRow> for Comic {
    fn from(row: ComicRow) -> Self {
        Comic {
            id: ComicId::from_db(row.id),
            title: row.title,
            slug: row.slug,
            cover_url: row.cover_url,
            description: row.description,
            note: row.note,
            author: row.author,
            genres: row.genres,
            status: row.status.as_deref().and_then(ComicStatus::parse),
            rating: row.rating,
            rating_count: row.rating_count,
            views: row.views,
            last_chapter: row.last_chapter,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

#[async_trait]
impl ComicRepository for PostgresComicRepository {
    async fn list_all(&self) -> Result<Vec<Comic>, DomainError> {
        let rows: Vec<ComicRow> = sqlx::query_as(&format!(
            "SELECT {} FROM comics ORDER BY views DESC, id ASC",
            COMIC_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list comics", e))?;

        Ok(rows.into_iter().map(Comic::from).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Comic>, DomainError> {
        let row: Option<ComicRow> = sqlx::query_as(&format!(
            "SELECT {} FROM comics WHERE LOWER(slug) = LOWER($1)",
            COMIC_COLUMNS
        ))
        .bind(slug.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find comic", e))?;

        Ok(row.map(Comic::from))
    }

    async fn find_by_id(&self, id: ComicId) -> Result<Option<Comic>, DomainError> {
        let row: Option<ComicRow> =
            sqlx::query_as(&format!("SELECT {} FROM comics WHERE id = $1", COMIC_COLUMNS))
                .bind(id.value())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find comic", e))?;

        Ok(row.map(Comic::from))
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, DomainError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM comics WHERE LOWER(slug) = LOWER($1))")
                .bind(slug.trim())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("check slug", e))?;

        Ok(exists)
    }

    async fn insert(&self, comic: &NewComic) -> Result<Comic, DomainError> {
        let row: ComicRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO comics (title, slug, description, author, last_chapter, genres, cover_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            COMIC_COLUMNS
        ))
        .bind(&comic.title)
        .bind(&comic.slug)
        .bind(&comic.description)
        .bind(&comic.author)
        .bind(comic.last_chapter)
        .bind(&comic.genres)
        .bind(&comic.cover_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return DomainError::validation("slug", "A comic with this slug already exists");
                }
            }
            db_error("insert comic", e)
        })?;

        Ok(row.into())
    }

    async fn increment_views(&self, id: ComicId) -> Result<(), DomainError> {
        sqlx::query("UPDATE comics SET views = views + 1 WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("increment views", e))?;

        Ok(())
    }

    async fn genre_rows(&self) -> Result<Vec<Vec<String>>, DomainError> {
        let rows: Vec<(Vec<String>,)> = sqlx::query_as("SELECT genres FROM genres ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list genres", e))?;

        Ok(rows.into_iter().map(|(genres,)| genres).collect())
    }
}
