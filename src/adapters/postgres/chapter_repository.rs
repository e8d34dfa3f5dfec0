//! PostgreSQL implementation of ChapterRepository.
//!
//! Chapter inserts write the chapter, its pages and the comic's
//! `last_chapter` in one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{ChapterId, ComicId, DomainError, ErrorCode, Timestamp};
use crate::domain::reading::{Chapter, NewChapter, Page};
use crate::ports::ChapterRepository;

const DUPLICATE_CHAPTER_CONSTRAINT: &str = "chapters_comic_number_key";

pub struct PostgresChapterRepository {
    pool: PgPool,
}

impl PostgresChapterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ChapterRow {
    id: i64,
    number: i32,
    title: Option<String>,
    volume: Option<i32>,
    released_at: Option<DateTime<Utc>>,
}

impl From<ChapterRow> for Chapter {
    fn from(row: ChapterRow) -> Self {
        Chapter {
            id: Some(ChapterId::from_db(row.id)),
            number: row.number,
            title: row.title,
            volume: row.volume,
            released_at: row.released_at.map(Timestamp::from_datetime),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PageRow {
    page_no: i32,
    image_path: String,
}

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

#[async_trait]
impl ChapterRepository for PostgresChapterRepository {
    async fn list_for_comic(&self, comic_id: ComicId) -> Result<Vec<Chapter>, DomainError> {
        let rows: Vec<ChapterRow> = sqlx::query_as(
            r#"
            SELECT id, number, title, volume, released_at
            FROM chapters
            WHERE comic_id = $1
            ORDER BY number
            "#,
        )
        .bind(comic_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list chapters", e))?;

        Ok(rows.into_iter().map(Chapter::from).collect())
    }

    async fn find(&self, comic_id: ComicId, number: i32) -> Result<Option<Chapter>, DomainError> {
        let row: Option<ChapterRow> = sqlx::query_as(
            r#"
            SELECT id, number, title, volume, released_at
            FROM chapters
            WHERE comic_id = $1 AND number = $2
            "#,
        )
        .bind(comic_id.value())
        .bind(number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find chapter", e))?;

        Ok(row.map(Chapter::from))
    }

    async fn pages(&self, chapter_id: ChapterId) -> Result<Vec<Page>, DomainError> {
        let rows: Vec<PageRow> = sqlx::query_as(
            "SELECT page_no, image_path FROM pages WHERE chapter_id = $1 ORDER BY page_no",
        )
        .bind(chapter_id.value())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list pages", e))?;

        Ok(rows
            .into_iter()
            .map(|r| Page {
                page_no: r.page_no,
                image_path: r.image_path,
            })
            .collect())
    }

    async fn insert(&self, comic_id: ComicId, chapter: &NewChapter) -> Result<Chapter, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("start transaction", e))?;

        let row: ChapterRow = sqlx::query_as(
            r#"
            INSERT INTO chapters (comic_id, number, title, volume, released_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, number, title, volume, released_at
            "#,
        )
        .bind(comic_id.value())
        .bind(chapter.number)
        .bind(&chapter.title)
        .bind(chapter.volume)
        .bind(chapter.released_at.map(|t| *t.as_datetime()))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(DUPLICATE_CHAPTER_CONSTRAINT) {
                    return DomainError::new(
                        ErrorCode::DuplicateChapter,
                        format!("Chapter {} already exists", chapter.number),
                    );
                }
            }
            db_error("insert chapter", e)
        })?;

        for (index, path) in chapter.pages.iter().enumerate() {
            sqlx::query("INSERT INTO pages (chapter_id, page_no, image_path) VALUES ($1, $2, $3)")
                .bind(row.id)
                .bind(index as i32 + 1)
                .bind(path)
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("insert page", e))?;
        }

        sqlx::query(
            r#"
            UPDATE comics
            SET last_chapter = GREATEST(last_chapter, $2), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(comic_id.value())
        .bind(chapter.number)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("update last chapter", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("commit transaction", e))?;

        Ok(row.into())
    }
}
