//! PostgreSQL implementation of AnnouncementRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::announcement::{Announcement, NewAnnouncement};
use crate::domain::foundation::{AnnouncementId, DomainError, ErrorCode, Timestamp};
use crate::ports::AnnouncementRepository;

pub struct PostgresAnnouncementRepository {
    pool: PgPool,
}

impl PostgresAnnouncementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AnnouncementRow {
    id: i64,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<AnnouncementRow> for Announcement {
    fn from(row: AnnouncementRow) -> Self {
        Announcement {
            id: AnnouncementId::from_db(row.id),
            title: row.title,
            content: row.content,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: row.updated_at.map(Timestamp::from_datetime),
        }
    }
}

#[async_trait]
impl AnnouncementRepository for PostgresAnnouncementRepository {
    async fn list_all(&self) -> Result<Vec<Announcement>, DomainError> {
        let rows: Vec<AnnouncementRow> = sqlx::query_as(
            "SELECT id, title, content, created_at, updated_at FROM announcements ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to list announcements: {}", e))
        })?;

        Ok(rows.into_iter().map(Announcement::from).collect())
    }

    async fn insert(&self, announcement: &NewAnnouncement) -> Result<Announcement, DomainError> {
        let row: AnnouncementRow = sqlx::query_as(
            r#"
            INSERT INTO announcements (title, content)
            VALUES ($1, $2)
            RETURNING id, title, content, created_at, updated_at
            "#,
        )
        .bind(&announcement.title)
        .bind(&announcement.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to insert announcement: {}", e))
        })?;

        Ok(row.into())
    }
}
