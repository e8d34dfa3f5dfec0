//! CreateAnnouncementHandler - Command handler for posting site news (admin).

use std::sync::Arc;

use crate::domain::announcement::{Announcement, NewAnnouncement};
use crate::domain::foundation::DomainError;
use crate::ports::AnnouncementRepository;

#[derive(Debug, Clone, Default)]
pub struct CreateAnnouncementCommand {
    pub title: String,
    pub content: String,
}

pub struct CreateAnnouncementHandler {
    announcements: Arc<dyn AnnouncementRepository>,
}

impl CreateAnnouncementHandler {
    pub fn new(announcements: Arc<dyn AnnouncementRepository>) -> Self {
        Self { announcements }
    }

    pub async fn handle(&self, cmd: CreateAnnouncementCommand) -> Result<Announcement, DomainError> {
        let announcement = NewAnnouncement::new(&cmd.title, &cmd.content)
            .map_err(|e| DomainError::validation(e.field(), "Title and content are required."))?;

        let stored = self.announcements.insert(&announcement).await?;
        tracing::info!(announcement_id = %stored.id, "Announcement posted");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDatabase;
    use crate::domain::foundation::ErrorCode;

    #[tokio::test]
    async fn stores_trimmed_announcement() {
        let db = Arc::new(InMemoryDatabase::new());
        let stored = CreateAnnouncementHandler::new(db.clone())
            .handle(CreateAnnouncementCommand {
                title: "  Holiday break ".into(),
                content: " Back on Monday. ".into(),
            })
            .await
            .unwrap();

        assert_eq!(stored.title, "Holiday break");
        assert_eq!(stored.content, "Back on Monday.");
        assert_eq!(stored.updated_at, None);
        assert_eq!(db.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn blank_content_is_rejected() {
        let db = Arc::new(InMemoryDatabase::new());
        let err = CreateAnnouncementHandler::new(db)
            .handle(CreateAnnouncementCommand {
                title: "Title".into(),
                content: "   ".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Title and content are required.");
    }
}
