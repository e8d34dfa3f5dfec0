//! ListAnnouncementsHandler - Query handler for the news page.

use std::sync::Arc;

use crate::domain::announcement::{search_announcements, Announcement};
use crate::domain::foundation::DomainError;
use crate::ports::AnnouncementRepository;

#[derive(Debug, Clone, Default)]
pub struct ListAnnouncementsQuery {
    pub search: Option<String>,
}

pub struct ListAnnouncementsHandler {
    announcements: Arc<dyn AnnouncementRepository>,
}

impl ListAnnouncementsHandler {
    pub fn new(announcements: Arc<dyn AnnouncementRepository>) -> Self {
        Self { announcements }
    }

    pub async fn handle(&self, query: ListAnnouncementsQuery) -> Result<Vec<Announcement>, DomainError> {
        let all = self.announcements.list_all().await?;
        Ok(search_announcements(all, query.search.as_deref()))
    }
}
