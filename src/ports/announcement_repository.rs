//! Announcement repository port.

use async_trait::async_trait;

use crate::domain::announcement::{Announcement, NewAnnouncement};
use crate::domain::foundation::DomainError;

#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    /// Every announcement, newest first.
    async fn list_all(&self) -> Result<Vec<Announcement>, DomainError>;

    async fn insert(&self, announcement: &NewAnnouncement) -> Result<Announcement, DomainError>;
}
