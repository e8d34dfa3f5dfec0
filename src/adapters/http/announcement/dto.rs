//! Request and response bodies for announcement endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::announcement::Announcement;
use crate::domain::foundation::{AnnouncementId, Timestamp};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnouncementParams {
    pub q: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnouncementRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// An announcement with the time the card displays.
#[derive(Debug, Clone, Serialize)]
pub struct AnnouncementResponse {
    pub id: AnnouncementId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub display_at: Timestamp,
}

impl From<Announcement> for AnnouncementResponse {
    fn from(a: Announcement) -> Self {
        let display_at = a.display_time();
        Self {
            id: a.id,
            title: a.title,
            content: a.content,
            created_at: a.created_at,
            updated_at: a.updated_at,
            display_at,
        }
    }
}
