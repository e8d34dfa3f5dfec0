//! Announcement domain - site news posted by admins.

use serde::Serialize;

use crate::domain::catalog::normalized_needle;
use crate::domain::foundation::{AnnouncementId, Timestamp, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Announcement {
    pub id: AnnouncementId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

impl Announcement {
    /// Time shown on the announcement card.
    pub fn display_time(&self) -> Timestamp {
        self.updated_at.unwrap_or(self.created_at)
    }

    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}

/// Trimmed, non-empty title and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
}

impl NewAnnouncement {
    pub fn new(title: &str, content: &str) -> Result<Self, ValidationError> {
        let (title, content) = (title.trim(), content.trim());
        if title.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if content.is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
        })
    }
}

/// Newest first, optionally filtered on title or content.
pub fn search_announcements(mut items: Vec<Announcement>, search: Option<&str>) -> Vec<Announcement> {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    match normalized_needle(search) {
        Some(needle) => items.into_iter().filter(|a| a.matches(&needle)).collect(),
        None => items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, title: &str, content: &str, day: i64) -> Announcement {
        let base = Timestamp::now();
        Announcement {
            id: AnnouncementId::from_db(id),
            title: title.to_string(),
            content: content.to_string(),
            created_at: base.add_days(day),
            updated_at: None,
        }
    }

    #[test]
    fn new_announcement_requires_both_fields() {
        assert_eq!(
            NewAnnouncement::new("  ", "body").unwrap_err(),
            ValidationError::empty_field("title")
        );
        assert_eq!(
            NewAnnouncement::new("Title", "\n").unwrap_err(),
            ValidationError::empty_field("content")
        );
        let ok = NewAnnouncement::new(" Maintenance ", " Tonight ").unwrap();
        assert_eq!(ok.title, "Maintenance");
        assert_eq!(ok.content, "Tonight");
    }

    #[test]
    fn display_time_prefers_update() {
        let mut a = item(1, "t", "c", 0);
        assert_eq!(a.display_time(), a.created_at);
        let later = a.created_at.add_days(2);
        a.updated_at = Some(later);
        assert_eq!(a.display_time(), later);
    }

    #[test]
    fn search_orders_newest_first_and_filters() {
        let items = vec![
            item(1, "Server maintenance", "Downtime tonight", 0),
            item(2, "New chapters", "Solo Leveling 59 is up", 2),
            item(3, "Premium promo", "QRIS discount", 1),
        ];
        let all = search_announcements(items.clone(), None);
        let ids: Vec<i64> = all.iter().map(|a| a.id.value()).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        let hits = search_announcements(items, Some("QRIS"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.value(), 3);
    }
}
