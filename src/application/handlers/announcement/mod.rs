//! Announcement handlers.

mod create_announcement;
mod list_announcements;

pub use create_announcement::{CreateAnnouncementCommand, CreateAnnouncementHandler};
pub use list_announcements::{ListAnnouncementsHandler, ListAnnouncementsQuery};
