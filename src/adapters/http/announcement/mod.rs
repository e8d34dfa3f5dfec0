//! HTTP adapter for site announcements.
//!
//! - `GET /api/announcements` - Public list with optional search
//! - `GET|POST /api/admin/announcements` - Admin list / post an announcement

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::announcement_routes;
