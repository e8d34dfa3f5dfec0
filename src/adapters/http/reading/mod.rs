//! HTTP adapter for chapter lists, the reader and chapter uploads.
//!
//! - `GET /api/comics/:slug/chapters` - Chapters grouped by volume
//! - `GET /api/comics/:slug/chapters/:number` - Reader page
//! - `POST /api/admin/comics/:slug/chapters` - Insert a chapter with its pages

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::reading_routes;
