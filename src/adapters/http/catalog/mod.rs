//! HTTP adapter for the catalog.
//!
//! - `GET /api/comics` - Browse with search, genre tag and sort
//! - `GET /api/comics/popular` - Most viewed comics
//! - `GET /api/comics/:slug` - Comic detail page
//! - `GET /api/books/:id` - Legacy lookup by numeric id
//! - `GET /api/genres` - Genre list
//! - `GET|PUT /api/comics/:id/rating` - Caller's rating / rate a comic
//! - `GET|POST /api/admin/comics` - Admin comic table / insert a comic

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::catalog_routes;
