//! HTTP adapter for sign-in and the profile page.
//!
//! - `POST /api/auth/login` - Password sign-in
//! - `POST /api/auth/register` - Create an account
//! - `GET /api/auth/oauth/:provider` - Social sign-in URL
//! - `GET|PUT /api/profile` - Profile view / update (multipart)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::account_routes;
