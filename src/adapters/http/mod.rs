//! HTTP adapters - the REST API.
//!
//! One submodule per domain area, each with `dto`, `handlers` and `routes`.
//! `router::app_router` assembles them behind the bearer-token middleware.

pub mod account;
pub mod announcement;
pub mod catalog;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod premium;
pub mod reading;
pub mod router;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ApiError, ErrorResponse};
pub use router::{api_routes, app_router};
pub use state::{AppSettings, AppState};
