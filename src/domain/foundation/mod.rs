//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, authentication types and error types used by
//! every FluxInkVerse domain module.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AnnouncementId, ChapterId, ComicId, PaymentId, UserId};
pub use timestamp::Timestamp;
