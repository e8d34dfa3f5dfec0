//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! One repository per port, all sharing a single `PgPool`. Multi-table
//! writes (chapter with pages, rating with comic aggregate, payment
//! settlement) run in a transaction.

mod announcement_repository;
mod chapter_repository;
mod comic_repository;
mod payment_repository;
mod profile_repository;
mod rating_repository;

pub use announcement_repository::PostgresAnnouncementRepository;
pub use chapter_repository::PostgresChapterRepository;
pub use comic_repository::PostgresComicRepository;
pub use payment_repository::PostgresPaymentRepository;
pub use profile_repository::PostgresProfileRepository;
pub use rating_repository::PostgresRatingRepository;
