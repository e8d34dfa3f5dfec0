//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports (Postgres)
//!
//! - `ComicRepository`, `ChapterRepository`, `RatingRepository`
//! - `ProfileRepository`, `PaymentRepository`, `AnnouncementRepository`
//!
//! ## External Service Ports
//!
//! - `SessionValidator` - Access-token validation
//! - `IdentityProvider` - Accounts and user metadata (Supabase Auth)
//! - `ObjectStorage` - Public image buckets (Supabase Storage)
//! - `PaymentGateway` - QRIS code generation (Xendit)

mod announcement_repository;
mod chapter_repository;
mod comic_repository;
mod identity_provider;
mod object_storage;
mod payment_gateway;
mod payment_repository;
mod profile_repository;
mod rating_repository;
mod session_validator;

pub use announcement_repository::AnnouncementRepository;
pub use chapter_repository::ChapterRepository;
pub use comic_repository::ComicRepository;
pub use identity_provider::{IdentityProvider, SignUpOutcome};
pub use object_storage::{ObjectStorage, ObjectUpload, StorageError};
pub use payment_gateway::{GatewayError, PaymentGateway, QrCode, QrCodeRequest};
pub use payment_repository::{PaymentRepository, Settlement};
pub use profile_repository::ProfileRepository;
pub use rating_repository::RatingRepository;
pub use session_validator::SessionValidator;
