//! In-memory adapters.
//!
//! Implement every port without external services; used by handler tests,
//! HTTP tests and local development without Supabase or Xendit.

mod database;
mod gateway;
mod identity;
mod storage;

pub use database::InMemoryDatabase;
pub use gateway::MockPaymentGateway;
pub use identity::InMemoryIdentityProvider;
pub use storage::{InMemoryObjectStorage, StoredObject};
