//! In-memory `AppState` for router unit tests.

use std::sync::Arc;

use secrecy::SecretString;

use crate::adapters::auth::MockSessionValidator;
use crate::adapters::memory::{
    InMemoryDatabase, InMemoryIdentityProvider, InMemoryObjectStorage, MockPaymentGateway,
};
use crate::application::handlers::account::AvatarSettings;
use crate::application::handlers::catalog::CoverSettings;
use crate::application::handlers::premium::PaymentSettings;
use crate::application::handlers::reading::PageSource;
use crate::domain::premium::CallbackTokenVerifier;

use super::state::{AppSettings, AppState};

pub fn test_settings() -> AppSettings {
    AppSettings {
        pages: PageSource {
            storage_url: "http://storage.test".to_string(),
            bucket: "pages".to_string(),
        },
        covers: CoverSettings {
            bucket: "covers".to_string(),
            max_bytes: 5 * 1024 * 1024,
        },
        avatars: AvatarSettings {
            bucket: "avatars".to_string(),
            max_bytes: 5 * 1024 * 1024,
        },
        payment: PaymentSettings {
            default_amount: 10_000,
            min_amount: 1_000,
            currency: "IDR".to_string(),
        },
        callback_verifier: CallbackTokenVerifier::new(SecretString::new("cb-token".to_string())),
        site_url: "http://localhost:3000".to_string(),
        max_upload_bytes: 10 * 1024 * 1024,
    }
}

pub fn test_state() -> AppState {
    let db = Arc::new(InMemoryDatabase::new());
    AppState {
        comics: db.clone(),
        chapters: db.clone(),
        ratings: db.clone(),
        profiles: db.clone(),
        payments: db.clone(),
        announcements: db,
        identity: Arc::new(InMemoryIdentityProvider::new()),
        storage: Arc::new(InMemoryObjectStorage::default()),
        gateway: Arc::new(MockPaymentGateway::new()),
        session_validator: Arc::new(MockSessionValidator::new()),
        settings: Arc::new(test_settings()),
    }
}
