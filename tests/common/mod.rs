//! Shared fixtures for the HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use fluxinkverse::adapters::auth::MockSessionValidator;
use fluxinkverse::adapters::http::{app_router, AppSettings, AppState};
use fluxinkverse::adapters::memory::{
    InMemoryDatabase, InMemoryIdentityProvider, InMemoryObjectStorage, MockPaymentGateway,
};
use fluxinkverse::application::handlers::account::AvatarSettings;
use fluxinkverse::application::handlers::catalog::CoverSettings;
use fluxinkverse::application::handlers::premium::PaymentSettings;
use fluxinkverse::application::handlers::reading::PageSource;
use fluxinkverse::domain::account::{Profile, Role};
use fluxinkverse::domain::catalog::Comic;
use fluxinkverse::domain::foundation::{AuthenticatedUser, ComicId, Timestamp, UserId};
use fluxinkverse::domain::premium::CallbackTokenVerifier;

pub const CALLBACK_TOKEN: &str = "cb-secret";
pub const READER_TOKEN: &str = "reader-token";
pub const ADMIN_TOKEN: &str = "admin-token";

pub struct TestApp {
    pub router: Router,
    pub db: Arc<InMemoryDatabase>,
    pub storage: InMemoryObjectStorage,
    pub gateway: MockPaymentGateway,
    pub reader: AuthenticatedUser,
    pub admin: AuthenticatedUser,
}

fn user(email: &str) -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::from_uuid(Uuid::new_v4()), email, None)
}

impl TestApp {
    pub async fn new() -> Self {
        let db = Arc::new(InMemoryDatabase::new());
        let storage = InMemoryObjectStorage::default();
        let gateway = MockPaymentGateway::new();
        let reader = user("reader@example.com");
        let admin = user("admin@example.com");

        db.put_profile(Profile {
            role: Role::Admin,
            ..Profile::regular(admin.id)
        })
        .await;

        let validator = MockSessionValidator::new()
            .with_user(READER_TOKEN, reader.clone())
            .with_user(ADMIN_TOKEN, admin.clone());

        let settings = AppSettings {
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
            callback_verifier: CallbackTokenVerifier::new(SecretString::new(
                CALLBACK_TOKEN.to_string(),
            )),
            site_url: "http://localhost:3000".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        };

        let state = AppState {
            comics: db.clone(),
            chapters: db.clone(),
            ratings: db.clone(),
            profiles: db.clone(),
            payments: db.clone(),
            announcements: db.clone(),
            identity: Arc::new(InMemoryIdentityProvider::new()),
            storage: Arc::new(storage.clone()),
            gateway: Arc::new(gateway.clone()),
            session_validator: Arc::new(validator),
            settings: Arc::new(settings),
        };

        Self {
            router: app_router(state),
            db,
            storage,
            gateway,
            reader,
            admin,
        }
    }

    /// Sends `request` and returns the status with the JSON body
    /// (`Value::Null` for an empty or non-JSON body).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn get_as(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        let request = Request::get(uri)
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }
}

/// A comic with the given id and title; slug is the lowercased,
/// dash-joined title.
pub fn comic(id: i64, title: &str) -> Comic {
    let now = Timestamp::now();
    Comic {
        id: ComicId::from_db(id),
        title: title.to_string(),
        slug: title.to_lowercase().replace(' ', "-"),
        cover_url: None,
        description: None,
        note: None,
        author: None,
        genres: Vec::new(),
        status: None,
        rating: None,
        rating_count: 0,
        views: 0,
        last_chapter: 0,
        created_at: now,
        updated_at: now,
    }
}
