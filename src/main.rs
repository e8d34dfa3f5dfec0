//! FluxInkVerse API server.

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::Router;
use secrecy::SecretString;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use fluxinkverse::adapters::auth::SupabaseJwtValidator;
use fluxinkverse::adapters::http::{app_router, AppSettings, AppState};
use fluxinkverse::adapters::postgres::{
    PostgresAnnouncementRepository, PostgresChapterRepository, PostgresComicRepository,
    PostgresPaymentRepository, PostgresProfileRepository, PostgresRatingRepository,
};
use fluxinkverse::adapters::supabase::{SupabaseIdentityProvider, SupabaseObjectStorage};
use fluxinkverse::adapters::xendit::{XenditConfig, XenditQrGateway};
use fluxinkverse::application::handlers::account::AvatarSettings;
use fluxinkverse::application::handlers::catalog::CoverSettings;
use fluxinkverse::application::handlers::premium::PaymentSettings;
use fluxinkverse::application::handlers::reading::PageSource;
use fluxinkverse::config::{AppConfig, ServerConfig};
use fluxinkverse::domain::premium::CallbackTokenVerifier;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_tracing(&config.server);

    let mut connect_options: PgConnectOptions = config.database.url.parse()?;
    if let Some(capacity) = config.database.statement_cache() {
        connect_options = connect_options.statement_cache_capacity(capacity);
    }
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect_with(connect_options)
        .await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let state = build_state(&config, pool)?;
    let app = with_transport_layers(app_router(state), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "FluxInkVerse listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", server.log_level)));

    if server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn build_state(
    config: &AppConfig,
    pool: sqlx::PgPool,
) -> Result<AppState, Box<dyn std::error::Error>> {
    let http_client = reqwest::Client::builder()
        .timeout(config.server.request_timeout())
        .build()?;
    let supabase_url = config.auth.base_url().to_string();
    let service_role_key = SecretString::new(config.storage.service_role_key.clone());

    let xendit = XenditConfig::new(SecretString::new(config.payment.xendit_secret_key.clone()))
        .with_base_url(config.payment.api_base_url.clone())
        .with_api_version(config.payment.api_version.clone());

    let settings = AppSettings {
        pages: PageSource {
            storage_url: supabase_url.clone(),
            bucket: config.storage.pages_bucket.clone(),
        },
        covers: CoverSettings {
            bucket: config.storage.covers_bucket.clone(),
            max_bytes: config.storage.max_avatar_bytes,
        },
        avatars: AvatarSettings {
            bucket: config.storage.avatars_bucket.clone(),
            max_bytes: config.storage.max_avatar_bytes,
        },
        payment: PaymentSettings {
            default_amount: config.payment.default_amount,
            min_amount: config.payment.min_amount,
            currency: config.payment.currency.clone(),
        },
        callback_verifier: CallbackTokenVerifier::new(SecretString::new(
            config.payment.callback_token.clone(),
        )),
        site_url: config.server.site_url.clone(),
        max_upload_bytes: config.storage.max_upload_bytes,
    };

    Ok(AppState {
        comics: Arc::new(PostgresComicRepository::new(pool.clone())),
        chapters: Arc::new(PostgresChapterRepository::new(pool.clone())),
        ratings: Arc::new(PostgresRatingRepository::new(pool.clone())),
        profiles: Arc::new(PostgresProfileRepository::new(pool.clone())),
        payments: Arc::new(PostgresPaymentRepository::new(pool.clone())),
        announcements: Arc::new(PostgresAnnouncementRepository::new(pool)),
        identity: Arc::new(SupabaseIdentityProvider::new(
            supabase_url.clone(),
            config.auth.anon_key.clone(),
            service_role_key.clone(),
            http_client.clone(),
        )),
        storage: Arc::new(SupabaseObjectStorage::new(
            supabase_url,
            service_role_key,
            http_client.clone(),
        )),
        gateway: Arc::new(XenditQrGateway::new(xendit, http_client)),
        session_validator: Arc::new(SupabaseJwtValidator::new(
            &config.auth.jwt_secret,
            &config.auth.audience,
        )),
        settings: Arc::new(settings),
    })
}

fn with_transport_layers(app: Router, server: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    app.layer(CompressionLayer::new())
        .layer(cors_layer(server))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

/// Configured origins only; any origin outside production when none are set.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    let layer = if origins.is_empty() && !server.is_production() {
        CorsLayer::new().allow_origin(AllowOrigin::any())
    } else {
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    };

    layer
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-callback-token"),
        ])
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
