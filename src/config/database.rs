//! PostgreSQL connection settings.
//!
//! FluxInkVerse normally talks to the Postgres instance behind a Supabase
//! project. The transaction-mode pooler on port 6543 cannot keep prepared
//! statements across transactions, so the statement cache is disabled for
//! pooled URLs.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Port of Supabase's transaction-mode connection pooler.
const SUPABASE_POOLER_PORT: &str = ":6543";

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://` connection URL
    pub url: String,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Supabase's free tier caps direct connections, keep this small.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Prepared statements kept per connection; `None` picks 0 for pooler
    /// URLs and the sqlx default otherwise.
    #[serde(default)]
    pub statement_cache_capacity: Option<usize>,

    /// Apply `migrations/` on startup
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Whether the URL points at the transaction-mode pooler.
    pub fn uses_pooler(&self) -> bool {
        self.url.contains(SUPABASE_POOLER_PORT)
    }

    /// Statement cache size to configure, if it differs from the sqlx default.
    pub fn statement_cache(&self) -> Option<usize> {
        match self.statement_cache_capacity {
            Some(capacity) => Some(capacity),
            None if self.uses_pooler() => Some(0),
            None => None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE_URL"));
        }
        if !["postgres://", "postgresql://"].iter().any(|s| url.starts_with(s)) {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        if self.max_connections == 0 || self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > 100 {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            statement_cache_capacity: None,
            run_migrations: false,
        }
    }
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}
