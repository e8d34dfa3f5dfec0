//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Supabase Auth (GoTrue) configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`
    pub supabase_url: String,

    /// Public anon key sent as `apikey` on GoTrue calls
    pub anon_key: String,

    /// HS256 secret that signs Supabase access tokens
    pub jwt_secret: String,

    /// Expected `aud` claim
    #[serde(default = "default_audience")]
    pub audience: String,
}

impl AuthConfig {
    /// Project URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.supabase_url.trim_end_matches('/')
    }

    /// In production the project URL must be HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.supabase_url.is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE_URL"));
        }
        if !self.supabase_url.starts_with("http://") && !self.supabase_url.starts_with("https://") {
            return Err(ValidationError::InvalidSupabaseUrl);
        }
        if self.anon_key.is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE_ANON_KEY"));
        }
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("SUPABASE_JWT_SECRET"));
        }
        if *environment == Environment::Production && !self.supabase_url.starts_with("https://") {
            return Err(ValidationError::SupabaseUrlMustBeHttps);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            anon_key: String::new(),
            jwt_secret: String::new(),
            audience: default_audience(),
        }
    }
}

fn default_audience() -> String {
    "authenticated".to_string()
}
