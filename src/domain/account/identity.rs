//! Auth-provider user records and the profile fields derived from them.
//!
//! Display name, bio and custom avatar live in the provider's
//! `user_metadata`; social avatars arrive from OAuth identities.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{UserId, ValidationError};

pub type Metadata = Map<String, Value>;

const DISPLAY_NAME_KEYS: &[&str] = &["display_name", "full_name", "name", "user_name"];
const SOCIAL_AVATAR_KEYS: &[&str] = &["avatar_url", "picture", "avatar", "image", "profile_image_url"];
const IDENTITY_AVATAR_KEYS: &[&str] = &["avatar_url", "picture", "avatar", "image"];

/// Linked login method on a user account.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Identity {
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub identity_data: Metadata,
}

/// User as returned by the auth provider's user endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IdentityRecord {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Metadata,
    #[serde(default)]
    pub app_metadata: Metadata,
    #[serde(default)]
    pub identities: Vec<Identity>,
}

/// Trimmed non-empty string at `key`.
fn text<'a>(map: &'a Metadata, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn first_text<'a>(map: &'a Metadata, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| text(map, k))
}

impl IdentityRecord {
    /// Metadata name fields, then the email local part, then `"User"`.
    pub fn display_name(&self) -> String {
        first_text(&self.user_metadata, DISPLAY_NAME_KEYS)
            .or_else(|| {
                self.email
                    .as_deref()
                    .and_then(|e| e.split('@').next())
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or("User")
            .to_string()
    }

    pub fn bio(&self) -> Option<String> {
        text(&self.user_metadata, "bio").map(str::to_string)
    }

    /// Raw provider name: `app_metadata.provider`, first identity, `email`.
    pub fn provider(&self) -> String {
        text(&self.app_metadata, "provider")
            .or_else(|| {
                self.identities
                    .first()
                    .map(|i| i.provider.trim())
                    .filter(|s| !s.is_empty())
            })
            .unwrap_or("email")
            .to_string()
    }

    pub fn custom_avatar_url(&self) -> Option<String> {
        text(&self.user_metadata, "custom_avatar_url").map(str::to_string)
    }

    pub fn custom_avatar_path(&self) -> Option<String> {
        text(&self.user_metadata, "custom_avatar_path").map(str::to_string)
    }

    /// Avatar from OAuth metadata or any linked identity.
    pub fn social_avatar_url(&self) -> Option<String> {
        first_text(&self.user_metadata, SOCIAL_AVATAR_KEYS)
            .or_else(|| {
                self.identities
                    .iter()
                    .find_map(|i| first_text(&i.identity_data, IDENTITY_AVATAR_KEYS))
            })
            .map(str::to_string)
    }

    /// Uploaded avatar wins over the social one.
    pub fn avatar_url(&self) -> Option<String> {
        self.custom_avatar_url().or_else(|| self.social_avatar_url())
    }
}

/// Human label for a provider name.
pub fn format_provider(provider: &str) -> String {
    match provider.to_lowercase().as_str() {
        "google" => "Google".to_string(),
        "discord" => "Discord".to_string(),
        "email" => "Email".to_string(),
        "" => "Unknown".to_string(),
        _ => provider.to_string(),
    }
}

/// Metadata written back on a profile update. `display_name` and `bio` are
/// always sent (null clears them); avatar keys only when a new file was
/// stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetadataPatch {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_avatar_path: Option<String>,
}

impl MetadataPatch {
    pub fn new(display_name: Option<&str>, bio: Option<&str>) -> Self {
        let clean = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Self {
            display_name: clean(display_name),
            bio: clean(bio),
            custom_avatar_url: None,
            custom_avatar_path: None,
        }
    }

    pub fn with_avatar(mut self, url: String, path: String) -> Self {
        self.custom_avatar_url = Some(url);
        self.custom_avatar_path = Some(path);
        self
    }
}

/// OAuth providers offered on the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    Discord,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Discord => "discord",
        }
    }
}

impl std::str::FromStr for OAuthProvider {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(OAuthProvider::Google),
            "discord" => Ok(OAuthProvider::Discord),
            _ => Err(ValidationError::invalid_format(
                "provider",
                "expected google or discord",
            )),
        }
    }
}

/// Tokens returned by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user_id: UserId,
}

/// Validated email/password pair for sign-in and sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Result<Self, ValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing @ symbol"));
        }
        if password.is_empty() {
            return Err(ValidationError::empty_field("password"));
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}
