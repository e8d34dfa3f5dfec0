//! Profile rows: role and premium membership.

use serde::{Deserialize, Serialize};

use super::identity::{format_provider, IdentityRecord};
use crate::domain::foundation::{Timestamp, UserId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    /// Anything other than `admin` is a regular user.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// Application-side profile keyed by the auth user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub id: UserId,
    pub role: Role,
    pub is_premium: bool,
    pub premium_since: Option<Timestamp>,
}

impl Profile {
    /// Defaults used when the user has no profile row yet.
    pub fn regular(id: UserId) -> Self {
        Self {
            id,
            role: Role::User,
            is_premium: false,
            premium_since: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Everything the profile page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    pub id: UserId,
    pub email: Option<String>,
    pub display_name: String,
    pub bio: Option<String>,
    pub provider: String,
    pub avatar_url: Option<String>,
    pub has_custom_avatar: bool,
    pub role: Role,
    pub is_premium: bool,
    pub premium_since: Option<Timestamp>,
}

impl ProfileView {
    pub fn assemble(record: &IdentityRecord, profile: &Profile) -> Self {
        Self {
            id: record.id,
            email: record.email.clone(),
            display_name: record.display_name(),
            bio: record.bio(),
            provider: format_provider(&record.provider()),
            avatar_url: record.avatar_url(),
            has_custom_avatar: record.custom_avatar_url().is_some(),
            role: profile.role,
            is_premium: profile.is_premium,
            premium_since: profile.premium_since,
        }
    }
}
