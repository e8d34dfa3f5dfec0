//! PostgreSQL implementation of ProfileRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::{Profile, Role};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::ProfileRepository;

pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    role: Option<String>,
    is_premium: Option<bool>,
    premium_since: Option<DateTime<Utc>>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: UserId::from_uuid(row.id),
            role: row.role.as_deref().map(Role::parse).unwrap_or_default(),
            is_premium: row.is_premium.unwrap_or(false),
            premium_since: row.premium_since.map(Timestamp::from_datetime),
        }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> =
            sqlx::query_as("SELECT id, role, is_premium, premium_since FROM profiles WHERE id = $1")
                .bind(user_id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(ErrorCode::DatabaseError, format!("Failed to find profile: {}", e))
                })?;

        Ok(row.map(Profile::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_columns_fall_back_to_regular_user() {
        let id = Uuid::new_v4();
        let profile = Profile::from(ProfileRow {
            id,
            role: None,
            is_premium: None,
            premium_since: None,
        });
        assert_eq!(profile, Profile::regular(UserId::from_uuid(id)));
    }

    #[test]
    fn admin_role_is_parsed() {
        let profile = Profile::from(ProfileRow {
            id: Uuid::new_v4(),
            role: Some("ADMIN".into()),
            is_premium: Some(true),
            premium_since: Some(Utc::now()),
        });
        assert!(profile.is_admin());
        assert!(profile.is_premium);
    }
}
