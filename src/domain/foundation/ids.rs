//! Strongly-typed identifier value objects.
//!
//! Content rows use Postgres `bigserial` keys; users are identified by the
//! auth provider's UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

macro_rules! serial_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an id, rejecting non-positive values.
            pub fn new(value: i64) -> Result<Self, ValidationError> {
                if value < 1 {
                    return Err(ValidationError::out_of_range($field, 1, i64::MAX, value));
                }
                Ok(Self(value))
            }

            /// Wraps a key read back from the database.
            pub fn from_db(value: i64) -> Self {
                Self(value)
            }

            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| ValidationError::invalid_format($field, "expected a positive integer"))?;
                Self::new(value)
            }
        }
    };
}

serial_id!(
    /// Identifier of a comic.
    ComicId,
    "comic_id"
);
serial_id!(
    /// Identifier of a chapter row.
    ChapterId,
    "chapter_id"
);
serial_id!(
    /// Identifier of an announcement.
    AnnouncementId,
    "announcement_id"
);
serial_id!(
    /// Identifier of a payment row.
    PaymentId,
    "payment_id"
);

/// Auth provider user identifier (the `sub` claim).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| ValidationError::invalid_format("user_id", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comic_id_rejects_non_positive() {
        assert!(ComicId::new(0).is_err());
        assert!(ComicId::new(-4).is_err());
        assert_eq!(ComicId::new(7).unwrap().value(), 7);
    }

    #[test]
    fn serial_id_parses_from_path_segment() {
        assert_eq!("42".parse::<ChapterId>().unwrap().value(), 42);
        assert!("abc".parse::<ChapterId>().is_err());
        assert!("0".parse::<PaymentId>().is_err());
    }

    #[test]
    fn serial_id_serializes_transparently() {
        let json = serde_json::to_string(&AnnouncementId::from_db(3)).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn user_id_parses_uuid() {
        let raw = "5b0d7c1e-4a4b-4f0e-9b43-2f1f7e0d6c11";
        let id: UserId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn user_id_rejects_empty_and_garbage() {
        match "".parse::<UserId>() {
            Err(ValidationError::EmptyField { field }) => assert_eq!(field, "user_id"),
            other => panic!("unexpected: {:?}", other),
        }
        assert!("not-a-uuid".parse::<UserId>().is_err());
    }
}
