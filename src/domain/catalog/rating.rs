//! Star ratings readers give to comics.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// One to five stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct StarRating(u8);

impl StarRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if !(Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            return Err(ValidationError::out_of_range(
                "rating",
                Self::MIN as i64,
                Self::MAX as i64,
                value,
            ));
        }
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i16> for StarRating {
    type Error = ValidationError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::new(value as i64)
    }
}

impl From<StarRating> for i16 {
    fn from(rating: StarRating) -> Self {
        rating.0 as i16
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Aggregate shown next to the stars after a vote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    /// Average rounded to two decimals; absent when nobody rated.
    pub average: Option<f64>,
    pub count: i64,
}

impl RatingSummary {
    pub fn from_votes(votes: &[StarRating]) -> Self {
        if votes.is_empty() {
            return Self {
                average: None,
                count: 0,
            };
        }
        let sum: u32 = votes.iter().map(|v| v.value() as u32).sum();
        let avg = sum as f64 / votes.len() as f64;
        Self {
            average: Some((avg * 100.0).round() / 100.0),
            count: votes.len() as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_one_through_five() {
        for v in 1..=5 {
            assert_eq!(StarRating::new(v).unwrap().value() as i64, v);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(StarRating::new(0).is_err());
        assert!(StarRating::new(6).is_err());
        assert!(StarRating::new(-1).is_err());
    }

    #[test]
    fn deserializes_with_validation() {
        let ok: StarRating = serde_json::from_str("4").unwrap();
        assert_eq!(ok.value(), 4);
        assert!(serde_json::from_str::<StarRating>("9").is_err());
    }

    #[test]
    fn summary_of_votes() {
        let votes: Vec<StarRating> = [5, 4, 4].iter().map(|v| StarRating::new(*v).unwrap()).collect();
        let summary = RatingSummary::from_votes(&votes);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, Some(4.33));

        let empty = RatingSummary::from_votes(&[]);
        assert_eq!(empty.average, None);
        assert_eq!(empty.count, 0);
    }
}
