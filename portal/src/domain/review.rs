//! Residency reviews written by students.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::residency::string_id;

string_id!(
    /// Service-assigned review identifier (`_id`).
    ReviewId,
    "review"
);

/// Lowest accepted rating.
pub const RATING_MIN: u8 = 1;
/// Highest accepted rating, also the draft default.
pub const RATING_MAX: u8 = 5;

/// Error returned when a rating falls outside `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("rating must be between 1 and 5, got {0}")]
pub struct RatingOutOfRange(pub u8);

/// Star rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Validate and construct a rating.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::Rating;
    ///
    /// assert_eq!(Rating::new(4).map(Rating::get), Ok(4));
    /// assert!(Rating::new(0).is_err());
    /// ```
    pub fn new(value: u8) -> Result<Self, RatingOutOfRange> {
        if (RATING_MIN..=RATING_MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingOutOfRange(value))
        }
    }

    /// Numeric value.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(RATING_MAX)
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.0 == 1 { "Star" } else { "Stars" };
        write!(f, "{} {noun}", self.0)
    }
}

/// A review as stored by the service. Only its author may delete it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Immutable identity.
    #[serde(rename = "_id")]
    pub id: ReviewId,
    /// Author.
    pub username: String,
    /// Reviewed residency.
    pub residency_id: String,
    /// Star rating.
    pub rating: Rating,
    /// Review body.
    pub review_text: String,
    /// Creation time exactly as the service rendered it.
    #[serde(default)]
    pub timestamp: String,
}

impl Review {
    /// Creation time, when the timestamp is RFC 3339 or RFC 2822.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .or_else(|_| DateTime::parse_from_rfc2822(&self.timestamp))
            .ok()
            .map(|at| at.with_timezone(&Utc))
    }
}

/// Validation errors returned by [`ReviewDraft::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewValidationError {
    /// Review body was blank.
    MissingText,
}

impl fmt::Display for ReviewValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingText => write!(f, "review text is required"),
        }
    }
}

impl std::error::Error for ReviewValidationError {}

/// Review form state; the body of `POST /reviews`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewDraft {
    /// Residency selected on the form.
    pub residency_id: String,
    /// Star rating, five by default.
    pub rating: Rating,
    /// Review body.
    pub review_text: String,
}

impl ReviewDraft {
    /// Check the fields the review form marks as required.
    pub fn validate(&self) -> Result<(), ReviewValidationError> {
        if self.review_text.trim().is_empty() {
            return Err(ReviewValidationError::MissingText);
        }
        Ok(())
    }
}
