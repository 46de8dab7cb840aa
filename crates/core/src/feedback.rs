//! Feedback sentiment classification.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const MIN_RATING: i16 = 1;
pub const MAX_RATING: i16 = 5;

/// Sentiment bucket derived from a 1-5 star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// 4 and 5 are positive, 3 is neutral, anything lower is negative.
    pub fn from_rating(rating: i16) -> Self {
        if rating >= 4 {
            Self::Positive
        } else if rating == 3 {
            Self::Neutral
        } else {
            Self::Negative
        }
    }

    /// Parse the `?filter=` query value. Unrecognised values mean "no filter".
    pub fn parse_filter(filter: Option<&str>) -> Option<Self> {
        match filter.map(|f| f.trim().to_ascii_lowercase()).as_deref() {
            Some("positive") => Some(Self::Positive),
            Some("neutral") => Some(Self::Neutral),
            Some("negative") => Some(Self::Negative),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Neutral => "Neutral",
            Self::Negative => "Negative",
        }
    }

    /// Inclusive rating bounds covered by this bucket.
    pub fn rating_bounds(self) -> (i16, i16) {
        match self {
            Self::Positive => (4, MAX_RATING),
            Self::Neutral => (3, 3),
            Self::Negative => (MIN_RATING, 2),
        }
    }
}

/// Validate a submitted rating.
pub fn validate_rating(rating: i16) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )))
    }
}
