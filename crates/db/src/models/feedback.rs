//! Customer feedback entity model and DTOs.

use resort_core::feedback::Sentiment;
use resort_core::sales::DateRange;
use resort_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `feedback` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: DbId,
    pub customer_name: Option<String>,
    pub rating: i16,
    pub comment: Option<String>,
    pub date: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for `POST /feedback`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedback {
    #[validate(length(max = 200))]
    pub customer_name: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

/// Resolved filters for the owner feedback report.
#[derive(Debug, Clone, Default)]
pub struct FeedbackFilter {
    pub range: Option<DateRange>,
    pub sentiment: Option<Sentiment>,
}
