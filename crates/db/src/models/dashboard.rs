//! Owner overview aggregates.

use serde::Serialize;
use sqlx::FromRow;

use super::sale::NamedAmount;

/// A labelled row count (feedback sentiment slice).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub value: i64,
}

/// Response body of `GET /owner/dashboard/stats`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_revenue: f64,
    pub total_transactions: i64,
    pub total_feedback: i64,
    pub sales_by_service: Vec<NamedAmount>,
    pub feedback_distribution: Vec<NamedCount>,
}
