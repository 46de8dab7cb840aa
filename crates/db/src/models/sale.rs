//! Sales entity model, DTOs, and reporting aggregates.

use resort_core::sales::{DateRange, MAX_SALE_AMOUNT};
use resort_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `sales` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: DbId,
    pub date: Timestamp,
    pub customer_name: Option<String>,
    pub service_type: String,
    pub payment_method: String,
    pub amount: f64,
    pub booking_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for recording a sale.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSale {
    /// Defaults to now when omitted.
    pub date: Option<Timestamp>,
    pub customer_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub service_type: String,
    #[validate(length(min = 1, max = 50))]
    pub payment_method: String,
    #[validate(range(min = 0.0, max = MAX_SALE_AMOUNT))]
    pub amount: f64,
    pub booking_id: Option<DbId>,
}

/// Resolved filters for the transaction history.
#[derive(Debug, Clone, Default)]
pub struct SalesHistoryFilter {
    pub range: Option<DateRange>,
    pub service_type: Option<String>,
    pub payment_method: Option<String>,
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// One bar of the revenue chart.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub total: f64,
}

/// A labelled revenue total (pie chart slice).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct NamedAmount {
    pub name: String,
    pub value: f64,
}

/// Headline revenue figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    pub today: f64,
    pub this_month: f64,
    pub this_year: f64,
}

/// Response body of `GET /owner/sales`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub chart_data: Vec<ChartPoint>,
    pub service_data: Vec<NamedAmount>,
    pub recent_sales: Vec<Sale>,
    pub stats: SalesStats,
}
