//! Owner sales reporting.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use resort_core::sales::{normalize_filter, ReportGranularity, ReportPeriod};
use resort_db::models::sale::{CreateSale, SalesHistoryFilter};
use resort_db::models::validate_input;

use crate::error::AppResult;
use crate::query::{SalesHistoryParams, SalesReportParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/owner/sales?year=&month=&filterType=
///
/// Chart buckets, service breakdown, recent transactions and headline stats.
pub async fn report(
    State(state): State<AppState>,
    Query(params): Query<SalesReportParams>,
) -> AppResult<impl IntoResponse> {
    let today = Utc::now().date_naive();
    let granularity = ReportGranularity::parse(params.filter_type.as_deref())?;
    let period = ReportPeriod::resolve(params.year, params.month, today)?;

    let report = state.store.sales_report(granularity, period, today).await?;
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/owner/sales/years
pub async fn years(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let years = state.store.sales_years().await?;
    Ok(Json(DataResponse { data: years }))
}

/// GET /api/v1/owner/sales/history?startDate=&endDate=&category=&paymentMethod=
pub async fn history(
    State(state): State<AppState>,
    Query(params): Query<SalesHistoryParams>,
) -> AppResult<impl IntoResponse> {
    let filter = SalesHistoryFilter {
        range: params.range.resolve()?,
        service_type: normalize_filter(params.category.as_deref()),
        payment_method: normalize_filter(params.payment_method.as_deref()),
    };
    let sales = state.store.sales_history(filter).await?;
    Ok(Json(DataResponse { data: sales }))
}

/// POST /api/v1/owner/sales
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSale>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;
    let date = input.date.unwrap_or_else(Utc::now);
    let sale = state.store.record_sale(input, date).await?;

    tracing::info!(
        sale_id = sale.id,
        service_type = %sale.service_type,
        amount = sale.amount,
        "Sale recorded"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: sale })))
}
