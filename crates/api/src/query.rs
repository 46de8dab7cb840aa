//! Shared query parameter types for API handlers.
//!
//! The dashboard sends camelCase keys and sometimes empty strings for unset
//! filters, so dates arrive as strings and are parsed here.

use chrono::NaiveDate;
use resort_core::sales::DateRange;
use resort_core::types::Day;
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Parse an optional `YYYY-MM-DD` value. Empty strings count as absent.
pub fn parse_day(name: &str, value: Option<&str>) -> AppResult<Option<Day>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("{name} must be a YYYY-MM-DD date, got {raw:?}"))),
    }
}

/// `?startDate=&endDate=` pair. Applied only when both are present.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateRangeParams {
    pub fn resolve(&self) -> AppResult<Option<DateRange>> {
        let start = parse_day("startDate", self.start_date.as_deref())?;
        let end = parse_day("endDate", self.end_date.as_deref())?;
        Ok(DateRange::from_optional(start, end)?)
    }
}

/// Query parameters for `GET /owner/sales`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportParams {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub filter_type: Option<String>,
}

/// Query parameters for `GET /owner/sales/history`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesHistoryParams {
    #[serde(flatten)]
    pub range: DateRangeParams,
    /// Service type filter. `All` disables it.
    pub category: Option<String>,
    pub payment_method: Option<String>,
}

/// Query parameters for `GET /owner/feedback`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackParams {
    #[serde(flatten)]
    pub range: DateRangeParams,
    /// `positive`, `neutral` or `negative`.
    pub filter: Option<String>,
}

/// Query parameters for `GET /owner/bookings`.
#[derive(Debug, Default, Deserialize)]
pub struct BookingListQuery {
    pub date: Option<String>,
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dates_are_absent() {
        let params = DateRangeParams {
            start_date: Some(String::new()),
            end_date: Some("2026-01-31".into()),
        };
        assert_eq!(params.resolve().unwrap(), None);
    }

    #[test]
    fn malformed_date_is_bad_request() {
        assert!(matches!(
            parse_day("startDate", Some("31/01/2026")),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn reversed_range_is_rejected() {
        let params = DateRangeParams {
            start_date: Some("2026-02-01".into()),
            end_date: Some("2026-01-01".into()),
        };
        assert!(params.resolve().is_err());
    }
}
