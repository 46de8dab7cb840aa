//! Sales reporting rules: report granularity, period resolution, date-range
//! bounds, and chart bucketing.
//!
//! All windows are half-open `[start, end)` intervals in UTC so that a
//! filter for "the 5th to the 7th" covers the whole of the 7th.

use chrono::{Datelike, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Day, Timestamp};

/// Number of transactions returned in the "recent sales" table.
pub const RECENT_SALES_LIMIT: i64 = 100;

/// Largest amount the `NUMERIC(12, 2)` sales column holds.
pub const MAX_SALE_AMOUNT: f64 = 9_999_999_999.99;

/// Filter value meaning "do not filter on this column".
pub const FILTER_ALL: &str = "All";

const MIN_REPORT_YEAR: i32 = 2000;
const MAX_REPORT_YEAR: i32 = 2100;

// ---------------------------------------------------------------------------
// Granularity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportGranularity {
    Monthly,
    Weekly,
    Daily,
}

impl ReportGranularity {
    /// Parse `?filterType=`. Missing means monthly.
    pub fn parse(s: Option<&str>) -> Result<Self, CoreError> {
        match s.map(str::trim) {
            None | Some("") | Some("monthly") => Ok(Self::Monthly),
            Some("weekly") => Ok(Self::Weekly),
            Some("daily") => Ok(Self::Daily),
            Some(other) => Err(CoreError::Validation(format!(
                "Invalid filterType '{other}'. Must be one of: monthly, weekly, daily"
            ))),
        }
    }

    /// Sort key and display label of the chart bucket that `ts` falls in.
    ///
    /// Monthly buckets are `Jan`..`Dec`, weekly buckets are ISO weeks
    /// (`Week 7`), and daily buckets are zero-padded days (`05`).
    pub fn bucket(self, ts: Timestamp) -> (u32, String) {
        match self {
            Self::Monthly => (ts.month(), ts.format("%b").to_string()),
            Self::Weekly => {
                let week = ts.iso_week().week();
                (week, format!("Week {week}"))
            }
            Self::Daily => (ts.day(), ts.format("%d").to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Date ranges
// ---------------------------------------------------------------------------

/// A half-open UTC interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

fn start_of(day: Day) -> Timestamp {
    Utc.from_utc_datetime(&day.and_time(NaiveTime::MIN))
}

fn ymd(year: i32, month: u32, day: u32) -> Result<Day, CoreError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| CoreError::Validation(format!("Invalid date {year}-{month}-{day}")))
}

impl DateRange {
    /// Inclusive day range: from the start of `start` to the end of `end`.
    pub fn from_days(start: Day, end: Day) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::Validation(format!(
                "startDate {start} is after endDate {end}"
            )));
        }
        let after_end = end
            .succ_opt()
            .ok_or_else(|| CoreError::Validation(format!("endDate {end} is out of range")))?;
        Ok(Self {
            start: start_of(start),
            end: start_of(after_end),
        })
    }

    /// A date filter applies only when both ends are supplied.
    pub fn from_optional(start: Option<Day>, end: Option<Day>) -> Result<Option<Self>, CoreError> {
        match (start, end) {
            (Some(s), Some(e)) => Self::from_days(s, e).map(Some),
            _ => Ok(None),
        }
    }

    /// The single calendar day containing `day`.
    pub fn day(day: Day) -> Result<Self, CoreError> {
        Self::from_days(day, day)
    }

    pub fn contains(&self, ts: Timestamp) -> bool {
        ts >= self.start && ts < self.end
    }
}

// ---------------------------------------------------------------------------
// Report period
// ---------------------------------------------------------------------------

/// The year (and month, for daily reports) a sales report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub year: i32,
    pub month: u32,
}

impl ReportPeriod {
    /// Fill missing parts from `today` and validate the result.
    pub fn resolve(year: Option<i32>, month: Option<u32>, today: Day) -> Result<Self, CoreError> {
        let year = year.unwrap_or_else(|| today.year());
        let month = month.unwrap_or_else(|| today.month());
        if !(MIN_REPORT_YEAR..=MAX_REPORT_YEAR).contains(&year) {
            return Err(CoreError::Validation(format!(
                "Year must be between {MIN_REPORT_YEAR} and {MAX_REPORT_YEAR}, got {year}"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(CoreError::Validation(format!(
                "Month must be between 1 and 12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year_range(&self) -> Result<DateRange, CoreError> {
        let first = ymd(self.year, 1, 1)?;
        let next = ymd(self.year + 1, 1, 1)?;
        Ok(DateRange {
            start: start_of(first),
            end: start_of(next),
        })
    }

    pub fn month_range(&self) -> Result<DateRange, CoreError> {
        let first = ymd(self.year, self.month, 1)?;
        let next = first
            .checked_add_months(Months::new(1))
            .ok_or_else(|| CoreError::Validation("Month is out of range".into()))?;
        Ok(DateRange {
            start: start_of(first),
            end: start_of(next),
        })
    }

    /// Window covered by the revenue chart and the service breakdown.
    ///
    /// Daily reports cover the requested month; the others cover the year.
    pub fn window(&self, granularity: ReportGranularity) -> Result<DateRange, CoreError> {
        match granularity {
            ReportGranularity::Daily => self.month_range(),
            ReportGranularity::Monthly | ReportGranularity::Weekly => self.year_range(),
        }
    }
}

/// Windows for the headline "today / this month / this year" figures.
#[derive(Debug, Clone, Copy)]
pub struct StatWindows {
    pub today: DateRange,
    pub this_month: DateRange,
    pub this_year: DateRange,
}

impl StatWindows {
    pub fn for_day(today: Day) -> Result<Self, CoreError> {
        let period = ReportPeriod {
            year: today.year(),
            month: today.month(),
        };
        Ok(Self {
            today: DateRange::day(today)?,
            this_month: period.month_range()?,
            this_year: period.year_range()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// `"All"`, empty, and missing all mean "no filter".
pub fn normalize_filter(value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        None | Some("") => None,
        Some(v) if v.eq_ignore_ascii_case(FILTER_ALL) => None,
        Some(v) => Some(v.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> Day {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn granularity_defaults_to_monthly() {
        assert_eq!(ReportGranularity::parse(None).unwrap(), ReportGranularity::Monthly);
        assert_eq!(
            ReportGranularity::parse(Some("daily")).unwrap(),
            ReportGranularity::Daily
        );
        assert_matches!(
            ReportGranularity::parse(Some("hourly")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn bucket_labels() {
        let ts = at(2026, 2, 5, 10);
        assert_eq!(ReportGranularity::Monthly.bucket(ts), (2, "Feb".to_string()));
        assert_eq!(ReportGranularity::Weekly.bucket(ts), (6, "Week 6".to_string()));
        assert_eq!(ReportGranularity::Daily.bucket(ts), (5, "05".to_string()));
    }

    #[test]
    fn inclusive_day_range_covers_whole_end_day() {
        let r = DateRange::from_days(day(2026, 3, 5), day(2026, 3, 7)).unwrap();
        assert!(r.contains(at(2026, 3, 5, 0)));
        assert!(r.contains(at(2026, 3, 7, 23)));
        assert!(!r.contains(at(2026, 3, 8, 0)));
        assert!(!r.contains(at(2026, 3, 4, 23)));
    }

    #[test]
    fn reversed_range_is_rejected() {
        assert!(DateRange::from_days(day(2026, 3, 7), day(2026, 3, 5)).is_err());
    }

    #[test]
    fn optional_range_requires_both_ends() {
        assert_eq!(DateRange::from_optional(Some(day(2026, 1, 1)), None).unwrap(), None);
        assert!(DateRange::from_optional(Some(day(2026, 1, 1)), Some(day(2026, 1, 2)))
            .unwrap()
            .is_some());
    }

    #[test]
    fn period_defaults_from_today() {
        let p = ReportPeriod::resolve(None, None, day(2026, 10, 17)).unwrap();
        assert_eq!(p, ReportPeriod { year: 2026, month: 10 });
        let p = ReportPeriod::resolve(Some(2025), None, day(2026, 10, 17)).unwrap();
        assert_eq!(p, ReportPeriod { year: 2025, month: 10 });
    }

    #[test]
    fn period_rejects_bad_month_and_year() {
        assert!(ReportPeriod::resolve(Some(2026), Some(13), day(2026, 1, 1)).is_err());
        assert!(ReportPeriod::resolve(Some(2026), Some(0), day(2026, 1, 1)).is_err());
        assert!(ReportPeriod::resolve(Some(1850), Some(1), day(2026, 1, 1)).is_err());
    }

    #[test]
    fn december_month_range_rolls_into_next_year() {
        let p = ReportPeriod { year: 2026, month: 12 };
        let r = p.month_range().unwrap();
        assert_eq!(r.start, at(2026, 12, 1, 0));
        assert_eq!(r.end, at(2027, 1, 1, 0));
    }

    #[test]
    fn daily_window_is_the_month_others_the_year() {
        let p = ReportPeriod { year: 2026, month: 4 };
        assert_eq!(p.window(ReportGranularity::Daily).unwrap(), p.month_range().unwrap());
        assert_eq!(p.window(ReportGranularity::Weekly).unwrap(), p.year_range().unwrap());
    }

    #[test]
    fn stat_windows_nest() {
        let w = StatWindows::for_day(day(2026, 10, 17)).unwrap();
        assert!(w.this_month.contains(w.today.start));
        assert!(w.this_year.contains(w.this_month.start));
    }

    #[test]
    fn all_means_no_filter() {
        assert_eq!(normalize_filter(Some("All")), None);
        assert_eq!(normalize_filter(Some("")), None);
        assert_eq!(normalize_filter(None), None);
        assert_eq!(normalize_filter(Some("Cash")).as_deref(), Some("Cash"));
    }
}
