//! Repository for the `sales` table and its revenue aggregates.

use resort_core::sales::{DateRange, ReportGranularity};
use resort_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::sale::{ChartPoint, CreateSale, NamedAmount, Sale, SalesHistoryFilter};

const COLUMNS: &str = "id, date, customer_name, service_type, payment_method, \
                       amount::FLOAT8 AS amount, booking_id, created_at";

/// The sale timestamp as a UTC wall-clock value, for bucketing.
const UTC_DATE: &str = "(date AT TIME ZONE 'UTC')";

/// Sort-key and label SQL expressions for one chart granularity.
fn bucket_sql(granularity: ReportGranularity) -> (String, String) {
    match granularity {
        ReportGranularity::Monthly => (
            format!("EXTRACT(MONTH FROM {UTC_DATE})"),
            format!("to_char({UTC_DATE}, 'Mon')"),
        ),
        ReportGranularity::Weekly => (
            format!("EXTRACT(WEEK FROM {UTC_DATE})"),
            format!("'Week ' || EXTRACT(WEEK FROM {UTC_DATE})::INT"),
        ),
        ReportGranularity::Daily => (
            format!("EXTRACT(DAY FROM {UTC_DATE})"),
            format!("to_char({UTC_DATE}, 'DD')"),
        ),
    }
}

/// Provides data access for sales.
pub struct SaleRepo;

impl SaleRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateSale,
        date: Timestamp,
    ) -> Result<Sale, sqlx::Error> {
        let query = format!(
            "INSERT INTO sales (date, customer_name, service_type, payment_method, amount, booking_id) \
             VALUES ($1, $2, $3, $4, $5::NUMERIC, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sale>(&query)
            .bind(date)
            .bind(&input.customer_name)
            .bind(&input.service_type)
            .bind(&input.payment_method)
            .bind(input.amount)
            .bind(input.booking_id)
            .fetch_one(pool)
            .await
    }

    /// Transaction history, newest first.
    pub async fn history(
        pool: &PgPool,
        filter: &SalesHistoryFilter,
    ) -> Result<Vec<Sale>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx = 1u32;

        if filter.range.is_some() {
            conditions.push(format!("date >= ${bind_idx} AND date < ${}", bind_idx + 1));
            bind_idx += 2;
        }
        if filter.service_type.is_some() {
            conditions.push(format!("service_type = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.payment_method.is_some() {
            conditions.push(format!("payment_method = ${bind_idx}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!("SELECT {COLUMNS} FROM sales {where_clause} ORDER BY date DESC, id DESC");

        let mut q = sqlx::query_as::<_, Sale>(&query);
        if let Some(range) = &filter.range {
            q = q.bind(range.start).bind(range.end);
        }
        if let Some(service_type) = &filter.service_type {
            q = q.bind(service_type);
        }
        if let Some(payment_method) = &filter.payment_method {
            q = q.bind(payment_method);
        }
        q.fetch_all(pool).await
    }

    /// Most recent transactions across all time.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<Sale>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sales ORDER BY date DESC, id DESC LIMIT $1");
        sqlx::query_as::<_, Sale>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Distinct calendar years that have at least one sale, newest first.
    pub async fn years(pool: &PgPool) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar(&format!(
            "SELECT DISTINCT EXTRACT(YEAR FROM {UTC_DATE})::INT AS year \
             FROM sales ORDER BY year DESC"
        ))
        .fetch_all(pool)
        .await
    }

    /// Revenue per chart bucket inside `window`, in bucket order. Empty
    /// buckets are omitted.
    pub async fn chart(
        pool: &PgPool,
        granularity: ReportGranularity,
        window: &DateRange,
    ) -> Result<Vec<ChartPoint>, sqlx::Error> {
        let (key, label) = bucket_sql(granularity);
        let query = format!(
            "SELECT {label} AS label, SUM(amount)::FLOAT8 AS total \
             FROM sales WHERE date >= $1 AND date < $2 \
             GROUP BY {key}, {label} \
             ORDER BY {key}"
        );
        sqlx::query_as::<_, ChartPoint>(&query)
            .bind(window.start)
            .bind(window.end)
            .fetch_all(pool)
            .await
    }

    /// Revenue per service type, optionally restricted to a window.
    ///
    /// Largest first.
    pub async fn by_service(
        pool: &PgPool,
        window: Option<&DateRange>,
    ) -> Result<Vec<NamedAmount>, sqlx::Error> {
        let where_clause = if window.is_some() {
            "WHERE date >= $1 AND date < $2"
        } else {
            ""
        };
        let query = format!(
            "SELECT service_type AS name, SUM(amount)::FLOAT8 AS value \
             FROM sales {where_clause} \
             GROUP BY service_type \
             ORDER BY value DESC, name"
        );
        let mut q = sqlx::query_as::<_, NamedAmount>(&query);
        if let Some(range) = window {
            q = q.bind(range.start).bind(range.end);
        }
        q.fetch_all(pool).await
    }

    /// Total revenue inside `window`. Zero when there are no sales.
    pub async fn sum_in_range(pool: &PgPool, window: &DateRange) -> Result<f64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount), 0)::FLOAT8 FROM sales WHERE date >= $1 AND date < $2",
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_one(pool)
        .await
    }

    /// All-time revenue and transaction count.
    pub async fn totals(pool: &PgPool) -> Result<(f64, i64), sqlx::Error> {
        sqlx::query_as("SELECT COALESCE(SUM(amount), 0)::FLOAT8, COUNT(*) FROM sales")
            .fetch_one(pool)
            .await
    }
}
