//! Repository for the `feedback` table.

use resort_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::dashboard::NamedCount;
use crate::models::feedback::{CreateFeedback, Feedback, FeedbackFilter};

const COLUMNS: &str = "id, customer_name, rating, comment, date, created_at";

/// Provides data access for customer feedback.
pub struct FeedbackRepo;

impl FeedbackRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateFeedback,
        date: Timestamp,
    ) -> Result<Feedback, sqlx::Error> {
        let query = format!(
            "INSERT INTO feedback (customer_name, rating, comment, date) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(&input.customer_name)
            .bind(input.rating)
            .bind(&input.comment)
            .bind(date)
            .fetch_one(pool)
            .await
    }

    /// List feedback matching the filter, newest first.
    pub async fn list(pool: &PgPool, filter: &FeedbackFilter) -> Result<Vec<Feedback>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx = 1u32;

        if filter.range.is_some() {
            conditions.push(format!("date >= ${bind_idx} AND date < ${}", bind_idx + 1));
            bind_idx += 2;
        }
        if filter.sentiment.is_some() {
            conditions.push(format!("rating BETWEEN ${bind_idx} AND ${}", bind_idx + 1));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!("SELECT {COLUMNS} FROM feedback {where_clause} ORDER BY date DESC, id DESC");

        let mut q = sqlx::query_as::<_, Feedback>(&query);
        if let Some(range) = &filter.range {
            q = q.bind(range.start).bind(range.end);
        }
        if let Some(sentiment) = filter.sentiment {
            let (low, high) = sentiment.rating_bounds();
            q = q.bind(low).bind(high);
        }
        q.fetch_all(pool).await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM feedback")
            .fetch_one(pool)
            .await
    }

    /// Feedback count per sentiment bucket. Buckets with no entries are
    /// omitted.
    pub async fn distribution(pool: &PgPool) -> Result<Vec<NamedCount>, sqlx::Error> {
        sqlx::query_as::<_, NamedCount>(
            "SELECT name, COUNT(*) AS value FROM ( \
                SELECT CASE \
                    WHEN rating >= 4 THEN 'Positive' \
                    WHEN rating = 3 THEN 'Neutral' \
                    ELSE 'Negative' \
                END AS name \
                FROM feedback \
             ) buckets \
             GROUP BY name \
             ORDER BY value DESC, name",
        )
        .fetch_all(pool)
        .await
    }
}
