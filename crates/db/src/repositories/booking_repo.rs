//! Repository for the `bookings` table.

use resort_core::booking::{BookingStatus, ACTIVE_STATUSES};
use resort_core::types::{DbId, Day};
use sqlx::{PgConnection, PgPool};

use crate::models::booking::{Booking, BookingListParams, NewBooking};

const COLUMNS: &str = "id, amenity_id, guest_name, guest_email, booking_date, guests, notes, \
                       status, total_price::FLOAT8 AS total_price, created_at, updated_at";

/// Provides data access for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Count the bookings of an amenity that occupy a unit on `day`.
    pub async fn count_active(
        conn: &mut PgConnection,
        amenity_id: DbId,
        day: Day,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings \
             WHERE amenity_id = $1 AND booking_date = $2 AND status = ANY($3)",
        )
        .bind(amenity_id)
        .bind(day)
        .bind(ACTIVE_STATUSES)
        .fetch_one(conn)
        .await
    }

    /// Insert a booking. Availability must already have been checked inside
    /// the same transaction.
    pub async fn insert(
        conn: &mut PgConnection,
        input: &NewBooking,
        status: BookingStatus,
        total_price: f64,
    ) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings \
                (amenity_id, guest_name, guest_email, booking_date, guests, notes, status, total_price) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8::NUMERIC) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.amenity_id)
            .bind(&input.guest_name)
            .bind(&input.guest_email)
            .bind(input.booking_date)
            .bind(input.guests)
            .bind(&input.notes)
            .bind(status.as_str())
            .bind(total_price)
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List bookings, optionally narrowed to one date and/or status.
    ///
    /// Ordered by booking date, then newest first within a day.
    pub async fn list(
        pool: &PgPool,
        params: &BookingListParams,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx = 1u32;

        if params.date.is_some() {
            conditions.push(format!("booking_date = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.status.is_some() {
            conditions.push(format!("status = ${bind_idx}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM bookings {where_clause} \
             ORDER BY booking_date DESC, id DESC"
        );

        let mut q = sqlx::query_as::<_, Booking>(&query);
        if let Some(date) = params.date {
            q = q.bind(date);
        }
        if let Some(status) = params.status {
            q = q.bind(status.as_str());
        }
        q.fetch_all(pool).await
    }

    /// Lock a booking row for a status transition.
    pub async fn lock_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    pub async fn update_status(
        conn: &mut PgConnection,
        id: DbId,
        status: BookingStatus,
    ) -> Result<Booking, sqlx::Error> {
        let query = format!("UPDATE bookings SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_one(conn)
            .await
    }
}
