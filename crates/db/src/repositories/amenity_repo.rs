//! Repository for the `amenities` table.

use resort_core::booking::ACTIVE_STATUSES;
use resort_core::types::{DbId, Day};
use sqlx::{PgConnection, PgPool};

use crate::models::amenity::{Amenity, AmenityPatch, AmenityWithActivity, NewAmenity};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, category, price::FLOAT8 AS price, capacity, \
                       quantity, available, image, created_at, updated_at";

/// Correlated subquery counting the active bookings of the outer amenity on
/// the day bound to `$1`, with the active status list bound to `$2`.
const BOOKED_ON_DAY: &str = "(SELECT COUNT(*) FROM bookings b \
                              WHERE b.amenity_id = amenities.id \
                                AND b.booking_date = $1 \
                                AND b.status = ANY($2)) AS booked_today";

/// Provides CRUD operations for amenities.
pub struct AmenityRepo;

impl AmenityRepo {
    /// Insert a new amenity, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewAmenity) -> Result<Amenity, sqlx::Error> {
        let query = format!(
            "INSERT INTO amenities \
                (name, description, category, price, capacity, quantity, available, image) \
             VALUES ($1, $2, $3, $4::NUMERIC, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Amenity>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.category.as_str())
            .bind(input.price)
            .bind(input.capacity)
            .bind(input.quantity)
            .bind(input.available)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    /// Find an amenity by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Amenity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM amenities WHERE id = $1");
        sqlx::query_as::<_, Amenity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lock an amenity row for the remainder of the transaction.
    ///
    /// Concurrent bookings of the same amenity serialize on this lock, so
    /// the active count read after it cannot go stale before commit.
    pub async fn lock_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Amenity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM amenities WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Amenity>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List all amenities with their active booking count on `day`.
    ///
    /// Newest first.
    pub async fn list_with_activity(
        pool: &PgPool,
        day: Day,
    ) -> Result<Vec<AmenityWithActivity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS}, {BOOKED_ON_DAY} FROM amenities ORDER BY id DESC");
        sqlx::query_as::<_, AmenityWithActivity>(&query)
            .bind(day)
            .bind(ACTIVE_STATUSES)
            .fetch_all(pool)
            .await
    }

    /// Find one amenity with its active booking count on `day`.
    pub async fn find_with_activity(
        pool: &PgPool,
        id: DbId,
        day: Day,
    ) -> Result<Option<AmenityWithActivity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS}, {BOOKED_ON_DAY} FROM amenities WHERE id = $3");
        sqlx::query_as::<_, AmenityWithActivity>(&query)
            .bind(day)
            .bind(ACTIVE_STATUSES)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update an amenity. Only non-`None` fields are applied.
    ///
    /// Returns the updated row together with the image reference it held
    /// before the update, or `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &AmenityPatch,
    ) -> Result<Option<(Amenity, Option<String>)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous_image: Option<Option<String>> =
            sqlx::query_scalar("SELECT image FROM amenities WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(previous_image) = previous_image else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE amenities SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                category = COALESCE($4, category), \
                price = COALESCE($5::NUMERIC, price), \
                capacity = COALESCE($6, capacity), \
                quantity = COALESCE($7, quantity), \
                available = COALESCE($8, available), \
                image = COALESCE($9, image) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let amenity = sqlx::query_as::<_, Amenity>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.category.map(|c| c.as_str()))
            .bind(input.price)
            .bind(input.capacity)
            .bind(input.quantity)
            .bind(input.available)
            .bind(&input.image)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some((amenity, previous_image)))
    }

    /// Delete an amenity, returning the deleted row so its image can be
    /// released. Bookings cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Amenity>, sqlx::Error> {
        let query = format!("DELETE FROM amenities WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Amenity>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
