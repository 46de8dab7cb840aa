//! The data-access interface handed to request handlers.
//!
//! Handlers never touch a pool directly. They receive an
//! `Arc<dyn ResortStore>` through application state, which is a
//! [`PgStore`] in production and a [`MemoryStore`] in API tests. Both
//! implementations share the booking gate in [`admit_booking`].

mod memory;
mod pg;

use async_trait::async_trait;
use resort_core::availability::evaluate;
use resort_core::booking::{compute_total_price, validate_guests, BookingStatus};
use resort_core::error::CoreError;
use resort_core::sales::{ReportGranularity, ReportPeriod};
use resort_core::types::{DbId, Day, Timestamp};

use crate::models::amenity::{Amenity, AmenityPatch, AmenityWithActivity, NewAmenity};
use crate::models::booking::{Booking, BookingListParams, NewBooking};
use crate::models::dashboard::DashboardStats;
use crate::models::feedback::{CreateFeedback, Feedback, FeedbackFilter};
use crate::models::sale::{CreateSale, Sale, SalesHistoryFilter, SalesReport};

pub use memory::MemoryStore;
pub use pg::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// An amenity after an update, plus the image reference it held before.
#[derive(Debug, Clone)]
pub struct UpdatedAmenity {
    pub amenity: Amenity,
    pub previous_image: Option<String>,
}

#[async_trait]
pub trait ResortStore: Send + Sync {
    // --- Amenities ---

    /// Every amenity with its active booking count on `day`, newest first.
    async fn list_amenities(&self, day: Day) -> Result<Vec<AmenityWithActivity>, StoreError>;

    async fn get_amenity(&self, id: DbId, day: Day) -> Result<AmenityWithActivity, StoreError>;

    async fn create_amenity(&self, input: NewAmenity) -> Result<Amenity, StoreError>;

    async fn update_amenity(
        &self,
        id: DbId,
        patch: AmenityPatch,
    ) -> Result<UpdatedAmenity, StoreError>;

    /// Delete an amenity and its bookings, returning the removed row.
    async fn delete_amenity(&self, id: DbId) -> Result<Amenity, StoreError>;

    // --- Bookings ---

    /// Insert a booking if the amenity has a free unit on the booking date.
    ///
    /// The check and the insert are atomic with respect to other bookings
    /// of the same amenity.
    async fn create_booking(&self, input: NewBooking) -> Result<Booking, StoreError>;

    async fn list_bookings(&self, params: BookingListParams) -> Result<Vec<Booking>, StoreError>;

    async fn update_booking_status(
        &self,
        id: DbId,
        status: BookingStatus,
    ) -> Result<Booking, StoreError>;

    // --- Sales ---

    async fn record_sale(&self, input: CreateSale, date: Timestamp) -> Result<Sale, StoreError>;

    async fn sales_report(
        &self,
        granularity: ReportGranularity,
        period: ReportPeriod,
        today: Day,
    ) -> Result<SalesReport, StoreError>;

    async fn sales_years(&self) -> Result<Vec<i32>, StoreError>;

    async fn sales_history(&self, filter: SalesHistoryFilter) -> Result<Vec<Sale>, StoreError>;

    // --- Feedback ---

    async fn create_feedback(
        &self,
        input: CreateFeedback,
        date: Timestamp,
    ) -> Result<Feedback, StoreError>;

    async fn list_feedback(&self, filter: FeedbackFilter) -> Result<Vec<Feedback>, StoreError>;

    // --- Overview ---

    async fn dashboard_stats(&self) -> Result<DashboardStats, StoreError>;

    /// Whether the backing store is reachable.
    async fn health(&self) -> bool;
}

/// Decide whether a booking may be inserted, given the amenity row and its
/// current active count on the booking date. Returns the total price.
pub(crate) fn admit_booking(
    amenity: &Amenity,
    active_count: i64,
    input: &NewBooking,
) -> Result<f64, CoreError> {
    validate_guests(input.guests, amenity.capacity)?;
    ensure_free_unit(amenity, active_count, input.booking_date)?;
    Ok(compute_total_price(amenity.price, input.guests))
}

/// Fail with a conflict unless the amenity has a unit left on `day`.
///
/// Runs whenever a booking starts counting against inventory, either on
/// insert or when a pending booking is confirmed.
pub(crate) fn ensure_free_unit(
    amenity: &Amenity,
    active_count: i64,
    day: Day,
) -> Result<(), CoreError> {
    let verdict = evaluate(&amenity.inventory(), Some(active_count));
    if verdict.available {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "{} is not available on {}",
            amenity.name, day
        )))
    }
}

fn not_found(entity: &'static str, id: DbId) -> StoreError {
    StoreError::Core(CoreError::NotFound { entity, id })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{NaiveDate, Utc};

    fn amenity(quantity: Option<i32>, available: &str) -> Amenity {
        Amenity {
            id: 1,
            name: "Family Kubo".into(),
            description: None,
            category: "kubo".into(),
            price: 500.0,
            capacity: 6,
            quantity,
            available: available.into(),
            image: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn request(guests: i32) -> NewBooking {
        NewBooking {
            amenity_id: 1,
            guest_name: "Ana".into(),
            guest_email: None,
            booking_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            guests,
            notes: None,
        }
    }

    #[test]
    fn admits_when_a_unit_is_free() {
        let total = admit_booking(&amenity(Some(2), "Yes"), 1, &request(4)).unwrap();
        assert_eq!(total, 2000.0);
    }

    #[test]
    fn rejects_when_fully_booked() {
        let result = admit_booking(&amenity(Some(2), "Yes"), 2, &request(1));
        assert_matches!(result, Err(CoreError::Conflict(_)));
    }

    #[test]
    fn rejects_when_switched_off() {
        let result = admit_booking(&amenity(Some(2), "No"), 0, &request(1));
        assert_matches!(result, Err(CoreError::Conflict(_)));
    }

    #[test]
    fn rejects_legacy_row_without_quantity() {
        let result = admit_booking(&amenity(None, "Yes"), 0, &request(1));
        assert_matches!(result, Err(CoreError::Conflict(_)));
    }

    #[test]
    fn free_unit_check_counts_confirmed_bookings() {
        let on = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert!(ensure_free_unit(&amenity(Some(1), "Yes"), 0, on).is_ok());
        assert_matches!(
            ensure_free_unit(&amenity(Some(1), "Yes"), 1, on),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn rejects_party_over_capacity() {
        let result = admit_booking(&amenity(Some(2), "Yes"), 0, &request(7));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }
}
