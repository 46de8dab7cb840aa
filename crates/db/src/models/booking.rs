//! Booking entity model and DTOs.

use resort_core::booking::BookingStatus;
use resort_core::types::{DbId, Day, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: DbId,
    pub amenity_id: DbId,
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub booking_date: Day,
    pub guests: i32,
    pub notes: Option<String>,
    pub status: String,
    pub total_price: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for `POST /amenities/{id}/book`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    #[validate(length(min = 1, max = 200))]
    pub guest_name: String,
    #[validate(email)]
    pub guest_email: Option<String>,
    /// Defaults to today when omitted.
    pub booking_date: Option<Day>,
    #[validate(range(min = 1))]
    pub guests: i32,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// A booking request that has passed input validation and is ready for the
/// availability-gated insert.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub amenity_id: DbId,
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub booking_date: Day,
    pub guests: i32,
    pub notes: Option<String>,
}

/// DTO for `PATCH /owner/bookings/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBookingStatus {
    pub status: BookingStatus,
}

/// Query parameters for the owner booking list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingListParams {
    pub date: Option<Day>,
    pub status: Option<BookingStatus>,
}
