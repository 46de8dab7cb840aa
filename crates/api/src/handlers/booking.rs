//! Handlers for bookings: customer reservations and owner status updates.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use resort_core::booking::BookingStatus;
use resort_core::types::DbId;
use resort_db::models::booking::{BookingListParams, CreateBooking, NewBooking, UpdateBookingStatus};
use resort_db::models::validate_input;

use crate::error::AppResult;
use crate::query::{parse_day, BookingListQuery};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/amenities/{id}/book
///
/// Reserves one unit for the booking date (today when omitted). Returns 409
/// when the amenity is switched off or has no free unit that day.
pub async fn create(
    State(state): State<AppState>,
    Path(amenity_id): Path<DbId>,
    Json(input): Json<CreateBooking>,
) -> AppResult<impl IntoResponse> {
    validate_input(&input)?;

    let new = NewBooking {
        amenity_id,
        guest_name: input.guest_name.trim().to_string(),
        guest_email: input.guest_email,
        booking_date: input
            .booking_date
            .unwrap_or_else(|| Utc::now().date_naive()),
        guests: input.guests,
        notes: input.notes,
    };
    let booking = state.store.create_booking(new).await?;

    tracing::info!(
        booking_id = booking.id,
        amenity_id,
        booking_date = %booking.booking_date,
        guests = booking.guests,
        "Booking created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: booking })))
}

/// GET /api/v1/owner/bookings?date=&status=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> AppResult<impl IntoResponse> {
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(BookingStatus::from_str_value(s)?),
    };
    let params = BookingListParams {
        date: parse_day("date", query.date.as_deref())?,
        status,
    };
    let bookings = state.store.list_bookings(params).await?;
    Ok(Json(DataResponse { data: bookings }))
}

/// PATCH /api/v1/owner/bookings/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBookingStatus>,
) -> AppResult<impl IntoResponse> {
    let booking = state.store.update_booking_status(id, input.status).await?;

    tracing::info!(booking_id = id, status = %booking.status, "Booking status changed");
    Ok(Json(DataResponse { data: booking }))
}
