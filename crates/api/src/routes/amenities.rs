//! Route definitions for the customer-facing `/amenities` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{amenity, booking};
use crate::state::AppState;

/// Routes mounted at `/amenities`.
///
/// ```text
/// GET    /                -> list
/// GET    /{id}            -> get_by_id
/// POST   /{id}/book       -> booking::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(amenity::list))
        .route("/{id}", get(amenity::get_by_id))
        .route("/{id}/book", post(booking::create))
}
