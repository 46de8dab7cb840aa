pub mod amenities;
pub mod health;
pub mod owner;

use axum::routing::post;
use axum::Router;

use crate::handlers::feedback;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /amenities                          customer listing
/// /amenities/{id}                     single amenity
/// /amenities/{id}/book                reserve a unit (POST)
///
/// /feedback                           submit feedback (POST)
///
/// /owner/amenities                    list, create
/// /owner/amenities/{id}               update, delete
/// /owner/bookings                     list (?date, status)
/// /owner/bookings/{id}/status         transition (PATCH)
/// /owner/sales                        report, record sale
/// /owner/sales/years                  distinct years
/// /owner/sales/history                filtered history
/// /owner/feedback                     feedback report
/// /owner/dashboard/stats              overview
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/amenities", amenities::router())
        .route("/feedback", post(feedback::submit))
        .nest("/owner", owner::router())
}
