//! Route definitions for the owner dashboard, mounted at `/owner`.

use axum::routing::{get, patch, put};
use axum::Router;

use crate::handlers::{booking, dashboard, feedback, owner_amenity, sales};
use crate::state::AppState;

/// Routes mounted at `/owner`.
///
/// ```text
/// GET    /amenities                 -> owner_amenity::list
/// POST   /amenities                 -> owner_amenity::create
/// PUT    /amenities/{id}            -> owner_amenity::update
/// DELETE /amenities/{id}            -> owner_amenity::delete
///
/// GET    /bookings                  -> booking::list
/// PATCH  /bookings/{id}/status      -> booking::update_status
///
/// GET    /sales                     -> sales::report
/// POST   /sales                     -> sales::create
/// GET    /sales/years               -> sales::years
/// GET    /sales/history             -> sales::history
///
/// GET    /feedback                  -> feedback::list
/// GET    /dashboard/stats           -> dashboard::stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/amenities",
            get(owner_amenity::list).post(owner_amenity::create),
        )
        .route(
            "/amenities/{id}",
            put(owner_amenity::update).delete(owner_amenity::delete),
        )
        .route("/bookings", get(booking::list))
        .route("/bookings/{id}/status", patch(booking::update_status))
        .route("/sales", get(sales::report).post(sales::create))
        .route("/sales/years", get(sales::years))
        .route("/sales/history", get(sales::history))
        .route("/feedback", get(feedback::list))
        .route("/dashboard/stats", get(dashboard::stats))
}
