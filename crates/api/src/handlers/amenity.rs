//! Customer-facing amenity listing.
//!
//! Every amenity is returned with its availability verdict for today, so the
//! booking page can grey out units that are switched off or sold out.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use resort_core::types::DbId;
use resort_db::models::amenity::AmenityView;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Build client views for every amenity, newest first.
pub(crate) async fn list_views(state: &AppState) -> AppResult<Vec<AmenityView>> {
    let today = Utc::now().date_naive();
    let rows = state.store.list_amenities(today).await?;
    let base = &state.config.public_base_url;
    Ok(rows.iter().map(|row| AmenityView::build(row, base)).collect())
}

/// Build the client view of one amenity.
pub(crate) async fn view_by_id(state: &AppState, id: DbId) -> AppResult<AmenityView> {
    let today = Utc::now().date_naive();
    let row = state.store.get_amenity(id, today).await?;
    Ok(AmenityView::build(&row, &state.config.public_base_url))
}

/// GET /api/v1/amenities
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let amenities = list_views(&state).await?;
    Ok(Json(DataResponse { data: amenities }))
}

/// GET /api/v1/amenities/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let amenity = view_by_id(&state, id).await?;
    Ok(Json(DataResponse { data: amenity }))
}
