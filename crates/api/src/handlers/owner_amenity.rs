//! Owner dashboard amenity management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use resort_core::amenity::is_managed_image;
use resort_core::images::ImageStoreError;
use resort_core::types::DbId;
use resort_db::models::amenity::{CreateAmenity, UpdateAmenity};

use crate::error::{AppError, AppResult};
use crate::handlers::amenity::{list_views, view_by_id};
use crate::response::DataResponse;
use crate::state::AppState;

/// Release a no-longer-referenced image. Failures are logged only.
async fn release_image(state: &AppState, reference: &str) {
    match state.images.release(reference).await {
        Ok(true) => tracing::info!(image = %reference, "Released amenity image"),
        Ok(false) => {}
        Err(e) => tracing::warn!(image = %reference, error = %e, "Failed to release amenity image"),
    }
}

/// Reject references that escape the upload directory, and warn when a
/// managed image is missing from it.
async fn check_image_reference(state: &AppState, reference: Option<&str>) -> AppResult<()> {
    let Some(reference) = reference else {
        return Ok(());
    };
    match state.images.contains(reference).await {
        Ok(true) => {}
        Ok(false) if !is_managed_image(reference) => {}
        Ok(false) => tracing::warn!(image = %reference, "Amenity references a missing image"),
        Err(ImageStoreError::InvalidReference(r)) => {
            return Err(AppError::BadRequest(format!("Invalid image reference {r:?}")));
        }
        Err(e) => tracing::warn!(image = %reference, error = %e, "Could not check amenity image"),
    }
    Ok(())
}

/// GET /api/v1/owner/amenities
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let amenities = list_views(&state).await?;
    Ok(Json(DataResponse { data: amenities }))
}

/// POST /api/v1/owner/amenities
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAmenity>,
) -> AppResult<impl IntoResponse> {
    let new = input.into_new()?;
    check_image_reference(&state, new.image.as_deref()).await?;
    let amenity = state.store.create_amenity(new).await?;

    tracing::info!(
        amenity_id = amenity.id,
        category = %amenity.category,
        "Amenity created"
    );

    let view = view_by_id(&state, amenity.id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

/// PUT /api/v1/owner/amenities/{id}
///
/// Absent fields keep their stored value. A replaced image is released.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAmenity>,
) -> AppResult<impl IntoResponse> {
    let patch = input.into_patch()?;
    check_image_reference(&state, patch.image.as_deref()).await?;
    let updated = state.store.update_amenity(id, patch).await?;

    if let Some(previous) = updated.previous_image.as_deref() {
        if updated.amenity.image.as_deref() != Some(previous) {
            release_image(&state, previous).await;
        }
    }

    tracing::info!(amenity_id = id, "Amenity updated");

    let view = view_by_id(&state, id).await?;
    Ok(Json(DataResponse { data: view }))
}

/// DELETE /api/v1/owner/amenities/{id}
///
/// Bookings of the amenity are removed with it.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let removed = state.store.delete_amenity(id).await?;
    if let Some(image) = removed.image.as_deref() {
        release_image(&state, image).await;
    }

    tracing::info!(amenity_id = id, "Amenity deleted");
    Ok(StatusCode::NO_CONTENT)
}
