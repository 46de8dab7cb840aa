//! Customer feedback submission and the owner feedback report.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use resort_core::feedback::{validate_rating, Sentiment};
use resort_db::models::feedback::{CreateFeedback, FeedbackFilter};
use resort_db::models::validate_input;

use crate::error::AppResult;
use crate::query::FeedbackParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/feedback
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<CreateFeedback>,
) -> AppResult<impl IntoResponse> {
    validate_rating(input.rating)?;
    validate_input(&input)?;

    let feedback = state.store.create_feedback(input, Utc::now()).await?;

    tracing::info!(feedback_id = feedback.id, rating = feedback.rating, "Feedback submitted");
    Ok((StatusCode::CREATED, Json(DataResponse { data: feedback })))
}

/// GET /api/v1/owner/feedback?startDate=&endDate=&filter=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<FeedbackParams>,
) -> AppResult<impl IntoResponse> {
    let filter = FeedbackFilter {
        range: params.range.resolve()?,
        sentiment: Sentiment::parse_filter(params.filter.as_deref()),
    };
    let feedback = state.store.list_feedback(filter).await?;
    Ok(Json(DataResponse { data: feedback }))
}
