//! Patient share link API routes

use crate::error::ApiError;
use crate::services::share::ShareService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use bodymetrics_shared::models::AssessmentInput;
use bodymetrics_shared::types::{ShareLinkResponse, SharedAssessmentResponse};

/// Create share routes
pub fn share_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_share_link))
        .route("/:token", get(view_shared_assessment))
}

/// POST /api/v1/share - Encode an assessment into a patient link
async fn create_share_link(
    State(state): State<AppState>,
    Json(input): Json<AssessmentInput>,
) -> Result<Json<ShareLinkResponse>, ApiError> {
    let link = ShareService::create_link(&state.config().share, &input)?;
    Ok(Json(link))
}

/// GET /api/v1/share/:token - Decode a token and recompute results
///
/// Results are recomputed from the decoded raw inputs so the patient
/// view always matches the clinician's session.
async fn view_shared_assessment(
    Path(token): Path<String>,
) -> Result<Json<SharedAssessmentResponse>, ApiError> {
    Ok(Json(ShareService::view(&token)?))
}
