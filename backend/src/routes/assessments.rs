//! Assessment API routes

use crate::error::ApiError;
use crate::services::assessment::AssessmentService;
use crate::services::export::ExportService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use bodymetrics_shared::models::{Assessment, AssessmentInput, AssessmentResults};
use bodymetrics_shared::types::{AssessmentHistoryResponse, AssessmentResponse, HistoryQuery};
use uuid::Uuid;

/// Create assessment routes
pub fn assessment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(save_assessment).get(get_history).delete(clear_history),
        )
        .route("/evaluate", post(evaluate_assessment))
        .route("/export/csv", get(export_csv))
        .route("/:id", get(get_assessment).delete(delete_assessment))
}

fn to_response(assessment: Assessment) -> AssessmentResponse {
    AssessmentResponse {
        id: assessment.id.to_string(),
        input: assessment.input,
        results: assessment.results,
        saved_at: assessment.saved_at,
    }
}

/// POST /api/v1/assessments - Validate, compute, and persist an assessment
async fn save_assessment(
    State(state): State<AppState>,
    Json(input): Json<AssessmentInput>,
) -> Result<(StatusCode, Json<AssessmentResponse>), ApiError> {
    let assessment = AssessmentService::save(state.db(), input).await?;
    Ok((StatusCode::CREATED, Json(to_response(assessment))))
}

/// POST /api/v1/assessments/evaluate - Compute results without saving
///
/// Incomplete input is fine here; the engine nulls whatever it cannot
/// compute.
async fn evaluate_assessment(
    Json(input): Json<AssessmentInput>,
) -> Result<Json<AssessmentResults>, ApiError> {
    Ok(Json(AssessmentService::evaluate(&input)))
}

/// GET /api/v1/assessments - History, newest first
async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<AssessmentHistoryResponse>, ApiError> {
    let query = query.normalize();
    let limit = query.limit.unwrap_or(HistoryQuery::DEFAULT_LIMIT);

    let (assessments, total_count) = AssessmentService::history(state.db(), limit).await?;

    Ok(Json(AssessmentHistoryResponse {
        items: assessments.into_iter().map(to_response).collect(),
        total_count,
    }))
}

/// GET /api/v1/assessments/:id - Fetch one assessment
async fn get_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssessmentResponse>, ApiError> {
    let assessment = AssessmentService::get(state.db(), id).await?;
    Ok(Json(to_response(assessment)))
}

/// DELETE /api/v1/assessments/:id - Remove one assessment
async fn delete_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    AssessmentService::delete(state.db(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/assessments - Clear the whole history
async fn clear_history(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    AssessmentService::clear(state.db()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/assessments/export/csv - History as a CSV attachment
async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let csv = ExportService::history_csv(state.db()).await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"assessment-history.csv\""),
    );

    Ok((headers, csv))
}
