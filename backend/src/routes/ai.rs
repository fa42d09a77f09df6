//! Generative AI API routes

use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use bodymetrics_shared::types::{
    MealPlanRequest, MealPlanResponse, PhotoEstimateRequest, PhotoEstimateResponse,
};

/// Create AI routes
pub fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/meal-plan", post(generate_meal_plan))
        .route("/photo-estimate", post(estimate_from_photo))
}

/// POST /api/v1/ai/meal-plan - Generate a personalized meal plan
async fn generate_meal_plan(
    State(state): State<AppState>,
    Json(request): Json<MealPlanRequest>,
) -> Result<Json<MealPlanResponse>, ApiError> {
    let plan = state.ai().generate_meal_plan(&request).await?;
    Ok(Json(plan))
}

/// POST /api/v1/ai/photo-estimate - Photo-based body composition estimate
async fn estimate_from_photo(
    State(state): State<AppState>,
    Json(request): Json<PhotoEstimateRequest>,
) -> Result<Json<PhotoEstimateResponse>, ApiError> {
    let estimate = state.ai().estimate_from_photo(&request).await?;
    Ok(Json(estimate))
}
