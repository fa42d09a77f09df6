//! API request and response types

use crate::models::{AssessmentInput, AssessmentResults};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

// ============================================================================
// Assessment Types
// ============================================================================

/// A saved assessment as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub id: String,
    #[serde(flatten)]
    pub input: AssessmentInput,
    pub results: AssessmentResults,
    pub saved_at: DateTime<Utc>,
}

/// History query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}

impl HistoryQuery {
    /// Default page size and hard cap for history queries
    pub const DEFAULT_LIMIT: i64 = 50;

    /// Clamp the limit into the 1..=50 range
    pub fn normalize(self) -> Self {
        let limit = self
            .limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::DEFAULT_LIMIT);
        Self { limit: Some(limit) }
    }
}

/// Assessment history response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentHistoryResponse {
    pub items: Vec<AssessmentResponse>,
    pub total_count: i64,
}

// ============================================================================
// Share Link Types
// ============================================================================

/// Share link creation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLinkResponse {
    /// URL-safe token embedding the raw assessment inputs
    pub token: String,
    /// Full patient link
    pub url: String,
}

/// Decoded patient view of a shared assessment
///
/// Results are recomputed from the decoded raw inputs, never read from a
/// cached snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedAssessmentResponse {
    #[serde(flatten)]
    pub input: AssessmentInput,
    pub results: AssessmentResults,
}

// ============================================================================
// AI Types
// ============================================================================

/// Meal plan generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlanRequest {
    /// Raw assessment the plan is based on
    #[serde(flatten)]
    pub input: AssessmentInput,
    pub config: MealPlanConfig,
}

/// Meal plan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlanConfig {
    pub target_calories: f64,
    pub carb_pct: f64,
    pub protein_pct: f64,
    pub fat_pct: f64,
    pub meals_per_day: u32,
    #[serde(default)]
    pub restrictions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allergies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avoid_foods: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_foods: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    pub duration_days: u32,
}

/// Meal plan generation response
///
/// The plan payload is whatever JSON the model produced; schema
/// validation is left to the consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlanResponse {
    pub plan: serde_json::Value,
    pub model: String,
}

/// Photo-based body composition estimate request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoEstimateRequest {
    /// Base64-encoded image bytes
    pub image_base64: String,
    /// Image MIME type, e.g. `image/jpeg`
    pub mime_type: String,
    /// Optional patient context to steer the estimate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_summary: Option<String>,
}

/// Photo-based estimate response (opaque model output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoEstimateResponse {
    pub estimate: serde_json::Value,
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_query_normalize() {
        assert_eq!(HistoryQuery { limit: None }.normalize().limit, Some(50));
        assert_eq!(HistoryQuery { limit: Some(10) }.normalize().limit, Some(10));
        assert_eq!(HistoryQuery { limit: Some(500) }.normalize().limit, Some(50));
        assert_eq!(HistoryQuery { limit: Some(0) }.normalize().limit, Some(1));
        assert_eq!(HistoryQuery { limit: Some(-3) }.normalize().limit, Some(1));
    }
}
