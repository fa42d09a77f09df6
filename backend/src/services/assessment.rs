//! Assessment service
//!
//! Business logic for saving, listing, and recomputing body-composition
//! assessments. Results are always produced by the shared metrics
//! engine; this layer adds range validation and persistence.

use crate::error::ApiError;
use crate::repositories::{AssessmentRecord, AssessmentRepository, CreateAssessmentRecord};
use bodymetrics_shared::models::{Assessment, AssessmentInput, AssessmentResults};
use bodymetrics_shared::validation::validate_assessment_input;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Assessment service for business logic
pub struct AssessmentService;

impl AssessmentService {
    /// Evaluate raw inputs without persisting anything
    ///
    /// Used by the form preview; no validation is applied because the
    /// engine handles incomplete input by nulling dependent metrics.
    pub fn evaluate(input: &AssessmentInput) -> AssessmentResults {
        input.evaluate()
    }

    /// Validate, evaluate, and persist an assessment
    ///
    /// History is trimmed to the 50 most recent entries on every save.
    pub async fn save(pool: &SqlitePool, input: AssessmentInput) -> Result<Assessment, ApiError> {
        validate_assessment_input(&input)?;

        let results = input.evaluate();
        let assessment = Assessment {
            id: Uuid::new_v4(),
            input,
            results,
            saved_at: Utc::now(),
        };

        let record = CreateAssessmentRecord {
            id: assessment.id,
            patient_name: assessment.input.patient.name.clone(),
            input_json: serde_json::to_string(&assessment.input)
                .map_err(|e| ApiError::Internal(e.into()))?,
            results_json: serde_json::to_string(&assessment.results)
                .map_err(|e| ApiError::Internal(e.into()))?,
            saved_at: assessment.saved_at,
        };

        AssessmentRepository::create(pool, record)
            .await
            .map_err(ApiError::Internal)?;

        Ok(assessment)
    }

    /// Get the most recent assessments, newest first
    pub async fn history(
        pool: &SqlitePool,
        limit: i64,
    ) -> Result<(Vec<Assessment>, i64), ApiError> {
        let records = AssessmentRepository::list_recent(pool, limit)
            .await
            .map_err(ApiError::Internal)?;
        let total = AssessmentRepository::count(pool)
            .await
            .map_err(ApiError::Internal)?;

        let assessments = records
            .into_iter()
            .map(Self::from_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((assessments, total))
    }

    /// Get one assessment by ID
    pub async fn get(pool: &SqlitePool, id: Uuid) -> Result<Assessment, ApiError> {
        let record = AssessmentRepository::get_by_id(pool, id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound(format!("Assessment {id} not found")))?;

        Self::from_record(record)
    }

    /// Delete one assessment
    pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<(), ApiError> {
        let deleted = AssessmentRepository::delete(pool, id)
            .await
            .map_err(ApiError::Internal)?;

        if deleted {
            Ok(())
        } else {
            Err(ApiError::NotFound(format!("Assessment {id} not found")))
        }
    }

    /// Clear the entire history, returning how many entries were removed
    pub async fn clear(pool: &SqlitePool) -> Result<u64, ApiError> {
        AssessmentRepository::clear(pool)
            .await
            .map_err(ApiError::Internal)
    }

    /// Rehydrate a stored record into the domain model
    fn from_record(record: AssessmentRecord) -> Result<Assessment, ApiError> {
        let id = Uuid::parse_str(&record.id)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("corrupt assessment id: {e}")))?;
        let input: AssessmentInput = serde_json::from_str(&record.input_json)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("corrupt input snapshot: {e}")))?;
        let results: AssessmentResults = serde_json::from_str(&record.results_json)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("corrupt results snapshot: {e}")))?;

        Ok(Assessment {
            id,
            input,
            results,
            saved_at: record.saved_at,
        })
    }
}
