//! Assessment history export
//!
//! Produces a flat CSV view of the saved history for spreadsheets:
//! one row per assessment with the key measurements and computed
//! metrics. Missing metrics export as empty cells.

use crate::error::ApiError;
use crate::services::assessment::AssessmentService;
use bodymetrics_shared::models::Assessment;
use bodymetrics_shared::types::HistoryQuery;
use serde::Serialize;
use sqlx::SqlitePool;

/// One CSV row of the history export
#[derive(Debug, Serialize)]
struct AssessmentCsvRow {
    saved_at: String,
    patient: String,
    sex: String,
    age_years: Option<f64>,
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
    protocol: String,
    bmi: Option<f64>,
    bmi_class: Option<String>,
    whr: Option<f64>,
    body_fat_pct: Option<f64>,
    fat_mass_kg: Option<f64>,
    lean_mass_kg: Option<f64>,
    bmr_kcal: Option<f64>,
    tdee_kcal: Option<f64>,
}

impl From<&Assessment> for AssessmentCsvRow {
    fn from(assessment: &Assessment) -> Self {
        let patient = &assessment.input.patient;
        let results = &assessment.results;

        Self {
            saved_at: assessment.saved_at.to_rfc3339(),
            patient: patient.name.clone(),
            sex: match patient.sex {
                bodymetrics_shared::metrics::Sex::Male => "male".to_string(),
                bodymetrics_shared::metrics::Sex::Female => "female".to_string(),
            },
            age_years: patient.age_years,
            height_cm: patient.height_cm,
            weight_kg: patient.weight_kg,
            protocol: assessment.input.protocol.label().to_string(),
            bmi: results.bmi,
            bmi_class: results.bmi_class.as_ref().map(|c| c.label.clone()),
            whr: results.whr,
            body_fat_pct: results.body_fat.as_ref().map(|bf| bf.percent),
            fat_mass_kg: results.body_composition.as_ref().map(|c| c.fat_mass_kg),
            lean_mass_kg: results.body_composition.as_ref().map(|c| c.lean_mass_kg),
            bmr_kcal: results.bmr,
            tdee_kcal: results.tdee,
        }
    }
}

/// Export service
pub struct ExportService;

impl ExportService {
    /// Export the full history (newest first) as CSV
    pub async fn history_csv(pool: &SqlitePool) -> Result<String, ApiError> {
        let (assessments, _) =
            AssessmentService::history(pool, HistoryQuery::DEFAULT_LIMIT).await?;

        Self::to_csv(&assessments)
    }

    fn to_csv(assessments: &[Assessment]) -> Result<String, ApiError> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        for assessment in assessments {
            writer
                .serialize(AssessmentCsvRow::from(assessment))
                .map_err(|e| ApiError::Internal(e.into()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("CSV buffer error: {e}")))?;
        String::from_utf8(bytes).map_err(|e| ApiError::Internal(e.into()))
    }
}
