//! Data models for body-composition assessments
//!
//! Everything here is a plain value record: assessments are recomputed
//! on demand from their immutable raw inputs, and derived results are
//! never treated as authoritative.

use crate::metrics::{
    self, BodyComposition, BodyFatResult, ColorBand, Sex, SkinfoldProtocol, Skinfolds, WeightRange,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Basic patient data captured at assessment time
///
/// Numeric fields are optional: the engine treats absent (or zeroed)
/// values as "insufficient input" and nulls the dependent metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub name: String,
    pub sex: Sex,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_years: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessed_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_factor: Option<f64>,
}

/// Body circumference measurements in centimeters
///
/// Each measurement is independently optional; a missing value nulls the
/// metrics that depend on it (absence is never an error).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circumferences {
    pub waist: Option<f64>,
    pub hip: Option<f64>,
    pub neck: Option<f64>,
    pub chest: Option<f64>,
    pub arm_right: Option<f64>,
    pub arm_left: Option<f64>,
    pub thigh_right: Option<f64>,
    pub thigh_left: Option<f64>,
    pub calf_right: Option<f64>,
    pub calf_left: Option<f64>,
}

/// The immutable raw-input snapshot an assessment is computed from
///
/// This is the record that gets persisted and embedded in share links;
/// consumers recompute results from it rather than trusting any cached
/// derived values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentInput {
    pub patient: PatientProfile,
    #[serde(default)]
    pub circumferences: Circumferences,
    #[serde(default)]
    pub skinfolds: Skinfolds,
    #[serde(default)]
    pub protocol: SkinfoldProtocol,
}

/// A classification band rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub band: ColorBand,
}

impl Classification {
    fn new(label: &str, band: ColorBand) -> Self {
        Self {
            label: label.to_string(),
            band,
        }
    }
}

/// Complete computed result set for one assessment
///
/// Purely derived; see [`AssessmentInput::evaluate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi_class: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whr_class: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<BodyFatResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat_class: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_composition: Option<BodyComposition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tdee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ideal_weight: Option<WeightRange>,
}

impl AssessmentInput {
    /// Compute the full metric set from the raw inputs
    ///
    /// The single evaluation path shared by the save flow and the
    /// patient share view, so both always display identical values.
    pub fn evaluate(&self) -> AssessmentResults {
        let patient = &self.patient;

        let bmi = metrics::calc_bmi(patient.weight_kg, patient.height_cm);
        let bmi_class = bmi.map(|v| {
            let class = metrics::classify_bmi(v);
            Classification::new(class.label(), class.band())
        });

        let whr = metrics::calc_whr(self.circumferences.waist, self.circumferences.hip);
        let whr_class = whr.map(|v| {
            let class = metrics::classify_whr(v, patient.sex);
            Classification::new(class.label(), class.band())
        });

        let body_fat =
            metrics::calc_body_fat(&self.skinfolds, self.protocol, patient.sex, patient.age_years);
        let body_fat_class = body_fat.as_ref().map(|bf| {
            let class = metrics::classify_body_fat(bf.percent, patient.sex);
            Classification::new(class.label(), class.band())
        });

        let body_composition = metrics::calc_body_composition(
            patient.weight_kg,
            body_fat.as_ref().map(|bf| bf.percent),
        );

        let bmr = metrics::calc_bmr(
            patient.weight_kg,
            patient.height_cm,
            patient.age_years,
            patient.sex,
        );
        let tdee = metrics::calc_tdee(bmr, patient.activity_factor);

        let ideal_weight = metrics::calc_ideal_weight(patient.height_cm);

        AssessmentResults {
            bmi,
            bmi_class,
            whr,
            whr_class,
            body_fat,
            body_fat_class,
            body_composition,
            bmr,
            tdee,
            ideal_weight,
        }
    }
}

/// A persisted assessment: raw inputs plus the results computed at save
/// time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: Uuid,
    #[serde(flatten)]
    pub input: AssessmentInput,
    pub results: AssessmentResults,
    pub saved_at: DateTime<Utc>,
}
