//! Input validation functions
//!
//! Range checks applied by the service layer before an assessment is
//! saved. The metrics engine itself never validates ranges: it computes
//! raw formula output from whatever it is given, and these bounds exist
//! only to keep obviously mistyped entries out of persisted history.

use crate::errors::ValidationError;
use crate::models::AssessmentInput;

/// Validate weight in kilograms (form range: 1-300 kg)
pub fn validate_weight_kg(weight_kg: f64) -> Result<(), ValidationError> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err(ValidationError::new("weight_kg", "must be a valid number"));
    }
    if !(1.0..=300.0).contains(&weight_kg) {
        return Err(ValidationError::new(
            "weight_kg",
            "must be between 1 and 300 kg",
        ));
    }
    Ok(())
}

/// Validate height in centimeters (form range: 50-250 cm)
pub fn validate_height_cm(height_cm: f64) -> Result<(), ValidationError> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err(ValidationError::new("height_cm", "must be a valid number"));
    }
    if !(50.0..=250.0).contains(&height_cm) {
        return Err(ValidationError::new(
            "height_cm",
            "must be between 50 and 250 cm",
        ));
    }
    Ok(())
}

/// Validate age in years (form range: 1-120)
pub fn validate_age_years(age_years: f64) -> Result<(), ValidationError> {
    if age_years.is_nan() || age_years.is_infinite() {
        return Err(ValidationError::new("age_years", "must be a valid number"));
    }
    if !(1.0..=120.0).contains(&age_years) {
        return Err(ValidationError::new(
            "age_years",
            "must be between 1 and 120 years",
        ));
    }
    Ok(())
}

/// Validate a circumference measurement in centimeters
pub fn validate_circumference_cm(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_nan() || value.is_infinite() {
        return Err(ValidationError::new(field, "must be a valid number"));
    }
    if !(1.0..=300.0).contains(&value) {
        return Err(ValidationError::new(field, "must be between 1 and 300 cm"));
    }
    Ok(())
}

/// Validate a skinfold measurement in millimeters
pub fn validate_skinfold_mm(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_nan() || value.is_infinite() {
        return Err(ValidationError::new(field, "must be a valid number"));
    }
    if !(1.0..=100.0).contains(&value) {
        return Err(ValidationError::new(field, "must be between 1 and 100 mm"));
    }
    Ok(())
}

/// Validate an activity multiplier
///
/// Any positive finite multiplier is acceptable; the five named levels
/// are a form affordance, not a contract.
pub fn validate_activity_factor(factor: f64) -> Result<(), ValidationError> {
    if factor.is_nan() || factor.is_infinite() || factor <= 0.0 {
        return Err(ValidationError::new(
            "activity_factor",
            "must be a positive number",
        ));
    }
    Ok(())
}

/// Validate an assessment before it is saved
///
/// A saved assessment needs at least a patient name, weight, and height;
/// every other measurement is optional but must be in range when given.
pub fn validate_assessment_input(input: &AssessmentInput) -> Result<(), ValidationError> {
    let patient = &input.patient;

    if patient.name.trim().is_empty() {
        return Err(ValidationError::new("name", "is required"));
    }
    match patient.weight_kg {
        Some(w) => validate_weight_kg(w)?,
        None => return Err(ValidationError::new("weight_kg", "is required")),
    }
    match patient.height_cm {
        Some(h) => validate_height_cm(h)?,
        None => return Err(ValidationError::new("height_cm", "is required")),
    }
    if let Some(age) = patient.age_years {
        validate_age_years(age)?;
    }
    if let Some(factor) = patient.activity_factor {
        validate_activity_factor(factor)?;
    }

    let c = &input.circumferences;
    for (field, value) in [
        ("waist", c.waist),
        ("hip", c.hip),
        ("neck", c.neck),
        ("chest", c.chest),
        ("arm_right", c.arm_right),
        ("arm_left", c.arm_left),
        ("thigh_right", c.thigh_right),
        ("thigh_left", c.thigh_left),
        ("calf_right", c.calf_right),
        ("calf_left", c.calf_left),
    ] {
        if let Some(v) = value {
            validate_circumference_cm(field, v)?;
        }
    }

    let s = &input.skinfolds;
    for (field, value) in [
        ("triceps", s.triceps),
        ("biceps", s.biceps),
        ("subscapular", s.subscapular),
        ("suprailiac", s.suprailiac),
        ("abdominal", s.abdominal),
        ("thigh", s.thigh),
        ("chest", s.chest),
    ] {
        if let Some(v) = value {
            validate_skinfold_mm(field, v)?;
        }
    }

    Ok(())
}
