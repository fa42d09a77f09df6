//! BodyMetrics WASM Module
//!
//! WebAssembly bindings over the shared metrics engine so the browser
//! form layer can recompute results reactively on every input change,
//! with the exact same numbers the backend produces.

use bodymetrics_shared::metrics::{
    calc_bmi, calc_bmr, calc_body_fat, calc_tdee, calc_whr, classify_bmi, classify_body_fat,
    classify_whr, format_metric, Sex, SkinfoldProtocol, Skinfolds,
};
use bodymetrics_shared::models::AssessmentInput;
use wasm_bindgen::prelude::*;

fn parse_sex(is_male: bool) -> Sex {
    if is_male {
        Sex::Male
    } else {
        Sex::Female
    }
}

/// Treat zero and non-finite form values as missing
fn form_value(value: f64) -> Option<f64> {
    (value.is_finite() && value != 0.0).then_some(value)
}

/// Calculate BMI from weight (kg) and height (cm); NaN when insufficient
#[wasm_bindgen]
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    calc_bmi(form_value(weight_kg), form_value(height_cm)).unwrap_or(f64::NAN)
}

/// BMI classification label, or empty when the value is missing
#[wasm_bindgen]
pub fn bmi_label(bmi: f64) -> String {
    if bmi.is_nan() {
        return String::new();
    }
    classify_bmi(bmi).label().to_string()
}

/// Waist-hip ratio; NaN when insufficient
#[wasm_bindgen]
pub fn whr(waist_cm: f64, hip_cm: f64) -> f64 {
    calc_whr(form_value(waist_cm), form_value(hip_cm)).unwrap_or(f64::NAN)
}

/// WHR classification label for the given sex
#[wasm_bindgen]
pub fn whr_label(whr: f64, is_male: bool) -> String {
    if whr.is_nan() {
        return String::new();
    }
    classify_whr(whr, parse_sex(is_male)).label().to_string()
}

/// Skinfold body fat percentage; NaN when the protocol's required sites
/// or age are missing
///
/// Pass zero for sites that were not measured. `seven_site` selects the
/// 7-site protocol, otherwise the sex-specific 3-site subset is used.
#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
pub fn body_fat_percent(
    triceps: f64,
    biceps: f64,
    subscapular: f64,
    suprailiac: f64,
    abdominal: f64,
    thigh: f64,
    chest: f64,
    is_male: bool,
    age_years: f64,
    seven_site: bool,
) -> f64 {
    let skinfolds = Skinfolds {
        triceps: form_value(triceps),
        biceps: form_value(biceps),
        subscapular: form_value(subscapular),
        suprailiac: form_value(suprailiac),
        abdominal: form_value(abdominal),
        thigh: form_value(thigh),
        chest: form_value(chest),
    };
    let protocol = if seven_site {
        SkinfoldProtocol::SevenSite
    } else {
        SkinfoldProtocol::ThreeSite
    };
    calc_body_fat(&skinfolds, protocol, parse_sex(is_male), form_value(age_years))
        .map(|r| r.percent)
        .unwrap_or(f64::NAN)
}

/// Body fat classification label for the given sex
#[wasm_bindgen]
pub fn body_fat_label(percent: f64, is_male: bool) -> String {
    if percent.is_nan() {
        return String::new();
    }
    classify_body_fat(percent, parse_sex(is_male))
        .label()
        .to_string()
}

/// Basal metabolic rate (Harris-Benedict revised); NaN when insufficient
#[wasm_bindgen]
pub fn bmr(weight_kg: f64, height_cm: f64, age_years: f64, is_male: bool) -> f64 {
    calc_bmr(
        form_value(weight_kg),
        form_value(height_cm),
        form_value(age_years),
        parse_sex(is_male),
    )
    .unwrap_or(f64::NAN)
}

/// Total daily energy expenditure; NaN when insufficient
#[wasm_bindgen]
pub fn tdee(bmr: f64, activity_factor: f64) -> f64 {
    calc_tdee(form_value(bmr), form_value(activity_factor)).unwrap_or(f64::NAN)
}

/// Format a metric with fixed decimals, using a dash for NaN
#[wasm_bindgen]
pub fn format_value(value: f64, decimals: usize) -> String {
    let value = (!value.is_nan()).then_some(value);
    format_metric(value, decimals)
}

/// Evaluate a full assessment from its JSON form state
///
/// Takes a serialized `AssessmentInput` and returns the serialized
/// result set, so the form can render every card from one call.
#[wasm_bindgen]
pub fn evaluate_assessment(input_json: &str) -> Result<String, JsError> {
    let input: AssessmentInput = serde_json::from_str(input_json)?;
    let results = input.evaluate();
    Ok(serde_json::to_string(&results)?)
}
