//! Body-composition metrics engine
//!
//! Deterministic formulas that turn raw anthropometric measurements into
//! classified health metrics: BMI, waist-hip ratio, skinfold body fat,
//! fat/lean mass split, BMR/TDEE, and ideal weight range.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: all calculations are pure, no side effects
//! 2. **Uniform absence**: insufficient input is `None` at every boundary
//!    and propagates through dependent calculations
//! 3. **No clamping**: implausible inputs produce raw formula output for
//!    clinical review, never an error
//! 4. **Data-driven protocols**: skinfold coefficient sets and required
//!    sites are lookup tables keyed by (protocol, sex)

use serde::{Deserialize, Serialize};

// ============================================================================
// Patient Attribute Types
// ============================================================================

/// Biological sex for physiological calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Activity level for TDEE estimation
///
/// A closed set offered to forms; the engine itself accepts any positive
/// multiplier (see [`calc_tdee`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    #[default]
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary (little or no exercise)",
            ActivityLevel::LightlyActive => "Lightly active (1-3x/week)",
            ActivityLevel::ModeratelyActive => "Moderately active (3-5x/week)",
            ActivityLevel::VeryActive => "Very active (6-7x/week)",
            ActivityLevel::ExtraActive => "Extremely active (2x/day, physical job)",
        }
    }

    /// All levels, in increasing order of expenditure
    pub fn all() -> [ActivityLevel; 5] {
        [
            ActivityLevel::Sedentary,
            ActivityLevel::LightlyActive,
            ActivityLevel::ModeratelyActive,
            ActivityLevel::VeryActive,
            ActivityLevel::ExtraActive,
        ]
    }
}

/// Treat zero and NaN as absent.
///
/// An empty form field parses to nothing and a zero measurement is
/// unusable in every formula below, so both read as missing rather than
/// producing division-by-zero artifacts.
fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

// ============================================================================
// Color Bands
// ============================================================================

/// Qualitative color tier attached to a classification band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBand {
    Green,
    Yellow,
    Red,
    Gray,
}

impl ColorBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorBand::Green => "green",
            ColorBand::Yellow => "yellow",
            ColorBand::Red => "red",
            ColorBand::Gray => "gray",
        }
    }

    /// Badge presentation token for this band
    pub fn badge_class(&self) -> &'static str {
        match self {
            ColorBand::Green => "badge-green",
            ColorBand::Yellow => "badge-yellow",
            ColorBand::Red => "badge-red",
            ColorBand::Gray => "badge-gray",
        }
    }

    /// Text presentation token for this band
    pub fn text_class(&self) -> &'static str {
        match self {
            ColorBand::Green => "text-emerald-600",
            ColorBand::Yellow => "text-amber-500",
            ColorBand::Red => "text-red-500",
            ColorBand::Gray => "text-gray-500",
        }
    }

    /// Gauge-bar presentation token for this band
    pub fn bar_class(&self) -> &'static str {
        match self {
            ColorBand::Green => "bg-emerald-500",
            ColorBand::Yellow => "bg-amber-400",
            ColorBand::Red => "bg-red-500",
            ColorBand::Gray => "bg-gray-300",
        }
    }
}

// ============================================================================
// BMI
// ============================================================================

/// BMI category classification (WHO bands)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiClass {
    Underweight,
    Normal,
    Overweight,
    ObesityClass1,
    ObesityClass2,
    ObesityClass3,
}

impl BmiClass {
    /// Get a human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            BmiClass::Underweight => "Underweight",
            BmiClass::Normal => "Normal",
            BmiClass::Overweight => "Overweight",
            BmiClass::ObesityClass1 => "Obesity Class I",
            BmiClass::ObesityClass2 => "Obesity Class II",
            BmiClass::ObesityClass3 => "Obesity Class III",
        }
    }

    pub fn band(&self) -> ColorBand {
        match self {
            BmiClass::Normal => ColorBand::Green,
            BmiClass::Underweight | BmiClass::Overweight => ColorBand::Yellow,
            BmiClass::ObesityClass1 | BmiClass::ObesityClass2 | BmiClass::ObesityClass3 => {
                ColorBand::Red
            }
        }
    }
}

/// Calculate BMI from weight (kg) and height (cm)
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calc_bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let weight = usable(weight_kg)?;
    let height_m = usable(height_cm)? / 100.0;
    Some(weight / (height_m * height_m))
}

/// Classify a BMI value; boundary values land in the higher band
pub fn classify_bmi(bmi: f64) -> BmiClass {
    if bmi < 18.5 {
        BmiClass::Underweight
    } else if bmi < 25.0 {
        BmiClass::Normal
    } else if bmi < 30.0 {
        BmiClass::Overweight
    } else if bmi < 35.0 {
        BmiClass::ObesityClass1
    } else if bmi < 40.0 {
        BmiClass::ObesityClass2
    } else {
        BmiClass::ObesityClass3
    }
}

// ============================================================================
// Waist-Hip Ratio
// ============================================================================

/// WHR risk classification (WHO cutoffs, sex-specific)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhrClass {
    LowRisk,
    ModerateRisk,
    HighRisk,
}

impl WhrClass {
    pub fn label(&self) -> &'static str {
        match self {
            WhrClass::LowRisk => "Low risk",
            WhrClass::ModerateRisk => "Moderate risk",
            WhrClass::HighRisk => "High risk",
        }
    }

    pub fn band(&self) -> ColorBand {
        match self {
            WhrClass::LowRisk => ColorBand::Green,
            WhrClass::ModerateRisk => ColorBand::Yellow,
            WhrClass::HighRisk => ColorBand::Red,
        }
    }
}

/// Calculate waist-hip ratio from circumferences (cm)
pub fn calc_whr(waist_cm: Option<f64>, hip_cm: Option<f64>) -> Option<f64> {
    Some(usable(waist_cm)? / usable(hip_cm)?)
}

/// Classify a waist-hip ratio
pub fn classify_whr(whr: f64, sex: Sex) -> WhrClass {
    let (low, moderate) = match sex {
        Sex::Male => (0.90, 0.95),
        Sex::Female => (0.80, 0.85),
    };
    if whr < low {
        WhrClass::LowRisk
    } else if whr < moderate {
        WhrClass::ModerateRisk
    } else {
        WhrClass::HighRisk
    }
}

// ============================================================================
// Body Fat — Skinfold Protocols
// ============================================================================

/// Caliper measurement sites
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinfoldSite {
    Triceps,
    Biceps,
    Subscapular,
    Suprailiac,
    Abdominal,
    Thigh,
    Chest,
}

/// Skinfold thickness measurements in millimeters
///
/// Each site is independently optional; which sites a calculation needs
/// depends on the chosen protocol and sex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skinfolds {
    pub triceps: Option<f64>,
    pub biceps: Option<f64>,
    pub subscapular: Option<f64>,
    pub suprailiac: Option<f64>,
    pub abdominal: Option<f64>,
    pub thigh: Option<f64>,
    pub chest: Option<f64>,
}

impl Skinfolds {
    /// Measurement for a given site, if recorded
    pub fn site(&self, site: SkinfoldSite) -> Option<f64> {
        match site {
            SkinfoldSite::Triceps => self.triceps,
            SkinfoldSite::Biceps => self.biceps,
            SkinfoldSite::Subscapular => self.subscapular,
            SkinfoldSite::Suprailiac => self.suprailiac,
            SkinfoldSite::Abdominal => self.abdominal,
            SkinfoldSite::Thigh => self.thigh,
            SkinfoldSite::Chest => self.chest,
        }
    }
}

/// Skinfold measurement protocol (Jackson & Pollock regressions)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SkinfoldProtocol {
    #[default]
    ThreeSite,
    SevenSite,
}

/// Coefficients of a body-density regression: quadratic in the skinfold
/// sum, linear in age. All terms after the intercept are subtracted
/// except the quadratic one.
struct DensityCoefficients {
    intercept: f64,
    sum: f64,
    sum_sq: f64,
    age: f64,
}

const JP3_MALE: DensityCoefficients = DensityCoefficients {
    intercept: 1.10938,
    sum: 0.0008267,
    sum_sq: 0.0000016,
    age: 0.0002574,
};

const JP3_FEMALE: DensityCoefficients = DensityCoefficients {
    intercept: 1.0994921,
    sum: 0.0009929,
    sum_sq: 0.0000023,
    age: 0.0001392,
};

const JP7_MALE: DensityCoefficients = DensityCoefficients {
    intercept: 1.112,
    sum: 0.00043499,
    sum_sq: 0.00000055,
    age: 0.00028826,
};

const JP7_FEMALE: DensityCoefficients = DensityCoefficients {
    intercept: 1.097,
    sum: 0.00046971,
    sum_sq: 0.00000056,
    age: 0.00012828,
};

const SEVEN_SITES: [SkinfoldSite; 7] = [
    SkinfoldSite::Triceps,
    SkinfoldSite::Biceps,
    SkinfoldSite::Subscapular,
    SkinfoldSite::Suprailiac,
    SkinfoldSite::Abdominal,
    SkinfoldSite::Thigh,
    SkinfoldSite::Chest,
];

impl SkinfoldProtocol {
    /// Identifier attached to body-fat results
    pub fn label(&self) -> &'static str {
        match self {
            SkinfoldProtocol::ThreeSite => "3-site (Jackson & Pollock)",
            SkinfoldProtocol::SevenSite => "7-site (Jackson & Pollock)",
        }
    }

    /// Sites the protocol requires; the 3-site subset depends on sex
    pub fn required_sites(&self, sex: Sex) -> &'static [SkinfoldSite] {
        match (self, sex) {
            (SkinfoldProtocol::ThreeSite, Sex::Male) => &[
                SkinfoldSite::Chest,
                SkinfoldSite::Abdominal,
                SkinfoldSite::Thigh,
            ],
            (SkinfoldProtocol::ThreeSite, Sex::Female) => &[
                SkinfoldSite::Triceps,
                SkinfoldSite::Suprailiac,
                SkinfoldSite::Thigh,
            ],
            (SkinfoldProtocol::SevenSite, _) => &SEVEN_SITES,
        }
    }

    fn coefficients(&self, sex: Sex) -> &'static DensityCoefficients {
        match (self, sex) {
            (SkinfoldProtocol::ThreeSite, Sex::Male) => &JP3_MALE,
            (SkinfoldProtocol::ThreeSite, Sex::Female) => &JP3_FEMALE,
            (SkinfoldProtocol::SevenSite, Sex::Male) => &JP7_MALE,
            (SkinfoldProtocol::SevenSite, Sex::Female) => &JP7_FEMALE,
        }
    }
}

/// Body-fat estimation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyFatResult {
    /// Body fat percentage (Siri equation; unclamped)
    pub percent: f64,
    /// Estimated body density (g/cm³)
    pub density: f64,
    /// Raw sum of the required skinfold sites (mm)
    pub skinfold_sum: f64,
    /// Protocol that produced the estimate
    pub protocol: SkinfoldProtocol,
}

/// Estimate body fat percentage from skinfold measurements
///
/// Returns `None` if age or any site the protocol requires for the given
/// sex is missing — never a partial sum. Implausible measurements yield
/// out-of-range percentages by design; clamping is left to clinical
/// judgement.
pub fn calc_body_fat(
    skinfolds: &Skinfolds,
    protocol: SkinfoldProtocol,
    sex: Sex,
    age_years: Option<f64>,
) -> Option<BodyFatResult> {
    let age = usable(age_years)?;

    let mut sum = 0.0;
    for site in protocol.required_sites(sex) {
        sum += usable(skinfolds.site(*site))?;
    }

    let c = protocol.coefficients(sex);
    let density = c.intercept - c.sum * sum + c.sum_sq * (sum * sum) - c.age * age;

    // Siri equation
    let percent = 495.0 / density - 450.0;

    Some(BodyFatResult {
        percent,
        density,
        skinfold_sum: sum,
        protocol,
    })
}

/// Body fat category (sex-specific ladder)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFatClass {
    Essential,
    Athlete,
    Fit,
    Acceptable,
    Obese,
}

impl BodyFatClass {
    pub fn label(&self) -> &'static str {
        match self {
            BodyFatClass::Essential => "Essential",
            BodyFatClass::Athlete => "Athlete",
            BodyFatClass::Fit => "Fit",
            BodyFatClass::Acceptable => "Acceptable",
            BodyFatClass::Obese => "Obese",
        }
    }

    pub fn band(&self) -> ColorBand {
        match self {
            BodyFatClass::Athlete | BodyFatClass::Fit => ColorBand::Green,
            BodyFatClass::Essential | BodyFatClass::Acceptable => ColorBand::Yellow,
            BodyFatClass::Obese => ColorBand::Red,
        }
    }
}

/// Classify a body fat percentage
pub fn classify_body_fat(percent: f64, sex: Sex) -> BodyFatClass {
    let cutoffs = match sex {
        Sex::Male => [6.0, 14.0, 18.0, 25.0],
        Sex::Female => [14.0, 21.0, 25.0, 32.0],
    };
    if percent < cutoffs[0] {
        BodyFatClass::Essential
    } else if percent < cutoffs[1] {
        BodyFatClass::Athlete
    } else if percent < cutoffs[2] {
        BodyFatClass::Fit
    } else if percent < cutoffs[3] {
        BodyFatClass::Acceptable
    } else {
        BodyFatClass::Obese
    }
}

// ============================================================================
// Body Composition Split
// ============================================================================

/// Fat mass / lean mass split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyComposition {
    pub fat_mass_kg: f64,
    pub lean_mass_kg: f64,
}

/// Split total weight into fat and lean mass
///
/// Invariant: `fat_mass_kg + lean_mass_kg == weight` exactly; rounding
/// is a display concern. A fat percentage of zero is a valid input here
/// (unlike a zero weight).
pub fn calc_body_composition(
    weight_kg: Option<f64>,
    percent_fat: Option<f64>,
) -> Option<BodyComposition> {
    let weight = usable(weight_kg)?;
    let percent = percent_fat?;
    let fat_mass_kg = weight * (percent / 100.0);
    Some(BodyComposition {
        fat_mass_kg,
        lean_mass_kg: weight - fat_mass_kg,
    })
}

// ============================================================================
// Energy Expenditure
// ============================================================================

/// Calculate Basal Metabolic Rate using the revised (1984) Harris-Benedict
/// equation
///
/// Men: BMR = 66.5 + 13.75 × weight(kg) + 5.003 × height(cm) - 6.75 × age(y)
/// Women: BMR = 655.1 + 9.563 × weight(kg) + 1.850 × height(cm) - 4.676 × age(y)
pub fn calc_bmr(
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    age_years: Option<f64>,
    sex: Sex,
) -> Option<f64> {
    let weight = usable(weight_kg)?;
    let height = usable(height_cm)?;
    let age = usable(age_years)?;
    Some(match sex {
        Sex::Male => 66.5 + 13.75 * weight + 5.003 * height - 6.75 * age,
        Sex::Female => 655.1 + 9.563 * weight + 1.850 * height - 4.676 * age,
    })
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × activity multiplier. Any positive multiplier is accepted;
/// the five [`ActivityLevel`] presets exist for form rendering only.
pub fn calc_tdee(bmr: Option<f64>, activity_factor: Option<f64>) -> Option<f64> {
    Some(usable(bmr)? * usable(activity_factor)?)
}

// ============================================================================
// Ideal Weight Range
// ============================================================================

/// Weight range in kilograms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min_kg: f64,
    pub max_kg: f64,
}

/// Ideal weight range for a height, from BMI bounds 18.5–24.9
pub fn calc_ideal_weight(height_cm: Option<f64>) -> Option<WeightRange> {
    let height_m = usable(height_cm)? / 100.0;
    let height_m_sq = height_m * height_m;
    Some(WeightRange {
        min_kg: 18.5 * height_m_sq,
        max_kg: 24.9 * height_m_sq,
    })
}

// ============================================================================
// Formatting
// ============================================================================

/// Placeholder shown for metrics that could not be computed
pub const MISSING_PLACEHOLDER: &str = "—";

/// Format a metric with a fixed number of decimals, or a placeholder dash
/// for missing/NaN values
pub fn format_metric(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{v:.decimals$}"),
        _ => MISSING_PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn sf(
        triceps: f64,
        biceps: f64,
        subscapular: f64,
        suprailiac: f64,
        abdominal: f64,
        thigh: f64,
        chest: f64,
    ) -> Skinfolds {
        Skinfolds {
            triceps: Some(triceps),
            biceps: Some(biceps),
            subscapular: Some(subscapular),
            suprailiac: Some(suprailiac),
            abdominal: Some(abdominal),
            thigh: Some(thigh),
            chest: Some(chest),
        }
    }

    // =========================================================================
    // BMI
    // =========================================================================

    #[test]
    fn test_bmi_reference_value() {
        // 70kg, 175cm -> BMI ~22.86, classified Normal
        let bmi = calc_bmi(Some(70.0), Some(175.0)).unwrap();
        assert!((bmi - 22.857).abs() < 0.01);
        assert_eq!(classify_bmi(bmi), BmiClass::Normal);
    }

    #[test]
    fn test_bmi_missing_inputs() {
        assert_eq!(calc_bmi(None, Some(175.0)), None);
        assert_eq!(calc_bmi(Some(70.0), None), None);
        assert_eq!(calc_bmi(Some(0.0), Some(175.0)), None);
        assert_eq!(calc_bmi(Some(70.0), Some(0.0)), None);
        assert_eq!(calc_bmi(Some(f64::NAN), Some(175.0)), None);
    }

    #[rstest]
    #[case(10.0, BmiClass::Underweight)]
    #[case(18.49, BmiClass::Underweight)]
    #[case(18.5, BmiClass::Normal)]
    #[case(24.99, BmiClass::Normal)]
    #[case(25.0, BmiClass::Overweight)]
    #[case(30.0, BmiClass::ObesityClass1)]
    #[case(35.0, BmiClass::ObesityClass2)]
    #[case(40.0, BmiClass::ObesityClass3)]
    #[case(72.0, BmiClass::ObesityClass3)]
    fn test_bmi_boundaries_land_in_higher_band(#[case] bmi: f64, #[case] expected: BmiClass) {
        assert_eq!(classify_bmi(bmi), expected);
    }

    #[test]
    fn test_bmi_bands_color_mapping() {
        assert_eq!(BmiClass::Normal.band(), ColorBand::Green);
        assert_eq!(BmiClass::Underweight.band(), ColorBand::Yellow);
        assert_eq!(BmiClass::Overweight.band(), ColorBand::Yellow);
        assert_eq!(BmiClass::ObesityClass2.band(), ColorBand::Red);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: BMI matches the formula and repeated calls agree
        #[test]
        fn prop_bmi_formula_and_determinism(weight in 1.0f64..500.0, height in 50.0f64..250.0) {
            let first = calc_bmi(Some(weight), Some(height)).unwrap();
            let second = calc_bmi(Some(weight), Some(height)).unwrap();
            let h = height / 100.0;
            prop_assert_eq!(first, weight / (h * h));
            prop_assert_eq!(first, second);
        }

        /// Property: every finite non-negative BMI gets exactly one band,
        /// and bands are ordered with the metric
        #[test]
        fn prop_bmi_classification_total_and_ordered(a in 0.0f64..80.0, b in 0.0f64..80.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let lo_class = classify_bmi(lo) as u8;
            let hi_class = classify_bmi(hi) as u8;
            prop_assert!(lo_class <= hi_class);
        }
    }

    // =========================================================================
    // WHR
    // =========================================================================

    #[test]
    fn test_whr_reference_value() {
        let whr = calc_whr(Some(80.0), Some(100.0)).unwrap();
        assert_eq!(whr, 0.8);
        // Female boundary: <0.80 is low, so 0.80 itself is moderate
        assert_eq!(classify_whr(whr, Sex::Female), WhrClass::ModerateRisk);
        assert_eq!(classify_whr(whr, Sex::Male), WhrClass::LowRisk);
    }

    #[test]
    fn test_whr_missing_inputs() {
        assert_eq!(calc_whr(None, Some(100.0)), None);
        assert_eq!(calc_whr(Some(80.0), None), None);
        assert_eq!(calc_whr(Some(80.0), Some(0.0)), None);
    }

    #[rstest]
    #[case(0.89, Sex::Male, WhrClass::LowRisk)]
    #[case(0.90, Sex::Male, WhrClass::ModerateRisk)]
    #[case(0.95, Sex::Male, WhrClass::HighRisk)]
    #[case(0.79, Sex::Female, WhrClass::LowRisk)]
    #[case(0.80, Sex::Female, WhrClass::ModerateRisk)]
    #[case(0.85, Sex::Female, WhrClass::HighRisk)]
    fn test_whr_cutoffs(#[case] whr: f64, #[case] sex: Sex, #[case] expected: WhrClass) {
        assert_eq!(classify_whr(whr, sex), expected);
    }

    // =========================================================================
    // Body Fat
    // =========================================================================

    #[test]
    fn test_body_fat_3site_male_reference() {
        // chest=10, abdominal=15, thigh=12, age=25 -> sum 37
        let skinfolds = Skinfolds {
            chest: Some(10.0),
            abdominal: Some(15.0),
            thigh: Some(12.0),
            ..Default::default()
        };
        let result =
            calc_body_fat(&skinfolds, SkinfoldProtocol::ThreeSite, Sex::Male, Some(25.0)).unwrap();

        assert_eq!(result.skinfold_sum, 37.0);
        let expected_density =
            1.10938 - 0.0008267 * 37.0 + 0.0000016 * (37.0 * 37.0) - 0.0002574 * 25.0;
        assert!((result.density - expected_density).abs() < 1e-12);
        assert!((result.percent - (495.0 / expected_density - 450.0)).abs() < 1e-12);
        assert_eq!(result.protocol, SkinfoldProtocol::ThreeSite);
    }

    #[test]
    fn test_body_fat_3site_sex_selects_sites() {
        // Male 3-site ignores triceps/suprailiac entirely
        let male_only = Skinfolds {
            chest: Some(10.0),
            abdominal: Some(15.0),
            thigh: Some(12.0),
            ..Default::default()
        };
        assert!(
            calc_body_fat(&male_only, SkinfoldProtocol::ThreeSite, Sex::Male, Some(30.0)).is_some()
        );
        assert_eq!(
            calc_body_fat(&male_only, SkinfoldProtocol::ThreeSite, Sex::Female, Some(30.0)),
            None
        );

        let female_only = Skinfolds {
            triceps: Some(14.0),
            suprailiac: Some(11.0),
            thigh: Some(20.0),
            ..Default::default()
        };
        let result =
            calc_body_fat(&female_only, SkinfoldProtocol::ThreeSite, Sex::Female, Some(30.0))
                .unwrap();
        assert_eq!(result.skinfold_sum, 45.0);
        let expected_density =
            1.0994921 - 0.0009929 * 45.0 + 0.0000023 * (45.0 * 45.0) - 0.0001392 * 30.0;
        assert!((result.density - expected_density).abs() < 1e-12);
    }

    #[test]
    fn test_body_fat_7site_requires_all_sites() {
        let mut skinfolds = sf(10.0, 8.0, 12.0, 11.0, 15.0, 18.0, 9.0);
        let full = calc_body_fat(&skinfolds, SkinfoldProtocol::SevenSite, Sex::Male, Some(28.0))
            .unwrap();
        assert_eq!(full.skinfold_sum, 83.0);
        let expected_density =
            1.112 - 0.00043499 * 83.0 + 0.00000055 * (83.0 * 83.0) - 0.00028826 * 28.0;
        assert!((full.density - expected_density).abs() < 1e-12);

        skinfolds.biceps = None;
        assert_eq!(
            calc_body_fat(&skinfolds, SkinfoldProtocol::SevenSite, Sex::Male, Some(28.0)),
            None
        );
    }

    #[test]
    fn test_body_fat_requires_age() {
        let skinfolds = sf(10.0, 8.0, 12.0, 11.0, 15.0, 18.0, 9.0);
        assert_eq!(
            calc_body_fat(&skinfolds, SkinfoldProtocol::ThreeSite, Sex::Male, None),
            None
        );
        assert_eq!(
            calc_body_fat(&skinfolds, SkinfoldProtocol::ThreeSite, Sex::Male, Some(0.0)),
            None
        );
    }

    #[test]
    fn test_body_fat_zero_site_reads_as_missing() {
        let skinfolds = Skinfolds {
            chest: Some(0.0),
            abdominal: Some(15.0),
            thigh: Some(12.0),
            ..Default::default()
        };
        assert_eq!(
            calc_body_fat(&skinfolds, SkinfoldProtocol::ThreeSite, Sex::Male, Some(25.0)),
            None
        );
    }

    #[test]
    fn test_body_fat_implausible_input_passes_through() {
        // Extreme skinfolds produce out-of-physiological-range output,
        // not an error
        let skinfolds = sf(120.0, 120.0, 120.0, 120.0, 120.0, 120.0, 120.0);
        let result = calc_body_fat(&skinfolds, SkinfoldProtocol::ThreeSite, Sex::Male, Some(90.0))
            .unwrap();
        assert!(result.percent.is_finite());
        assert!(result.percent > 60.0);
    }

    #[rstest]
    #[case(5.9, Sex::Male, BodyFatClass::Essential)]
    #[case(6.0, Sex::Male, BodyFatClass::Athlete)]
    #[case(14.0, Sex::Male, BodyFatClass::Fit)]
    #[case(18.0, Sex::Male, BodyFatClass::Acceptable)]
    #[case(25.0, Sex::Male, BodyFatClass::Obese)]
    #[case(13.9, Sex::Female, BodyFatClass::Essential)]
    #[case(14.0, Sex::Female, BodyFatClass::Athlete)]
    #[case(21.0, Sex::Female, BodyFatClass::Fit)]
    #[case(25.0, Sex::Female, BodyFatClass::Acceptable)]
    #[case(32.0, Sex::Female, BodyFatClass::Obese)]
    fn test_body_fat_cutoffs(
        #[case] percent: f64,
        #[case] sex: Sex,
        #[case] expected: BodyFatClass,
    ) {
        assert_eq!(classify_body_fat(percent, sex), expected);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: identical skinfold sets always produce identical
        /// estimates (the share/patient view depends on this)
        #[test]
        fn prop_body_fat_deterministic(
            triceps in 1.0f64..60.0,
            suprailiac in 1.0f64..60.0,
            thigh in 1.0f64..60.0,
            age in 18.0f64..90.0,
        ) {
            let skinfolds = Skinfolds {
                triceps: Some(triceps),
                suprailiac: Some(suprailiac),
                thigh: Some(thigh),
                ..Default::default()
            };
            let a = calc_body_fat(&skinfolds, SkinfoldProtocol::ThreeSite, Sex::Female, Some(age));
            let b = calc_body_fat(&skinfolds, SkinfoldProtocol::ThreeSite, Sex::Female, Some(age));
            prop_assert_eq!(a, b);
        }

        /// Property: classification ladder is ordered with the percentage
        #[test]
        fn prop_body_fat_classification_ordered(a in 0.0f64..60.0, b in 0.0f64..60.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(classify_body_fat(lo, Sex::Male) as u8 <= classify_body_fat(hi, Sex::Male) as u8);
            prop_assert!(classify_body_fat(lo, Sex::Female) as u8 <= classify_body_fat(hi, Sex::Female) as u8);
        }
    }

    // =========================================================================
    // Body Composition
    // =========================================================================

    #[test]
    fn test_body_composition_split() {
        let comp = calc_body_composition(Some(80.0), Some(25.0)).unwrap();
        assert_eq!(comp.fat_mass_kg, 20.0);
        assert_eq!(comp.lean_mass_kg, 60.0);
    }

    #[test]
    fn test_body_composition_zero_percent_is_valid() {
        let comp = calc_body_composition(Some(80.0), Some(0.0)).unwrap();
        assert_eq!(comp.fat_mass_kg, 0.0);
        assert_eq!(comp.lean_mass_kg, 80.0);
    }

    #[test]
    fn test_body_composition_missing_inputs() {
        assert_eq!(calc_body_composition(None, Some(25.0)), None);
        assert_eq!(calc_body_composition(Some(0.0), Some(25.0)), None);
        assert_eq!(calc_body_composition(Some(80.0), None), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: fat mass + lean mass reconstructs the weight exactly
        #[test]
        fn prop_masses_sum_to_weight(weight in 20.0f64..500.0, percent in 0.0f64..100.0) {
            let comp = calc_body_composition(Some(weight), Some(percent)).unwrap();
            prop_assert_eq!(comp.fat_mass_kg + comp.lean_mass_kg, weight);
        }
    }

    // =========================================================================
    // BMR / TDEE
    // =========================================================================

    #[test]
    fn test_bmr_reference_values() {
        let bmr = calc_bmr(Some(70.0), Some(175.0), Some(30.0), Sex::Male).unwrap();
        let expected = 66.5 + 13.75 * 70.0 + 5.003 * 175.0 - 6.75 * 30.0;
        assert!((bmr - expected).abs() < 1e-9);

        let bmr = calc_bmr(Some(60.0), Some(165.0), Some(30.0), Sex::Female).unwrap();
        let expected = 655.1 + 9.563 * 60.0 + 1.850 * 165.0 - 4.676 * 30.0;
        assert!((bmr - expected).abs() < 1e-9);
    }

    #[test]
    fn test_bmr_missing_inputs() {
        assert_eq!(calc_bmr(None, Some(175.0), Some(30.0), Sex::Male), None);
        assert_eq!(calc_bmr(Some(70.0), None, Some(30.0), Sex::Male), None);
        assert_eq!(calc_bmr(Some(70.0), Some(175.0), None, Sex::Male), None);
        assert_eq!(calc_bmr(Some(70.0), Some(175.0), Some(0.0), Sex::Male), None);
    }

    #[test]
    fn test_tdee() {
        let tdee = calc_tdee(Some(1700.0), Some(1.55)).unwrap();
        assert!((tdee - 2635.0).abs() < 1e-9);

        assert_eq!(calc_tdee(None, Some(1.55)), None);
        assert_eq!(calc_tdee(Some(1700.0), None), None);
        assert_eq!(calc_tdee(Some(1700.0), Some(0.0)), None);
        assert_eq!(calc_tdee(Some(0.0), Some(1.55)), None);
    }

    #[test]
    fn test_tdee_accepts_any_positive_multiplier() {
        // The five presets are a form affordance, not an engine invariant
        let tdee = calc_tdee(Some(1000.0), Some(2.3)).unwrap();
        assert_eq!(tdee, 2300.0);
    }

    #[test]
    fn test_activity_levels() {
        assert_eq!(ActivityLevel::Sedentary.multiplier(), 1.2);
        assert_eq!(ActivityLevel::LightlyActive.multiplier(), 1.375);
        assert_eq!(ActivityLevel::ModeratelyActive.multiplier(), 1.55);
        assert_eq!(ActivityLevel::VeryActive.multiplier(), 1.725);
        assert_eq!(ActivityLevel::ExtraActive.multiplier(), 1.9);
        assert_eq!(ActivityLevel::all().len(), 5);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: male BMR > female BMR for the same stats
        #[test]
        fn prop_male_bmr_higher(
            weight in 40.0f64..150.0,
            height in 140.0f64..210.0,
            age in 18.0f64..80.0,
        ) {
            let male = calc_bmr(Some(weight), Some(height), Some(age), Sex::Male).unwrap();
            let female = calc_bmr(Some(weight), Some(height), Some(age), Sex::Female).unwrap();
            prop_assert!(male > female);
        }
    }

    // =========================================================================
    // Ideal Weight
    // =========================================================================

    #[test]
    fn test_ideal_weight_range() {
        let range = calc_ideal_weight(Some(175.0)).unwrap();
        assert!((range.min_kg - 18.5 * 1.75 * 1.75).abs() < 1e-9);
        assert!((range.max_kg - 24.9 * 1.75 * 1.75).abs() < 1e-9);
        assert!(range.min_kg < range.max_kg);

        assert_eq!(calc_ideal_weight(None), None);
        assert_eq!(calc_ideal_weight(Some(0.0)), None);
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    #[test]
    fn test_format_metric() {
        assert_eq!(format_metric(Some(22.857), 1), "22.9");
        assert_eq!(format_metric(Some(22.857), 2), "22.86");
        assert_eq!(format_metric(Some(1702.0), 0), "1702");
        assert_eq!(format_metric(None, 1), "—");
        assert_eq!(format_metric(Some(f64::NAN), 1), "—");
    }

    #[test]
    fn test_color_band_tokens() {
        assert_eq!(ColorBand::Green.badge_class(), "badge-green");
        assert_eq!(ColorBand::Yellow.text_class(), "text-amber-500");
        assert_eq!(ColorBand::Red.bar_class(), "bg-red-500");
        assert_eq!(ColorBand::Gray.as_str(), "gray");
    }
}
