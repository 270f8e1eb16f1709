//! Index calculator.
//!
//! Pure functions computing BMI, waist-hip ratio (WHR) and waist-to-height
//! ratio (WHtR) and classifying them. Classification uses the full-precision
//! value with floating-point noise snapped off, never the display rounding.

use crate::types::usable;
use crate::{
    BmiCategory, BmiResult, Error, IndexReport, MeasurementInput, RatioResult, Result, RiskFlag,
    Sex, ValidationMode,
};

/// WHR above this is elevated for men
pub const WHR_THRESHOLD_MALE: f64 = 0.90;
/// WHR above this is elevated for women
pub const WHR_THRESHOLD_FEMALE: f64 = 0.85;
/// WHtR at or above this is elevated
pub const WHTR_ELEVATED: f64 = 0.5;
/// WHtR at or above this is very high
pub const WHTR_VERY_HIGH: f64 = 0.6;

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `height * height` and `height * 100.0` are inexact, so 64 / 1.6² lands
/// just under 25. Nine decimals is far below any measurement precision.
fn snap(value: f64) -> f64 {
    round_to(value, 9)
}

/// Classify a BMI value. Boundaries belong to the higher category.
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else if bmi < 35.0 {
        BmiCategory::ObesityClass1
    } else if bmi < 40.0 {
        BmiCategory::ObesityClass2
    } else {
        BmiCategory::ObesityClass3
    }
}

/// BMI = mass(kg) / height(m)²
///
/// Returns `None` if either input is missing or not a positive number.
pub fn compute_bmi(mass_kg: Option<f64>, height_m: Option<f64>) -> Option<BmiResult> {
    let mass = usable(mass_kg)?;
    let height = usable(height_m)?;
    let bmi = mass / (height * height);
    Some(BmiResult {
        value: round_to(bmi, 1),
        category: classify_bmi(snap(bmi)),
    })
}

/// WHR risk: strictly above the sex-specific threshold is elevated
pub fn classify_whr(whr: f64, sex: Option<Sex>) -> RiskFlag {
    let threshold = match sex {
        Some(Sex::Male) => WHR_THRESHOLD_MALE,
        Some(Sex::Female) => WHR_THRESHOLD_FEMALE,
        None => return RiskFlag::Indeterminate,
    };
    if whr > threshold {
        RiskFlag::Elevated
    } else {
        RiskFlag::Normal
    }
}

/// WHR = waist(cm) / hip(cm)
pub fn compute_whr(
    waist_cm: Option<f64>,
    hip_cm: Option<f64>,
    sex: Option<Sex>,
) -> Option<RatioResult> {
    let waist = usable(waist_cm)?;
    let hip = usable(hip_cm)?;
    let whr = waist / hip;
    Some(RatioResult {
        value: round_to(whr, 2),
        risk: classify_whr(snap(whr), sex),
    })
}

/// WHtR risk with two inclusive lower bounds (0.5 elevated, 0.6 very high)
pub fn classify_whtr(whtr: f64) -> RiskFlag {
    if whtr >= WHTR_VERY_HIGH {
        RiskFlag::VeryHigh
    } else if whtr >= WHTR_ELEVATED {
        RiskFlag::Elevated
    } else {
        RiskFlag::Normal
    }
}

/// WHtR = waist(cm) / height(cm), with height given in metres
pub fn compute_whtr(waist_cm: Option<f64>, height_m: Option<f64>) -> Option<RatioResult> {
    let waist = usable(waist_cm)?;
    let height = usable(height_m)?;
    let whtr = waist / (height * 100.0);
    Some(RatioResult {
        value: round_to(whtr, 2),
        risk: classify_whtr(snap(whtr)),
    })
}

/// Compute every index whose inputs are available. Never fails.
pub fn calculate(input: &MeasurementInput) -> IndexReport {
    let report = IndexReport {
        bmi: compute_bmi(input.mass_kg, input.height_m),
        whr: compute_whr(input.waist_cm, input.hip_cm, input.sex),
        whtr: compute_whtr(input.waist_cm, input.height_m),
    };
    tracing::debug!(
        bmi = report.bmi.is_some(),
        whr = report.whr.is_some(),
        whtr = report.whtr.is_some(),
        "Calculated indices"
    );
    report
}

/// Fail if any of the four measurements is missing or not a positive number
pub fn validate_measurements(input: &MeasurementInput) -> Result<()> {
    let fields = [
        ("mass", input.mass_kg),
        ("height", input.height_m),
        ("waist", input.waist_cm),
        ("hip", input.hip_cm),
    ];
    let invalid: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| usable(*value).is_none())
        .map(|(name, _)| *name)
        .collect();
    if !invalid.is_empty() {
        return Err(Error::Validation(format!(
            "All measurements must be positive numbers (check: {}).",
            invalid.join(", ")
        )));
    }
    Ok(())
}

/// Fail-fast variant: all four measurements and the sex are required.
///
/// Measurements are checked before the sex.
pub fn calculate_strict(input: &MeasurementInput) -> Result<IndexReport> {
    validate_measurements(input)?;
    if input.sex.is_none() {
        return Err(Error::Validation(
            "Sex is required in strict mode. Use \"male\" or \"female\".".into(),
        ));
    }

    Ok(calculate(input))
}

/// Dispatch on the validation mode
pub fn calculate_with(mode: ValidationMode, input: &MeasurementInput) -> Result<IndexReport> {
    match mode {
        ValidationMode::Partial => Ok(calculate(input)),
        ValidationMode::Strict => calculate_strict(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_input() -> MeasurementInput {
        MeasurementInput {
            mass_kg: Some(78.0),
            height_m: Some(1.75),
            waist_cm: Some(92.0),
            hip_cm: Some(100.0),
            sex: Some(Sex::Male),
        }
    }

    #[test]
    fn test_end_to_end_example() {
        let report = calculate(&full_input());

        let bmi = report.bmi.unwrap();
        assert_eq!(bmi.value, 25.5);
        assert_eq!(bmi.category, BmiCategory::Overweight);

        let whr = report.whr.unwrap();
        assert_eq!(whr.value, 0.92);
        assert_eq!(whr.risk, RiskFlag::Elevated);

        let whtr = report.whtr.unwrap();
        assert_eq!(whtr.value, 0.53);
        assert_eq!(whtr.risk, RiskFlag::Elevated);
    }

    #[test]
    fn test_bmi_boundaries_belong_to_higher_category() {
        assert_eq!(classify_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(classify_bmi(18.5), BmiCategory::Normal);
        assert_eq!(classify_bmi(24.99), BmiCategory::Normal);
        assert_eq!(classify_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(classify_bmi(30.0), BmiCategory::ObesityClass1);
        assert_eq!(classify_bmi(35.0), BmiCategory::ObesityClass2);
        assert_eq!(classify_bmi(40.0), BmiCategory::ObesityClass3);
    }

    #[test]
    fn test_bmi_exact_boundary_from_measurements() {
        // 100 / 2.0² = 25.0 exactly
        let bmi = compute_bmi(Some(100.0), Some(2.0)).unwrap();
        assert_eq!(bmi.value, 25.0);
        assert_eq!(bmi.category, BmiCategory::Overweight);
    }

    #[test]
    fn test_bmi_category_uses_unrounded_value() {
        // 99.84 / 4 = 24.96, displayed as 25.0 but still Normal
        let bmi = compute_bmi(Some(99.84), Some(2.0)).unwrap();
        assert_eq!(bmi.value, 25.0);
        assert_eq!(bmi.category, BmiCategory::Normal);
    }

    #[test]
    fn test_bmi_boundary_at_realistic_heights() {
        // 64 / 1.60² and 60.0625 / 1.55² are exactly 25
        for (mass, height) in [(64.0, 1.6), (60.0625, 1.55), (65.61, 1.62), (79.21, 1.78)] {
            let bmi = compute_bmi(Some(mass), Some(height)).unwrap();
            assert_eq!(bmi.value, 25.0);
            assert_eq!(bmi.category, BmiCategory::Overweight, "{} kg at {} m", mass, height);
        }
    }

    #[test]
    fn test_whr_threshold_is_strict() {
        let at = compute_whr(Some(90.0), Some(100.0), Some(Sex::Male)).unwrap();
        assert_eq!(at.value, 0.9);
        assert_eq!(at.risk, RiskFlag::Normal);

        let above = compute_whr(Some(91.0), Some(100.0), Some(Sex::Male)).unwrap();
        assert_eq!(above.risk, RiskFlag::Elevated);
    }

    #[test]
    fn test_whr_female_threshold() {
        let whr = compute_whr(Some(88.0), Some(100.0), Some(Sex::Female)).unwrap();
        assert_eq!(whr.risk, RiskFlag::Elevated);

        let whr = compute_whr(Some(85.0), Some(100.0), Some(Sex::Female)).unwrap();
        assert_eq!(whr.risk, RiskFlag::Normal);
    }

    #[test]
    fn test_whr_unknown_sex_is_indeterminate() {
        for waist in [50.0, 90.0, 130.0] {
            let whr = compute_whr(Some(waist), Some(100.0), None).unwrap();
            assert_eq!(whr.risk, RiskFlag::Indeterminate);
        }
    }

    #[test]
    fn test_whtr_thresholds() {
        // height 2.0 m = 200 cm, so the ratios are exact
        let normal = compute_whtr(Some(98.0), Some(2.0)).unwrap();
        assert_eq!(normal.risk, RiskFlag::Normal);

        let at_half = compute_whtr(Some(100.0), Some(2.0)).unwrap();
        assert_eq!(at_half.value, 0.5);
        assert_eq!(at_half.risk, RiskFlag::Elevated);

        let at_six = compute_whtr(Some(120.0), Some(2.0)).unwrap();
        assert_eq!(at_six.value, 0.6);
        assert_eq!(at_six.risk, RiskFlag::VeryHigh);
    }

    #[test]
    fn test_whtr_boundaries_at_realistic_height() {
        let at_half = compute_whtr(Some(55.0), Some(1.1)).unwrap();
        assert_eq!(at_half.value, 0.5);
        assert_eq!(at_half.risk, RiskFlag::Elevated);

        let at_six = compute_whtr(Some(66.0), Some(1.1)).unwrap();
        assert_eq!(at_six.value, 0.6);
        assert_eq!(at_six.risk, RiskFlag::VeryHigh);

        let below = compute_whtr(Some(54.9), Some(1.1)).unwrap();
        assert_eq!(below.risk, RiskFlag::Normal);
    }

    #[test]
    fn test_partial_input_only_bmi() {
        let input = MeasurementInput {
            mass_kg: Some(60.0),
            height_m: Some(1.6),
            ..Default::default()
        };
        let report = calculate(&input);
        assert!(report.bmi.is_some());
        assert!(report.whr.is_none());
        assert!(report.whtr.is_none());
    }

    #[test]
    fn test_waist_and_height_without_hip() {
        let input = MeasurementInput {
            height_m: Some(1.8),
            waist_cm: Some(80.0),
            ..Default::default()
        };
        let report = calculate(&input);
        assert!(report.bmi.is_none());
        assert!(report.whr.is_none());
        assert_eq!(report.whtr.unwrap().value, 0.44);
    }

    #[test]
    fn test_invalid_values_are_not_computed() {
        let input = MeasurementInput {
            mass_kg: Some(-70.0),
            height_m: Some(f64::NAN),
            waist_cm: Some(0.0),
            hip_cm: Some(100.0),
            sex: Some(Sex::Male),
        };
        assert!(calculate(&input).is_empty());
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let input = full_input();
        assert_eq!(calculate(&input), calculate(&input));
    }

    #[test]
    fn test_strict_rejects_missing_values() {
        let input = MeasurementInput {
            hip_cm: None,
            ..full_input()
        };
        let err = calculate_strict(&input).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("hip"));
    }

    #[test]
    fn test_strict_requires_sex() {
        let input = MeasurementInput {
            sex: None,
            ..full_input()
        };
        let err = calculate_strict(&input).unwrap_err();
        assert!(err.to_string().contains("Sex is required"));
    }

    #[test]
    fn test_strict_reports_measurements_before_sex() {
        let input = MeasurementInput {
            waist_cm: Some(-1.0),
            sex: None,
            ..full_input()
        };
        let err = calculate_strict(&input).unwrap_err();
        assert_eq!(
            err.to_string(),
            "All measurements must be positive numbers (check: waist)."
        );
        assert!(validate_measurements(&full_input()).is_ok());
    }

    #[test]
    fn test_calculate_with_modes() {
        let input = MeasurementInput {
            mass_kg: Some(60.0),
            height_m: Some(1.6),
            ..Default::default()
        };
        assert!(calculate_with(ValidationMode::Partial, &input).is_ok());
        assert!(calculate_with(ValidationMode::Strict, &input).is_err());
        assert_eq!(
            calculate_with(ValidationMode::Strict, &full_input()).unwrap(),
            calculate(&full_input())
        );
    }
}
