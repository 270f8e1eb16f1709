//! Core domain types for anthropometric indices.
//!
//! This module defines:
//! - Measurement input as delivered by a form
//! - Classification labels (BMI category, risk flag, severity)
//! - Per-index results and the merged result record

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Input Types
// ============================================================================

/// Biological sex, used only for the waist-hip ratio threshold
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl FromStr for Sex {
    type Err = Error;

    /// Accepts `male`/`m` and `female`/`f`, case-insensitive
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(Error::Validation(format!(
                "Invalid sex {:?}. Use \"male\" or \"female\".",
                other
            ))),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw measurements collected at submission time.
///
/// Every field is optional; a value only counts when it is finite and
/// strictly positive.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MeasurementInput {
    pub mass_kg: Option<f64>,
    pub height_m: Option<f64>,
    pub waist_cm: Option<f64>,
    pub hip_cm: Option<f64>,
    pub sex: Option<Sex>,
}

/// Returns the value if it is present, finite and strictly positive
pub fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// How invalid or missing measurements are treated
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Each index is computed on its own; missing inputs leave it out
    #[default]
    Partial,
    /// Any invalid measurement or missing sex aborts the whole computation
    Strict,
}

// ============================================================================
// Classification Types
// ============================================================================

/// BMI category (WHO table with three obesity classes)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    ObesityClass1,
    ObesityClass2,
    ObesityClass3,
}

impl BmiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObesityClass1 => "Obesity class I",
            BmiCategory::ObesityClass2 => "Obesity class II",
            BmiCategory::ObesityClass3 => "Obesity class III",
        }
    }
}

/// Risk flag derived from comparing a ratio against its thresholds
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskFlag {
    Normal,
    Elevated,
    VeryHigh,
    /// Threshold depends on data that was not supplied (sex for WHR)
    Indeterminate,
}

impl RiskFlag {
    pub fn label(&self) -> &'static str {
        match self {
            RiskFlag::Normal => "normal risk",
            RiskFlag::Elevated => "elevated risk",
            RiskFlag::VeryHigh => "very high risk",
            RiskFlag::Indeterminate => "indeterminate risk",
        }
    }
}

/// Display severity tier used for styling
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Caution,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Caution => "caution",
            Severity::High => "high",
        }
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// BMI value (one decimal) and its category
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct BmiResult {
    pub value: f64,
    pub category: BmiCategory,
}

/// Circumference ratio (two decimals) and its risk flag
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct RatioResult {
    pub value: f64,
    pub risk: RiskFlag,
}

/// The three indices; `None` means not computed
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct IndexReport {
    pub bmi: Option<BmiResult>,
    pub whr: Option<RatioResult>,
    pub whtr: Option<RatioResult>,
}

impl IndexReport {
    /// True when none of the indices could be computed
    pub fn is_empty(&self) -> bool {
        self.bmi.is_none() && self.whr.is_none() && self.whtr.is_none()
    }
}

/// Measurements merged with their derived indices
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ResultRecord {
    #[serde(flatten)]
    pub input: MeasurementInput,
    #[serde(flatten)]
    pub report: IndexReport,
}

impl ResultRecord {
    pub fn new(input: MeasurementInput, report: IndexReport) -> Self {
        Self { input, report }
    }
}
