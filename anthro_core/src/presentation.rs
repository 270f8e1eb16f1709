//! Presentation adapter.
//!
//! Turns an [`IndexReport`] into labelled display lines with a severity tier
//! each, ready for a terminal or any other display collaborator.

use crate::{BmiCategory, IndexReport, RiskFlag, Severity};
use serde::Serialize;

/// Prompt shown when no index could be computed
pub const MISSING_ALL_PROMPT: &str = "Enter at least one complete set of measurements: \
mass and height (BMI), waist and hip (WHR), or waist and height (WHtR).";

impl BmiCategory {
    /// Normal is fine, Overweight calls for caution, everything else is high
    pub fn severity(&self) -> Severity {
        match self {
            BmiCategory::Normal => Severity::Normal,
            BmiCategory::Overweight => Severity::Caution,
            _ => Severity::High,
        }
    }
}

impl RiskFlag {
    pub fn severity(&self) -> Severity {
        match self {
            RiskFlag::Normal => Severity::Normal,
            RiskFlag::Elevated | RiskFlag::VeryHigh => Severity::High,
            RiskFlag::Indeterminate => Severity::Caution,
        }
    }
}

/// One rendered row of output
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct DisplayLine {
    pub text: String,
    pub severity: Severity,
}

impl DisplayLine {
    fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }
}

/// Build the display lines for a report.
///
/// Indices that were not computed get a placeholder naming their inputs.
/// If nothing was computed the result is a single high-severity prompt.
pub fn display_lines(report: &IndexReport) -> Vec<DisplayLine> {
    if report.is_empty() {
        return vec![DisplayLine::new(MISSING_ALL_PROMPT, Severity::High)];
    }

    let bmi = match &report.bmi {
        Some(bmi) => DisplayLine::new(
            format!("BMI: {:.1} kg/m² ({})", bmi.value, bmi.category.label()),
            bmi.category.severity(),
        ),
        None => not_computed("BMI", "mass and height"),
    };

    let whr = match &report.whr {
        Some(whr) => DisplayLine::new(
            format!("WHR (waist/hip): {:.2} ({})", whr.value, whr.risk.label()),
            whr.risk.severity(),
        ),
        None => not_computed("WHR (waist/hip)", "waist and hip"),
    };

    let whtr = match &report.whtr {
        Some(whtr) => DisplayLine::new(
            format!("WHtR (waist/height): {:.2} ({})", whtr.value, whtr.risk.label()),
            whtr.risk.severity(),
        ),
        None => not_computed("WHtR (waist/height)", "waist and height"),
    };

    vec![bmi, whr, whtr]
}

fn not_computed(name: &str, needs: &str) -> DisplayLine {
    DisplayLine::new(
        format!("{}: not computed (needs {})", name, needs),
        Severity::Normal,
    )
}

/// Render lines as plain text, one per row, tagged with their severity
pub fn render_text(lines: &[DisplayLine]) -> String {
    lines
        .iter()
        .map(|line| format!("[{}] {}", line.severity.as_str(), line.text))
        .collect::<Vec<_>>()
        .join("\n")
}
