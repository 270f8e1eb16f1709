//! Export of a computed result as a CSV record or a JSON document.
//!
//! The CSV layout has a fixed header order. The JSON document is the
//! merged record as key-value pairs, suitable for pasting elsewhere.

use crate::{Error, Result, ResultRecord};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Filename used for the CSV artifact unless configured otherwise
pub const DEFAULT_CSV_FILENAME: &str = "anthropometric_indices.csv";

/// A row in the CSV output. Field order is the header order.
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    mass_kg: Option<f64>,
    height_m: Option<f64>,
    waist_cm: Option<f64>,
    hip_cm: Option<f64>,
    sex: Option<&'static str>,
    bmi: Option<f64>,
    bmi_category: Option<&'static str>,
    whr: Option<f64>,
    whr_risk: Option<&'static str>,
    whtr: Option<f64>,
    whtr_risk: Option<&'static str>,
}

impl From<&ResultRecord> for CsvRow {
    fn from(record: &ResultRecord) -> Self {
        let input = &record.input;
        let report = &record.report;
        CsvRow {
            mass_kg: input.mass_kg,
            height_m: input.height_m,
            waist_cm: input.waist_cm,
            hip_cm: input.hip_cm,
            sex: input.sex.map(|s| s.as_str()),
            bmi: report.bmi.map(|b| b.value),
            bmi_category: report.bmi.map(|b| b.category.label()),
            whr: report.whr.map(|r| r.value),
            whr_risk: report.whr.map(|r| r.risk.label()),
            whtr: report.whtr.map(|r| r.value),
            whtr_risk: report.whtr.map(|r| r.risk.label()),
        }
    }
}

/// Header row followed by a single value row. Absent values are empty cells.
pub fn to_csv(record: &ResultRecord) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());
    writer.serialize(CsvRow::from(record))?;
    writer.flush()?;

    let bytes = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Other(format!("CSV is not UTF-8: {}", e)))
}

/// Pretty-printed JSON document of the merged record.
///
/// Each computed index carries its serde code (`category` / `risk`) and the
/// display `label` used on screen and in the CSV.
pub fn to_json(record: &ResultRecord) -> Result<String> {
    let mut document = serde_json::to_value(record)?;
    let report = &record.report;
    let labels = [
        ("bmi", report.bmi.map(|b| b.category.label())),
        ("whr", report.whr.map(|r| r.risk.label())),
        ("whtr", report.whtr.map(|r| r.risk.label())),
    ];
    for (key, label) in labels {
        if let (Some(label), Some(index)) = (label, document.get_mut(key)) {
            if let Some(index) = index.as_object_mut() {
                index.insert("label".into(), label.into());
            }
        }
    }
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Write the CSV artifact to `dir/filename`, replacing any previous one.
///
/// The file is written to a temp file in the same directory, synced and
/// renamed into place.
pub fn write_csv(record: &ResultRecord, dir: &Path, filename: &str) -> Result<PathBuf> {
    if filename.is_empty() || filename.contains(|c: char| c == '/' || c == '\\') {
        return Err(Error::Config(format!(
            "Invalid CSV filename {:?}",
            filename
        )));
    }

    std::fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    let contents = to_csv(record)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(contents.as_bytes())?;
    temp.flush()?;
    temp.as_file().sync_all()?;
    temp.persist(&path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Wrote CSV export to {:?}", path);
    Ok(path)
}
