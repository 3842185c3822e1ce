use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

pub mod chart;
pub mod table;
pub mod text;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("chart rendering failed: {0}")]
    Chart(String),
}

/// One row of the reference table: the ordered percentile set of a
/// band's aging scores. Serialized headers match the historical table
/// layout so downstream spreadsheets keep working.
#[derive(Debug, Clone, Serialize)]
pub struct BandRow {
    #[serde(rename = "Age_Group")]
    pub band: String,
    pub min: f64,
    #[serde(rename = "1%")]
    pub p1: f64,
    #[serde(rename = "10%")]
    pub p10: f64,
    #[serde(rename = "30%")]
    pub p30: f64,
    #[serde(rename = "50%")]
    pub p50: f64,
    #[serde(rename = "70%")]
    pub p70: f64,
    #[serde(rename = "90%")]
    pub p90: f64,
    pub max: f64,
}

/// Rank-predictor result for one query customer. `percentile` is the
/// fraction of the band's historical scores strictly below the query
/// score, 0-100; lower raw scores mean more youthful skin.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnosis {
    pub band: String,
    pub age: u32,
    pub score: f64,
    pub percentile: f64,
}

#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub tool_name: &'static str,
    pub tool_version: &'static str,
    pub command: &'static str,
    pub n_subjects: usize,
    pub explained_variance_ratio: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub band_population: Option<Vec<(String, usize)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<Diagnosis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub golden_ages: Option<Vec<u32>>,
}

pub fn write_text(path: &Path, contents: &str) -> Result<(), ReportError> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()?;
    Ok(())
}

pub fn write_summary_json(path: &Path, summary: &RunSummary) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(summary)?;
    write_text(path, &json)
}
