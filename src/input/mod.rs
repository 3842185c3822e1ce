use std::path::Path;

use ndarray::Array2;
use serde::Deserialize;

/// Fixed column order of the feature matrix. Every scoring path indexes
/// features in this order.
pub const FEATURE_COLUMNS: [&str; 7] = [
    "chin_sagging",
    "forehead_pigmentation",
    "forehead_wrinkle",
    "glabellus_wrinkle",
    "l_cheek_pore",
    "lip_dryness",
    "r_cheek_pore",
];

pub const N_FEATURES: usize = FEATURE_COLUMNS.len();

#[derive(Debug, Clone, Deserialize)]
pub struct GradeRecord {
    #[serde(rename = "Age")]
    pub age: u32,
    pub chin_sagging: f64,
    pub forehead_pigmentation: f64,
    pub forehead_wrinkle: f64,
    pub glabellus_wrinkle: f64,
    pub l_cheek_pore: f64,
    pub lip_dryness: f64,
    pub r_cheek_pore: f64,
}

impl GradeRecord {
    pub fn features(&self) -> [f64; N_FEATURES] {
        [
            self.chin_sagging,
            self.forehead_pigmentation,
            self.forehead_wrinkle,
            self.glabellus_wrinkle,
            self.l_cheek_pore,
            self.lip_dryness,
            self.r_cheek_pore,
        ]
    }
}

/// One row per subject: integer age plus an N x 7 grade matrix in
/// [`FEATURE_COLUMNS`] order.
#[derive(Debug, Clone)]
pub struct SubjectTable {
    pub ages: Vec<u32>,
    pub features: Array2<f64>,
}

impl SubjectTable {
    pub fn n_subjects(&self) -> usize {
        self.ages.len()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("grades table {0} contains no rows")]
    Empty(String),
}

/// Reads the grades CSV into a [`SubjectTable`]. Columns are matched by
/// header name, so the order in the file does not matter. Any missing
/// column or unparsable field aborts the load.
pub fn load_grades(path: &Path) -> Result<SubjectTable, InputError> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut ages = Vec::new();
    let mut flat = Vec::new();
    for result in reader.deserialize() {
        let record: GradeRecord = result?;
        ages.push(record.age);
        flat.extend_from_slice(&record.features());
    }

    if ages.is_empty() {
        return Err(InputError::Empty(path.display().to_string()));
    }

    let n = ages.len();
    let mut features = Array2::zeros((n, N_FEATURES));
    for (i, chunk) in flat.chunks_exact(N_FEATURES).enumerate() {
        for (j, &value) in chunk.iter().enumerate() {
            features[[i, j]] = value;
        }
    }

    Ok(SubjectTable { ages, features })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
