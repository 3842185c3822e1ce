use ndarray::{Array1, Array2, Axis};

use crate::input::{FEATURE_COLUMNS, N_FEATURES};
use crate::model::AnalysisError;

/// Per-column standardization fitted once over the full reference
/// population: subtract the column mean, divide by the column standard
/// deviation (population variance, matching the fit-on-everything
/// convention of the reference pipeline).
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    std: Array1<f64>,
}

impl StandardScaler {
    pub fn fit(data: &Array2<f64>) -> Result<Self, AnalysisError> {
        let n = data.nrows();
        if n == 0 {
            return Err(AnalysisError::EmptyTable);
        }

        let mean = data.mean_axis(Axis(0)).ok_or(AnalysisError::EmptyTable)?;

        let mut std = Array1::zeros(data.ncols());
        for (j, column) in data.columns().into_iter().enumerate() {
            let var = column
                .iter()
                .map(|&v| (v - mean[j]) * (v - mean[j]))
                .sum::<f64>()
                / n as f64;
            let sd = var.sqrt();
            if sd == 0.0 {
                let name = FEATURE_COLUMNS.get(j).copied().unwrap_or("unknown");
                return Err(AnalysisError::ZeroVariance(name));
            }
            std[j] = sd;
        }

        Ok(StandardScaler { mean, std })
    }

    pub fn transform(&self, data: &Array2<f64>) -> Array2<f64> {
        (data - &self.mean) / &self.std
    }

    pub fn transform_row(&self, row: &[f64; N_FEATURES]) -> Array1<f64> {
        let mut out = Array1::zeros(row.len());
        for (j, &v) in row.iter().enumerate() {
            out[j] = (v - self.mean[j]) / self.std[j];
        }
        out
    }
}
