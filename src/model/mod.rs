use ndarray::{Array1, Array2};

pub mod bands;
pub mod pca;
pub mod scaler;

use pca::Pca;
use scaler::StandardScaler;

use crate::input::N_FEATURES;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("grades table has no rows")]
    EmptyTable,
    #[error("need at least 2 rows to fit the aging model, got {0}")]
    TooFewRows(usize),
    #[error("feature column {0} has zero variance; the aging score is undefined")]
    ZeroVariance(&'static str),
}

/// Fitted standardization + projection parameters. Returned by [`fit`]
/// and passed explicitly to every scoring call, so a new feature vector
/// goes through exactly the transform fitted on the reference population
/// and is never refit.
#[derive(Debug, Clone)]
pub struct AgingModel {
    pub scaler: StandardScaler,
    pub pca: Pca,
}

impl AgingModel {
    pub fn fit(features: &Array2<f64>, n_components: usize) -> Result<Self, AnalysisError> {
        let scaler = StandardScaler::fit(features)?;
        let standardized = scaler.transform(features);
        let pca = Pca::fit(&standardized, n_components)?;
        Ok(AgingModel { scaler, pca })
    }

    /// PC1 coordinate for every subject. Higher means more aged; the
    /// component orientation is pinned at fit time.
    pub fn score_matrix(&self, features: &Array2<f64>) -> Array1<f64> {
        let standardized = self.scaler.transform(features);
        let projected = self.pca.transform(&standardized);
        projected.column(0).to_owned()
    }

    /// Scores one unseen feature vector through the stored parameters.
    pub fn score_one(&self, grades: &[f64; N_FEATURES]) -> f64 {
        let standardized = self.scaler.transform_row(grades);
        let projected = self.pca.transform_row(&standardized);
        projected[0]
    }

    pub fn explained_variance_ratio(&self) -> &Array1<f64> {
        &self.pca.explained_variance_ratio
    }
}
