use ndarray::{Array1, Array2, Axis, s};

use crate::model::AnalysisError;

const POWER_ITER_MAX: usize = 100;
const POWER_ITER_TOL: f64 = 1e-10;

/// Principal component projection fitted on the standardized grade
/// matrix. Components are ordered by explained variance descending and
/// each component is sign-pinned so its loading sum is positive: all
/// seven grades read "higher = more aged", so a higher PC1 coordinate
/// always means an older-looking subject, on every run.
#[derive(Debug, Clone)]
pub struct Pca {
    /// Eigenvectors as columns, n_features x n_components.
    pub components: Array2<f64>,
    pub explained_variance: Array1<f64>,
    pub explained_variance_ratio: Array1<f64>,
    mean: Array1<f64>,
}

impl Pca {
    pub fn fit(data: &Array2<f64>, n_components: usize) -> Result<Self, AnalysisError> {
        let (n_samples, n_features) = data.dim();
        if n_samples < 2 {
            return Err(AnalysisError::TooFewRows(n_samples));
        }
        let n_components = n_components.min(n_features).min(n_samples);

        let mean = data.mean_axis(Axis(0)).ok_or(AnalysisError::EmptyTable)?;
        let centered = data - &mean;
        let cov = covariance_matrix(&centered);

        let (eigenvalues, eigenvectors) = eigen_symmetric(&cov);

        let mut components = eigenvectors.slice(s![.., ..n_components]).to_owned();
        let explained_variance = eigenvalues.slice(s![..n_components]).to_owned();

        for mut column in components.columns_mut() {
            if column.sum() < 0.0 {
                column.mapv_inplace(|v| -v);
            }
        }

        let total_variance = eigenvalues.sum();
        let explained_variance_ratio = if total_variance > 0.0 {
            &explained_variance / total_variance
        } else {
            Array1::zeros(n_components)
        };

        Ok(Pca {
            components,
            explained_variance,
            explained_variance_ratio,
            mean,
        })
    }

    pub fn transform(&self, data: &Array2<f64>) -> Array2<f64> {
        let centered = data - &self.mean;
        centered.dot(&self.components)
    }

    pub fn transform_row(&self, row: &Array1<f64>) -> Array1<f64> {
        let centered = row - &self.mean;
        self.components.t().dot(&centered)
    }
}

/// Covariance of already-centered data: X^T X / (n - 1).
fn covariance_matrix(centered: &Array2<f64>) -> Array2<f64> {
    let n = centered.nrows() as f64;
    centered.t().dot(centered) / (n - 1.0)
}

/// Eigendecomposition of a symmetric matrix via power iteration with
/// deflation, eigenvalues sorted descending.
fn eigen_symmetric(matrix: &Array2<f64>) -> (Array1<f64>, Array2<f64>) {
    let n = matrix.nrows();
    let mut eigenvalues = Array1::zeros(n);
    let mut eigenvectors = Array2::zeros((n, n));
    let mut deflated = matrix.clone();

    for i in 0..n {
        let (eigenvalue, eigenvector) = power_iteration(&deflated);
        eigenvalues[i] = eigenvalue;
        for j in 0..n {
            eigenvectors[[j, i]] = eigenvector[j];
        }

        // Deflate: A = A - lambda * v * v^T
        for r in 0..n {
            for c in 0..n {
                deflated[[r, c]] -= eigenvalue * eigenvector[r] * eigenvector[c];
            }
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        eigenvalues[b]
            .partial_cmp(&eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let sorted_values = Array1::from_iter(order.iter().map(|&i| eigenvalues[i]));
    let mut sorted_vectors = Array2::zeros((n, n));
    for (new_idx, &old_idx) in order.iter().enumerate() {
        for j in 0..n {
            sorted_vectors[[j, new_idx]] = eigenvectors[[j, old_idx]];
        }
    }

    (sorted_values, sorted_vectors)
}

fn power_iteration(matrix: &Array2<f64>) -> (f64, Array1<f64>) {
    let n = matrix.nrows();
    let mut v = Array1::from_elem(n, 1.0 / (n as f64).sqrt());
    let mut eigenvalue = 0.0;

    for _ in 0..POWER_ITER_MAX {
        let mut next = matrix.dot(&v);

        let next_eigenvalue: f64 = v.iter().zip(next.iter()).map(|(&a, &b)| a * b).sum();

        let norm: f64 = next.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 1e-10 {
            next /= norm;
        }

        if (next_eigenvalue - eigenvalue).abs() < POWER_ITER_TOL {
            return (next_eigenvalue, next);
        }

        eigenvalue = next_eigenvalue;
        v = next;
    }

    (eigenvalue, v)
}
