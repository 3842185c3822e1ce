use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::analysis::percentile::{quantile, rank_below};
use crate::input::{N_FEATURES, load_grades};
use crate::model::AgingModel;
use crate::model::bands::AgeBand;
use crate::pipeline::PipelineError;
use crate::report::table::write_reference_csv;
use crate::report::text::render_diagnosis_text;
use crate::report::{BandRow, Diagnosis, ReportError, RunSummary, write_summary_json, write_text};

/// The customer diagnosed against the reference table. Not added back
/// into the reference population.
#[derive(Debug, Clone)]
pub struct QueryCustomer {
    pub age: u32,
    pub grades: [f64; N_FEATURES],
}

impl QueryCustomer {
    pub fn new(age: u32, grades: &[f64]) -> Result<Self, PipelineError> {
        if grades.len() != N_FEATURES {
            return Err(PipelineError::InvalidQuery(format!(
                "expected {} feature grades, got {}",
                N_FEATURES,
                grades.len()
            )));
        }
        let mut fixed = [0.0; N_FEATURES];
        fixed.copy_from_slice(grades);
        Ok(QueryCustomer { age, grades: fixed })
    }
}

#[derive(Debug)]
pub struct ReferenceOutput {
    pub rows: Vec<BandRow>,
    pub diagnosis: Diagnosis,
    pub n_subjects: usize,
}

pub fn run_reference(
    input: &Path,
    out_dir: &Path,
    customer: &QueryCustomer,
) -> Result<ReferenceOutput, PipelineError> {
    let table = load_grades(input)?;
    info!(rows = table.n_subjects(), "loaded grade table");

    let model = AgingModel::fit(&table.features, 2)?;
    info!(
        pc1 = model.explained_variance_ratio()[0],
        "fitted aging model"
    );

    let scores = model.score_matrix(&table.features);
    let banded = band_scores(&table.ages, scores.iter().copied());
    let rows = build_band_rows(&banded);
    let diagnosis = predict_rank(&model, &banded, customer);

    fs::create_dir_all(out_dir).map_err(ReportError::Io)?;

    let table_path = out_dir.join("age_rank_reference.csv");
    write_reference_csv(&table_path, &rows)?;
    info!(path = %table_path.display(), "wrote reference table");

    let diagnosis_path = out_dir.join("diagnosis_result.txt");
    write_text(&diagnosis_path, &render_diagnosis_text(&diagnosis))?;
    info!(path = %diagnosis_path.display(), "wrote diagnosis report");

    let summary = RunSummary {
        tool_name: "dermascore",
        tool_version: env!("CARGO_PKG_VERSION"),
        command: "reference",
        n_subjects: table.n_subjects(),
        explained_variance_ratio: model.explained_variance_ratio().to_vec(),
        band_population: Some(
            AgeBand::ALL
                .iter()
                .map(|b| (b.label().to_string(), banded[b.index()].len()))
                .collect(),
        ),
        diagnosis: Some(diagnosis.clone()),
        golden_ages: None,
    };
    write_summary_json(&out_dir.join("summary.json"), &summary)?;

    Ok(ReferenceOutput {
        rows,
        diagnosis,
        n_subjects: table.n_subjects(),
    })
}

/// Groups aging scores by age band, in [`AgeBand::ALL`] order.
pub fn band_scores(ages: &[u32], scores: impl Iterator<Item = f64>) -> [Vec<f64>; 6] {
    let mut banded: [Vec<f64>; 6] = Default::default();
    for (&age, score) in ages.iter().zip(scores) {
        banded[AgeBand::from_age(age).index()].push(score);
    }
    banded
}

pub fn build_band_rows(banded: &[Vec<f64>; 6]) -> Vec<BandRow> {
    AgeBand::ALL
        .iter()
        .map(|band| {
            let scores = &banded[band.index()];
            if scores.is_empty() {
                warn!(band = band.label(), "age band has no subjects");
            }
            BandRow {
                band: band.label().to_string(),
                min: quantile(scores, 0.0),
                p1: quantile(scores, 0.01),
                p10: quantile(scores, 0.10),
                p30: quantile(scores, 0.30),
                p50: quantile(scores, 0.50),
                p70: quantile(scores, 0.70),
                p90: quantile(scores, 0.90),
                max: quantile(scores, 1.0),
            }
        })
        .collect()
}

/// Scores the customer through the stored model and ranks the score
/// against the band's historical scores (strictly-below fraction).
pub fn predict_rank(
    model: &AgingModel,
    banded: &[Vec<f64>; 6],
    customer: &QueryCustomer,
) -> Diagnosis {
    let score = model.score_one(&customer.grades);
    let band = AgeBand::from_age(customer.age);
    let percentile = rank_below(&banded[band.index()], score);
    Diagnosis {
        band: band.label().to_string(),
        age: customer.age,
        score,
        percentile,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/reference.rs"]
mod tests;
