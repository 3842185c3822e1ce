use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::analysis::peaks::find_peaks;
use crate::analysis::smoothing::{centered_moving_average, first_difference};
use crate::input::load_grades;
use crate::model::AgingModel;
use crate::pipeline::PipelineError;
use crate::report::chart::render_turning_points;
use crate::report::text::render_golden_time_text;
use crate::report::{ReportError, RunSummary, write_summary_json, write_text};

pub const SMOOTHING_WINDOW: usize = 3;
pub const VELOCITY_HEIGHT_FACTOR: f64 = 1.5;
pub const MIN_PEAK_DISTANCE: usize = 3;
/// Detected peaks at or below this age are not reported.
pub const ADULT_AGE_CUTOFF: u32 = 20;

/// Per-age aging trend. `velocity[i]` is the smoothed score change from
/// `ages[i]` to `ages[i + 1]`, so it is aligned to the second age
/// onward.
#[derive(Debug, Clone)]
pub struct AgeTrend {
    pub ages: Vec<u32>,
    pub mean_score: Vec<f64>,
    pub smoothed: Vec<f64>,
    pub velocity: Vec<f64>,
    pub golden_ages: Vec<u32>,
}

#[derive(Debug)]
pub struct TrendOutput {
    pub trend: AgeTrend,
    pub n_subjects: usize,
}

pub fn run_trend(input: &Path, out_dir: &Path) -> Result<TrendOutput, PipelineError> {
    let table = load_grades(input)?;
    info!(rows = table.n_subjects(), "loaded grade table");

    let model = AgingModel::fit(&table.features, 1)?;
    info!(
        pc1 = model.explained_variance_ratio()[0],
        "fitted aging model"
    );

    let scores = model.score_matrix(&table.features);
    let trend = compute_age_trend(&table.ages, scores.iter().copied());
    info!(
        ages = trend.ages.len(),
        golden = trend.golden_ages.len(),
        "computed age trend"
    );

    fs::create_dir_all(out_dir).map_err(ReportError::Io)?;

    let report_path = out_dir.join("golden_time_analysis.txt");
    write_text(&report_path, &render_golden_time_text(&trend.golden_ages))?;
    info!(path = %report_path.display(), "wrote golden time report");

    let chart_path = out_dir.join("skin_turning_points.png");
    render_turning_points(&chart_path, &trend)?;
    info!(path = %chart_path.display(), "wrote trend chart");

    let summary = RunSummary {
        tool_name: "dermascore",
        tool_version: env!("CARGO_PKG_VERSION"),
        command: "trend",
        n_subjects: table.n_subjects(),
        explained_variance_ratio: model.explained_variance_ratio().to_vec(),
        band_population: None,
        diagnosis: None,
        golden_ages: Some(trend.golden_ages.clone()),
    };
    write_summary_json(&out_dir.join("summary.json"), &summary)?;

    Ok(TrendOutput {
        trend,
        n_subjects: table.n_subjects(),
    })
}

/// Mean score per distinct age, smoothed, differentiated into a
/// velocity, with golden times at qualifying velocity peaks. With fewer
/// than two distinct ages the velocity is empty and no peaks exist.
pub fn compute_age_trend(ages: &[u32], scores: impl Iterator<Item = f64>) -> AgeTrend {
    let mut sums: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for (&age, score) in ages.iter().zip(scores) {
        let entry = sums.entry(age).or_insert((0.0, 0));
        entry.0 += score;
        entry.1 += 1;
    }

    let distinct_ages: Vec<u32> = sums.keys().copied().collect();
    let mean_score: Vec<f64> = sums.values().map(|&(sum, n)| sum / n as f64).collect();

    let smoothed = centered_moving_average(&mean_score, SMOOTHING_WINDOW);
    let velocity = first_difference(&smoothed);

    let golden_ages = if velocity.is_empty() {
        Vec::new()
    } else {
        let mean_velocity = velocity.iter().sum::<f64>() / velocity.len() as f64;
        find_peaks(
            &velocity,
            mean_velocity * VELOCITY_HEIGHT_FACTOR,
            MIN_PEAK_DISTANCE,
        )
        .into_iter()
        .map(|i| distinct_ages[i + 1])
        .filter(|&age| age > ADULT_AGE_CUTOFF)
        .collect()
    };

    AgeTrend {
        ages: distinct_ages,
        mean_score,
        smoothed,
        velocity,
        golden_ages,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/trend.rs"]
mod tests;
