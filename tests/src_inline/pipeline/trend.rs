use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::input::FEATURE_COLUMNS;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("dermascore_trend_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_synthetic_grades(path: &Path) {
    let mut csv = String::from("Age");
    for name in FEATURE_COLUMNS {
        csv.push(',');
        csv.push_str(name);
    }
    csv.push('\n');

    for i in 0..60u32 {
        let age = 15 + i;
        csv.push_str(&age.to_string());
        for j in 0..FEATURE_COLUMNS.len() as u32 {
            let base = age as f64 / 10.0;
            let jitter = ((i * (j + 2)) % 7) as f64 * 0.3;
            csv.push_str(&format!(",{:.3}", base + jitter));
        }
        csv.push('\n');
    }

    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(csv.as_bytes()).unwrap();
}

/// One subject per age, flat means except a single spiked age. After
/// 3-point smoothing the spike spreads across three ages and the
/// velocity has exactly one strict local maximum, one age before the
/// spike.
fn spiked_scores() -> Vec<f64> {
    vec![0.0, 0.0, 0.0, 0.0, 6.0, 0.0, 0.0, 0.0, 0.0]
}

#[test]
fn test_single_spike_yields_one_golden_age() {
    let ages: Vec<u32> = (30..=38).collect();
    let trend = compute_age_trend(&ages, spiked_scores().into_iter());

    assert_eq!(trend.ages, ages);
    assert_eq!(
        trend.smoothed,
        vec![0.0, 0.0, 0.0, 2.0, 2.0, 2.0, 0.0, 0.0, 0.0]
    );
    assert_eq!(trend.velocity.len(), 8);
    assert_eq!(trend.golden_ages, vec![33]);
}

#[test]
fn test_golden_ages_exclude_twenty_and_under() {
    // Same spike shape, shifted into childhood ages.
    let ages: Vec<u32> = (10..=18).collect();
    let trend = compute_age_trend(&ages, spiked_scores().into_iter());
    assert!(trend.golden_ages.is_empty());
}

#[test]
fn test_multiple_subjects_per_age_are_averaged() {
    let ages = vec![30, 30, 31, 31];
    let scores = vec![1.0, 3.0, 5.0, 7.0];
    let trend = compute_age_trend(&ages, scores.into_iter());
    assert_eq!(trend.ages, vec![30, 31]);
    assert_eq!(trend.mean_score, vec![2.0, 6.0]);
}

#[test]
fn test_single_distinct_age_is_degenerate() {
    let ages = vec![30, 30, 30];
    let scores = vec![1.0, 2.0, 3.0];
    let trend = compute_age_trend(&ages, scores.into_iter());
    assert_eq!(trend.ages, vec![30]);
    assert!(trend.velocity.is_empty());
    assert!(trend.golden_ages.is_empty());
}

#[test]
fn test_run_trend_writes_all_outputs() {
    let dir = make_temp_dir();
    let input = dir.join("grades.csv");
    let out = dir.join("out");
    write_synthetic_grades(&input);

    let output = run_trend(&input, &out).unwrap();
    assert_eq!(output.n_subjects, 60);
    assert_eq!(output.trend.ages.len(), 60);

    let report = fs::read_to_string(out.join("golden_time_analysis.txt")).unwrap();
    assert!(report.contains("Golden Time"));

    let png = fs::read(out.join("skin_turning_points.png")).unwrap();
    assert!(!png.is_empty());

    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("summary.json")).unwrap()).unwrap();
    assert_eq!(summary["command"], "trend");
    assert!(summary["golden_ages"].is_array());
}
