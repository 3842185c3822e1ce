/// Quantile with linear interpolation between order statistics. For a
/// sorted sample of n values the p-quantile sits at position (n-1)*p and
/// interpolates between the two neighbouring values.
pub fn quantile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let pos = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Percentile rank of `score` within a reference population: the
/// fraction of values *strictly less than* the score, scaled to 0-100.
pub fn rank_below(values: &[f64], score: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let below = values.iter().filter(|&&v| v < score).count();
    below as f64 / values.len() as f64 * 100.0
}
