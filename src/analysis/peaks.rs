/// Local-maximum detection with a minimum height and a minimum spacing,
/// matching the usual peak-finding contract: a candidate is strictly
/// greater than both neighbours and at least `min_height` tall;
/// candidates are then kept in descending height order, dropping any
/// within `min_distance` positions of an already-kept peak. Returned
/// indices are ascending.
pub fn find_peaks(values: &[f64], min_height: f64, min_distance: usize) -> Vec<usize> {
    if values.len() < 3 {
        return Vec::new();
    }

    let mut candidates: Vec<usize> = (1..values.len() - 1)
        .filter(|&i| {
            values[i] > values[i - 1] && values[i] > values[i + 1] && values[i] >= min_height
        })
        .collect();

    candidates.sort_by(|&a, &b| {
        values[b]
            .partial_cmp(&values[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut kept: Vec<usize> = Vec::new();
    for idx in candidates {
        if kept.iter().all(|&k| idx.abs_diff(k) >= min_distance) {
            kept.push(idx);
        }
    }
    kept.sort_unstable();
    kept
}
