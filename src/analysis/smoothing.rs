/// Centered moving average with an explicit edge policy: positions near
/// the edges that lack a full window take the value of the nearest
/// position that has one (back-fill at the head, forward-fill at the
/// tail). A series shorter than the window is returned unchanged.
pub fn centered_moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    if window <= 1 || n < window {
        return values.to_vec();
    }
    let half = window / 2;

    let mut out = vec![0.0; n];
    for i in half..n - half {
        let slice = &values[i - half..=i + half];
        out[i] = slice.iter().sum::<f64>() / window as f64;
    }
    for i in 0..half {
        out[i] = out[half];
    }
    for i in n - half..n {
        out[i] = out[n - 1 - half];
    }
    out
}

/// First difference: out[i] = values[i + 1] - values[i], one element
/// shorter than the input. Empty for inputs shorter than 2.
pub fn first_difference(values: &[f64]) -> Vec<f64> {
    if values.len() < 2 {
        return Vec::new();
    }
    values.windows(2).map(|w| w[1] - w[0]).collect()
}
