//! Rolling aggregates over ordered series.

/// Trailing arithmetic mean with a growing window.
///
/// Element `i` is the mean of `values[i + 1 - w ..= i]` where
/// `w = min(window, i + 1)`: the window narrows near the start of the series
/// instead of being undefined. A `window` of 0 is treated as 1.
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;

    for (i, &v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        let n = (i + 1).min(window);
        out.push(sum / n as f64);
    }

    out
}

/// Mean of a slice, `None` when empty.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
