//! Zero-safe descriptive statistics.
//!
//! Every division in the analysis code goes through these helpers. The
//! policy is uniform: a zero denominator yields `None`, and callers decide
//! whether that means "absent" or `0.0`.

/// Divide `numerator` by `denominator`, or `None` when the denominator is zero.
pub fn safe_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    safe_ratio(values.iter().sum(), values.len() as f64)
}

/// Arithmetic mean, with `0.0` for an empty slice.
pub fn mean_or_zero(values: &[f64]) -> f64 {
    mean(values).unwrap_or(0.0)
}

/// Population standard deviation around a precomputed mean.
///
/// Returns `0.0` for an empty slice.
pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance = safe_ratio(
        values.iter().map(|v| (v - mean).powi(2)).sum(),
        values.len() as f64,
    )
    .unwrap_or(0.0);
    variance.sqrt()
}

/// Distance of `value` from `mean` in standard-deviation units.
///
/// `None` when the standard deviation is zero: a dimension without
/// variance has no meaningful deviation.
pub fn deviation_in_std_devs(value: f64, mean: f64, std_dev: f64) -> Option<f64> {
    safe_ratio((value - mean).abs(), std_dev)
}

/// Clamp a score into `[0.0, 1.0]`.
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}
