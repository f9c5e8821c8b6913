//! Descriptive statistics over plain return slices.
//!
//! These follow the conventions of the usual dataframe tooling: the standard
//! deviation is the sample estimator (`n - 1` denominator) and percentiles use
//! linear interpolation between order statistics.

use crate::error::AnalyticsError;

/// Fails with `MalformedSeries` if any value is NaN or infinite.
///
/// NaN is how a missing observation shows up in a plain `f64` slice, so this
/// is the gate every metric batch goes through before computing anything.
pub fn ensure_finite(values: &[f64]) -> Result<(), AnalyticsError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(i) => Err(AnalyticsError::MalformedSeries(format!(
            "missing or non-numeric value at index {} ({})",
            i, values[i]
        ))),
        None => Ok(()),
    }
}

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation. `None` with fewer than two points.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// The `q`-quantile (`0 <= q <= 1`) with linear interpolation between the
/// two closest ranks. `None` for an empty slice.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}
