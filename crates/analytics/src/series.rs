//! Per-period series derived from returns, for charting.

use crate::error::AnalyticsError;
use crate::stats::sample_std_dev;
use serde::{Deserialize, Serialize};

/// Sample standard deviation over a trailing window.
///
/// Entry `t` covers `returns[t + 1 - window ..= t]`, so the first defined
/// index is `window - 1`; earlier entries are `None`. A window longer than the
/// series yields an all-`None` output of the same length.
pub fn rolling_volatility(
    returns: &[f64],
    window: usize,
) -> Result<Vec<Option<f64>>, AnalyticsError> {
    if window < 2 {
        return Err(AnalyticsError::InvalidParameter {
            name: "window",
            reason: format!("must be at least 2, got {}", window),
        });
    }

    let mut out = vec![None; returns.len()];
    for (t, slot) in out.iter_mut().enumerate().skip(window - 1) {
        *slot = sample_std_dev(&returns[t + 1 - window..=t]);
    }
    Ok(out)
}

/// Growth of one unit of capital, minus one: `prod_{i<=t}(1 + r[i]) - 1`.
pub fn cumulative_return_curve(returns: &[f64]) -> Vec<f64> {
    let mut wealth = 1.0;
    returns
        .iter()
        .map(|r| {
            wealth *= 1.0 + r;
            wealth - 1.0
        })
        .collect()
}

/// Relative distance of the compounded wealth from its running peak.
///
/// Every entry is `<= 0`. The running peak starts at the first compounded
/// value. Once wealth has been wiped out (non-positive peak) the drawdown is `-1`.
pub fn drawdown_curve(returns: &[f64]) -> Vec<f64> {
    let mut wealth = 1.0;
    let mut peak = f64::NEG_INFINITY;
    returns
        .iter()
        .map(|r| {
            wealth *= 1.0 + r;
            peak = peak.max(wealth);
            if peak > 0.0 {
                (wealth - peak) / peak
            } else {
                -1.0
            }
        })
        .collect()
}

/// One bucket of a return histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram of the return distribution.
///
/// Bins span `[min, max]`; every bin is half-open except the last, which also
/// holds `max`. When all values are equal the range is widened to
/// `[v - 0.5, v + 0.5]`. An empty input produces no bins.
pub fn return_histogram(returns: &[f64], bins: usize) -> Result<Vec<HistogramBin>, AnalyticsError> {
    if bins == 0 {
        return Err(AnalyticsError::InvalidParameter {
            name: "bins",
            reason: "must be positive".to_string(),
        });
    }
    let Some((min, max)) = returns
        .iter()
        .fold(None, |acc: Option<(f64, f64)>, &r| match acc {
            None => Some((r, r)),
            Some((lo, hi)) => Some((lo.min(r), hi.max(r))),
        })
    else {
        return Ok(Vec::new());
    };

    let (lo, hi) = if min == max { (min - 0.5, max + 0.5) } else { (min, max) };
    let width = (hi - lo) / bins as f64;

    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for &r in returns {
        let index = (((r - lo) / width).floor() as usize).min(bins - 1);
        histogram[index].count += 1;
    }
    Ok(histogram)
}
