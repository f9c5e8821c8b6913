//! Scalar risk and performance metrics over a return slice.
//!
//! Each metric is computed independently and reports `None` when it is
//! mathematically undefined for the input. Only structurally invalid input
//! (missing values, bad parameters) is an error.

use crate::error::AnalyticsError;
use crate::report::MetricSet;
use crate::returns::guarded_ratio;
use crate::series::drawdown_curve;
use crate::stats::{ensure_finite, mean, percentile, sample_std_dev};
use configuration::AnalysisConfig;

/// `prod(1 + r) - 1` over the whole series.
pub fn cumulative_return(returns: &[f64]) -> Option<f64> {
    if returns.is_empty() {
        return None;
    }
    Some(returns.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0)
}

/// `(1 + mean(r))^periods_per_year - 1`.
pub fn annualized_return(returns: &[f64], periods_per_year: u32) -> Option<f64> {
    let mean = mean(returns)?;
    Some((1.0 + mean).powf(f64::from(periods_per_year)) - 1.0)
}

/// Sample standard deviation scaled by `sqrt(periods_per_year)`.
pub fn annualized_volatility(returns: &[f64], periods_per_year: u32) -> Option<f64> {
    Some(sample_std_dev(returns)? * f64::from(periods_per_year).sqrt())
}

pub fn sharpe_ratio(returns: &[f64], periods_per_year: u32, risk_free_rate: f64) -> Option<f64> {
    let excess = annualized_return(returns, periods_per_year)? - risk_free_rate;
    guarded_ratio(excess, annualized_volatility(returns, periods_per_year)?)
}

/// Like Sharpe, but only the negative returns contribute to the risk term.
pub fn sortino_ratio(returns: &[f64], periods_per_year: u32, risk_free_rate: f64) -> Option<f64> {
    let downside: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
    let downside_vol = sample_std_dev(&downside)? * f64::from(periods_per_year).sqrt();
    let excess = annualized_return(returns, periods_per_year)? - risk_free_rate;
    guarded_ratio(excess, downside_vol)
}

/// Deepest point of the drawdown curve. Always `<= 0`.
pub fn max_drawdown(returns: &[f64]) -> Option<f64> {
    drawdown_curve(returns).into_iter().reduce(f64::min)
}

pub fn calmar_ratio(returns: &[f64], periods_per_year: u32) -> Option<f64> {
    let ann_return = annualized_return(returns, periods_per_year)?;
    guarded_ratio(ann_return, max_drawdown(returns)?.abs())
}

/// The `confidence_level` percentile of the return distribution.
///
/// `confidence_level` is the tail probability, so `0.05` gives the 5% VaR.
pub fn value_at_risk(returns: &[f64], confidence_level: f64) -> Result<Option<f64>, AnalyticsError> {
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(AnalyticsError::InvalidParameter {
            name: "confidence_level",
            reason: format!("must lie strictly between 0 and 1, got {}", confidence_level),
        });
    }
    Ok(percentile(returns, confidence_level))
}

/// Computes every canonical metric for `returns`.
///
/// The input and the configuration are validated up front; after that no
/// metric can fail, and an undefined metric never affects the others.
pub fn compute_all_metrics(
    returns: &[f64],
    config: &AnalysisConfig,
) -> Result<MetricSet, AnalyticsError> {
    config.validate()?;
    ensure_finite(returns)?;

    let ppy = config.periods_per_year;
    let rf = config.risk_free_rate;

    let set = MetricSet {
        cumulative_return: cumulative_return(returns),
        annualized_return: annualized_return(returns, ppy),
        annualized_volatility: annualized_volatility(returns, ppy),
        sharpe_ratio: sharpe_ratio(returns, ppy, rf),
        sortino_ratio: sortino_ratio(returns, ppy, rf),
        max_drawdown: max_drawdown(returns),
        calmar_ratio: calmar_ratio(returns, ppy),
        value_at_risk: value_at_risk(returns, config.confidence_level)?,
        var_confidence_level: config.confidence_level,
    };

    tracing::debug!(
        observations = returns.len(),
        undefined = set.undefined_count(),
        "Computed metric set."
    );

    Ok(set)
}
