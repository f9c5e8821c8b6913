use crate::error::AnalyticsError;
use core_types::{FirstReturnPolicy, PriceSeries, ReturnPoint, ReturnSeries};

/// Converts a price history into per-period simple and log returns.
///
/// Every close must be positive and finite; the first offending price is
/// reported as `InvalidPrice` and no returns are produced. At least two prices
/// are required. With `FirstReturnPolicy::ZeroFill` the first price yields a
/// zero return so the output has the same length as the input.
pub fn derive_returns(
    prices: &PriceSeries,
    policy: FirstReturnPolicy,
) -> Result<ReturnSeries, AnalyticsError> {
    if prices.len() < 2 {
        return Err(AnalyticsError::MalformedSeries(format!(
            "at least 2 prices are required to derive returns, got {}",
            prices.len()
        )));
    }

    if let Some((index, price)) = prices
        .closes()
        .enumerate()
        .find(|(_, close)| !(close.is_finite() && *close > 0.0))
    {
        return Err(AnalyticsError::InvalidPrice { index, price });
    }

    let points = prices.points();
    let mut returns = Vec::with_capacity(policy.return_len(points.len()));

    if policy == FirstReturnPolicy::ZeroFill {
        returns.push(ReturnPoint {
            date: points[0].date,
            simple_return: 0.0,
            log_return: 0.0,
        });
    }

    returns.extend(points.windows(2).map(|w| {
        let ratio = w[1].close / w[0].close;
        ReturnPoint {
            date: w[1].date,
            simple_return: ratio - 1.0,
            log_return: ratio.ln(),
        }
    }));

    tracing::debug!(
        prices = points.len(),
        returns = returns.len(),
        ?policy,
        "Derived return series."
    );

    Ok(ReturnSeries::try_new(returns)?)
}

/// Divides `numerator` by `denominator`, or returns `None` when the ratio is
/// ill-defined (zero or non-finite denominator, non-finite result).
pub fn guarded_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return None;
    }
    let ratio = numerator / denominator;
    ratio.is_finite().then_some(ratio)
}
