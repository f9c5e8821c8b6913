use analytics::{AnalyticsEngine, AnalyticsError, Metric, compute_all_metrics, derive_returns};
use approx::assert_relative_eq;
use chrono::{Days, NaiveDate};
use configuration::AnalysisConfig;
use core_types::{
    FirstReturnPolicy, Instrument, PricePoint, PriceSeries, ReturnKind, ReturnPoint, ReturnSeries,
};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
}

fn price_series(closes: &[f64]) -> PriceSeries {
    let points = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint::new(start() + Days::new(i as u64), close))
        .collect();
    PriceSeries::try_new(points).unwrap()
}

fn return_series(simple: &[f64]) -> ReturnSeries {
    let points = simple
        .iter()
        .enumerate()
        .map(|(i, &r)| ReturnPoint {
            date: start() + Days::new(i as u64),
            simple_return: r,
            log_return: (1.0 + r).ln(),
        })
        .collect();
    ReturnSeries::try_new(points).unwrap()
}

#[test]
fn drop_mode_yields_one_fewer_return() {
    for n in 2..30 {
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
        let returns = derive_returns(&price_series(&closes), FirstReturnPolicy::Drop).unwrap();
        assert_eq!(returns.len(), n - 1);
    }
}

#[test]
fn cumulative_return_matches_hand_computation() {
    let set = compute_all_metrics(&[0.1, -0.05, 0.02], &AnalysisConfig::default()).unwrap();
    assert_relative_eq!(
        set.get(Metric::CumulativeReturn).unwrap(),
        1.1 * 0.95 * 1.02 - 1.0,
        epsilon = 1e-12
    );
    assert_relative_eq!(set.cumulative_return.unwrap(), 0.0659, epsilon = 1e-12);
}

#[test]
fn max_drawdown_is_never_positive() {
    let samples: [&[f64]; 4] = [
        &[0.1, -0.2, 0.05, -0.01],
        &[-0.03],
        &[0.02, 0.02, -0.5, 0.9],
        &[-0.01, -0.01, -0.01],
    ];
    for returns in samples {
        let set = compute_all_metrics(returns, &AnalysisConfig::default()).unwrap();
        assert!(set.max_drawdown.unwrap() <= 0.0, "{:?}", returns);
    }
}

#[test]
fn max_drawdown_is_zero_for_non_negative_returns() {
    let set = compute_all_metrics(&[0.0, 0.01, 0.03, 0.0], &AnalysisConfig::default()).unwrap();
    assert_eq!(set.max_drawdown, Some(0.0));
    // Calmar divides by |MaxDrawdown| and is therefore undefined.
    assert_eq!(set.calmar_ratio, None);
}

#[test]
fn flat_series_has_undefined_ratios_but_other_metrics_survive() {
    let set = compute_all_metrics(&[0.0, 0.0, 0.0], &AnalysisConfig::default()).unwrap();
    assert_eq!(set.sharpe_ratio, None);
    assert_eq!(set.sortino_ratio, None);
    assert_eq!(set.calmar_ratio, None);
    assert_eq!(set.annualized_volatility, Some(0.0));
    assert_eq!(set.cumulative_return, Some(0.0));
    assert_eq!(set.value_at_risk, Some(0.0));
}

#[test]
fn rolling_volatility_leaves_warm_up_undefined() {
    let config = AnalysisConfig {
        rolling_window: 3,
        ..Default::default()
    };
    let engine = AnalyticsEngine::new(config).unwrap();
    let returns = return_series(&[0.01, -0.02, 0.03, 0.00, 0.01]);

    let vol = engine.rolling_volatility(&returns).unwrap();
    let values = vol.values();
    assert_eq!(values.len(), 5);
    assert!(values[0].is_none());
    assert!(values[1].is_none());
    assert!(values[2..].iter().all(|v| v.is_some()));
    assert_eq!(vol.points[4].date, returns.points()[4].date);
}

#[test]
fn value_at_risk_matches_linear_percentile() {
    // Twenty evenly spaced returns from -1.0% to +0.9%, deliberately shuffled.
    let mut returns: Vec<f64> = (0..20).map(|i| (i as f64 - 10.0) / 1000.0).collect();
    returns.reverse();
    returns.swap(3, 17);

    let set = compute_all_metrics(&returns, &AnalysisConfig::default()).unwrap();
    // rank = 0.05 * 19 = 0.95 -> -0.010 + 0.95 * 0.001
    assert_relative_eq!(set.value_at_risk.unwrap(), -0.00905, epsilon = 1e-12);
    assert_eq!(set.var_confidence_level, 0.05);
}

#[test]
fn single_point_series() {
    let set = compute_all_metrics(&[-0.02], &AnalysisConfig::default()).unwrap();
    assert_eq!(set.value_at_risk, Some(-0.02));
    assert_eq!(set.annualized_volatility, None);
    assert_eq!(set.sharpe_ratio, None);
    assert!(set.annualized_return.is_some());
}

#[test]
fn metric_computation_is_idempotent() {
    let returns = [0.013, -0.021, 0.004, 0.017, -0.009, 0.002, -0.015, 0.011];
    let config = AnalysisConfig::default();
    let first = compute_all_metrics(&returns, &config).unwrap();
    let second = compute_all_metrics(&returns, &config).unwrap();

    for metric in Metric::ALL {
        let a = first.get(metric).map(f64::to_bits);
        let b = second.get(metric).map(f64::to_bits);
        assert_eq!(a, b, "{} drifted between calls", metric);
    }
}

#[test]
fn engine_selects_the_configured_return_column() {
    let prices = price_series(&[100.0, 105.0, 98.0, 101.0, 107.0]);

    let simple = AnalyticsEngine::default();
    let log = AnalyticsEngine::new(AnalysisConfig {
        return_kind: ReturnKind::Log,
        ..Default::default()
    })
    .unwrap();

    let returns = simple.derive_returns(&prices).unwrap();
    let simple_set = simple.compute_all_metrics(&returns).unwrap();
    let log_set = log.compute_all_metrics(&returns).unwrap();

    assert_relative_eq!(simple_set.cumulative_return.unwrap(), 0.07, epsilon = 1e-12);
    let log_sum: f64 = returns.values(ReturnKind::Log).iter().map(|r| 1.0 + r).product();
    assert_relative_eq!(log_set.cumulative_return.unwrap(), log_sum - 1.0, epsilon = 1e-12);
}

#[test]
fn zero_fill_mode_feeds_metrics_unchanged() {
    let prices = price_series(&[100.0, 110.0, 99.0]);
    let engine = AnalyticsEngine::new(AnalysisConfig {
        first_return: FirstReturnPolicy::ZeroFill,
        ..Default::default()
    })
    .unwrap();

    let returns = engine.derive_returns(&prices).unwrap();
    assert_eq!(returns.len(), prices.len());
    let set = engine.compute_all_metrics(&returns).unwrap();
    // The leading zero does not change the compounded return.
    assert_relative_eq!(set.cumulative_return.unwrap(), -0.01, epsilon = 1e-12);
}

#[test]
fn analyze_builds_aligned_series() {
    let prices = price_series(&[100.0, 101.0, 99.0, 102.0, 103.0, 100.0]);
    let engine = AnalyticsEngine::new(AnalysisConfig {
        rolling_window: 2,
        ..Default::default()
    })
    .unwrap();

    let report = engine.analyze(&prices).unwrap();
    assert_eq!(report.returns.len(), 5);
    assert_eq!(report.drawdown.len(), 5);
    assert_eq!(report.cumulative_returns.len(), 5);
    assert_eq!(report.rolling_volatility.len(), 5);
    assert!(report.drawdown.values().iter().all(|d| d.unwrap() <= 0.0));
    assert_relative_eq!(
        report.cumulative_returns.points[4].value.unwrap(),
        report.metrics.cumulative_return.unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn distribution_uses_configured_bins() {
    let engine = AnalyticsEngine::new(AnalysisConfig {
        histogram_bins: 5,
        ..Default::default()
    })
    .unwrap();
    let returns = return_series(&[0.01, -0.02, 0.03, 0.00, 0.01, -0.01]);
    let bins = engine.distribution(&returns).unwrap();
    assert_eq!(bins.len(), 5);
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 6);
}

#[test]
fn batch_preserves_order_and_isolates_failures() {
    let instruments = vec![
        Instrument::new("AAA", price_series(&[10.0, 11.0, 12.0])),
        Instrument::new("BAD", price_series(&[10.0, 0.0, 12.0])),
        Instrument::new("CCC", price_series(&[20.0, 19.0, 21.0])),
    ];

    let results = AnalyticsEngine::default().analyze_batch(&instruments);
    let symbols: Vec<&str> = results.iter().map(|r| r.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["AAA", "BAD", "CCC"]);

    assert!(results[0].result.is_ok());
    assert!(matches!(
        results[1].result,
        Err(AnalyticsError::InvalidPrice { index: 1, .. })
    ));
    assert!(results[2].result.is_ok());
}

#[test]
fn engine_rejects_invalid_configuration() {
    let result = AnalyticsEngine::new(AnalysisConfig {
        confidence_level: 1.2,
        ..Default::default()
    });
    assert!(matches!(result, Err(AnalyticsError::Config(_))));
}

#[test]
fn report_serializes_for_renderers() {
    let report = AnalyticsEngine::default()
        .analyze(&price_series(&[100.0, 102.0, 101.0]))
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["returns"].as_array().unwrap().len(), 2);
    // A 20-period window over two returns never warms up.
    assert!(json["rolling_volatility"]["points"][1]["value"].is_null());
    assert_eq!(json["returns"][0]["date"], "2023-01-03");
}
