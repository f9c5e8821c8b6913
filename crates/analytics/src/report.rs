use core_types::{DerivedSeries, ReturnSeries};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical scalar metrics, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    CumulativeReturn,
    AnnualizedReturn,
    AnnualizedVolatility,
    SharpeRatio,
    SortinoRatio,
    MaxDrawdown,
    CalmarRatio,
    ValueAtRisk,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::CumulativeReturn,
        Metric::AnnualizedReturn,
        Metric::AnnualizedVolatility,
        Metric::SharpeRatio,
        Metric::SortinoRatio,
        Metric::MaxDrawdown,
        Metric::CalmarRatio,
        Metric::ValueAtRisk,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::CumulativeReturn => "Cumulative Return",
            Metric::AnnualizedReturn => "Annualized Return",
            Metric::AnnualizedVolatility => "Annualized Volatility",
            Metric::SharpeRatio => "Sharpe Ratio",
            Metric::SortinoRatio => "Sortino Ratio",
            Metric::MaxDrawdown => "Maximum Drawdown",
            Metric::CalmarRatio => "Calmar Ratio",
            Metric::ValueAtRisk => "Value at Risk",
        }
    }

    /// Whether the value is a fraction of capital (shown as a percentage)
    /// rather than a dimensionless ratio.
    pub fn is_percentage(&self) -> bool {
        !matches!(
            self,
            Metric::SharpeRatio | Metric::SortinoRatio | Metric::CalmarRatio
        )
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The full battery of scalar metrics for one return series.
///
/// `None` marks a metric that is mathematically undefined for the input
/// (zero volatility, no negative returns, empty series, ...). It is never
/// encoded as NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub cumulative_return: Option<f64>,
    pub annualized_return: Option<f64>,
    pub annualized_volatility: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub sortino_ratio: Option<f64>,
    pub max_drawdown: Option<f64>,
    pub calmar_ratio: Option<f64>,
    pub value_at_risk: Option<f64>,
    /// Tail probability `value_at_risk` was computed at.
    pub var_confidence_level: f64,
}

impl MetricSet {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::CumulativeReturn => self.cumulative_return,
            Metric::AnnualizedReturn => self.annualized_return,
            Metric::AnnualizedVolatility => self.annualized_volatility,
            Metric::SharpeRatio => self.sharpe_ratio,
            Metric::SortinoRatio => self.sortino_ratio,
            Metric::MaxDrawdown => self.max_drawdown,
            Metric::CalmarRatio => self.calmar_ratio,
            Metric::ValueAtRisk => self.value_at_risk,
        }
    }

    /// Display label, e.g. "Value at Risk (5%)" for the VaR entry.
    pub fn label(&self, metric: Metric) -> String {
        match metric {
            Metric::ValueAtRisk => {
                let pct = (self.var_confidence_level * 100.0 * 1e6).round() / 1e6;
                format!("{} ({}%)", metric.name(), pct)
            }
            _ => metric.name().to_string(),
        }
    }

    /// Every metric with its label, in canonical order.
    pub fn entries(&self) -> Vec<(Metric, String, Option<f64>)> {
        Metric::ALL
            .iter()
            .map(|&m| (m, self.label(m), self.get(m)))
            .collect()
    }

    /// Number of metrics that came out undefined.
    pub fn undefined_count(&self) -> usize {
        Metric::ALL.iter().filter(|&&m| self.get(m).is_none()).count()
    }
}

/// Everything computed for one instrument: the return series, its scalar
/// metrics and the date-aligned series for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub returns: ReturnSeries,
    pub metrics: MetricSet,
    pub cumulative_returns: DerivedSeries,
    pub rolling_volatility: DerivedSeries,
    pub drawdown: DerivedSeries,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MetricSet {
        MetricSet {
            cumulative_return: Some(0.0659),
            annualized_return: Some(0.2),
            annualized_volatility: Some(0.0),
            sharpe_ratio: None,
            sortino_ratio: None,
            max_drawdown: Some(-0.05),
            calmar_ratio: Some(4.0),
            value_at_risk: Some(-0.04),
            var_confidence_level: 0.05,
        }
    }

    #[test]
    fn entries_follow_canonical_order() {
        let set = sample();
        let labels: Vec<String> = set.entries().into_iter().map(|(_, l, _)| l).collect();
        assert_eq!(
            labels,
            vec![
                "Cumulative Return",
                "Annualized Return",
                "Annualized Volatility",
                "Sharpe Ratio",
                "Sortino Ratio",
                "Maximum Drawdown",
                "Calmar Ratio",
                "Value at Risk (5%)",
            ]
        );
        assert_eq!(set.undefined_count(), 2);
    }

    #[test]
    fn var_label_tracks_confidence_level() {
        let set = MetricSet {
            var_confidence_level: 0.025,
            ..sample()
        };
        assert_eq!(set.label(Metric::ValueAtRisk), "Value at Risk (2.5%)");
    }

    #[test]
    fn undefined_metrics_serialize_as_null() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json["sharpe_ratio"].is_null());
        assert_eq!(json["calmar_ratio"], 4.0);
    }
}
