use crate::error::AnalyticsError;
use crate::metrics::compute_all_metrics;
use crate::report::{AnalysisReport, MetricSet};
use crate::returns::derive_returns;
use crate::series::{
    HistogramBin, cumulative_return_curve, drawdown_curve, return_histogram, rolling_volatility,
};
use configuration::AnalysisConfig;
use core_types::{DerivedSeries, Instrument, PriceSeries, ReturnSeries};
use rayon::prelude::*;

/// The outcome of analysing one instrument in a batch.
#[derive(Debug)]
pub struct InstrumentAnalysis {
    pub symbol: String,
    pub result: Result<AnalysisReport, AnalyticsError>,
}

/// A stateless calculator bound to one set of analysis parameters.
///
/// The engine holds nothing but its validated `AnalysisConfig`, so it can be
/// shared freely across threads; every call returns freshly owned results.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: AnalysisConfig,
}

impl AnalyticsEngine {
    /// Creates an engine, rejecting configurations with out-of-range parameters.
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalyticsError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Derives returns using the configured first-period policy.
    pub fn derive_returns(&self, prices: &PriceSeries) -> Result<ReturnSeries, AnalyticsError> {
        derive_returns(prices, self.config.first_return)
    }

    /// Computes every scalar metric over the configured return column.
    pub fn compute_all_metrics(&self, returns: &ReturnSeries) -> Result<MetricSet, AnalyticsError> {
        compute_all_metrics(&returns.values(self.config.return_kind), &self.config)
    }

    /// Rolling volatility over the configured window, one entry per return date.
    pub fn rolling_volatility(&self, returns: &ReturnSeries) -> Result<DerivedSeries, AnalyticsError> {
        let values = rolling_volatility(
            &returns.values(self.config.return_kind),
            self.config.rolling_window,
        )?;
        Ok(DerivedSeries::from_aligned(returns.dates(), values))
    }

    /// The drawdown curve, one entry per return date.
    pub fn drawdown(&self, returns: &ReturnSeries) -> DerivedSeries {
        let values = drawdown_curve(&returns.values(self.config.return_kind));
        DerivedSeries::from_aligned(returns.dates(), values.into_iter().map(Some).collect())
    }

    /// Compounded return since the start, one entry per return date.
    pub fn cumulative_returns(&self, returns: &ReturnSeries) -> DerivedSeries {
        let values = cumulative_return_curve(&returns.values(self.config.return_kind));
        DerivedSeries::from_aligned(returns.dates(), values.into_iter().map(Some).collect())
    }

    /// Histogram of the configured return column.
    pub fn distribution(&self, returns: &ReturnSeries) -> Result<Vec<HistogramBin>, AnalyticsError> {
        return_histogram(
            &returns.values(self.config.return_kind),
            self.config.histogram_bins,
        )
    }

    /// Runs the whole pipeline for one price history.
    #[tracing::instrument(name = "analyze", skip_all, fields(prices = prices.len()))]
    pub fn analyze(&self, prices: &PriceSeries) -> Result<AnalysisReport, AnalyticsError> {
        let returns = self.derive_returns(prices)?;
        let metrics = self.compute_all_metrics(&returns)?;
        let rolling_volatility = self.rolling_volatility(&returns)?;
        let drawdown = self.drawdown(&returns);
        let cumulative_returns = self.cumulative_returns(&returns);

        Ok(AnalysisReport {
            returns,
            metrics,
            cumulative_returns,
            rolling_volatility,
            drawdown,
        })
    }

    /// Analyses independent instruments in parallel.
    ///
    /// Results come back in input order. A failure for one instrument is
    /// reported in its own entry and does not affect the others.
    pub fn analyze_batch(&self, instruments: &[Instrument]) -> Vec<InstrumentAnalysis> {
        tracing::info!(
            instruments = instruments.len(),
            threads = rayon::current_num_threads(),
            "Starting batch analysis."
        );

        instruments
            .par_iter()
            .map(|instrument| {
                let result = self.analyze(&instrument.prices);
                if let Err(e) = &result {
                    tracing::warn!(symbol = %instrument.symbol, error = %e, "Instrument analysis failed.");
                }
                InstrumentAnalysis {
                    symbol: instrument.symbol.clone(),
                    result,
                }
            })
            .collect()
    }
}
