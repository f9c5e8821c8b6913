use crate::error::ConfigError;
use core_types::{FirstReturnPolicy, ReturnKind};
use serde::{Deserialize, Serialize};

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
}

/// Every parameter the analytics engine reads.
///
/// This is passed explicitly into each computation, so two callers can run
/// concurrently with different assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of return periods in a year (252 trading days for daily data).
    pub periods_per_year: u32,
    /// Annual risk-free rate as a decimal fraction (0.01 is 1%).
    pub risk_free_rate: f64,
    /// Window length for rolling volatility.
    pub rolling_window: usize,
    /// Tail probability for Value at Risk (0.05 is the 5th percentile).
    pub confidence_level: f64,
    /// Which return column the metrics and derived series are computed over.
    pub return_kind: ReturnKind,
    /// Whether the first price yields no return or a zero return.
    pub first_return: FirstReturnPolicy,
    /// Number of equal-width bins for the return distribution.
    pub histogram_bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            periods_per_year: 252,
            risk_free_rate: 0.01,
            rolling_window: 20,
            confidence_level: 0.05,
            return_kind: ReturnKind::Simple,
            first_return: FirstReturnPolicy::Drop,
            histogram_bins: 50,
        }
    }
}

impl AnalysisConfig {
    /// Checks every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.periods_per_year == 0 {
            return Err(ConfigError::ValidationError(
                "periods_per_year must be positive".to_string(),
            ));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(ConfigError::ValidationError(format!(
                "risk_free_rate must be a finite number, got {}",
                self.risk_free_rate
            )));
        }
        if self.rolling_window < 2 {
            return Err(ConfigError::ValidationError(format!(
                "rolling_window must be at least 2, got {}",
                self.rolling_window
            )));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "confidence_level must lie strictly between 0 and 1, got {}",
                self.confidence_level
            )));
        }
        if self.histogram_bins == 0 {
            return Err(ConfigError::ValidationError(
                "histogram_bins must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis.validate()
    }
}
