use crate::settings::AnalysisConfig;
use core_types::{FirstReturnPolicy, ReturnKind};

/// Command-line overrides for the analysis settings. Unset flags keep the
/// value from the configuration file.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AnalysisArgs {
    /// Return periods per year used for annualization.
    #[arg(long, global = true)]
    pub periods_per_year: Option<u32>,

    /// Annual risk-free rate as a decimal fraction (e.g. 0.02).
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub risk_free_rate: Option<f64>,

    /// Window length for rolling volatility.
    #[arg(long, global = true)]
    pub window: Option<usize>,

    /// Tail probability for Value at Risk (e.g. 0.05).
    #[arg(long, global = true)]
    pub confidence_level: Option<f64>,

    /// Return column to analyse.
    #[arg(long, global = true, value_enum)]
    pub return_kind: Option<ReturnKind>,

    /// Whether the first price yields no return or a zero return.
    #[arg(long, global = true, value_enum)]
    pub first_return: Option<FirstReturnPolicy>,

    /// Number of bins for the return distribution.
    #[arg(long, global = true)]
    pub bins: Option<usize>,
}

impl AnalysisArgs {
    pub fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(v) = self.periods_per_year {
            config.periods_per_year = v;
        }
        if let Some(v) = self.risk_free_rate {
            config.risk_free_rate = v;
        }
        if let Some(v) = self.window {
            config.rolling_window = v;
        }
        if let Some(v) = self.confidence_level {
            config.confidence_level = v;
        }
        if let Some(v) = self.return_kind {
            config.return_kind = v;
        }
        if let Some(v) = self.first_return {
            config.first_return = v;
        }
        if let Some(v) = self.bins {
            config.histogram_bins = v;
        }
    }
}
