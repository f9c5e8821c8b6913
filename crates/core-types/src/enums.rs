use serde::{Deserialize, Serialize};

/// Which return column a computation operates on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReturnKind {
    /// `close[t] / close[t-1] - 1`
    #[default]
    Simple,
    /// `ln(close[t] / close[t-1])`
    Log,
}

/// How the first price, which has no predecessor, is represented in the return series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum FirstReturnPolicy {
    /// The first price produces no return record; `len(returns) == len(prices) - 1`.
    #[default]
    Drop,
    /// The first price produces a record with both returns set to zero;
    /// `len(returns) == len(prices)`.
    ZeroFill,
}

impl FirstReturnPolicy {
    /// Number of return records produced from `price_count` prices.
    pub fn return_len(&self, price_count: usize) -> usize {
        match self {
            FirstReturnPolicy::Drop => price_count.saturating_sub(1),
            FirstReturnPolicy::ZeroFill => price_count,
        }
    }
}
