use configuration::ConfigError;
use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Invalid price at index {index}: {price} (prices must be positive and finite)")]
    InvalidPrice { index: usize, price: f64 },

    #[error("Malformed series: {0}")]
    MalformedSeries(String),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Invalid analysis configuration: {0}")]
    Config(#[from] ConfigError),
}

impl From<CoreError> for AnalyticsError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::MalformedSeries(msg) => AnalyticsError::MalformedSeries(msg),
        }
    }
}
