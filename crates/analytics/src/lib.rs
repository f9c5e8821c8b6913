//! # Quantlens Analytics Engine
//!
//! This crate turns a cleaned price history into a return series and computes
//! the standard battery of risk and performance statistics over it, plus the
//! per-period series (cumulative return, rolling volatility, drawdown) used
//! for charting.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   networks or rendering. It depends only on `core-types` and `configuration` (Layer 0).
//! - **Stateless Calculation:** Every function is a pure pass over immutable input.
//!   Parameters arrive through an explicit `AnalysisConfig`, never through globals,
//!   so calls with different assumptions can run concurrently.
//! - **Undefined is not an error:** A metric that is mathematically ill-defined
//!   (zero volatility, empty series) is reported as `None`. Only malformed input
//!   or invalid parameters produce an `AnalyticsError`.
//!
//! ## Public API
//!
//! - `derive_returns`: price history to simple and log returns.
//! - `compute_all_metrics`: the full `MetricSet` for a return slice.
//! - `AnalyticsEngine`: the same operations bound to one `AnalysisConfig`, with
//!   date-aligned derived series and parallel batch analysis.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod metrics;
pub mod report;
pub mod returns;
pub mod series;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{AnalyticsEngine, InstrumentAnalysis};
pub use error::AnalyticsError;
pub use metrics::compute_all_metrics;
pub use report::{AnalysisReport, Metric, MetricSet};
pub use returns::{derive_returns, guarded_ratio};
pub use series::HistogramBin;
