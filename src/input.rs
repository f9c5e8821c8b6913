use anyhow::{Context, Result};
use chrono::NaiveDate;
use core_types::{CoreError, Instrument, PricePoint, PriceSeries};
use serde::Deserialize;
use std::path::Path;

/// One row of a cleaned price file. `close` may be `null` in the file, which
/// is rejected rather than silently skipped.
#[derive(Debug, Deserialize)]
struct RawPriceRecord {
    date: NaiveDate,
    close: Option<f64>,
}

/// Parses a JSON array of `{ "date": "YYYY-MM-DD", "close": number }` records.
pub fn parse_prices(json: &str) -> Result<PriceSeries> {
    let records: Vec<RawPriceRecord> =
        serde_json::from_str(json).context("price file is not a JSON array of {date, close}")?;

    let points = records
        .into_iter()
        .map(|r| match r.close {
            Some(close) => Ok(PricePoint::new(r.date, close)),
            None => Err(CoreError::MalformedSeries(format!(
                "missing close price on {}",
                r.date
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PriceSeries::try_new(points)?)
}

/// Loads one instrument, named after the file stem (`data/AAPL.json` is `AAPL`).
pub fn load_instrument(path: &Path) -> Result<Instrument> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read price file {}", path.display()))?;
    let prices =
        parse_prices(&text).with_context(|| format!("invalid price file {}", path.display()))?;
    let symbol = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    tracing::debug!(%symbol, prices = prices.len(), "Loaded price file.");
    Ok(Instrument::new(symbol, prices))
}
