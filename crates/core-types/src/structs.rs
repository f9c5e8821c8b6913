use crate::enums::ReturnKind;
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// A chronologically ordered price history with unique dates.
///
/// The ordering is checked once at construction; the series cannot be mutated
/// afterwards. Price positivity is not checked here, return derivation owns that rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn try_new(points: Vec<PricePoint>) -> Result<Self, CoreError> {
        ensure_strictly_increasing(points.iter().map(|p| p.date))?;
        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.close)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl TryFrom<Vec<PricePoint>> for PriceSeries {
    type Error = CoreError;

    fn try_from(points: Vec<PricePoint>) -> Result<Self, Self::Error> {
        Self::try_new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

/// The simple and logarithmic return for one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    pub simple_return: f64,
    pub log_return: f64,
}

impl ReturnPoint {
    pub fn value(&self, kind: ReturnKind) -> f64 {
        match kind {
            ReturnKind::Simple => self.simple_return,
            ReturnKind::Log => self.log_return,
        }
    }
}

/// An ordered return series. Every return is finite and dates strictly increase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ReturnPoint>", into = "Vec<ReturnPoint>")]
pub struct ReturnSeries {
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    pub fn try_new(points: Vec<ReturnPoint>) -> Result<Self, CoreError> {
        if let Some((i, p)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| !p.simple_return.is_finite() || !p.log_return.is_finite())
        {
            return Err(CoreError::MalformedSeries(format!(
                "missing or non-numeric return on {} (index {})",
                p.date, i
            )));
        }
        ensure_strictly_increasing(points.iter().map(|p| p.date))?;
        Ok(Self { points })
    }

    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    /// The selected return column, in chronological order.
    pub fn values(&self, kind: ReturnKind) -> Vec<f64> {
        self.points.iter().map(|p| p.value(kind)).collect()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|p| p.date)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl TryFrom<Vec<ReturnPoint>> for ReturnSeries {
    type Error = CoreError;

    fn try_from(points: Vec<ReturnPoint>) -> Result<Self, Self::Error> {
        Self::try_new(points)
    }
}

impl From<ReturnSeries> for Vec<ReturnPoint> {
    fn from(series: ReturnSeries) -> Self {
        series.points
    }
}

/// One entry of a derived series. `None` marks a period where the value is
/// not yet defined (e.g. a rolling window still warming up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// A per-period series derived from returns, aligned by date for charting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedSeries {
    pub points: Vec<DerivedPoint>,
}

impl DerivedSeries {
    /// Pairs each value with the date at the same position.
    pub fn from_aligned<I>(dates: I, values: Vec<Option<f64>>) -> Self
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let points = dates
            .into_iter()
            .zip(values)
            .map(|(date, value)| DerivedPoint { date, value })
            .collect();
        Self { points }
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A named price history, the unit of work for batch analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    pub prices: PriceSeries,
}

impl Instrument {
    pub fn new(symbol: impl Into<String>, prices: PriceSeries) -> Self {
        Self {
            symbol: symbol.into(),
            prices,
        }
    }
}

fn ensure_strictly_increasing<I>(dates: I) -> Result<(), CoreError>
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut previous: Option<NaiveDate> = None;
    for (i, date) in dates.into_iter().enumerate() {
        if let Some(prev) = previous {
            if date == prev {
                return Err(CoreError::MalformedSeries(format!(
                    "duplicate date {} at index {}",
                    date, i
                )));
            }
            if date < prev {
                return Err(CoreError::MalformedSeries(format!(
                    "date {} at index {} is earlier than {}",
                    date, i, prev
                )));
            }
        }
        previous = Some(date);
    }
    Ok(())
}
