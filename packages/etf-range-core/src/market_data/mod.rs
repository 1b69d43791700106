//! Market data access for daily bars.
//!
//! Providers implement [`MarketDataProvider`] and return a [`PriceSeries`]
//! restricted to a [`LookbackWindow`]. [`load_series`] wraps a provider and
//! turns an empty result into [`Error::DataUnavailable`].

mod file;

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

pub use file::JsonFileProvider;

use crate::types::PriceSeries;
use crate::{Error, Result};

/// How far back to look from the most recent bar.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum LookbackWindow {
    #[serde(rename = "7d")]
    SevenDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[default]
    #[serde(rename = "2mo")]
    TwoMonths,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "5y")]
    FiveYears,
}

impl LookbackWindow {
    /// All windows, shortest first.
    pub const ALL: [LookbackWindow; 7] = [
        Self::SevenDays,
        Self::OneMonth,
        Self::TwoMonths,
        Self::ThreeMonths,
        Self::SixMonths,
        Self::OneYear,
        Self::FiveYears,
    ];

    /// Period string as used by market data vendors.
    pub fn as_period(&self) -> &'static str {
        match self {
            Self::SevenDays => "7d",
            Self::OneMonth => "1mo",
            Self::TwoMonths => "2mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::FiveYears => "5y",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SevenDays => "7 days",
            Self::OneMonth => "1 month",
            Self::TwoMonths => "2 months",
            Self::ThreeMonths => "3 months",
            Self::SixMonths => "6 months",
            Self::OneYear => "1 year",
            Self::FiveYears => "5 years",
        }
    }

    /// Earliest date inside the window ending at `end` (inclusive).
    ///
    /// The window covers `(end - period, end]`.
    pub fn start_from(&self, end: NaiveDate) -> NaiveDate {
        let boundary = match self {
            Self::SevenDays => end.checked_sub_days(Days::new(7)),
            Self::OneMonth => end.checked_sub_months(Months::new(1)),
            Self::TwoMonths => end.checked_sub_months(Months::new(2)),
            Self::ThreeMonths => end.checked_sub_months(Months::new(3)),
            Self::SixMonths => end.checked_sub_months(Months::new(6)),
            Self::OneYear => end.checked_sub_months(Months::new(12)),
            Self::FiveYears => end.checked_sub_months(Months::new(60)),
        };

        boundary
            .and_then(|date| date.succ_opt())
            .unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for LookbackWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_period())
    }
}

impl FromStr for LookbackWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|window| window.as_period() == normalized.as_str())
            .ok_or_else(|| Error::InvalidWindow(s.trim().to_string()))
    }
}

/// A source of daily bars for a symbol.
pub trait MarketDataProvider {
    /// Fetch daily bars for `symbol` covering `window`, oldest first.
    ///
    /// An empty series means no data; errors are reserved for failures to reach the source.
    fn fetch_daily_bars(&self, symbol: &str, window: LookbackWindow) -> Result<PriceSeries>;
}

/// Restrict a series to `window`, measured back from its most recent bar.
pub fn clip_to_window(series: &PriceSeries, window: LookbackWindow) -> PriceSeries {
    match series.last() {
        Some(last) => series.since(window.start_from(last.date)),
        None => series.clone(),
    }
}

/// Provider serving a fixed, already loaded series.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    series: PriceSeries,
}

impl InMemoryProvider {
    pub fn new(series: PriceSeries) -> Self {
        Self { series }
    }
}

impl MarketDataProvider for InMemoryProvider {
    fn fetch_daily_bars(&self, symbol: &str, window: LookbackWindow) -> Result<PriceSeries> {
        if !self.series.symbol.eq_ignore_ascii_case(symbol) {
            return Ok(PriceSeries::new(symbol, Vec::new()));
        }
        Ok(clip_to_window(&self.series, window))
    }
}

/// Fetch a series and check that it is usable.
///
/// # Arguments
///
/// * `provider` - Source of daily bars
/// * `symbol` - Ticker symbol
/// * `window` - Lookback window
/// * `max_bars` - Keep only this many trailing bars (`None` or 0 keeps all)
///
/// # Errors
///
/// Returns [`Error::DataUnavailable`] when the provider has no bars for the symbol.
pub fn load_series<P>(
    provider: &P,
    symbol: &str,
    window: LookbackWindow,
    max_bars: Option<usize>,
) -> Result<PriceSeries>
where
    P: MarketDataProvider + ?Sized,
{
    let series = provider.fetch_daily_bars(symbol, window)?;
    if series.is_empty() {
        return Err(Error::DataUnavailable(symbol.to_uppercase()));
    }

    let series = match max_bars {
        Some(n) if n > 0 => series.tail(n),
        _ => series,
    };

    tracing::debug!(
        symbol = %series.symbol,
        window = %window,
        bars = series.len(),
        "Loaded price series"
    );

    Ok(series)
}
