//! Core data types for ETF range statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::stats::RepresentativeValuePolicy;

/// One trading day's price record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyBar {
    /// Trading date
    pub date: NaiveDate,
    /// Highest traded price of the day
    pub high: f64,
    /// Lowest traded price of the day
    pub low: f64,
    /// Closing price
    pub close: f64,
}

impl DailyBar {
    /// Create a new bar.
    pub fn new(date: NaiveDate, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            high,
            low,
            close,
        }
    }

    /// Whether the bar violates `low <= high`.
    pub fn is_inverted(&self) -> bool {
        self.low > self.high
    }
}

/// Daily bars for a single symbol, ordered ascending by date.
///
/// The last bar is the most recent close.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PriceSeries {
    /// Ticker symbol (uppercase)
    pub symbol: String,
    /// Bars in chronological order
    pub bars: Vec<DailyBar>,
}

impl PriceSeries {
    /// Create a series from bars that are already in chronological order.
    pub fn new(symbol: &str, bars: Vec<DailyBar>) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            bars,
        }
    }

    /// Create a series from bars in arbitrary order.
    ///
    /// Bars are sorted by date; when a date repeats, the later entry wins.
    pub fn from_unsorted(symbol: &str, mut bars: Vec<DailyBar>) -> Self {
        // Stable sort keeps input order within a date, so the last duplicate is kept below.
        bars.sort_by_key(|bar| bar.date);

        let mut deduped: Vec<DailyBar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(prev) if prev.date == bar.date => *prev = bar,
                _ => deduped.push(bar),
            }
        }

        Self::new(symbol, deduped)
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the series has no bars.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Bars in chronological order.
    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    /// The most recent bar.
    pub fn last(&self) -> Option<&DailyBar> {
        self.bars.last()
    }

    /// Keep only the most recent `n` bars.
    pub fn tail(&self, n: usize) -> Self {
        let start = self.bars.len().saturating_sub(n);
        Self {
            symbol: self.symbol.clone(),
            bars: self.bars[start..].to_vec(),
        }
    }

    /// Keep only bars dated on or after `start`.
    pub fn since(&self, start: NaiveDate) -> Self {
        Self {
            symbol: self.symbol.clone(),
            bars: self
                .bars
                .iter()
                .filter(|bar| bar.date >= start)
                .copied()
                .collect(),
        }
    }
}

/// A bar annotated with its intraday range ratio.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RangeDay {
    #[serde(flatten)]
    pub bar: DailyBar,
    /// `(high - low) / low * 100`, rounded to 2 decimals
    pub range_ratio: f64,
}

/// Summary statistics for a price series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RangeSummary {
    /// Symbol the series belongs to
    pub symbol: String,
    /// How representative high/low were chosen
    pub policy: RepresentativeValuePolicy,
    /// Typical high across the series
    pub representative_high: f64,
    /// Typical low across the series
    pub representative_low: f64,
    /// Spread between representative high and low as a percentage of the low
    pub width_ratio_percent: f64,
    /// Day with the narrowest range ratio
    pub min_range_day: RangeDay,
    /// Day with the widest range ratio
    pub max_range_day: RangeDay,
    /// Price used for profit estimates
    pub current_price: f64,
    /// Purchase price, when one was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,
    /// Profit percentage against the purchase price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_percent: Option<f64>,
    /// Profit percentage net of withholding tax
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_adjusted_profit_percent: Option<f64>,
    /// Every bar of the series with its range ratio
    pub days: Vec<RangeDay>,
}

/// API response wrapper for success cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
