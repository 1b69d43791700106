//! Range statistics over a daily price series.
//!
//! This module turns a [`PriceSeries`] into a [`RangeSummary`]:
//!
//! - **Representative high/low**: most frequent rounded value, or upper/lower quartile
//! - **Width ratio**: spread between the representative levels as a percentage
//! - **Range days**: the narrowest and widest trading days by range ratio
//! - **Profit**: optional estimate against a purchase price

mod range;
mod representative;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use range::{annotate_days, min_max_range_days, range_ratio};
pub use representative::{mode_rounded, quantile_linear, round2, round2_scaled};

use crate::profit::{ProfitEstimate, TAX_RETENTION_FACTOR};
use crate::types::{PriceSeries, RangeSummary};
use crate::{Error, Result};

/// How the representative high and low are chosen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RepresentativeValuePolicy {
    /// Most frequent high/low after rounding to cents
    #[default]
    Mode,
    /// 75th percentile of highs and 25th percentile of lows
    Quantile,
}

impl RepresentativeValuePolicy {
    /// All policies, in display order.
    pub const ALL: [RepresentativeValuePolicy; 2] = [Self::Mode, Self::Quantile];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mode => "mode",
            Self::Quantile => "quantile",
        }
    }

    /// Representative `(high, low)` for the given highs and lows.
    ///
    /// If the low comes out above the high, both collapse to their midpoint so
    /// the width ratio is never negative.
    ///
    /// Returns `None` if either slice is empty.
    pub fn representative(&self, highs: &[f64], lows: &[f64]) -> Option<(f64, f64)> {
        let (high, low) = match self {
            Self::Mode => (mode_rounded(highs)?, mode_rounded(lows)?),
            Self::Quantile => (
                round2(quantile_linear(highs, 0.75)?),
                round2(quantile_linear(lows, 0.25)?),
            ),
        };

        if low > high {
            let mid = round2((low + high) / 2.0);
            return Some((mid, mid));
        }
        Some((high, low))
    }
}

impl fmt::Display for RepresentativeValuePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepresentativeValuePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mode" => Ok(Self::Mode),
            "quantile" | "quartile" => Ok(Self::Quantile),
            other => Err(Error::InvalidPolicy(other.to_string())),
        }
    }
}

/// What to do with bars whose low exceeds their high.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MalformedBarPolicy {
    /// Keep them and log a warning
    #[default]
    Tolerate,
    /// Fail the computation with [`Error::MalformedBar`]
    Reject,
}

/// Request-scoped inputs for [`compute_summary`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRequest {
    pub policy: RepresentativeValuePolicy,
    /// Price the position was bought at; non-positive disables profit
    pub purchase_price: Option<f64>,
    /// Live quote used instead of the last close
    pub current_price_override: Option<f64>,
    pub malformed_bars: MalformedBarPolicy,
    pub tax_retention_factor: f64,
}

impl Default for SummaryRequest {
    fn default() -> Self {
        Self {
            policy: RepresentativeValuePolicy::default(),
            purchase_price: None,
            current_price_override: None,
            malformed_bars: MalformedBarPolicy::default(),
            tax_retention_factor: TAX_RETENTION_FACTOR,
        }
    }
}

impl SummaryRequest {
    /// Create a request with the given policy and no profit inputs.
    pub fn new(policy: RepresentativeValuePolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn with_purchase_price(mut self, price: Option<f64>) -> Self {
        self.purchase_price = price;
        self
    }

    pub fn with_current_price(mut self, price: Option<f64>) -> Self {
        self.current_price_override = price;
        self
    }

    pub fn with_malformed_bars(mut self, policy: MalformedBarPolicy) -> Self {
        self.malformed_bars = policy;
        self
    }

    pub fn with_tax_retention_factor(mut self, factor: f64) -> Self {
        self.tax_retention_factor = factor;
        self
    }
}

/// Width of the representative band as a percentage of the low.
///
/// Returns 0.0 when `low` is zero.
pub fn width_ratio_percent(high: f64, low: f64) -> f64 {
    if low == 0.0 {
        return 0.0;
    }
    round2((high - low) / low * 100.0)
}

/// Compute range statistics and an optional profit estimate for a series.
///
/// # Arguments
///
/// * `series` - Daily bars in chronological order
/// * `request` - Policy, purchase price and current price override
///
/// # Errors
///
/// * [`Error::EmptySeries`] when the series has no bars
/// * [`Error::MalformedBar`] when a bar has `low > high` and the request rejects malformed bars
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use etf_range_core::{compute_summary, DailyBar, PriceSeries, SummaryRequest};
///
/// let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let series = PriceSeries::new("VOO", vec![DailyBar::new(date, 652.0, 641.0, 650.0)]);
///
/// let request = SummaryRequest::default().with_purchase_price(Some(600.0));
/// let summary = compute_summary(&series, &request).unwrap();
///
/// assert_eq!(summary.profit_percent, Some(8.33));
/// assert_eq!(summary.tax_adjusted_profit_percent, Some(6.64));
/// ```
pub fn compute_summary(series: &PriceSeries, request: &SummaryRequest) -> Result<RangeSummary> {
    let last = series.last().ok_or(Error::EmptySeries)?;

    for bar in series.bars().iter().filter(|bar| bar.is_inverted()) {
        match request.malformed_bars {
            MalformedBarPolicy::Reject => {
                return Err(Error::MalformedBar {
                    date: bar.date,
                    high: bar.high,
                    low: bar.low,
                });
            }
            MalformedBarPolicy::Tolerate => {
                tracing::warn!(
                    symbol = %series.symbol,
                    date = %bar.date,
                    high = bar.high,
                    low = bar.low,
                    "Bar low exceeds high"
                );
            }
        }
    }

    let highs: Vec<f64> = series.bars().iter().map(|bar| bar.high).collect();
    let lows: Vec<f64> = series.bars().iter().map(|bar| bar.low).collect();
    let (representative_high, representative_low) = request
        .policy
        .representative(&highs, &lows)
        .ok_or(Error::EmptySeries)?;

    let days = annotate_days(series.bars());
    let (min_range_day, max_range_day) = min_max_range_days(&days).ok_or(Error::EmptySeries)?;

    let current_price = request
        .current_price_override
        .filter(|price| price.is_finite() && *price > 0.0)
        .unwrap_or(last.close);

    let estimate = ProfitEstimate::compute(
        current_price,
        request.purchase_price,
        request.tax_retention_factor,
    );

    let summary = RangeSummary {
        symbol: series.symbol.clone(),
        policy: request.policy,
        representative_high,
        representative_low,
        width_ratio_percent: width_ratio_percent(representative_high, representative_low),
        min_range_day,
        max_range_day,
        current_price: round2(current_price),
        purchase_price: request
            .purchase_price
            .filter(|price| price.is_finite())
            .map(round2),
        profit_percent: estimate.map(|e| e.profit_percent),
        tax_adjusted_profit_percent: estimate.map(|e| e.tax_adjusted_profit_percent),
        days,
    };

    tracing::debug!(
        symbol = %summary.symbol,
        policy = %summary.policy,
        bars = summary.days.len(),
        high = summary.representative_high,
        low = summary.representative_low,
        width = summary.width_ratio_percent,
        "Computed range summary"
    );

    Ok(summary)
}
