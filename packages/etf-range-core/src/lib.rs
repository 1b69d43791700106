//! ETF range statistics library.
//!
//! This crate summarises an exchange-traded fund's recent daily price history:
//!
//! - **Range statistics**: representative high/low (mode or quantile), width ratio,
//!   narrowest and widest trading days
//! - **Profit estimates**: pre-tax and tax-adjusted profit against a purchase price
//! - **Market data**: lookback windows and a provider seam for daily bars
//! - **Reporting**: plain-text rendering with fixed two-decimal formatting
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use etf_range_core::{compute_summary, DailyBar, PriceSeries, SummaryRequest};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
//! let series = PriceSeries::new(
//!     "VOO",
//!     vec![
//!         DailyBar::new(day(3), 10.0, 5.0, 9.0),
//!         DailyBar::new(day(4), 10.0, 5.0, 9.5),
//!         DailyBar::new(day(5), 12.0, 6.0, 11.0),
//!         DailyBar::new(day(6), 11.0, 5.0, 10.0),
//!     ],
//! );
//!
//! let summary = compute_summary(&series, &SummaryRequest::default()).unwrap();
//! assert_eq!(summary.representative_high, 10.0);
//! assert_eq!(summary.representative_low, 5.0);
//! assert_eq!(summary.width_ratio_percent, 100.0);
//! ```

pub mod config;
pub mod input;
pub mod market_data;
pub mod profit;
pub mod report;
pub mod stats;
pub mod types;

use chrono::NaiveDate;

// Re-export commonly used types
pub use types::{ApiResponse, DailyBar, PriceSeries, RangeDay, RangeSummary};

// Re-export main functionality
pub use config::AppConfig;
pub use input::parse_purchase_price;
pub use market_data::{
    load_series, InMemoryProvider, JsonFileProvider, LookbackWindow, MarketDataProvider,
};
pub use profit::{ProfitEstimate, TAX_RETENTION_FACTOR};
pub use stats::{
    compute_summary, MalformedBarPolicy, RepresentativeValuePolicy, SummaryRequest,
};

/// Error types for etf-range-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("No price data available for {0}")]
    DataUnavailable(String),

    #[error("Price series is empty")]
    EmptySeries,

    #[error("Malformed bar on {date}: low {low} exceeds high {high}")]
    MalformedBar { date: NaiveDate, high: f64, low: f64 },

    #[error("Unknown lookback window: {0}")]
    InvalidWindow(String),

    #[error("Unknown representative value policy: {0}")]
    InvalidPolicy(String),
}

/// Result type for etf-range-core operations.
pub type Result<T> = std::result::Result<T, Error>;
