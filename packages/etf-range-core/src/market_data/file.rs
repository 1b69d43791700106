//! Daily bars read from a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{clip_to_window, LookbackWindow, MarketDataProvider};
use crate::types::{DailyBar, PriceSeries};
use crate::Result;

/// On-disk layout with an explicit symbol.
#[derive(Debug, Deserialize)]
struct SeriesFile {
    #[serde(default)]
    symbol: Option<String>,
    bars: Vec<DailyBar>,
}

/// Provider reading a price history exported to JSON.
///
/// The file holds either a bare array of bars or an object
/// `{ "symbol": "VOO", "bars": [...] }`. Each bar has `date` (`YYYY-MM-DD`),
/// `high`, `low` and `close`. Bars may be in any order.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every bar in the file.
    ///
    /// A missing file yields an empty series.
    pub fn read_all(&self, symbol: &str) -> Result<PriceSeries> {
        if !self.path.exists() {
            tracing::warn!(path = %self.path.display(), "Price history file not found");
            return Ok(PriceSeries::new(symbol, Vec::new()));
        }

        let content = fs::read_to_string(&self.path)?;
        let data: serde_json::Value = serde_json::from_str(&content)?;

        // Bare array of bars carries no symbol
        if data.is_array() {
            let bars: Vec<DailyBar> = serde_json::from_value(data)?;
            return Ok(PriceSeries::from_unsorted(symbol, bars));
        }

        let file: SeriesFile = serde_json::from_value(data)?;
        if let Some(file_symbol) = &file.symbol {
            if !file_symbol.eq_ignore_ascii_case(symbol) {
                tracing::warn!(
                    path = %self.path.display(),
                    expected = symbol,
                    found = %file_symbol,
                    "Price history file is for another symbol"
                );
                return Ok(PriceSeries::new(symbol, Vec::new()));
            }
        }

        Ok(PriceSeries::from_unsorted(symbol, file.bars))
    }
}

impl MarketDataProvider for JsonFileProvider {
    fn fetch_daily_bars(&self, symbol: &str, window: LookbackWindow) -> Result<PriceSeries> {
        let series = self.read_all(symbol)?;
        Ok(clip_to_window(&series, window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::load_series;
    use crate::Error;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_bare_array_out_of_order() {
        let file = write_file(
            r#"[
                {"date": "2024-06-04", "high": 490.5, "low": 486.1, "close": 489.9},
                {"date": "2024-06-03", "high": 488.2, "low": 484.0, "close": 487.0}
            ]"#,
        );
        let provider = JsonFileProvider::new(file.path());
        let series = provider.read_all("voo").unwrap();

        assert_eq!(series.symbol, "VOO");
        assert_eq!(series.len(), 2);
        assert_eq!(
            series.bars()[0].date,
            NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
        );
        assert_eq!(series.last().unwrap().close, 489.9);
    }

    #[test]
    fn test_reads_object_with_symbol() {
        let file = write_file(
            r#"{"symbol": "VOO", "bars": [
                {"date": "2024-06-03", "high": 488.2, "low": 484.0, "close": 487.0}
            ]}"#,
        );
        let provider = JsonFileProvider::new(file.path());
        let series = provider
            .fetch_daily_bars("VOO", LookbackWindow::OneMonth)
            .unwrap();
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_other_symbol_is_unavailable() {
        let file = write_file(
            r#"{"symbol": "SPY", "bars": [
                {"date": "2024-06-03", "high": 530.0, "low": 525.0, "close": 528.0}
            ]}"#,
        );
        let provider = JsonFileProvider::new(file.path());
        let result = load_series(&provider, "VOO", LookbackWindow::OneMonth, None);
        assert!(matches!(result, Err(Error::DataUnavailable(_))));
    }

    #[test]
    fn test_window_applies_from_latest_bar() {
        let file = write_file(
            r#"[
                {"date": "2024-01-02", "high": 430.0, "low": 427.0, "close": 429.0},
                {"date": "2024-05-31", "high": 485.0, "low": 480.0, "close": 484.0},
                {"date": "2024-06-03", "high": 488.2, "low": 484.0, "close": 487.0}
            ]"#,
        );
        let provider = JsonFileProvider::new(file.path());
        let series = provider
            .fetch_daily_bars("VOO", LookbackWindow::SevenDays)
            .unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let provider = JsonFileProvider::new(dir.path().join("missing.json"));
        let result = load_series(&provider, "VOO", LookbackWindow::OneMonth, None);
        assert!(matches!(result, Err(Error::DataUnavailable(_))));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let file = write_file("{ not json");
        let provider = JsonFileProvider::new(file.path());
        let result = provider.read_all("VOO");
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
