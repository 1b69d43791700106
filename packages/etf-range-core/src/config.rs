//! Application configuration loaded from TOML.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::market_data::LookbackWindow;
use crate::profit::TAX_RETENTION_FACTOR;
use crate::stats::{MalformedBarPolicy, RepresentativeValuePolicy, SummaryRequest};
use crate::Result;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "ETF_RANGE_CONFIG";

/// Settings shared by every summary request.
///
/// ```toml
/// symbol = "VOO"
/// window = "2mo"
/// max_bars = 30
/// policy = "mode"
/// tax_retention_factor = 0.79685
/// malformed_bars = "tolerate"
/// data_file = "/data/voo.json"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Ticker symbol to analyse
    pub symbol: String,
    /// Lookback window requested from the provider
    pub window: LookbackWindow,
    /// Keep only this many trailing bars (0 keeps all)
    pub max_bars: usize,
    /// Representative value policy
    pub policy: RepresentativeValuePolicy,
    /// Share of profit kept after tax
    pub tax_retention_factor: f64,
    /// Handling of bars with low above high
    pub malformed_bars: MalformedBarPolicy,
    /// JSON price history file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            symbol: "VOO".to_string(),
            window: LookbackWindow::TwoMonths,
            max_bars: 30,
            policy: RepresentativeValuePolicy::Mode,
            tax_retention_factor: TAX_RETENTION_FACTOR,
            malformed_bars: MalformedBarPolicy::Tolerate,
            data_file: None,
        }
    }
}

impl AppConfig {
    /// Load from the default path, falling back to defaults when the file is absent.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_path())
    }

    /// Get the default config file path.
    ///
    /// Default path: `~/.etf-range/config.toml`
    /// Can be overridden with the `ETF_RANGE_CONFIG` environment variable.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return PathBuf::from(path);
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".etf-range/config.toml"))
            .unwrap_or_else(|| PathBuf::from("etf-range.toml"))
    }

    /// Load from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.symbol = config.symbol.trim().to_uppercase();
        tracing::debug!(path = %path.display(), symbol = %config.symbol, "Loaded config");
        Ok(config)
    }

    /// Trailing bar cap, `None` when unlimited.
    pub fn max_bars(&self) -> Option<usize> {
        (self.max_bars > 0).then_some(self.max_bars)
    }

    /// Base request carrying the configured policies.
    pub fn summary_request(&self) -> SummaryRequest {
        SummaryRequest::new(self.policy)
            .with_malformed_bars(self.malformed_bars)
            .with_tax_retention_factor(self.tax_retention_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.symbol, "VOO");
        assert_eq!(config.window, LookbackWindow::TwoMonths);
        assert_eq!(config.max_bars(), Some(30));

        let request = config.summary_request();
        assert_eq!(request.policy, RepresentativeValuePolicy::Mode);
        assert_eq!(request.tax_retention_factor, 0.79685);
        assert!(request.purchase_price.is_none());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from_path(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "symbol = \"vti\"\nwindow = \"6mo\"\npolicy = \"quantile\"\nmax_bars = 0\n",
        )
        .unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.symbol, "VTI");
        assert_eq!(config.window, LookbackWindow::SixMonths);
        assert_eq!(config.policy, RepresentativeValuePolicy::Quantile);
        assert_eq!(config.max_bars(), None);
        assert_eq!(config.malformed_bars, MalformedBarPolicy::Tolerate);
        assert_eq!(config.tax_retention_factor, TAX_RETENTION_FACTOR);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "window = \"fortnight\"\n").unwrap();

        let result = AppConfig::load_from_path(&path);
        assert!(matches!(result, Err(Error::ConfigParse(_))));
    }

    #[test]
    fn test_toml_roundtrip_of_policies() {
        let config = AppConfig {
            malformed_bars: MalformedBarPolicy::Reject,
            data_file: Some(PathBuf::from("/tmp/voo.json")),
            ..Default::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("malformed_bars = \"reject\""));
        assert!(text.contains("window = \"2mo\""));

        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
