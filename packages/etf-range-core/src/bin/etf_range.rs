//! etf-range CLI - range statistics for an ETF's recent daily bars.
//!
//! Prints JSON responses by default; `--text` prints a plain report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use etf_range_core::{
    compute_summary, load_series, parse_purchase_price, report, AppConfig, ApiResponse,
    JsonFileProvider, LookbackWindow, MalformedBarPolicy, PriceSeries, RepresentativeValuePolicy,
    Result,
};

#[derive(Parser)]
#[command(name = "etf-range")]
#[command(about = "Range statistics and profit estimates for an ETF's daily bars")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $ETF_RANGE_CONFIG or ~/.etf-range/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Options selecting which bars to load.
#[derive(clap::Args)]
struct SeriesArgs {
    /// JSON price history file
    #[arg(short, long)]
    data: Option<PathBuf>,
    /// Ticker symbol
    #[arg(short, long)]
    symbol: Option<String>,
    /// Lookback window (7d, 1mo, 2mo, 3mo, 6mo, 1y, 5y)
    #[arg(short, long)]
    window: Option<LookbackWindow>,
    /// Keep only this many trailing bars (0 keeps all)
    #[arg(long)]
    max_bars: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute range statistics and profit estimate
    Summary {
        #[command(flatten)]
        series: SeriesArgs,
        /// Representative value policy (mode or quantile)
        #[arg(short, long)]
        policy: Option<RepresentativeValuePolicy>,
        /// Purchase price; blank or non-numeric input is ignored
        #[arg(short, long)]
        buy: Option<String>,
        /// Current price to use instead of the last close
        #[arg(short, long)]
        current: Option<f64>,
        /// Fail on bars whose low exceeds their high
        #[arg(long)]
        reject_malformed: bool,
        /// Print a plain-text report instead of JSON
        #[arg(long)]
        text: bool,
    },
    /// Show every bar with its range ratio
    Table {
        #[command(flatten)]
        series: SeriesArgs,
        /// Print a plain-text table instead of JSON
        #[arg(long)]
        text: bool,
    },
    /// List supported lookback windows
    Windows,
    /// Show the resolved configuration
    Config,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Summary {
            series,
            policy,
            buy,
            current,
            reject_malformed,
            text,
        } => handle_summary(&config, series, policy, buy, current, reject_malformed, text),
        Commands::Table { series, text } => handle_table(&config, series, text),
        Commands::Windows => Ok(handle_windows()),
        Commands::Config => Ok(to_json(&ApiResponse::ok(&config))),
    });

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            println!("{}", to_json(&ApiResponse::<()>::err(e.to_string())));
            ExitCode::FAILURE
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"ok\":false,\"error\":\"{}\"}}", e))
}

fn load_config(path: Option<&std::path::Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from_path(path),
        None => AppConfig::load(),
    }
}

fn load(config: &AppConfig, args: SeriesArgs) -> Result<PriceSeries> {
    let symbol = args.symbol.unwrap_or_else(|| config.symbol.clone());
    let window = args.window.unwrap_or(config.window);
    let max_bars = match args.max_bars {
        Some(0) => None,
        Some(n) => Some(n),
        None => config.max_bars(),
    };

    let path = args
        .data
        .or_else(|| config.data_file.clone())
        .unwrap_or_else(|| PathBuf::from(format!("{}.json", symbol.to_lowercase())));
    let provider = JsonFileProvider::new(path);

    load_series(&provider, &symbol, window, max_bars)
}

fn handle_summary(
    config: &AppConfig,
    args: SeriesArgs,
    policy: Option<RepresentativeValuePolicy>,
    buy: Option<String>,
    current: Option<f64>,
    reject_malformed: bool,
    text: bool,
) -> Result<String> {
    let series = load(config, args)?;

    let mut request = config
        .summary_request()
        .with_purchase_price(buy.as_deref().and_then(parse_purchase_price))
        .with_current_price(current);
    if let Some(policy) = policy {
        request.policy = policy;
    }
    if reject_malformed {
        request.malformed_bars = MalformedBarPolicy::Reject;
    }

    let summary = compute_summary(&series, &request)?;

    if text {
        return Ok(report::render_summary(&summary));
    }
    Ok(to_json(&ApiResponse::ok(summary)))
}

fn handle_table(config: &AppConfig, args: SeriesArgs, text: bool) -> Result<String> {
    let series = load(config, args)?;
    let days = etf_range_core::stats::annotate_days(series.bars());

    if text {
        return Ok(report::render_table(&days));
    }
    Ok(to_json(&ApiResponse::ok(json!({
        "symbol": series.symbol,
        "days": days,
    }))))
}

fn handle_windows() -> String {
    let windows: Vec<_> = LookbackWindow::ALL
        .iter()
        .map(|w| json!({ "period": w.as_period(), "label": w.label() }))
        .collect();
    to_json(&ApiResponse::ok(json!({
        "windows": windows,
        "policies": RepresentativeValuePolicy::ALL,
    })))
}
