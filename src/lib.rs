// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod models;
pub mod report;
pub mod utils;

// Re-export commonly used types outside of crate (for the binaries and integration tests)
pub use config::{DATA, FORECAST, ForecastConfig};
pub use data::{load_dataset, load_dataset_from_reader};
pub use domain::{Observation, SamplingPeriod};
pub use engine::{
    BacktestConfig, BacktestReport, ForecastOutcome, ForecastSession, RangeWarning, get_forecast,
    run_backtest,
};
pub use error::{ForecastError, Result};
pub use models::{
    Dataset, ForecastPoint, ForecastRequest, ForecastResult, ScalingParameters, Series,
};

// CLI argument parsing
use chrono::NaiveDate;
use clap::Parser;
use config::constants::{backtest, cli};
use std::path::PathBuf;

fn parse_cli_date(text: &str) -> std::result::Result<NaiveDate, String> {
    utils::parse_date(text).ok_or_else(|| format!("'{}' is not a date (expected YYYY-MM-DD)", text))
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Forecast commodity unit prices with a seasonal ARIMA model", long_about = None)]
pub struct Cli {
    /// Price table (CSV with date, commodity and unit price columns)
    #[arg(long, default_value = DATA.default_path)]
    pub data: PathBuf,

    /// Commodity label, matched exactly
    #[arg(long, default_value = cli::DEFAULT_COMMODITY)]
    pub commodity: String,

    /// First forecast date (defaults to today)
    #[arg(long, value_parser = parse_cli_date)]
    pub date: Option<NaiveDate>,

    /// Number of periods to forecast
    #[arg(long, default_value_t = FORECAST.limits.default_horizon)]
    pub horizon: usize,

    /// Print JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Walk-forward backtest of the commodity price forecast", long_about = None)]
pub struct BacktestCli {
    #[arg(long, default_value = DATA.default_path)]
    pub data: PathBuf,

    #[arg(long, default_value = cli::DEFAULT_COMMODITY)]
    pub commodity: String,

    /// Trailing observations used as cutoffs
    #[arg(long, default_value_t = backtest::DEFAULT_HOLDOUT)]
    pub holdout: usize,

    /// Periods forecast from each cutoff
    #[arg(long, default_value_t = backtest::DEFAULT_HORIZON)]
    pub horizon: usize,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

fn open_session(data: &std::path::Path, commodity: &str) -> anyhow::Result<ForecastSession> {
    use anyhow::Context;

    let dataset = load_dataset(data)?;
    ForecastSession::new(&dataset, commodity, &FORECAST).with_context(|| {
        format!(
            "Cannot forecast '{}' (available: {})",
            commodity,
            dataset.commodities().join(", ")
        )
    })
}

/// Orchestrator for the `soko-forecast` binary: load, validate, forecast, print.
/// Range warnings are printed and count as success.
pub fn run_forecast_cli(args: Cli) -> anyhow::Result<()> {
    let session = open_session(&args.data, &args.commodity)?;
    let cutoff = args.date.unwrap_or_else(utils::today_local);

    let outcome = session.handle(cutoff, args.horizon)?;

    if args.json {
        println!("{}", report::to_json(&outcome)?);
    } else {
        println!("{}", report::render_outcome(&outcome));
    }
    Ok(())
}

pub fn run_backtest_cli(args: BacktestCli) -> anyhow::Result<()> {
    let session = open_session(&args.data, &args.commodity)?;
    let config = BacktestConfig {
        holdout: args.holdout,
        horizon: args.horizon,
    };

    let report = run_backtest(&session, &config);

    if args.json {
        println!("{}", report::to_json(&report)?);
    } else {
        println!("{}", report::render_backtest(&report));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_horizon_defaults_to_config() {
        let args = Cli::try_parse_from(["soko-forecast"]).unwrap();
        assert_eq!(args.horizon, FORECAST.limits.default_horizon);
        assert_eq!(args.commodity, cli::DEFAULT_COMMODITY);
    }
}
