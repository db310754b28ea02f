use anyhow::Result;
use clap::Parser;
use soko_forecast::{BacktestCli, run_backtest_cli};

fn main() -> Result<()> {
    // 1. Setup Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. Parse and run
    let args = BacktestCli::parse();
    log::info!(
        "🚀 Backtesting {} from {} (holdout {}, horizon {})",
        args.commodity,
        args.data.display(),
        args.holdout,
        args.horizon
    );

    run_backtest_cli(args)
}
