use clap::Parser;
use soko_forecast::{Cli, run_forecast_cli};
use std::panic;

fn main() -> anyhow::Result<()> {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Error)
    };

    let mut builder = env_logger::Builder::new();

    builder
        .filter(None, global_level)
        .filter(Some("soko_forecast"), my_code_level)
        .parse_default_env() // RUST_LOG still wins
        .init();

    let args = Cli::parse();
    run_forecast_cli(args)
}
