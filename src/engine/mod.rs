pub mod backtest;
mod core;
mod messages;

pub use backtest::{BacktestConfig, BacktestReport, BacktestRow, ScoredPoint, run_backtest};
pub use self::core::{ForecastSession, get_forecast};
pub use messages::{ForecastOutcome, RangeWarning};
