// Text and JSON rendering for the binaries
mod reporter;

pub use reporter::{render_backtest, render_forecast, render_outcome, to_json};
