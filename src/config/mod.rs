//! Configuration module for the forecasting application.

// Can all be private now because we have a public re-export.
mod debug;
mod forecast;
mod persistence;

// Public
pub mod constants;

// Re-export commonly used items
pub use debug::DF;
pub use forecast::{FORECAST, FitSettings, ForecastConfig, RequestLimits};
pub use persistence::DATA;
