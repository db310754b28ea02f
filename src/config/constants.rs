use crate::models::ModelOrder;

// Top Level Constants
// Monthly seasonality. A design constant, never inferred from the data.
pub const SEASONAL_PERIOD: usize = 12;

/// Non-seasonal (p, d, q) and seasonal (P, D, Q) orders.
/// Chosen by an offline grid search over the Kenyan maize and beans price history.
/// They are configuration, not something the engine re-derives at runtime.
pub const BEST_ORDER: (usize, usize, usize) = (1, 0, 1);
pub const BEST_SEASONAL_ORDER: (usize, usize, usize) = (1, 0, 1);

pub const MODEL_ORDER: ModelOrder =
    ModelOrder::new(BEST_ORDER, BEST_SEASONAL_ORDER, SEASONAL_PERIOD);

/// Partial autocorrelations are searched inside [-PACF_BOUND, PACF_BOUND].
/// Keeps AR factors stationary and MA factors invertible.
pub const PACF_BOUND: f64 = 0.99;

pub mod limits {
    /// Latest allowed cutoff is the last observed date plus this many days.
    pub const MAX_FORECAST_RANGE_DAYS: i64 = 365;
    pub const MIN_HORIZON: usize = 1;
    pub const MAX_HORIZON: usize = 365;
    pub const DEFAULT_HORIZON: usize = 30;
}

pub mod fit {
    pub const MAX_ITERATIONS: usize = 5_000;
    pub const F_TOLERANCE: f64 = 1e-12;
    pub const X_TOLERANCE: f64 = 1e-9;
    pub const INITIAL_STEP: f64 = 0.1;
}

pub mod cli {
    pub const DEFAULT_COMMODITY: &str = "Maize";
}

pub mod backtest {
    pub const DEFAULT_HOLDOUT: usize = 12;
    pub const DEFAULT_HORIZON: usize = 1;
}
