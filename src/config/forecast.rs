//! Forecasting configuration

use serde::{Deserialize, Serialize};

use crate::config::constants::{self, MODEL_ORDER, PACF_BOUND, fit, limits};
use crate::models::ModelOrder;

/// Settings for the Nelder-Mead search used during model estimation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitSettings {
    /// Hard cap on simplex iterations. Reaching it is a fit failure.
    pub max_iterations: usize,
    /// Relative spread of objective values across the simplex that counts as converged.
    pub f_tolerance: f64,
    /// Simplex diameter (in parameter space) that counts as converged.
    pub x_tolerance: f64,
    /// Size of the initial simplex around the starting point.
    pub initial_step: f64,
    /// Bound on each partial autocorrelation.
    pub pacf_bound: f64,
}

/// Bounds the Orchestrator enforces before a request reaches the engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestLimits {
    pub max_forecast_range_days: i64,
    pub min_horizon: usize,
    pub max_horizon: usize,
    pub default_horizon: usize,
}

/// The Master Forecast Configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub order: ModelOrder,
    pub fit: FitSettings,
    pub limits: RequestLimits,
    /// Coverage of the prediction interval attached to each forecast point (e.g. 0.95).
    pub confidence_level: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        FORECAST
    }
}

pub const FORECAST: ForecastConfig = ForecastConfig {
    order: MODEL_ORDER,

    fit: FitSettings {
        max_iterations: fit::MAX_ITERATIONS,
        f_tolerance: fit::F_TOLERANCE,
        x_tolerance: fit::X_TOLERANCE,
        initial_step: fit::INITIAL_STEP,
        pacf_bound: PACF_BOUND,
    },

    limits: RequestLimits {
        max_forecast_range_days: limits::MAX_FORECAST_RANGE_DAYS,
        min_horizon: limits::MIN_HORIZON,
        max_horizon: limits::MAX_HORIZON,
        default_horizon: limits::DEFAULT_HORIZON,
    },

    confidence_level: 0.95,
};

// Keeps the seasonal period of the default order in sync with the top-level constant.
const _: () = assert!(FORECAST.order.period == constants::SEASONAL_PERIOD);
