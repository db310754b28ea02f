//! Min-max scaling fit once per commodity session.
//!
//! The parameters come from the *full* selected series and are reused for every request on that
//! series, so forecasts from different cutoffs are de-scaled against the same price range.

use argminmax::ArgMinMax;
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Fitted (min, max) of one series. Immutable once fitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingParameters {
    min_value: f64,
    max_value: f64,
}

impl ScalingParameters {
    /// Fit on a sequence of prices.
    pub fn fit(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(ForecastError::EmptyInput);
        }

        let (min_idx, max_idx) = values.argminmax();
        let (min, max) = (values[min_idx], values[max_idx]);

        let range = max - min;
        if max <= min || !range.is_finite() {
            return Err(ForecastError::DegenerateRange { min, max });
        }

        Ok(Self {
            min_value: min,
            max_value: max,
        })
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    #[inline]
    pub fn range(&self) -> f64 {
        self.max_value - self.min_value
    }

    #[inline]
    pub fn scale(&self, value: f64) -> f64 {
        (value - self.min_value) / self.range()
    }

    /// Not clamped: forecasts may leave the historical range.
    #[inline]
    pub fn unscale(&self, scaled: f64) -> f64 {
        scaled * self.range() + self.min_value
    }

    /// Map prices into [0, 1] (values inside the fitted range).
    pub fn transform(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.scale(v)).collect()
    }

    pub fn inverse_transform(&self, scaled: &[f64]) -> Vec<f64> {
        scaled.iter().map(|&v| self.unscale(v)).collect()
    }
}
