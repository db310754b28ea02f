use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::SamplingPeriod;
use crate::error::{ForecastError, Result};
use crate::models::FitDiagnostics;

/// One user action: forecast `horizon` periods starting at `cutoff_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRequest {
    cutoff_date: NaiveDate,
    horizon: usize,
}

impl ForecastRequest {
    pub fn new(cutoff_date: NaiveDate, horizon: usize) -> Result<Self> {
        if horizon == 0 {
            return Err(ForecastError::InvalidHorizon(horizon));
        }
        Ok(Self { cutoff_date, horizon })
    }

    pub fn cutoff_date(&self) -> NaiveDate {
        self.cutoff_date
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_unit_price: f64,
    /// Lower bound of the prediction interval
    pub lower: f64,
    /// Upper bound of the prediction interval
    pub upper: f64,
}

/// Forecast for one commodity: `horizon` points, first one on the cutoff date, one sampling
/// period apart, in price units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub commodity: String,
    pub cutoff_date: NaiveDate,
    pub period: SamplingPeriod,
    pub confidence_level: f64,
    /// Observations the model was trained on
    pub training_size: usize,
    pub points: Vec<ForecastPoint>,
    pub diagnostics: FitDiagnostics,
}

impl ForecastResult {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.predicted_unit_price).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_horizon_is_rejected() {
        let date = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
        assert_eq!(ForecastRequest::new(date, 0), Err(ForecastError::InvalidHorizon(0)));

        let request = ForecastRequest::new(date, 6).unwrap();
        assert_eq!(request.horizon(), 6);
        assert_eq!(request.cutoff_date(), date);
    }
}
