//! Per-request forecasting pipeline.
//!
//! Every call walks the same stages on its own data: split at the cutoff, fit a fresh model on
//! the scaled training values, forecast, then de-scale with the session's parameters. Nothing is
//! cached between calls.

use statrs::distribution::{ContinuousCDF, Normal};
use strum_macros::Display;

use crate::config::constants::SEASONAL_PERIOD;
use crate::config::{DF, FitSettings, ForecastConfig};
use crate::domain::{
    MONTHLY_GAP_DAYS, Observation, SamplingPeriod, count_irregular_gaps, median_gap_days,
};
use crate::error::{ForecastError, Result};
use crate::models::{
    FittedSarima, ForecastPoint, ForecastRequest, ForecastResult, ModelOrder, ScalingParameters,
    Series,
};
use crate::trace_time;

/// Pipeline stages, in order. Any error ends the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EngineStage {
    Splitting,
    Fitting,
    Forecasting,
    Done,
}

/// Observations strictly before `cutoff`. Nothing dated on or after the cutoff can reach the model.
pub fn training_window(series: &Series, cutoff: chrono::NaiveDate) -> &[Observation] {
    series.before(cutoff)
}

/// Two-sided standard normal quantile for a prediction interval of coverage `level`.
fn interval_quantile(level: f64) -> Result<f64> {
    if !(level > 0.0 && level < 1.0) {
        return Err(ForecastError::ModelFit(format!(
            "confidence level {} is outside (0, 1)",
            level
        )));
    }
    let normal = Normal::new(0.0, 1.0).map_err(|e| ForecastError::ModelFit(e.to_string()))?;
    Ok(normal.inverse_cdf(0.5 + level / 2.0))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastEngine {
    pub order: ModelOrder,
    pub settings: FitSettings,
    pub confidence_level: f64,
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::from_config(&ForecastConfig::default())
    }
}

impl ForecastEngine {
    pub fn from_config(config: &ForecastConfig) -> Self {
        Self {
            order: config.order,
            settings: config.fit,
            confidence_level: config.confidence_level,
        }
    }

    /// Forecast `request.horizon()` periods of `series` starting at the cutoff.
    /// `scaling` must come from the full series, not the training window.
    pub fn run(
        &self,
        series: &Series,
        scaling: &ScalingParameters,
        request: &ForecastRequest,
    ) -> Result<ForecastResult> {
        let cutoff = request.cutoff_date();
        let horizon = request.horizon();

        // 1. Split
        log::debug!("[{}] {} before {}", EngineStage::Splitting, series.commodity(), cutoff);
        let training = training_window(series, cutoff);
        let required = self.order.min_observations();
        if training.len() < required {
            return Err(ForecastError::InsufficientData {
                required,
                actual: training.len(),
            });
        }
        if DF.log_splits {
            log::info!(
                "{}: training on {} observations ({} .. {})",
                series.commodity(),
                training.len(),
                training[0].date,
                training[training.len() - 1].date
            );
        }

        let training_dates: Vec<_> = training.iter().map(|o| o.date).collect();
        let period = SamplingPeriod::infer(&training_dates);
        for warning in self.spacing_warnings(series.commodity(), period, &training_dates) {
            log::warn!("{}", warning);
        }

        // 2. Fit
        log::debug!("[{}] {}", EngineStage::Fitting, self.order);
        let prices: Vec<f64> = training.iter().map(|o| o.unit_price).collect();
        let scaled = scaling.transform(&prices);
        let model = trace_time!("SARIMA fit", 50_000, {
            FittedSarima::fit(self.order, &scaled, &self.settings)
        })?;

        let diagnostics = model.diagnostics().clone();
        if DF.log_fit_diagnostics {
            log::info!(
                "{} {}: CSS {:.6e}, sigma² {:.6e}, {} iterations, {:?}",
                series.commodity(),
                self.order,
                diagnostics.css,
                diagnostics.sigma2,
                diagnostics.iterations,
                diagnostics.coefficients
            );
        }

        // 3. Forecast
        log::debug!("[{}] {} steps", EngineStage::Forecasting, horizon);
        let forecast = model.forecast(horizon)?;
        let z = interval_quantile(self.confidence_level)?;
        let dates = period.sequence(cutoff, horizon).ok_or_else(|| {
            ForecastError::ModelFit(format!(
                "{} {} periods from {} runs past the calendar",
                horizon, period, cutoff
            ))
        })?;

        // 4. De-scale with the full-series parameters
        let points: Vec<ForecastPoint> = dates
            .into_iter()
            .zip(forecast.mean.iter().zip(&forecast.std_errors))
            .map(|(date, (&mean, &se))| ForecastPoint {
                date,
                predicted_unit_price: scaling.unscale(mean),
                lower: scaling.unscale(mean - z * se),
                upper: scaling.unscale(mean + z * se),
            })
            .collect();

        log::debug!("[{}] {} points", EngineStage::Done, points.len());

        Ok(ForecastResult {
            commodity: series.commodity().to_string(),
            cutoff_date: cutoff,
            period,
            confidence_level: self.confidence_level,
            training_size: training.len(),
            points,
            diagnostics,
        })
    }

    /// The model assumes evenly spaced, seasonal-period-aligned data. Mismatches are reported, not
    /// corrected.
    fn spacing_warnings(
        &self,
        commodity: &str,
        period: SamplingPeriod,
        dates: &[chrono::NaiveDate],
    ) -> Vec<String> {
        let mut warnings = Vec::new();
        let monthly_seasonal = self.order.is_seasonal() && self.order.period == SEASONAL_PERIOD;

        if monthly_seasonal && period != SamplingPeriod::Monthly {
            warnings.push(format!(
                "{} looks {} but {} assumes monthly data; seasonal terms may be meaningless",
                commodity, period, self.order
            ));
        }
        let off_band = median_gap_days(dates)
            .filter(|g| period == SamplingPeriod::Monthly && !MONTHLY_GAP_DAYS.contains(g));
        if let Some(gap) = off_band {
            warnings.push(format!(
                "{}: median spacing of {} days is not monthly ({}..={} days expected)",
                commodity,
                gap,
                MONTHLY_GAP_DAYS.start(),
                MONTHLY_GAP_DAYS.end()
            ));
        }
        let irregular = count_irregular_gaps(dates);
        if irregular > 0 {
            warnings.push(format!(
                "{}: {} gap(s) wider than the usual {} spacing; data is not resampled",
                commodity, irregular, period
            ));
        }
        warnings
    }
}
