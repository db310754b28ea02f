use chrono::NaiveDate;

use crate::analysis::{ForecastEngine, select};
use crate::config::{FORECAST, ForecastConfig, RequestLimits};
use crate::engine::messages::{ForecastOutcome, RangeWarning};
use crate::error::Result;
use crate::models::{Dataset, ForecastRequest, ForecastResult, ScalingParameters, Series};
use crate::utils::add_days;

/// One commodity, ready to answer forecast requests.
///
/// Owns the selected series and the scaling parameters fit on all of it. Both are read-only for
/// the life of the session, so requests never influence each other.
#[derive(Debug, Clone)]
pub struct ForecastSession {
    series: Series,
    scaling: ScalingParameters,
    engine: ForecastEngine,
    limits: RequestLimits,
    max_forecast_date: NaiveDate,
}

impl ForecastSession {
    pub fn new(dataset: &Dataset, commodity: &str, config: &ForecastConfig) -> Result<Self> {
        let series = select(dataset, commodity)?;
        Self::from_series(series, config)
    }

    pub fn from_series(series: Series, config: &ForecastConfig) -> Result<Self> {
        let scaling = ScalingParameters::fit(&series.prices())?;

        let max_forecast_date = series
            .last_date()
            .and_then(|last| add_days(last, config.limits.max_forecast_range_days))
            .unwrap_or(NaiveDate::MAX);

        log::info!(
            "Session for {}: {} observations, {} data, prices {:.2} .. {:.2}, forecasts allowed up to {}",
            series.commodity(),
            series.len(),
            series.sampling_period(),
            scaling.min_value(),
            scaling.max_value(),
            max_forecast_date
        );

        Ok(Self {
            series,
            scaling,
            engine: ForecastEngine::from_config(config),
            limits: config.limits,
            max_forecast_date,
        })
    }

    pub fn commodity(&self) -> &str {
        self.series.commodity()
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn scaling(&self) -> &ScalingParameters {
        &self.scaling
    }

    pub fn engine(&self) -> &ForecastEngine {
        &self.engine
    }

    /// Latest cutoff the session accepts: last observation plus the forecast range.
    pub fn max_forecast_date(&self) -> NaiveDate {
        self.max_forecast_date
    }

    /// Range checks done before any computation.
    pub fn validate(&self, cutoff: NaiveDate, horizon: usize) -> Option<RangeWarning> {
        if cutoff > self.max_forecast_date {
            return Some(RangeWarning::CutoffBeyondRange {
                cutoff,
                max_date: self.max_forecast_date,
            });
        }
        if horizon < self.limits.min_horizon || horizon > self.limits.max_horizon {
            return Some(RangeWarning::HorizonOutOfBounds {
                horizon,
                min: self.limits.min_horizon,
                max: self.limits.max_horizon,
            });
        }
        None
    }

    /// Orchestrator entry point: validate, then forecast. A range violation comes back as
    /// [`ForecastOutcome::Rejected`]; engine failures are errors.
    pub fn handle(&self, cutoff: NaiveDate, horizon: usize) -> Result<ForecastOutcome> {
        if let Some(warning) = self.validate(cutoff, horizon) {
            log::warn!("{}: {}", self.commodity(), warning);
            return Ok(ForecastOutcome::Rejected(warning));
        }

        let request = ForecastRequest::new(cutoff, horizon)?;
        self.forecast(&request).map(ForecastOutcome::Forecast)
    }

    /// Run the engine without range checks.
    pub fn forecast(&self, request: &ForecastRequest) -> Result<ForecastResult> {
        self.engine.run(&self.series, &self.scaling, request)
    }
}

/// Select `commodity`, fit its scaler, and forecast `horizon` periods from `cutoff_date`
/// with the default configuration.
pub fn get_forecast(
    dataset: &Dataset,
    commodity: &str,
    cutoff_date: NaiveDate,
    horizon: usize,
) -> Result<ForecastResult> {
    let request = ForecastRequest::new(cutoff_date, horizon)?;
    ForecastSession::new(dataset, commodity, &FORECAST)?.forecast(&request)
}
