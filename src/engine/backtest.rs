//! Walk-forward backtest.
//!
//! The last `holdout` observations of the session's series become cutoffs. For each cutoff the
//! engine trains on everything strictly before it and forecasts `horizon` periods; every forecast
//! date that has a realised price is scored. Cutoffs run in parallel (rayon) against the
//! session's read-only series and scaler, and rows come back in cutoff order.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::constants::backtest;
use crate::engine::ForecastSession;
use crate::models::ForecastRequest;
use crate::utils::maths_utils::{
    mean_absolute_error, mean_absolute_percentage_error, root_mean_squared_error,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktestConfig {
    /// How many trailing observations to use as cutoffs.
    pub holdout: usize,
    /// Periods forecast from each cutoff.
    pub horizon: usize,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            holdout: backtest::DEFAULT_HOLDOUT,
            horizon: backtest::DEFAULT_HORIZON,
        }
    }
}

/// A forecast point next to the price that was actually recorded on that date (if any).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPoint {
    pub date: NaiveDate,
    pub predicted: f64,
    pub actual: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestRow {
    pub cutoff_date: NaiveDate,
    pub points: Vec<ScoredPoint>,
    /// Set when the forecast for this cutoff failed.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestReport {
    pub commodity: String,
    pub config: BacktestConfig,
    pub rows: Vec<BacktestRow>,
    /// Forecast points with a realised price
    pub scored_points: usize,
    pub failed_cutoffs: usize,
    pub mae: Option<f64>,
    pub rmse: Option<f64>,
    /// Fraction, not percent
    pub mape: Option<f64>,
}

/// Run a walk-forward backtest over the last `config.holdout` observations of the session.
pub fn run_backtest(session: &ForecastSession, config: &BacktestConfig) -> BacktestReport {
    let series = session.series();
    let commodity = session.commodity().to_string();

    let holdout = config.holdout.min(series.len());
    if holdout < config.holdout {
        log::warn!(
            "[backtest] {}: holdout {} exceeds the {} observations available",
            commodity,
            config.holdout,
            series.len()
        );
    }

    let cutoffs: Vec<NaiveDate> = series.observations()[series.len() - holdout..]
        .iter()
        .map(|o| o.date)
        .collect();

    let rows: Vec<BacktestRow> = cutoffs
        .par_iter()
        .map(|&cutoff_date| {
            let result = ForecastRequest::new(cutoff_date, config.horizon)
                .and_then(|request| session.forecast(&request));

            match result {
                Ok(forecast) => BacktestRow {
                    cutoff_date,
                    points: forecast
                        .points
                        .iter()
                        .map(|p| ScoredPoint {
                            date: p.date,
                            predicted: p.predicted_unit_price,
                            actual: series.on(p.date).map(|o| o.unit_price),
                        })
                        .collect(),
                    error: None,
                },
                Err(e) => {
                    log::warn!("[backtest] {} @ {}: {}", commodity, cutoff_date, e);
                    BacktestRow {
                        cutoff_date,
                        points: Vec::new(),
                        error: Some(e.to_string()),
                    }
                }
            }
        })
        .collect();

    let (actual, predicted): (Vec<f64>, Vec<f64>) = rows
        .iter()
        .flat_map(|row| &row.points)
        .filter_map(|p| p.actual.map(|a| (a, p.predicted)))
        .unzip();

    let failed_cutoffs = rows.iter().filter(|row| row.error.is_some()).count();
    let scored = !actual.is_empty();

    let report = BacktestReport {
        commodity,
        config: *config,
        scored_points: actual.len(),
        failed_cutoffs,
        mae: scored.then(|| mean_absolute_error(&actual, &predicted)),
        rmse: scored.then(|| root_mean_squared_error(&actual, &predicted)),
        mape: mean_absolute_percentage_error(&actual, &predicted),
        rows,
    };

    log::info!(
        "[backtest] {}: {} cutoffs, {} failed, {} scored points",
        report.commodity,
        report.rows.len(),
        report.failed_cutoffs,
        report.scored_points
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FORECAST;
    use crate::domain::Observation;
    use crate::models::Dataset;
    use chrono::Months;

    fn session(n: u32) -> ForecastSession {
        let start = NaiveDate::from_ymd_opt(2012, 1, 1).unwrap();
        let observations = (0..n)
            .map(|i| {
                let date = start.checked_add_months(Months::new(i)).unwrap();
                let seasonal = (f64::from(i) * std::f64::consts::PI / 6.0).cos() * 3.0;
                Observation::new(date, "Maize", 40.0 + 0.4 * f64::from(i) + seasonal)
            })
            .collect();
        ForecastSession::new(&Dataset::new("test", observations), "Maize", &FORECAST).unwrap()
    }

    #[test]
    fn test_one_row_per_cutoff() {
        let session = session(72);
        let report = run_backtest(&session, &BacktestConfig { holdout: 6, horizon: 2 });

        assert_eq!(report.rows.len(), 6);
        assert_eq!(report.failed_cutoffs, 0);
        assert!(report.rows.windows(2).all(|w| w[0].cutoff_date < w[1].cutoff_date));
        // The last cutoff's second step runs past the data.
        assert_eq!(report.scored_points, 6 * 2 - 1);
        assert!(report.mae.is_some_and(f64::is_finite));
        assert!(report.rmse.is_some_and(f64::is_finite));
        assert!(report.mape.is_some_and(f64::is_finite));
    }

    #[test]
    fn test_failed_cutoffs_are_recorded() {
        // 30 observations, holdout 6: the earliest cutoffs leave fewer than 27 training points.
        let session = session(30);
        let report = run_backtest(&session, &BacktestConfig { holdout: 6, horizon: 1 });
        assert_eq!(report.rows.len(), 6);
        assert_eq!(report.failed_cutoffs, 3);
        assert!(report.rows[0].error.as_deref().is_some_and(|e| e.contains("Insufficient")));
    }
}
