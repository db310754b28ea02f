use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::engine::{BacktestReport, ForecastOutcome};
use crate::models::ForecastResult;
use crate::utils::format_date;

#[derive(Tabled)]
struct ForecastLine {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Predicted unit price")]
    predicted: String,
    #[tabled(rename = "Lower")]
    lower: String,
    #[tabled(rename = "Upper")]
    upper: String,
}

#[derive(Tabled)]
struct BacktestLine {
    #[tabled(rename = "Cutoff")]
    cutoff: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Predicted")]
    predicted: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Error")]
    error: String,
}

fn price(value: f64) -> String {
    format!("{:.2}", value)
}

fn metric(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.4}", v))
}

pub fn render_forecast(result: &ForecastResult) -> String {
    let lines: Vec<ForecastLine> = result
        .points
        .iter()
        .map(|p| ForecastLine {
            date: format_date(p.date),
            predicted: price(p.predicted_unit_price),
            lower: price(p.lower),
            upper: price(p.upper),
        })
        .collect();

    let mut table = Table::new(lines);
    table.with(Style::rounded());

    format!(
        "{} forecast from {} ({} steps, {} data, {:.0}% interval, trained on {} observations)\n{}",
        result.commodity,
        format_date(result.cutoff_date),
        result.len(),
        result.period,
        result.confidence_level * 100.0,
        result.training_size,
        table
    )
}

/// Table for a forecast, or the warning text for a rejected request.
pub fn render_outcome(outcome: &ForecastOutcome) -> String {
    match outcome {
        ForecastOutcome::Forecast(result) => render_forecast(result),
        ForecastOutcome::Rejected(warning) => format!("⚠ {}", warning),
    }
}

pub fn render_backtest(report: &BacktestReport) -> String {
    let lines: Vec<BacktestLine> = report
        .rows
        .iter()
        .flat_map(|row| {
            if let Some(err) = &row.error {
                return vec![BacktestLine {
                    cutoff: format_date(row.cutoff_date),
                    date: "-".to_string(),
                    predicted: "-".to_string(),
                    actual: "-".to_string(),
                    error: err.clone(),
                }];
            }
            row.points
                .iter()
                .map(|p| BacktestLine {
                    cutoff: format_date(row.cutoff_date),
                    date: format_date(p.date),
                    predicted: price(p.predicted),
                    actual: p.actual.map_or_else(|| "-".to_string(), price),
                    error: p
                        .actual
                        .map_or_else(|| "-".to_string(), |a| price(p.predicted - a)),
                })
                .collect()
        })
        .collect();

    let mut table = Table::new(lines);
    table.with(Style::rounded());

    format!(
        "{} walk-forward backtest: {} cutoffs, horizon {}\n{}\nScored points: {}  Failed cutoffs: {}\nMAE: {}  RMSE: {}  MAPE: {}",
        report.commodity,
        report.rows.len(),
        report.config.horizon,
        table,
        report.scored_points,
        report.failed_cutoffs,
        metric(report.mae),
        metric(report.rmse),
        report
            .mape
            .map_or_else(|| "n/a".to_string(), |m| format!("{:.2}%", m * 100.0)),
    )
}

/// Pretty JSON for `--json` output.
pub fn to_json<T: serde::Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
