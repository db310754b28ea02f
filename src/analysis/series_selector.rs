use crate::error::{ForecastError, Result};
use crate::models::{Dataset, Series};

/// Copies every observation labelled `commodity` (exact, case-sensitive match) out of the
/// dataset and returns them as a date-ordered series. The dataset itself is never touched.
pub fn select(dataset: &Dataset, commodity: &str) -> Result<Series> {
    let observations: Vec<_> = dataset
        .observations
        .iter()
        .filter(|o| o.commodity == commodity)
        .cloned()
        .collect();

    if observations.is_empty() {
        return Err(ForecastError::UnknownCommodity(commodity.to_string()));
    }

    log::debug!(
        "Selected {} observations of {} from {}",
        observations.len(),
        commodity,
        dataset.name
    );

    Ok(Series::from_observations(commodity, observations))
}
