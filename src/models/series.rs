use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Observation, SamplingPeriod};

// ============================================================================
// Series: one commodity's observations, ascending by date
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Series {
    commodity: String,
    observations: Vec<Observation>,
}

impl Series {
    /// Build a series from owned observations. Sorts by date (stable, so duplicate dates keep
    /// their source order).
    pub fn from_observations(
        commodity: impl Into<String>,
        mut observations: Vec<Observation>,
    ) -> Self {
        observations.sort_by_key(|o| o.date);
        Self {
            commodity: commodity.into(),
            observations,
        }
    }

    pub fn commodity(&self) -> &str {
        &self.commodity
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.unit_price).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    pub fn sampling_period(&self) -> SamplingPeriod {
        SamplingPeriod::infer(&self.dates())
    }

    /// Every observation dated strictly before `cutoff`. Relies on the ascending sort.
    pub fn before(&self, cutoff: NaiveDate) -> &[Observation] {
        let end = self.observations.partition_point(|o| o.date < cutoff);
        &self.observations[..end]
    }

    /// Observation dated exactly `date`, first one if duplicated.
    pub fn on(&self, date: NaiveDate) -> Option<&Observation> {
        let start = self.observations.partition_point(|o| o.date < date);
        self.observations.get(start).filter(|o| o.date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_sorted_on_construction() {
        let series = Series::from_observations(
            "Maize",
            vec![
                Observation::new(ymd(2020, 3, 1), "Maize", 3.0),
                Observation::new(ymd(2020, 1, 1), "Maize", 1.0),
                Observation::new(ymd(2020, 2, 1), "Maize", 2.0),
            ],
        );
        assert_eq!(series.prices(), vec![1.0, 2.0, 3.0]);
        assert_eq!(series.first_date(), Some(ymd(2020, 1, 1)));
        assert_eq!(series.last_date(), Some(ymd(2020, 3, 1)));
    }

    #[test]
    fn test_duplicates_pass_through_in_source_order() {
        let series = Series::from_observations(
            "Maize",
            vec![
                Observation::new(ymd(2020, 2, 1), "Maize", 5.0),
                Observation::new(ymd(2020, 1, 1), "Maize", 1.0),
                Observation::new(ymd(2020, 2, 1), "Maize", 6.0),
            ],
        );
        assert_eq!(series.prices(), vec![1.0, 5.0, 6.0]);
        assert_eq!(series.on(ymd(2020, 2, 1)).map(|o| o.unit_price), Some(5.0));
    }

    #[test]
    fn test_before_is_strict() {
        let series = Series::from_observations(
            "Maize",
            (1..=6).map(|m| Observation::new(ymd(2020, m, 1), "Maize", m as f64)).collect(),
        );
        let train = series.before(ymd(2020, 4, 1));
        assert_eq!(train.len(), 3);
        assert!(train.iter().all(|o| o.date < ymd(2020, 4, 1)));
        assert!(series.before(ymd(2019, 1, 1)).is_empty());
        assert_eq!(series.before(ymd(2021, 1, 1)).len(), 6);
    }
}
