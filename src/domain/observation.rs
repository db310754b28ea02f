use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One priced row of the source table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub commodity: String,
    pub unit_price: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, commodity: impl Into<String>, unit_price: f64) -> Self {
        Self {
            date,
            commodity: commodity.into(),
            unit_price,
        }
    }
}

impl std::fmt::Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {} @ {:.2}", self.date, self.commodity, self.unit_price)
    }
}
