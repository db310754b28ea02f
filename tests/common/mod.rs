#![allow(dead_code)]

use chrono::{Months, NaiveDate};
use soko_forecast::{Dataset, Observation};

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Monthly maize prices, 2010-01 .. 2020-12, trending from 50 to 120 with a small harvest cycle.
pub fn maize_observations() -> Vec<Observation> {
    let start = ymd(2010, 1, 1);
    let n = 132;
    (0..n)
        .map(|i| {
            let date = start.checked_add_months(Months::new(i)).unwrap();
            let trend = 50.0 + 70.0 * f64::from(i) / f64::from(n - 1);
            let season = 2.0 * (f64::from(i) * std::f64::consts::PI / 6.0).sin();
            Observation::new(date, "Maize", trend + season)
        })
        .collect()
}

/// Maize history plus three "Beans" rows.
pub fn food_prices() -> Dataset {
    let mut observations = maize_observations();
    observations.extend([
        Observation::new(ymd(2020, 1, 1), "Beans", 80.0),
        Observation::new(ymd(2020, 2, 1), "Beans", 85.0),
        Observation::new(ymd(2020, 3, 1), "Beans", 83.0),
    ]);
    Dataset::new("food prices", observations)
}
