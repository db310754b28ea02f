mod common;

use chrono::Months;
use common::{maize_observations, ymd};
use proptest::prelude::*;
use soko_forecast::analysis::ForecastEngine;
use soko_forecast::{ForecastRequest, Observation, ScalingParameters, Series};

proptest! {
    #[test]
    fn scaling_round_trip(values in prop::collection::vec(0.0f64..10_000.0, 2..64)) {
        let params = ScalingParameters::fit(&values);
        prop_assume!(params.is_ok());
        let params = params.unwrap();

        let restored = params.inverse_transform(&params.transform(&values));
        for (a, b) in values.iter().zip(&restored) {
            prop_assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    /// Rewriting every price on or after the cutoff must not move the forecast.
    #[test]
    fn no_leakage_past_cutoff(offset in 30u32..130, shock in 1.5f64..4.0) {
        let start = ymd(2010, 1, 1);
        let cutoff = start.checked_add_months(Months::new(offset)).unwrap();

        let original = maize_observations();
        let tampered: Vec<Observation> = original
            .iter()
            .map(|o| {
                let price = if o.date >= cutoff { o.unit_price * shock } else { o.unit_price };
                Observation::new(o.date, o.commodity.clone(), price)
            })
            .collect();

        let series = Series::from_observations("Maize", original);
        let tampered = Series::from_observations("Maize", tampered);
        let scaling = ScalingParameters::fit(&series.prices()).unwrap();
        let request = ForecastRequest::new(cutoff, 3).unwrap();
        let engine = ForecastEngine::default();

        let clean = engine.run(&series, &scaling, &request).unwrap();
        let dirty = engine.run(&tampered, &scaling, &request).unwrap();
        prop_assert_eq!(clean.values(), dirty.values());
    }

    #[test]
    fn horizon_contract(horizon in 1usize..=365) {
        let series = Series::from_observations("Maize", maize_observations());
        let scaling = ScalingParameters::fit(&series.prices()).unwrap();
        let cutoff = ymd(2018, 7, 1);
        let request = ForecastRequest::new(cutoff, horizon).unwrap();

        let result = ForecastEngine::default().run(&series, &scaling, &request).unwrap();
        prop_assert_eq!(result.len(), horizon);
        prop_assert_eq!(result.points[0].date, cutoff);
        prop_assert!(result.dates().windows(2).all(|w| w[0] < w[1]));
        prop_assert!(result.values().iter().all(|v| v.is_finite()));
    }
}
