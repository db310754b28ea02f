use chrono::{Days, Months, NaiveDate};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Spacing between consecutive observations, and so between forecast dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, Default)]
pub enum SamplingPeriod {
    #[strum(serialize = "daily")]
    Daily,
    #[strum(serialize = "weekly")]
    Weekly,
    #[default]
    #[strum(serialize = "monthly")]
    Monthly,
}

/// Median gap (in days) at or below which a series counts as daily / weekly.
/// Anything wider is monthly, including fortnightly data the model was never meant for.
const DAILY_MAX_GAP_DAYS: i64 = 3;
const WEEKLY_MAX_GAP_DAYS: i64 = 10;

/// Median gaps that a calendar-month series actually produces.
pub const MONTHLY_GAP_DAYS: std::ops::RangeInclusive<i64> = 25..=35;

/// A gap this many times the median counts as a hole in the series.
const IRREGULAR_GAP_FACTOR: f64 = 1.5;

impl SamplingPeriod {
    /// Infer the period from the median spacing of distinct, ascending dates.
    /// Fewer than two distinct dates falls back to monthly.
    ///
    /// Median gaps map as: up to 3 days daily, up to 10 days weekly, everything else monthly.
    /// A monthly result with a median outside [`MONTHLY_GAP_DAYS`] is a classification of last
    /// resort; callers can check [`median_gap_days`] to tell the two apart.
    pub fn infer(dates: &[NaiveDate]) -> Self {
        median_gap_days(dates).map_or_else(Self::default, Self::from_gap_days)
    }

    pub fn from_gap_days(gap_days: i64) -> Self {
        match gap_days {
            g if g <= DAILY_MAX_GAP_DAYS => Self::Daily,
            g if g <= WEEKLY_MAX_GAP_DAYS => Self::Weekly,
            _ => Self::Monthly,
        }
    }

    /// The date `steps` periods after `start`.
    /// Monthly steps are calendar months counted from `start`, so day-of-month clamping
    /// never drifts.
    pub fn advance(self, start: NaiveDate, steps: usize) -> Option<NaiveDate> {
        let steps = u32::try_from(steps).ok()?;
        match self {
            Self::Daily => start.checked_add_days(Days::new(u64::from(steps))),
            Self::Weekly => start.checked_add_days(Days::new(7 * u64::from(steps))),
            Self::Monthly => start.checked_add_months(Months::new(steps)),
        }
    }

    /// `count` dates starting at `start`, one period apart.
    pub fn sequence(self, start: NaiveDate, count: usize) -> Option<Vec<NaiveDate>> {
        (0..count).map(|i| self.advance(start, i)).collect()
    }
}

/// Positive gaps between consecutive dates. Duplicate dates are skipped.
fn gaps_in_days(dates: &[NaiveDate]) -> Vec<i64> {
    dates
        .iter()
        .tuple_windows()
        .map(|(a, b)| (*b - *a).num_days())
        .filter(|gap| *gap > 0)
        .collect()
}

/// Median positive gap between consecutive dates, or `None` with fewer than two distinct dates.
pub fn median_gap_days(dates: &[NaiveDate]) -> Option<i64> {
    let mut gaps = gaps_in_days(dates);
    if gaps.is_empty() {
        return None;
    }
    gaps.sort_unstable();
    Some(gaps[gaps.len() / 2])
}

/// Number of gaps that are much wider than the median spacing.
pub fn count_irregular_gaps(dates: &[NaiveDate]) -> usize {
    let Some(median) = median_gap_days(dates) else {
        return 0;
    };
    gaps_in_days(dates)
        .into_iter()
        .filter(|&g| g as f64 > median as f64 * IRREGULAR_GAP_FACTOR)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_infer_monthly_and_daily() {
        let monthly = SamplingPeriod::Monthly.sequence(ymd(2019, 1, 15), 24).unwrap();
        assert_eq!(SamplingPeriod::infer(&monthly), SamplingPeriod::Monthly);
        assert!(MONTHLY_GAP_DAYS.contains(&median_gap_days(&monthly).unwrap()));

        let daily = SamplingPeriod::Daily.sequence(ymd(2020, 3, 1), 30).unwrap();
        assert_eq!(SamplingPeriod::infer(&daily), SamplingPeriod::Daily);

        let weekly = SamplingPeriod::Weekly.sequence(ymd(2020, 3, 2), 10).unwrap();
        assert_eq!(SamplingPeriod::infer(&weekly), SamplingPeriod::Weekly);
    }

    #[test]
    fn test_infer_defaults_to_monthly() {
        assert_eq!(SamplingPeriod::infer(&[]), SamplingPeriod::Monthly);
        let same_day = [ymd(2020, 1, 1), ymd(2020, 1, 1)];
        assert_eq!(SamplingPeriod::infer(&same_day), SamplingPeriod::Monthly);
        assert_eq!(median_gap_days(&same_day), None);
    }

    #[test]
    fn test_fortnightly_falls_outside_monthly_band() {
        let dates: Vec<_> = (0..12)
            .map(|i| ymd(2020, 1, 1) + Days::new(14 * i))
            .collect();
        assert_eq!(SamplingPeriod::infer(&dates), SamplingPeriod::Monthly);
        assert_eq!(median_gap_days(&dates), Some(14));
        assert!(!MONTHLY_GAP_DAYS.contains(&14));
    }

    #[test]
    fn test_month_end_does_not_drift() {
        let dates = SamplingPeriod::Monthly.sequence(ymd(2020, 1, 31), 4).unwrap();
        assert_eq!(
            dates,
            vec![ymd(2020, 1, 31), ymd(2020, 2, 29), ymd(2020, 3, 31), ymd(2020, 4, 30)]
        );
    }

    #[test]
    fn test_sequence_starts_at_start() {
        use strum::IntoEnumIterator;

        for period in SamplingPeriod::iter() {
            let dates = period.sequence(ymd(2020, 6, 1), 3).unwrap();
            assert_eq!(dates[0], ymd(2020, 6, 1));
            assert!(dates.windows(2).all(|w| w[0] < w[1]), "{}", period);
        }
        assert_eq!(SamplingPeriod::Weekly.to_string(), "weekly");
    }

    #[test]
    fn test_irregular_gaps() {
        let dates = vec![
            ymd(2020, 1, 1),
            ymd(2020, 2, 1),
            ymd(2020, 3, 1),
            ymd(2020, 9, 1),
            ymd(2020, 10, 1),
        ];
        assert_eq!(count_irregular_gaps(&dates), 1);
    }
}
