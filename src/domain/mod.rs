// Domain types and value objects
mod observation;
mod sampling_period;

// Re-export commonly used types to the world
pub use observation::Observation;
pub use sampling_period::{
    MONTHLY_GAP_DAYS, SamplingPeriod, count_irregular_gaps, median_gap_days,
};
