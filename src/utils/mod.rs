pub mod maths_utils;
pub mod optimization;
mod perf;
pub mod time_utils;

pub use time_utils::{TimeUtils, add_days, format_date, parse_date, today_local};
