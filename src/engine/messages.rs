use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::ForecastResult;
use crate::utils::format_date;

/// Why the Orchestrator declined a request. Non-fatal: the engine never ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RangeWarning {
    CutoffBeyondRange {
        cutoff: NaiveDate,
        max_date: NaiveDate,
    },
    HorizonOutOfBounds {
        horizon: usize,
        min: usize,
        max: usize,
    },
}

impl std::fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::CutoffBeyondRange { cutoff, max_date } => write!(
                f,
                "The selected date ({}) is outside the maximum forecast range. Please select a date on or before {}.",
                format_date(*cutoff),
                format_date(*max_date)
            ),
            Self::HorizonOutOfBounds { horizon, min, max } => write!(
                f,
                "A horizon of {} periods is not supported. Please choose between {} and {}.",
                horizon, min, max
            ),
        }
    }
}

/// What the Orchestrator hands back for one user action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "body", rename_all = "snake_case")]
pub enum ForecastOutcome {
    Forecast(ForecastResult),
    Rejected(RangeWarning),
}

impl ForecastOutcome {
    pub fn forecast(&self) -> Option<&ForecastResult> {
        match self {
            Self::Forecast(result) => Some(result),
            Self::Rejected(_) => None,
        }
    }

    pub fn warning(&self) -> Option<&RangeWarning> {
        match self {
            Self::Forecast(_) => None,
            Self::Rejected(warning) => Some(warning),
        }
    }
}
