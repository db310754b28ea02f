//! Error taxonomy for the forecasting core.

use thiserror::Error;

/// Every failure the core can surface. Each kind stays distinct all the way to
/// the caller; nothing is collapsed into a generic error or replaced by a default.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    /// No observation in the dataset carries this commodity label.
    #[error("Unknown commodity '{0}': no observations match this label")]
    UnknownCommodity(String),

    /// Scaling parameters were requested for an empty sequence.
    #[error("Cannot fit scaling parameters on an empty series")]
    EmptyInput,

    /// Every value is identical (or the range is not finite), so min-max scaling is undefined.
    #[error("Degenerate price range: min {min} and max {max} do not span a usable interval")]
    DegenerateRange { min: f64, max: f64 },

    /// Too few observations before the cutoff for the fixed model order.
    #[error("Insufficient data: model needs at least {required} observations before the cutoff, found {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Numerical failure while estimating or forecasting.
    #[error("Model fit failed: {0}")]
    ModelFit(String),

    /// A forecast must cover at least one period.
    #[error("Invalid horizon {0}: must be at least 1 period")]
    InvalidHorizon(usize),
}

pub type Result<T> = std::result::Result<T, ForecastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_keep_diagnostics() {
        let err = ForecastError::ModelFit("objective is NaN".to_string());
        assert_eq!(err.to_string(), "Model fit failed: objective is NaN");

        let err = ForecastError::InsufficientData {
            required: 27,
            actual: 3,
        };
        assert!(err.to_string().contains("27"));
        assert!(err.to_string().contains("found 3"));
    }
}
