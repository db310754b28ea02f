// Series selection and the per-request forecasting pipeline
pub mod forecast_engine;
pub mod series_selector;

pub use forecast_engine::{EngineStage, ForecastEngine, training_window};
pub use series_selector::select;
