mod dataset;
mod forecast;
mod model_order;
mod sarima;
mod scaler;
mod series;

pub use {
    dataset::Dataset,
    forecast::{ForecastPoint, ForecastRequest, ForecastResult},
    model_order::ModelOrder,
    sarima::{Coefficients, FitDiagnostics, FittedSarima, ModelForecast},
    scaler::ScalingParameters,
    series::Series,
};
