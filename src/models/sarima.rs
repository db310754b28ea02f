//! Seasonal ARIMA estimation and forecasting.
//!
//! The model is the multiplicative form
//!
//! ```text
//! φ(B) Φ(B^s) (1 - B)^d (1 - B^s)^D y_t = θ(B) Θ(B^s) e_t
//! ```
//!
//! with no intercept. Coefficients are estimated by conditional sum of squares (CSS):
//! residuals before the largest AR lag are taken as zero and the squared residuals after it
//! are minimised with a bounded Nelder-Mead search over partial autocorrelations. Mapping
//! partial autocorrelations through Durbin-Levinson keeps every AR factor stationary and every
//! MA factor invertible for any point inside the search box.
//!
//! Forecasts are the conditional mean (future shocks are zero). Standard errors come from the
//! psi-weights of the full model, differencing included.

use serde::{Deserialize, Serialize};

use crate::config::FitSettings;
use crate::error::{ForecastError, Result};
use crate::models::ModelOrder;
use crate::utils::maths_utils::{
    apply_difference, autocorrelations, difference_polynomial, pacf_from_acf, pacf_to_coefficients,
    poly_mul,
};
use crate::utils::optimization::{NelderMeadConfig, nelder_mead};

/// Estimation summary kept alongside a fitted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitDiagnostics {
    /// Conditional sum of squared residuals at the optimum
    pub css: f64,
    /// Innovation variance estimate, CSS / n_effective
    pub sigma2: f64,
    /// Residuals that entered the objective
    pub n_effective: usize,
    pub iterations: usize,
    pub coefficients: Coefficients,
}

/// Point forecasts with one standard error per step, in the units the model was fit in.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelForecast {
    pub mean: Vec<f64>,
    pub std_errors: Vec<f64>,
}

/// Estimated coefficients of each factor, in the model's sign convention
/// (AR: `1 - φ_1 B - ...`, MA: `1 + θ_1 B + ...`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Coefficients {
    pub ar: Vec<f64>,
    pub ma: Vec<f64>,
    pub seasonal_ar: Vec<f64>,
    pub seasonal_ma: Vec<f64>,
}

impl Coefficients {
    /// Unpack a search point laid out as `[pacf_ar | pacf_ma | pacf_sar | pacf_sma]`.
    fn from_pacf(order: &ModelOrder, params: &[f64]) -> Self {
        let (ar, rest) = params.split_at(order.p);
        let (ma, rest) = rest.split_at(order.q);
        let (sar, sma) = rest.split_at(order.seasonal_p);

        let negate = |v: Vec<f64>| v.into_iter().map(|c| -c).collect::<Vec<f64>>();

        Self {
            ar: pacf_to_coefficients(ar),
            ma: negate(pacf_to_coefficients(ma)),
            seasonal_ar: pacf_to_coefficients(sar),
            seasonal_ma: negate(pacf_to_coefficients(sma)),
        }
    }

    /// Expanded `φ(B)Φ(B^s)` in ascending powers, leading 1.
    fn ar_polynomial(&self, period: usize) -> Vec<f64> {
        let mut non_seasonal = vec![1.0];
        non_seasonal.extend(self.ar.iter().map(|c| -c));
        poly_mul(&non_seasonal, &seasonal_factor(&self.seasonal_ar, period, -1.0))
    }

    /// Expanded `θ(B)Θ(B^s)` in ascending powers, leading 1.
    fn ma_polynomial(&self, period: usize) -> Vec<f64> {
        let mut non_seasonal = vec![1.0];
        non_seasonal.extend(self.ma.iter().copied());
        poly_mul(&non_seasonal, &seasonal_factor(&self.seasonal_ma, period, 1.0))
    }
}

/// `1 + sign·(c_1 B^s + c_2 B^2s + ...)`
fn seasonal_factor(coeffs: &[f64], period: usize, sign: f64) -> Vec<f64> {
    let mut poly = vec![0.0; coeffs.len() * period + 1];
    poly[0] = 1.0;
    for (j, &c) in coeffs.iter().enumerate() {
        poly[(j + 1) * period] = sign * c;
    }
    poly
}

/// Conditional residuals of the ARMA recursion. Residuals before the largest AR lag are zero.
fn conditional_residuals(w: &[f64], ar_poly: &[f64], ma_poly: &[f64]) -> Vec<f64> {
    let n = w.len();
    let ar_lags = ar_poly.len() - 1;
    let ma_lags = ma_poly.len() - 1;
    let mut e = vec![0.0; n];

    for t in ar_lags..n {
        let mut prediction = 0.0;
        for k in 1..=ar_lags {
            prediction -= ar_poly[k] * w[t - k];
        }
        for j in 1..=ma_lags.min(t) {
            prediction += ma_poly[j] * e[t - j];
        }
        e[t] = w[t] - prediction;
    }
    e
}

fn sum_of_squares(residuals: &[f64], start: usize) -> f64 {
    residuals[start.min(residuals.len())..].iter().map(|e| e * e).sum()
}

/// A seasonal ARIMA model fit to one training sample.
/// Immutable: refitting means building a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedSarima {
    order: ModelOrder,
    ar_poly: Vec<f64>,
    ma_poly: Vec<f64>,
    /// Differencing polynomial (1 - B)^d (1 - B^s)^D
    delta: Vec<f64>,
    /// Training values, undifferenced
    history: Vec<f64>,
    /// Training values after differencing
    working: Vec<f64>,
    residuals: Vec<f64>,
    diagnostics: FitDiagnostics,
}

impl FittedSarima {
    /// Estimate the model on `data` (one value per period, oldest first).
    pub fn fit(order: ModelOrder, data: &[f64], settings: &FitSettings) -> Result<Self> {
        let seasonal_terms = order.seasonal_p + order.seasonal_d + order.seasonal_q;
        if seasonal_terms > 0 && order.period < 2 {
            return Err(ForecastError::ModelFit(format!(
                "{} has seasonal terms but a seasonal period of {}",
                order, order.period
            )));
        }

        let required = order.min_observations();
        if data.len() < required {
            return Err(ForecastError::InsufficientData {
                required,
                actual: data.len(),
            });
        }

        if data.iter().any(|x| !x.is_finite()) {
            return Err(ForecastError::ModelFit(
                "training data contains NaN or infinite values".to_string(),
            ));
        }

        let delta = poly_mul(
            &difference_polynomial(1, order.d),
            &difference_polynomial(order.period, order.seasonal_d),
        );
        let working = apply_difference(data, &delta);
        let start = order.ar_lags();
        let n_effective = working.len().saturating_sub(start);
        if n_effective == 0 {
            return Err(ForecastError::InsufficientData {
                required,
                actual: data.len(),
            });
        }

        let bound = settings.pacf_bound;
        let initial = Self::initial_guess(&order, &working, bound);
        let bounds = vec![(-bound, bound); initial.len()];

        let objective = |params: &[f64]| {
            let coeffs = Coefficients::from_pacf(&order, params);
            let e = conditional_residuals(
                &working,
                &coeffs.ar_polynomial(order.period),
                &coeffs.ma_polynomial(order.period),
            );
            sum_of_squares(&e, start)
        };

        let result = nelder_mead(
            objective,
            &initial,
            Some(&bounds),
            NelderMeadConfig {
                max_iter: settings.max_iterations,
                tolerance: settings.f_tolerance,
                x_tolerance: settings.x_tolerance,
                initial_step: settings.initial_step,
                ..Default::default()
            },
        );

        if !result.optimal_value.is_finite() {
            return Err(ForecastError::ModelFit(format!(
                "{}: conditional sum of squares is not finite at the optimum",
                order
            )));
        }
        if !result.converged {
            return Err(ForecastError::ModelFit(format!(
                "{}: optimizer did not converge after {} iterations (best CSS {:.6e})",
                order, result.iterations, result.optimal_value
            )));
        }

        let coefficients = Coefficients::from_pacf(&order, &result.optimal_point);
        let ar_poly = coefficients.ar_polynomial(order.period);
        let ma_poly = coefficients.ma_polynomial(order.period);
        let residuals = conditional_residuals(&working, &ar_poly, &ma_poly);
        let css = sum_of_squares(&residuals, start);
        let sigma2 = css / n_effective as f64;

        if !sigma2.is_finite() {
            return Err(ForecastError::ModelFit(format!(
                "{}: innovation variance is not finite",
                order
            )));
        }

        Ok(Self {
            order,
            ar_poly,
            ma_poly,
            delta,
            history: data.to_vec(),
            working,
            residuals,
            diagnostics: FitDiagnostics {
                css,
                sigma2,
                n_effective,
                iterations: result.iterations,
                coefficients,
            },
        })
    }

    /// Yule-Walker partial autocorrelations for the AR factors, zero for the MA factors.
    fn initial_guess(order: &ModelOrder, working: &[f64], bound: f64) -> Vec<f64> {
        let limit = bound * 0.95;
        let max_lag = order.p.max(order.period * order.seasonal_p);
        let acf = autocorrelations(working, max_lag);

        let seasonal_acf: Vec<f64> = (0..=order.seasonal_p)
            .map(|j| acf.get(j * order.period).copied().unwrap_or(0.0))
            .collect();

        let mut params = Vec::with_capacity(order.parameter_count());
        params.extend(pacf_from_acf(&acf, order.p).into_iter().map(|r| r.clamp(-limit, limit)));
        params.extend(std::iter::repeat_n(0.0, order.q));
        params.extend(
            pacf_from_acf(&seasonal_acf, order.seasonal_p)
                .into_iter()
                .map(|r| r.clamp(-limit, limit)),
        );
        params.extend(std::iter::repeat_n(0.0, order.seasonal_q));
        params
    }

    /// `steps` ahead point forecasts and standard errors.
    pub fn forecast(&self, steps: usize) -> Result<ModelForecast> {
        if steps == 0 {
            return Ok(ModelForecast {
                mean: Vec::new(),
                std_errors: Vec::new(),
            });
        }

        let ar_lags = self.ar_poly.len() - 1;
        let ma_lags = self.ma_poly.len() - 1;
        let n_working = self.working.len();

        // Forecast the differenced series. Future shocks are zero.
        let mut w = self.working.clone();
        let mut e = self.residuals.clone();
        for _ in 0..steps {
            let t = w.len();
            let mut prediction = 0.0;
            for k in 1..=ar_lags.min(t) {
                prediction -= self.ar_poly[k] * w[t - k];
            }
            for j in 1..=ma_lags.min(t) {
                prediction += self.ma_poly[j] * e[t - j];
            }
            w.push(prediction);
            e.push(0.0);
        }

        // Undo differencing: y_t = w_t - Σ_{k≥1} δ_k y_{t-k}
        let diff_lags = self.delta.len() - 1;
        let mut y = self.history.clone();
        for &wf in &w[n_working..] {
            let t = y.len();
            let carried: f64 = (1..=diff_lags.min(t)).map(|k| self.delta[k] * y[t - k]).sum();
            y.push(wf - carried);
        }
        let mean = y[self.history.len()..].to_vec();

        // ψ-weights of θ*(B) / (φ*(B) δ(B))
        let full_ar = poly_mul(&self.ar_poly, &self.delta);
        let mut psi = vec![1.0; steps];
        for j in 1..steps {
            let ma_term = self.ma_poly.get(j).copied().unwrap_or(0.0);
            let ar_term: f64 = (1..=j.min(full_ar.len() - 1))
                .map(|k| full_ar[k] * psi[j - k])
                .sum();
            psi[j] = ma_term - ar_term;
        }

        let mut cumulative = 0.0;
        let std_errors: Vec<f64> = psi
            .iter()
            .map(|p| {
                cumulative += p * p;
                (self.diagnostics.sigma2 * cumulative).sqrt()
            })
            .collect();

        if mean.iter().chain(&std_errors).any(|v| !v.is_finite()) {
            return Err(ForecastError::ModelFit(format!(
                "{}: forecast produced non-finite values",
                self.order
            )));
        }

        Ok(ModelForecast { mean, std_errors })
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.diagnostics.coefficients
    }

    pub fn diagnostics(&self) -> &FitDiagnostics {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FORECAST;
    use crate::config::constants::MODEL_ORDER;

    /// Deterministic uniform noise in [-0.5, 0.5).
    fn noise(n: usize, seed: u64) -> Vec<f64> {
        let mut state = seed;
        (0..n)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                (state >> 11) as f64 / (1u64 << 53) as f64 - 0.5
            })
            .collect()
    }

    #[test]
    fn test_recovers_ar1_coefficient() {
        let shocks = noise(400, 7);
        let mut data = vec![0.0; shocks.len()];
        for t in 1..data.len() {
            data[t] = 0.7 * data[t - 1] + shocks[t];
        }

        let model =
            FittedSarima::fit(ModelOrder::non_seasonal(1, 0, 0), &data, &FORECAST.fit).unwrap();
        let phi = model.coefficients().ar[0];
        assert!((phi - 0.7).abs() < 0.1, "phi = {}", phi);
        assert!(model.diagnostics().sigma2 > 0.0);
    }

    #[test]
    fn test_reported_coefficients_drive_the_forecast() {
        let shocks = noise(200, 3);
        let mut data = vec![0.0; shocks.len()];
        for t in 1..data.len() {
            data[t] = 0.5 * data[t - 1] + shocks[t];
        }

        let model =
            FittedSarima::fit(ModelOrder::non_seasonal(1, 0, 0), &data, &FORECAST.fit).unwrap();
        let phi = model.diagnostics().coefficients.ar[0];
        assert_eq!(model.coefficients(), &model.diagnostics().coefficients);

        let forecast = model.forecast(1).unwrap();
        let last = data[data.len() - 1];
        assert!((forecast.mean[0] - phi * last).abs() < 1e-12);
    }

    #[test]
    fn test_random_walk_forecast_is_last_value() {
        let data: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let model =
            FittedSarima::fit(ModelOrder::non_seasonal(0, 1, 0), &data, &FORECAST.fit).unwrap();
        let forecast = model.forecast(3).unwrap();
        assert_eq!(forecast.mean, vec![20.0, 20.0, 20.0]);
    }

    #[test]
    fn test_seasonal_differencing_continues_pattern() {
        let pattern = [0.0, 3.0, 1.0, 2.0];
        let series = |t: usize| t as f64 + pattern[t % 4];
        let data: Vec<f64> = (0..20).map(series).collect();

        let order = ModelOrder::new((0, 1, 0), (0, 1, 0), 4);
        let model = FittedSarima::fit(order, &data, &FORECAST.fit).unwrap();
        let forecast = model.forecast(4).unwrap();
        let expected: Vec<f64> = (20..24).map(series).collect();
        assert_eq!(forecast.mean, expected);
    }

    #[test]
    fn test_fixed_order_on_seasonal_series() {
        let shocks = noise(120, 42);
        let data: Vec<f64> = (0..120)
            .map(|t| 0.5 + 0.3 * (t as f64 * std::f64::consts::PI / 6.0).sin() + 0.05 * shocks[t])
            .collect();

        let model = FittedSarima::fit(MODEL_ORDER, &data, &FORECAST.fit).unwrap();
        let forecast = model.forecast(12).unwrap();
        assert_eq!(forecast.mean.len(), 12);
        assert!(forecast.mean.iter().all(|v| v.is_finite()));

        // Standard errors never shrink with the horizon.
        for pair in forecast.std_errors.windows(2) {
            assert!(pair[1] >= pair[0]);
        }

        let c = model.coefficients();
        assert!(c.ar[0].abs() <= 0.99 && c.seasonal_ar[0].abs() <= 0.99);
        assert!(c.ma[0].abs() <= 0.99 && c.seasonal_ma[0].abs() <= 0.99);
    }

    #[test]
    fn test_insufficient_and_invalid_data() {
        let err = FittedSarima::fit(MODEL_ORDER, &[0.1, 0.2, 0.3], &FORECAST.fit).unwrap_err();
        assert_eq!(
            err,
            ForecastError::InsufficientData {
                required: 27,
                actual: 3
            }
        );

        let mut data = vec![0.5; 40];
        data[10] = f64::NAN;
        assert!(matches!(
            FittedSarima::fit(MODEL_ORDER, &data, &FORECAST.fit),
            Err(ForecastError::ModelFit(_))
        ));
    }

    #[test]
    fn test_seasonal_terms_need_a_period() {
        let order = ModelOrder::new((1, 0, 0), (1, 0, 0), 0);
        let data = vec![0.5; 40];
        assert!(matches!(
            FittedSarima::fit(order, &data, &FORECAST.fit),
            Err(ForecastError::ModelFit(_))
        ));
    }

    #[test]
    fn test_ma_polynomial_sign_convention() {
        let order = ModelOrder::new((0, 0, 1), (0, 0, 1), 4);
        // pacf 0.5 maps to θ = -0.5; seasonal likewise.
        let coeffs = Coefficients::from_pacf(&order, &[0.5, 0.25]);
        assert_eq!(coeffs.ma, vec![-0.5]);
        assert_eq!(coeffs.seasonal_ma, vec![-0.25]);
        let poly = coeffs.ma_polynomial(4);
        assert_eq!(poly, vec![1.0, -0.5, 0.0, 0.0, -0.25, 0.125]);
    }
}
