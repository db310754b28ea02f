#[inline]
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sample autocorrelations of the mean-centred series for lags `0..=max_lag`.
/// Lags past the end of the data are 0. A constant series yields `[1, 0, 0, ...]`.
pub fn autocorrelations(data: &[f64], max_lag: usize) -> Vec<f64> {
    let n = data.len();
    let mut acf = vec![0.0; max_lag + 1];
    if n == 0 {
        return acf;
    }
    acf[0] = 1.0;

    let m = mean(data);
    let c0: f64 = data.iter().map(|x| (x - m) * (x - m)).sum();
    if c0 <= 1e-12 {
        return acf;
    }

    for (k, slot) in acf.iter_mut().enumerate().skip(1) {
        if k >= n {
            break;
        }
        let ck: f64 = (k..n).map(|i| (data[i] - m) * (data[i - k] - m)).sum();
        *slot = ck / c0;
    }
    acf
}

/// Durbin-Levinson: partial autocorrelations → coefficients of
/// `x_t = φ_1 x_{t-1} + ... + φ_p x_{t-p} + e_t`.
/// Any PACF vector inside (-1, 1)^p yields a stationary polynomial.
pub fn pacf_to_coefficients(pacf: &[f64]) -> Vec<f64> {
    let mut phi: Vec<f64> = Vec::with_capacity(pacf.len());
    for (k, &r) in pacf.iter().enumerate() {
        let prev = phi.clone();
        for i in 0..k {
            phi[i] = prev[i] - r * prev[k - 1 - i];
        }
        phi.push(r);
    }
    phi
}

/// Yule-Walker partial autocorrelations from an autocorrelation sequence `acf[0..=p]`.
pub fn pacf_from_acf(acf: &[f64], p: usize) -> Vec<f64> {
    let mut pacf = Vec::with_capacity(p);
    let mut phi: Vec<f64> = Vec::with_capacity(p);

    for k in 0..p {
        let num = acf.get(k + 1).copied().unwrap_or(0.0)
            - (0..k).map(|j| phi[j] * acf.get(k - j).copied().unwrap_or(0.0)).sum::<f64>();
        let den = 1.0
            - (0..k)
                .map(|j| phi[j] * acf.get(j + 1).copied().unwrap_or(0.0))
                .sum::<f64>();

        let r = if den.abs() > 1e-10 { num / den } else { 0.0 };
        let prev = phi.clone();
        for j in 0..k {
            phi[j] = prev[j] - r * prev[k - 1 - j];
        }
        phi.push(r);
        pacf.push(r);
    }
    pacf
}

/// Product of two polynomials given as coefficient vectors in ascending powers.
pub fn poly_mul(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        if x == 0.0 {
            continue;
        }
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// `(1 - B^lag)^power` in ascending powers of B.
pub fn difference_polynomial(lag: usize, power: usize) -> Vec<f64> {
    let mut out = vec![1.0];
    if lag == 0 {
        return out;
    }
    let mut factor = vec![0.0; lag + 1];
    factor[0] = 1.0;
    factor[lag] = -1.0;
    for _ in 0..power {
        out = poly_mul(&out, &factor);
    }
    out
}

/// Apply a differencing polynomial `δ(B)` (δ_0 = 1): `w_t = Σ δ_k y_{t-k}` for every `t` with a
/// full history.
pub fn apply_difference(data: &[f64], delta: &[f64]) -> Vec<f64> {
    let lag = delta.len().saturating_sub(1);
    if data.len() <= lag {
        return Vec::new();
    }
    (lag..data.len())
        .map(|t| delta.iter().enumerate().map(|(k, &c)| c * data[t - k]).sum())
        .collect()
}

pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> f64 {
    let errors: Vec<f64> = actual.iter().zip(predicted).map(|(a, p)| (a - p).abs()).collect();
    mean(&errors)
}

pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> f64 {
    let errors: Vec<f64> = actual.iter().zip(predicted).map(|(a, p)| (a - p).powi(2)).collect();
    mean(&errors).sqrt()
}

/// Mean absolute percentage error (fraction, not %). Pairs with a zero actual are skipped.
/// `None` when no pair qualifies.
pub fn mean_absolute_percentage_error(actual: &[f64], predicted: &[f64]) -> Option<f64> {
    let errors: Vec<f64> = actual
        .iter()
        .zip(predicted)
        .filter(|(a, _)| a.abs() > f64::EPSILON)
        .map(|(a, p)| ((a - p) / a).abs())
        .collect();
    if errors.is_empty() { None } else { Some(mean(&errors)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pacf_to_coefficients_known_values() {
        assert_eq!(pacf_to_coefficients(&[0.7]), vec![0.7]);

        // AR(2): φ_22 = 0.2, φ_21 = φ_11 - φ_22 φ_11 = 0.4.
        let ar2 = pacf_to_coefficients(&[0.5, 0.2]);
        assert!((ar2[0] - 0.4).abs() < 1e-12);
        assert!((ar2[1] - 0.2).abs() < 1e-12);

        let ar3 = pacf_to_coefficients(&[0.5, -0.3, 0.2]);
        for (got, want) in ar3.iter().zip([0.71, -0.43, 0.2]) {
            assert!((got - want).abs() < 1e-12, "{:?}", ar3);
        }
    }

    #[test]
    fn test_pacf_from_acf_ar1() {
        // AR(1) with φ = 0.6 has acf(k) = 0.6^k and pacf = [0.6, 0, ...].
        let acf: Vec<f64> = (0..4).map(|k| 0.6_f64.powi(k)).collect();
        let pacf = pacf_from_acf(&acf, 3);
        assert!((pacf[0] - 0.6).abs() < 1e-12);
        assert!(pacf[1].abs() < 1e-12);
        assert!(pacf[2].abs() < 1e-12);
    }

    #[test]
    fn test_difference_polynomials() {
        assert_eq!(difference_polynomial(1, 2), vec![1.0, -2.0, 1.0]);
        assert_eq!(difference_polynomial(3, 1), vec![1.0, 0.0, 0.0, -1.0]);
        assert_eq!(difference_polynomial(12, 0), vec![1.0]);

        let data = vec![1.0, 3.0, 6.0, 10.0];
        assert_eq!(apply_difference(&data, &difference_polynomial(1, 1)), vec![2.0, 3.0, 4.0]);
        assert_eq!(apply_difference(&data, &difference_polynomial(1, 2)), vec![1.0, 1.0]);
    }

    #[test]
    fn test_error_metrics() {
        let actual = vec![100.0, 0.0, 50.0];
        let predicted = vec![110.0, 1.0, 45.0];
        assert!((mean_absolute_error(&actual, &predicted) - 16.0 / 3.0).abs() < 1e-12);
        let rmse = root_mean_squared_error(&actual, &predicted);
        assert!((rmse - (126.0_f64 / 3.0).sqrt()).abs() < 1e-12);
        let mape = mean_absolute_percentage_error(&actual, &predicted).unwrap();
        assert!((mape - 0.1).abs() < 1e-12);
        assert_eq!(mean_absolute_percentage_error(&[0.0], &[1.0]), None);
    }

    #[test]
    fn test_autocorrelations_constant_series() {
        assert_eq!(autocorrelations(&[2.0, 2.0, 2.0], 2), vec![1.0, 0.0, 0.0]);
    }
}
