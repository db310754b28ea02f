use serde::{Deserialize, Serialize};

/// Structural parameters of a seasonal ARIMA model: (p, d, q)(P, D, Q, s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelOrder {
    pub p: usize,
    pub d: usize,
    pub q: usize,
    pub seasonal_p: usize,
    pub seasonal_d: usize,
    pub seasonal_q: usize,
    pub period: usize,
}

impl ModelOrder {
    pub const fn new(
        order: (usize, usize, usize),
        seasonal: (usize, usize, usize),
        period: usize,
    ) -> Self {
        Self {
            p: order.0,
            d: order.1,
            q: order.2,
            seasonal_p: seasonal.0,
            seasonal_d: seasonal.1,
            seasonal_q: seasonal.2,
            period,
        }
    }

    /// Plain ARIMA(p, d, q) with no seasonal part.
    pub const fn non_seasonal(p: usize, d: usize, q: usize) -> Self {
        Self::new((p, d, q), (0, 0, 0), 0)
    }

    /// Highest lag of the expanded AR polynomial φ(B)Φ(B^s).
    pub const fn ar_lags(&self) -> usize {
        self.p + self.period * self.seasonal_p
    }

    /// Highest lag of the expanded MA polynomial θ(B)Θ(B^s).
    pub const fn ma_lags(&self) -> usize {
        self.q + self.period * self.seasonal_q
    }

    /// Observations consumed by differencing.
    pub const fn differencing_loss(&self) -> usize {
        self.d + self.period * self.seasonal_d
    }

    /// Number of estimated coefficients.
    pub const fn parameter_count(&self) -> usize {
        self.p + self.q + self.seasonal_p + self.seasonal_q
    }

    /// Smallest training set the estimator accepts: enough to difference, fill every AR lag,
    /// and leave at least as many residuals as MA lags plus one.
    pub const fn min_observations(&self) -> usize {
        self.differencing_loss() + self.ar_lags() + self.ma_lags() + 1
    }

    pub const fn is_seasonal(&self) -> bool {
        self.period > 1 && (self.seasonal_p + self.seasonal_d + self.seasonal_q) > 0
    }
}

impl std::fmt::Display for ModelOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_seasonal() {
            write!(
                f,
                "SARIMA({},{},{})({},{},{})[{}]",
                self.p,
                self.d,
                self.q,
                self.seasonal_p,
                self.seasonal_d,
                self.seasonal_q,
                self.period
            )
        } else {
            write!(f, "ARIMA({},{},{})", self.p, self.d, self.q)
        }
    }
}
