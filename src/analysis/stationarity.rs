//! Stationarity tests
//!
//! The Augmented Dickey-Fuller test regresses the first difference of a
//! series on its lagged level, lagged differences and deterministic terms:
//!
//! Δy_t = α + δt + β·y_{t-1} + Σγ_i·Δy_{t-i} + ε_t
//!
//! H0: β = 0 (unit root, non-stationary). The t-ratio of β is compared with
//! the Dickey-Fuller distribution, not Student's t.

use super::mackinnon;
use super::statistics::{mean, moving_average, rolling_std, std_dev};
use crate::error::{Error, Result};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// p-value below which the unit-root hypothesis is rejected
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Deterministic terms included in the ADF regression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regression {
    NoConstant,
    #[default]
    Constant,
    ConstantTrend,
}

impl Regression {
    pub fn deterministic_terms(self) -> usize {
        match self {
            Regression::NoConstant => 0,
            Regression::Constant => 1,
            Regression::ConstantTrend => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Regression::NoConstant => "no constant",
            Regression::Constant => "constant",
            Regression::ConstantTrend => "constant + trend",
        }
    }
}

/// How the number of lagged differences is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LagSelection {
    /// Minimise the Akaike information criterion
    #[default]
    Aic,
    /// Minimise the Bayesian information criterion
    Bic,
    /// Use the maximum lag as given
    Fixed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdfConfig {
    /// Upper bound on lagged differences; `None` uses 12·(n/100)^(1/4)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_lag: Option<usize>,
    pub regression: Regression,
    pub lag_selection: LagSelection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalValues {
    pub one_percent: f64,
    pub five_percent: f64,
    pub ten_percent: f64,
}

/// Classification of a series by the ADF p-value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stationarity {
    Stationary,
    NonStationary,
}

impl Stationarity {
    /// Stationary iff `p_value < SIGNIFICANCE_LEVEL`
    pub fn from_p_value(p_value: f64) -> Self {
        if p_value < SIGNIFICANCE_LEVEL {
            Stationarity::Stationary
        } else {
            Stationarity::NonStationary
        }
    }

    pub fn is_stationary(self) -> bool {
        self == Stationarity::Stationary
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stationarity::Stationary => "stationary",
            Stationarity::NonStationary => "non-stationary",
        }
    }
}

impl fmt::Display for Stationarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the Augmented Dickey-Fuller test
#[derive(Debug, Clone, PartialEq)]
pub struct AdfResult {
    pub statistic: f64,
    pub p_value: f64,
    /// Number of lagged differences in the final regression
    pub used_lag: usize,
    /// Observations in the final regression
    pub n_obs: usize,
    pub critical_values: CriticalValues,
    /// Information criterion of the chosen lag, when lag selection ran
    pub ic_best: Option<f64>,
    pub regression: Regression,
}

impl AdfResult {
    pub fn stationarity(&self) -> Stationarity {
        Stationarity::from_p_value(self.p_value)
    }

    pub fn is_stationary(&self) -> bool {
        self.stationarity().is_stationary()
    }
}

/// ADF test with a constant and AIC lag selection
pub fn adf_test(data: &[f64]) -> Result<AdfResult> {
    adf_test_with(data, &AdfConfig::default())
}

/// ADF test with explicit settings
pub fn adf_test_with(data: &[f64], config: &AdfConfig) -> Result<AdfResult> {
    let nobs = data.len();
    if data.iter().any(|x| !x.is_finite()) {
        return Err(Error::InvalidInput(
            "series contains NaN or infinite values".to_string(),
        ));
    }

    let k_trend = config.regression.deterministic_terms();
    // The lag-0 regression needs at least one residual degree of freedom
    let min_obs = (2 * (k_trend + 1)).max(k_trend + 3);
    if nobs < min_obs {
        return Err(Error::InsufficientData {
            needed: min_obs,
            got: nobs,
        });
    }

    let (lo, hi) = data
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    if lo == hi {
        return Err(Error::InvalidInput("series is constant".to_string()));
    }

    // Largest lag whose regression on the shared sample keeps a residual
    // degree of freedom: rows = nobs - 1 - lag > 1 + lag + k_trend
    let lag_cap = (nobs - k_trend - 3) / 2;
    let max_lag = match config.max_lag {
        Some(lag) if lag > lag_cap => {
            return Err(Error::InvalidParameter(format!(
                "max_lag {} exceeds {} for {} observations",
                lag, lag_cap, nobs
            )));
        }
        Some(lag) => lag,
        None => default_max_lag(nobs).min(lag_cap),
    };

    let diff: Vec<f64> = data.windows(2).map(|w| w[1] - w[0]).collect();

    let (used_lag, ic_best) = match config.lag_selection {
        LagSelection::Fixed => (max_lag, None),
        LagSelection::Aic | LagSelection::Bic => {
            let (lag, ic) = select_lag(data, &diff, max_lag, config)?;
            (lag, Some(ic))
        }
    };

    let (x, y) = design(data, &diff, used_lag, used_lag, config.regression);
    let fit = ols(&x, &y)?;
    let statistic = fit.level_statistic();
    let p_value = mackinnon::p_value(statistic, config.regression);
    let [one_percent, five_percent, ten_percent] =
        mackinnon::critical_values(config.regression, fit.nobs);

    debug!(
        statistic,
        p_value,
        used_lag,
        n_obs = fit.nobs,
        "ADF regression finished"
    );

    Ok(AdfResult {
        statistic,
        p_value,
        used_lag,
        n_obs: fit.nobs,
        critical_values: CriticalValues {
            one_percent,
            five_percent,
            ten_percent,
        },
        ic_best,
        regression: config.regression,
    })
}

fn default_max_lag(nobs: usize) -> usize {
    (12.0 * (nobs as f64 / 100.0).powf(0.25)).ceil() as usize
}

/// Fit every lag on the rows available for `max_lag` and keep the first minimum
fn select_lag(
    data: &[f64],
    diff: &[f64],
    max_lag: usize,
    config: &AdfConfig,
) -> Result<(usize, f64)> {
    let mut best_lag = 0;
    let mut best_ic = f64::INFINITY;

    for lag in 0..=max_lag {
        let (x, y) = design(data, diff, max_lag, lag, config.regression);
        let fit = match ols(&x, &y) {
            Ok(fit) => fit,
            // Collinear lagged differences, e.g. a deterministic alternating series
            Err(Error::SingularMatrix(reason)) => {
                debug!(lag, %reason, "ADF lag candidate skipped");
                continue;
            }
            Err(e) => return Err(e),
        };
        let ic = match config.lag_selection {
            LagSelection::Bic => fit.bic(),
            _ => fit.aic(),
        };
        debug!(lag, ic, "ADF lag candidate");
        if ic < best_ic {
            best_ic = ic;
            best_lag = lag;
        }
    }

    if best_ic == f64::INFINITY {
        return Err(Error::SingularMatrix(
            "no lag candidate could be fitted".to_string(),
        ));
    }
    Ok((best_lag, best_ic))
}

/// Regressors: [y_{t-1}, Δy_{t-1}, ..., Δy_{t-lag}, deterministic terms]
///
/// Rows start after `row_lag` differences so candidate lags share one sample.
fn design(
    data: &[f64],
    diff: &[f64],
    row_lag: usize,
    lag: usize,
    regression: Regression,
) -> (DMatrix<f64>, DVector<f64>) {
    let rows = diff.len() - row_lag;
    let cols = 1 + lag + regression.deterministic_terms();
    let mut x_data = Vec::with_capacity(rows * cols);

    for (r, t) in (row_lag..diff.len()).enumerate() {
        x_data.push(data[t]);
        for i in 1..=lag {
            x_data.push(diff[t - i]);
        }
        match regression {
            Regression::NoConstant => {}
            Regression::Constant => x_data.push(1.0),
            Regression::ConstantTrend => {
                x_data.push(1.0);
                x_data.push((r + 1) as f64);
            }
        }
    }

    let x = DMatrix::from_row_slice(rows, cols, &x_data);
    let y = DVector::from_column_slice(&diff[row_lag..]);
    (x, y)
}

/// Residual sum of squares, relative to Σy², treated as an exact fit
const PERFECT_FIT_TOLERANCE: f64 = 1e-16;
/// |β| below which a perfect fit has no level effect
const ZERO_COEFFICIENT: f64 = 1e-8;

/// Ordinary least squares fit via the normal equations
struct OlsFit {
    beta: DVector<f64>,
    xtx_inv: DMatrix<f64>,
    ssr: f64,
    nobs: usize,
    k: usize,
    /// Residuals vanish up to rounding
    perfect: bool,
}

impl OlsFit {
    /// t-ratio of the lagged level; ±∞ when the fit is exact
    fn level_statistic(&self) -> f64 {
        if !self.perfect {
            return self.t_value(0);
        }
        let beta = self.beta[0];
        if beta < -ZERO_COEFFICIENT {
            f64::NEG_INFINITY
        } else if beta > ZERO_COEFFICIENT {
            f64::INFINITY
        } else {
            0.0
        }
    }

    fn sigma2(&self) -> f64 {
        self.ssr / (self.nobs - self.k) as f64
    }

    fn t_value(&self, i: usize) -> f64 {
        self.beta[i] / (self.sigma2() * self.xtx_inv[(i, i)]).sqrt()
    }

    fn log_likelihood(&self) -> f64 {
        let n = self.nobs as f64;
        -0.5 * n * ((2.0 * std::f64::consts::PI).ln() + (self.ssr / n).ln() + 1.0)
    }

    fn aic(&self) -> f64 {
        if self.perfect {
            return f64::NEG_INFINITY;
        }
        -2.0 * self.log_likelihood() + 2.0 * self.k as f64
    }

    fn bic(&self) -> f64 {
        if self.perfect {
            return f64::NEG_INFINITY;
        }
        -2.0 * self.log_likelihood() + (self.nobs as f64).ln() * self.k as f64
    }
}

fn ols(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<OlsFit> {
    let (nobs, k) = x.shape();
    if nobs <= k {
        return Err(Error::InsufficientData {
            needed: k + 1,
            got: nobs,
        });
    }

    // OLS: β = (X'X)^(-1) X'y
    let xtx = x.transpose() * x;
    let xtx_inv = xtx.try_inverse().ok_or_else(|| {
        Error::SingularMatrix(format!("X'X is not invertible ({} regressors)", k))
    })?;
    let beta = &xtx_inv * (x.transpose() * y);

    let residuals = y - x * &beta;
    let ssr = residuals.norm_squared();
    let perfect = ssr <= PERFECT_FIT_TOLERANCE * y.norm_squared();

    Ok(OlsFit {
        beta,
        xtx_inv,
        ssr,
        nobs,
        k,
        perfect,
    })
}

/// Rolling mean and standard deviation, the visual stationarity check
#[derive(Debug, Clone)]
pub struct RollingStats {
    pub window: usize,
    pub rolling_means: Vec<f64>,
    pub rolling_stds: Vec<f64>,
    /// Spread of the rolling means relative to the series standard deviation
    pub mean_variation: f64,
    /// Coefficient of variation of the rolling standard deviations
    pub variance_variation: f64,
    pub is_stable_mean: bool,
    pub is_stable_variance: bool,
}

/// Mean is stable below this relative drift
pub const MEAN_DRIFT_LIMIT: f64 = 0.5;
/// Variance is stable below this coefficient of variation
pub const VARIANCE_DRIFT_LIMIT: f64 = 0.3;

/// Rolling mean/std check of whether the first two moments drift
pub fn rolling_stationarity_check(data: &[f64], window: usize) -> Result<RollingStats> {
    if window < 2 {
        return Err(Error::InvalidParameter(
            "rolling window must be at least 2".to_string(),
        ));
    }
    if data.len() < window * 2 {
        return Err(Error::InsufficientData {
            needed: window * 2,
            got: data.len(),
        });
    }

    let rolling_means = moving_average(data, window);
    let rolling_stds = rolling_std(data, window);

    let mean_variation = std_dev(&rolling_means) / std_dev(data).max(1e-10);
    let variance_variation = std_dev(&rolling_stds) / mean(&rolling_stds).max(1e-10);

    Ok(RollingStats {
        window,
        is_stable_mean: mean_variation < MEAN_DRIFT_LIMIT,
        is_stable_variance: variance_variation < VARIANCE_DRIFT_LIMIT,
        mean_variation,
        variance_variation,
        rolling_means,
        rolling_stds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic::{random_walk, white_noise};

    #[test]
    fn test_adf_random_walk() {
        let walk = random_walk(200, 2, 1.0).unwrap();
        let result = adf_test(&walk.data).unwrap();
        assert!(result.statistic > -2.0);
        assert!(!result.is_stationary());
    }

    #[test]
    fn test_adf_white_noise() {
        let noise = white_noise(150, 1, 1.0).unwrap();
        let result = adf_test(&noise.data).unwrap();
        assert!(result.statistic < result.critical_values.one_percent);
        assert_eq!(result.stationarity(), Stationarity::Stationary);
    }

    #[test]
    fn test_adf_too_short() {
        let result = adf_test(&[1.0, 2.0, 1.5]);
        assert!(matches!(
            result,
            Err(Error::InsufficientData { needed: 4, got: 3 })
        ));
    }

    #[test]
    fn test_adf_short_series_for_every_regression() {
        for regression in [
            Regression::NoConstant,
            Regression::Constant,
            Regression::ConstantTrend,
        ] {
            let k = regression.deterministic_terms();
            let min_obs = (2 * (k + 1)).max(k + 3);
            for n in 2..30 {
                let walk = random_walk(n, 42, 1.0).unwrap();
                for lag_selection in [LagSelection::Aic, LagSelection::Bic] {
                    let config = AdfConfig {
                        regression,
                        lag_selection,
                        ..Default::default()
                    };
                    let result = adf_test_with(&walk.data, &config);
                    if n < min_obs {
                        assert!(
                            matches!(result, Err(Error::InsufficientData { needed, got })
                                if needed == min_obs && got == n),
                            "{:?} n={}",
                            regression,
                            n
                        );
                    } else {
                        let result = result.unwrap();
                        assert!(result.statistic.is_finite(), "{:?} n={}", regression, n);
                        assert!((0.0..=1.0).contains(&result.p_value));
                        assert!(result.n_obs > result.used_lag + 1 + k);
                    }
                }
            }
        }
    }

    #[test]
    fn test_adf_alternating_series_is_stationary() {
        let data: Vec<f64> = (0..50)
            .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let result = adf_test(&data).unwrap();
        assert_eq!(result.statistic, f64::NEG_INFINITY);
        assert_eq!(result.p_value, 0.0);
        assert!(result.is_stationary());

        let no_constant = AdfConfig {
            regression: Regression::NoConstant,
            ..Default::default()
        };
        assert!(adf_test_with(&data, &no_constant).unwrap().is_stationary());
    }

    #[test]
    fn test_adf_constant_series() {
        let result = adf_test(&[2.0; 50]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_adf_rejects_nan() {
        let mut data = white_noise(50, 3, 1.0).unwrap().data;
        data[10] = f64::NAN;
        assert!(matches!(adf_test(&data), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_adf_max_lag_cap() {
        let data = white_noise(20, 3, 1.0).unwrap().data;
        let config = AdfConfig {
            max_lag: Some(9),
            ..Default::default()
        };
        assert!(matches!(
            adf_test_with(&data, &config),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_adf_fixed_lag_is_used() {
        let data = white_noise(120, 4, 1.0).unwrap().data;
        let config = AdfConfig {
            max_lag: Some(3),
            lag_selection: LagSelection::Fixed,
            ..Default::default()
        };
        let result = adf_test_with(&data, &config).unwrap();
        assert_eq!(result.used_lag, 3);
        assert_eq!(result.n_obs, 120 - 1 - 3);
        assert!(result.ic_best.is_none());
    }

    #[test]
    fn test_adf_default_lag_bound() {
        // 12·(100/100)^(1/4) = 12
        assert_eq!(default_max_lag(100), 12);
        assert_eq!(default_max_lag(1000), 22);
    }

    #[test]
    fn test_adf_result_fields_consistent() {
        let data = random_walk(150, 5, 0.5).unwrap().data;
        let result = adf_test(&data).unwrap();
        assert!(result.used_lag <= default_max_lag(150));
        assert_eq!(result.n_obs, 150 - 1 - result.used_lag);
        assert!((0.0..=1.0).contains(&result.p_value));
        assert!(result.ic_best.is_some());
        let cv = result.critical_values;
        assert!(cv.one_percent < cv.five_percent && cv.five_percent < cv.ten_percent);
    }

    #[test]
    fn test_adf_all_regressions_run() {
        let noise = white_noise(100, 6, 1.0).unwrap();
        let data: Vec<f64> = noise
            .data
            .iter()
            .enumerate()
            .map(|(i, e)| 0.05 * i as f64 + e)
            .collect();
        for regression in [
            Regression::NoConstant,
            Regression::Constant,
            Regression::ConstantTrend,
        ] {
            for lag_selection in [LagSelection::Aic, LagSelection::Bic] {
                let config = AdfConfig {
                    regression,
                    lag_selection,
                    ..Default::default()
                };
                let result = adf_test_with(&data, &config).unwrap();
                assert_eq!(result.regression, regression);
                assert!(result.statistic.is_finite());
            }
        }
    }

    #[test]
    fn test_classification_threshold() {
        assert_eq!(Stationarity::from_p_value(0.049), Stationarity::Stationary);
        assert_eq!(Stationarity::from_p_value(0.05), Stationarity::NonStationary);
        assert_eq!(Stationarity::NonStationary.to_string(), "non-stationary");
    }

    #[test]
    fn test_rolling_check_white_noise_is_stable() {
        let noise = white_noise(400, 5, 1.0).unwrap();
        let stats = rolling_stationarity_check(&noise.data, 40).unwrap();
        assert_eq!(stats.rolling_means.len(), 361);
        assert!(stats.is_stable_mean);
        assert!(stats.is_stable_variance);
    }

    #[test]
    fn test_rolling_check_trend_is_unstable() {
        let noise = white_noise(400, 5, 1.0).unwrap();
        let data: Vec<f64> = noise
            .data
            .iter()
            .enumerate()
            .map(|(i, e)| 0.25 * i as f64 + e)
            .collect();
        let stats = rolling_stationarity_check(&data, 40).unwrap();
        assert!(!stats.is_stable_mean);
    }

    #[test]
    fn test_rolling_check_random_walk_is_unstable() {
        let walk = random_walk(400, 5, 1.0).unwrap();
        let stats = rolling_stationarity_check(&walk.data, 40).unwrap();
        assert!(!stats.is_stable_mean);
        assert!(!stats.is_stable_variance);
    }

    #[test]
    fn test_rolling_check_requires_two_windows() {
        let data = white_noise(30, 1, 1.0).unwrap().data;
        assert!(rolling_stationarity_check(&data, 20).is_err());
        assert!(rolling_stationarity_check(&data, 1).is_err());
    }
}
