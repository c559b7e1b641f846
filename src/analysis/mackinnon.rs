//! MacKinnon response surfaces for the Dickey-Fuller distribution
//!
//! p-values follow MacKinnon (1994), critical values MacKinnon (2010), both for
//! a single integrated series.

use super::stationarity::Regression;
use statrs::function::erf::erfc;

struct Surface {
    /// Above this statistic the p-value is 1
    tau_max: f64,
    /// Below this statistic the p-value is 0
    tau_min: f64,
    /// Switch point between the small-p and large-p polynomials
    tau_star: f64,
    small_p: &'static [f64],
    large_p: &'static [f64],
    /// 1%, 5% and 10% finite-sample polynomials in 1/nobs
    critical: [[f64; 4]; 3],
}

const NO_CONSTANT: Surface = Surface {
    tau_max: f64::INFINITY,
    tau_min: -19.04,
    tau_star: -1.04,
    small_p: &[0.6344, 1.2378, 0.032496],
    large_p: &[0.4797, 0.93557, -0.06999, 0.033066],
    critical: [
        [-2.56574, -2.2358, -3.627, 0.0],
        [-1.94100, -0.2686, -3.365, 31.223],
        [-1.61682, 0.2656, -2.714, 25.364],
    ],
};

const CONSTANT: Surface = Surface {
    tau_max: 2.74,
    tau_min: -18.83,
    tau_star: -1.61,
    small_p: &[2.1659, 1.4412, 0.038269],
    large_p: &[1.7339, 0.93202, -0.12745, -0.010368],
    critical: [
        [-3.43035, -6.5393, -16.786, -79.433],
        [-2.86154, -2.8903, -4.234, -40.040],
        [-2.56677, -1.5384, -2.809, 0.0],
    ],
};

const CONSTANT_TREND: Surface = Surface {
    tau_max: 0.7,
    tau_min: -16.18,
    tau_star: -2.89,
    small_p: &[3.2512, 1.6047, 0.049588],
    large_p: &[2.5261, 0.61654, -0.37956, -0.060285],
    critical: [
        [-3.95877, -9.0531, -28.428, -134.155],
        [-3.41049, -4.3904, -9.036, -45.374],
        [-3.12705, -2.5856, -3.925, -22.380],
    ],
};

fn surface(regression: Regression) -> &'static Surface {
    match regression {
        Regression::NoConstant => &NO_CONSTANT,
        Regression::Constant => &CONSTANT,
        Regression::ConstantTrend => &CONSTANT_TREND,
    }
}

/// Evaluate `c[0] + c[1] x + c[2] x^2 + ...`
fn polyval(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Approximate p-value of an ADF statistic
pub(crate) fn p_value(statistic: f64, regression: Regression) -> f64 {
    let s = surface(regression);
    if statistic > s.tau_max || statistic == f64::INFINITY {
        return 1.0;
    }
    if statistic < s.tau_min {
        return 0.0;
    }
    let coefficients = if statistic <= s.tau_star {
        s.small_p
    } else {
        s.large_p
    };
    standard_normal_cdf(polyval(coefficients, statistic))
}

fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}

/// Critical values at 1%, 5% and 10% for `nobs` regression observations
pub(crate) fn critical_values(regression: Regression, nobs: usize) -> [f64; 3] {
    let s = surface(regression);
    let inv = 1.0 / nobs as f64;
    s.critical.map(|c| polyval(&c, inv))
}
