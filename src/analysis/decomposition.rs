//! Classical time series decomposition

use super::statistics::{mean, variance};
use crate::error::{Error, Result};

/// Result of decomposing a series into trend, seasonal and residual parts
#[derive(Debug, Clone)]
pub struct DecompositionResult {
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
    pub period: usize,
    pub model: DecompositionModel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecompositionModel {
    /// Y = T + S + R
    Additive,
    /// Y = T * S * R
    Multiplicative,
}

/// Centred moving average of width `period`; NaN where the window is incomplete
fn centered_moving_average(data: &[f64], period: usize) -> Vec<f64> {
    let n = data.len();
    let mut trend = vec![f64::NAN; n];
    let half = period / 2;

    if period % 2 == 1 {
        for i in half..n - half {
            trend[i] = mean(&data[i - half..=i + half]);
        }
    } else {
        // 2×m MA: half weights on the two outermost points
        for i in half..n - half {
            let window = &data[i - half..=i + half];
            let inner: f64 = window[1..period].iter().sum();
            trend[i] = (inner + 0.5 * (window[0] + window[period])) / period as f64;
        }
    }
    trend
}

/// Period to decompose `n` points with, shortened so two full periods fit
///
/// `None` when even a period of 2 does not fit.
pub fn decomposable_period(period: usize, n: usize) -> Option<usize> {
    let period = period.min(n / 2);
    (period >= 2).then_some(period)
}

/// Classical decomposition by centred moving average
pub fn decompose(
    data: &[f64],
    period: usize,
    model: DecompositionModel,
) -> Result<DecompositionResult> {
    if period < 2 {
        return Err(Error::InvalidParameter(
            "decomposition period must be at least 2".to_string(),
        ));
    }
    let n = data.len();
    if n < period * 2 {
        return Err(Error::InsufficientData {
            needed: period * 2,
            got: n,
        });
    }

    let trend = centered_moving_average(data, period);

    let detrended: Vec<f64> = data
        .iter()
        .zip(trend.iter())
        .map(|(&y, &t)| match model {
            _ if t.is_nan() => f64::NAN,
            DecompositionModel::Additive => y - t,
            DecompositionModel::Multiplicative if t != 0.0 => y / t,
            DecompositionModel::Multiplicative => f64::NAN,
        })
        .collect();

    // Average the detrended values at each position of the period
    let mut seasonal_indices = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (i, &val) in detrended.iter().enumerate() {
        if !val.is_nan() {
            seasonal_indices[i % period] += val;
            counts[i % period] += 1;
        }
    }
    for (index, &count) in seasonal_indices.iter_mut().zip(counts.iter()) {
        if count > 0 {
            *index /= count as f64;
        }
    }

    let avg = mean(&seasonal_indices);
    match model {
        DecompositionModel::Additive => {
            for s in &mut seasonal_indices {
                *s -= avg;
            }
        }
        DecompositionModel::Multiplicative => {
            if avg != 0.0 {
                for s in &mut seasonal_indices {
                    *s /= avg;
                }
            }
        }
    }

    let seasonal: Vec<f64> = (0..n).map(|i| seasonal_indices[i % period]).collect();

    let residual: Vec<f64> = data
        .iter()
        .zip(trend.iter())
        .zip(seasonal.iter())
        .map(|((&y, &t), &s)| match model {
            _ if t.is_nan() => f64::NAN,
            DecompositionModel::Additive => y - t - s,
            DecompositionModel::Multiplicative if t != 0.0 && s != 0.0 => y / (t * s),
            DecompositionModel::Multiplicative => f64::NAN,
        })
        .collect();

    Ok(DecompositionResult {
        trend,
        seasonal,
        residual,
        period,
        model,
    })
}

/// Strength of the trend, from 0 (none) to 1 (dominant)
pub fn trend_strength(decomposition: &DecompositionResult) -> f64 {
    let valid_residuals: Vec<f64> = decomposition
        .residual
        .iter()
        .filter(|x| !x.is_nan())
        .cloned()
        .collect();

    // Trend + residual, i.e. the seasonally adjusted series
    let deseasoned: Vec<f64> = decomposition
        .residual
        .iter()
        .zip(decomposition.trend.iter())
        .filter(|(r, t)| !r.is_nan() && !t.is_nan())
        .map(|(r, t)| match decomposition.model {
            DecompositionModel::Additive => r + t,
            DecompositionModel::Multiplicative => r * t,
        })
        .collect();

    strength(&valid_residuals, &deseasoned)
}

/// Strength of the seasonality, from 0 (none) to 1 (dominant)
pub fn seasonality_strength(decomposition: &DecompositionResult) -> f64 {
    let valid_residuals: Vec<f64> = decomposition
        .residual
        .iter()
        .filter(|x| !x.is_nan())
        .cloned()
        .collect();

    let detrended: Vec<f64> = decomposition
        .residual
        .iter()
        .zip(decomposition.seasonal.iter())
        .filter(|(r, _)| !r.is_nan())
        .map(|(r, s)| match decomposition.model {
            DecompositionModel::Additive => r + s,
            DecompositionModel::Multiplicative => r * s,
        })
        .collect();

    strength(&valid_residuals, &detrended)
}

fn strength(residuals: &[f64], component_plus_residual: &[f64]) -> f64 {
    let var_total = variance(component_plus_residual);
    if var_total == 0.0 {
        return 0.0;
    }
    (1.0 - variance(residuals) / var_total).max(0.0)
}
