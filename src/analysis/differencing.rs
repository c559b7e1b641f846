//! Differencing to remove trend and seasonality
//!
//! Every function drops the leading values that have no predecessor, so the
//! output can be passed straight to the stationarity tests.

use crate::error::{Error, Result};

/// First-order difference: `out[i] = data[i + 1] - data[i]`
pub fn difference(data: &[f64]) -> Result<Vec<f64>> {
    seasonal_difference(data, 1)
}

/// Apply first-order differencing `order` times
pub fn difference_n(data: &[f64], order: usize) -> Result<Vec<f64>> {
    if data.len() <= order {
        return Err(Error::InsufficientData {
            needed: order + 1,
            got: data.len(),
        });
    }
    let mut result = data.to_vec();
    for _ in 0..order {
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    Ok(result)
}

/// Difference at `lag`: `out[i] = data[i + lag] - data[i]`
pub fn seasonal_difference(data: &[f64], lag: usize) -> Result<Vec<f64>> {
    if lag == 0 {
        return Err(Error::InvalidParameter("lag must be at least 1".to_string()));
    }
    if data.len() <= lag {
        return Err(Error::InsufficientData {
            needed: lag + 1,
            got: data.len(),
        });
    }
    Ok(data[lag..]
        .iter()
        .zip(data.iter())
        .map(|(later, earlier)| later - earlier)
        .collect())
}

/// Undo a first-order difference given the value that preceded it
///
/// The returned vector starts with `start`, so it has one more element than
/// `diff`.
pub fn integrate(diff: &[f64], start: f64) -> Vec<f64> {
    let mut result = Vec::with_capacity(diff.len() + 1);
    let mut level = start;
    result.push(level);
    for &d in diff {
        level += d;
        result.push(level);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_differences_to_zero() {
        let diff = difference(&[7.5; 20]).unwrap();
        assert_eq!(diff.len(), 19);
        assert!(diff.iter().all(|&d| d == 0.0));
    }

    #[test]
    fn test_linear_ramp_differences_to_constant() {
        let ramp: Vec<f64> = (0..50).map(|i| 3.0 + 0.25 * i as f64).collect();
        let diff = difference(&ramp).unwrap();
        assert_eq!(diff.len(), ramp.len() - 1);
        for d in diff {
            assert_relative_eq!(d, 0.25, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_difference_is_linear() {
        let a = [1.0, 4.0, 2.0, 8.0];
        let b = [0.5, -1.0, 3.0, 3.0];
        let sum: Vec<f64> = a.iter().zip(b.iter()).map(|(x, y)| 2.0 * x + y).collect();

        let da = difference(&a).unwrap();
        let db = difference(&b).unwrap();
        let dsum = difference(&sum).unwrap();
        for i in 0..dsum.len() {
            assert_relative_eq!(dsum[i], 2.0 * da[i] + db[i]);
        }
    }

    #[test]
    fn test_second_order_of_quadratic() {
        let quad: Vec<f64> = (0..10).map(|i| (i * i) as f64).collect();
        let diff = difference_n(&quad, 2).unwrap();
        assert_eq!(diff.len(), 8);
        assert!(diff.iter().all(|&d| d == 2.0));
    }

    #[test]
    fn test_seasonal_difference_removes_period() {
        let season = [1.0, -2.0, 0.5, 4.0];
        let data: Vec<f64> = (0..16).map(|i| season[i % 4]).collect();
        let diff = seasonal_difference(&data, 4).unwrap();
        assert_eq!(diff.len(), 12);
        assert!(diff.iter().all(|&d| d == 0.0));
    }

    #[test]
    fn test_integrate_restores_original() {
        let data = [5.0, 6.5, 4.0, 4.0, 10.0];
        let restored = integrate(&difference(&data).unwrap(), data[0]);
        for (r, d) in restored.iter().zip(data.iter()) {
            assert_relative_eq!(r, d);
        }
    }

    #[test]
    fn test_too_short_input() {
        assert!(matches!(
            difference(&[1.0]),
            Err(Error::InsufficientData { needed: 2, got: 1 })
        ));
        assert!(difference_n(&[1.0, 2.0], 2).is_err());
        assert!(seasonal_difference(&[1.0, 2.0], 0).is_err());
    }
}
