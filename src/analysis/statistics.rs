//! Descriptive statistics helpers

use std::fmt;

pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sample variance (n - 1 denominator)
pub fn variance(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (data.len() - 1) as f64
}

pub fn std_dev(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Trailing moving average; output has `data.len() - window + 1` values
pub fn moving_average(data: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || data.len() < window {
        return vec![];
    }
    data.windows(window).map(mean).collect()
}

/// Rolling sample standard deviation over the same windows as [`moving_average`]
pub fn rolling_std(data: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || data.len() < window {
        return vec![];
    }
    data.windows(window).map(std_dev).collect()
}

/// Summary of a sequence used in the console reports
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl DescriptiveStats {
    pub fn new(data: &[f64]) -> Self {
        Self {
            count: data.len(),
            mean: mean(data),
            std_dev: std_dev(data),
            min: data.iter().copied().fold(f64::INFINITY, f64::min),
            max: data.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

impl fmt::Display for DescriptiveStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={}  mean={:.4}  std={:.4}  min={:.4}  max={:.4}",
            self.count, self.mean, self.std_dev, self.min, self.max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_variance() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0);
        assert_relative_eq!(variance(&data), 32.0 / 7.0);
    }

    #[test]
    fn test_mean_of_empty_is_nan() {
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_moving_average_length() {
        let data: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let ma = moving_average(&data, 3);
        assert_eq!(ma.len(), 8);
        assert_relative_eq!(ma[0], 2.0);
        assert_relative_eq!(ma[7], 9.0);
    }

    #[test]
    fn test_rolling_std_of_constant() {
        let data = vec![3.0; 12];
        assert!(rolling_std(&data, 4).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_descriptive_stats() {
        let stats = DescriptiveStats::new(&[1.0, 3.0, -2.0]);
        assert_eq!(stats.count, 3);
        assert_relative_eq!(stats.min, -2.0);
        assert_relative_eq!(stats.max, 3.0);
    }
}
