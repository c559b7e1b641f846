//! Trend + seasonality + cycle + noise generator

use super::noise::GaussianNoise;
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::types::TimeSeries;
use chrono::NaiveDate;
use std::f64::consts::PI;
use tracing::info;

/// The parts a synthetic series was built from, each of length N
#[derive(Debug, Clone)]
pub struct SeriesComponents {
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub cyclical: Vec<f64>,
    pub noise: Vec<f64>,
    /// Sum of the components, dated daily
    pub series: TimeSeries,
}

impl SeriesComponents {
    /// Trend + seasonality + cycle, i.e. the series before noise
    pub fn signal(&self) -> Vec<f64> {
        self.trend
            .iter()
            .zip(&self.seasonal)
            .zip(&self.cyclical)
            .map(|((t, s), c)| t + s + c)
            .collect()
    }
}

/// Generator of the classic teaching series
///
/// `value(i) = trend(i) + seasonal(i) + cycle(i) + noise(i)` where the trend
/// rises linearly from 0 to `trend_max`, the seasonal sine completes
/// `seasonal_cycles` cycles over the series and the noise is seeded.
#[derive(Debug, Clone)]
pub struct SeriesGenerator {
    config: GeneratorConfig,
}

impl SeriesGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn generate(&self) -> Result<SeriesComponents> {
        let cfg = &self.config;
        let n = cfg.n;

        // Position in [0, 1] across the series, endpoints included
        let position = |i: usize| {
            if n > 1 {
                i as f64 / (n - 1) as f64
            } else {
                0.0
            }
        };

        let trend: Vec<f64> = (0..n).map(|i| cfg.trend_max * position(i)).collect();
        let seasonal: Vec<f64> = (0..n)
            .map(|i| cfg.seasonal_amplitude * (2.0 * PI * cfg.seasonal_cycles * position(i)).sin())
            .collect();
        let cyclical: Vec<f64> = (0..n)
            .map(|i| cfg.cycle_amplitude * (2.0 * PI * i as f64 / cfg.cycle_period).sin())
            .collect();
        let noise = draws(n, cfg.seed, cfg.noise_std)?;

        let values: Vec<f64> = (0..n)
            .map(|i| trend[i] + seasonal[i] + cyclical[i] + noise[i])
            .collect();

        info!(
            n,
            seed = cfg.seed,
            start = %cfg.start_date,
            "Generated synthetic series"
        );

        Ok(SeriesComponents {
            trend,
            seasonal,
            cyclical,
            noise,
            series: TimeSeries::daily("synthetic", cfg.start_date, values),
        })
    }
}

/// Date the helper generators start from
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()
}

/// Gaussian random walk: cumulative sum of `n` steps, starting from the first step
pub fn random_walk(n: usize, seed: u64, step_std: f64) -> Result<TimeSeries> {
    if n == 0 {
        return Err(Error::InvalidParameter(
            "series length must be positive".to_string(),
        ));
    }
    let mut level = 0.0;
    let values = draws(n, seed, step_std)?
        .into_iter()
        .map(|step| {
            level += step;
            level
        })
        .collect();

    info!(n, seed, step_std, "Generated random walk");
    Ok(TimeSeries::daily("random walk", default_start_date(), values))
}

/// Independent N(0, std²) draws; `std_dev = 0` gives a zero series
pub fn white_noise(n: usize, seed: u64, std_dev: f64) -> Result<TimeSeries> {
    if n == 0 {
        return Err(Error::InvalidParameter(
            "series length must be positive".to_string(),
        ));
    }
    let values = draws(n, seed, std_dev)?;
    Ok(TimeSeries::daily("white noise", default_start_date(), values))
}

/// `n` seeded Gaussian draws; a zero standard deviation gives zeros
fn draws(n: usize, seed: u64, std_dev: f64) -> Result<Vec<f64>> {
    if std_dev == 0.0 {
        return Ok(vec![0.0; n]);
    }
    Ok(GaussianNoise::new(seed, std_dev)?.take(n))
}
