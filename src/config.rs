//! Configuration management
//!
//! Defaults reproduce the documented example (100 daily points from
//! 2020-01-01, seed 42). Every section is optional in a TOML file.

use crate::analysis::AdfConfig;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub adf: AdfConfig,
    pub plot: PlotConfig,
}

/// Parameters of the trend + seasonality + cycle + noise generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of observations
    pub n: usize,
    /// Seed for the noise stream
    pub seed: u64,
    /// Date of the first observation; later ones follow daily
    pub start_date: NaiveDate,
    /// Trend rises linearly from 0 to this value
    pub trend_max: f64,
    pub seasonal_amplitude: f64,
    /// Full sine cycles across the whole series
    pub seasonal_cycles: f64,
    /// Standard deviation of the Gaussian noise; 0 disables noise
    pub noise_std: f64,
    /// Amplitude of the long-period cycle; 0 disables it
    pub cycle_amplitude: f64,
    /// Cycle length in observations
    pub cycle_period: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            n: 100,
            seed: 42,
            start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            trend_max: 10.0,
            seasonal_amplitude: 5.0,
            seasonal_cycles: 1.5,
            noise_std: 1.0,
            cycle_amplitude: 0.0,
            cycle_period: 50.0,
        }
    }
}

impl GeneratorConfig {
    /// Observations in one seasonal cycle; `None` when there is no seasonality
    pub fn seasonal_period(&self) -> Option<usize> {
        if self.seasonal_cycles == 0.0 || self.seasonal_amplitude == 0.0 {
            return None;
        }
        let span = self.n.saturating_sub(1) as f64;
        Some((span / self.seasonal_cycles.abs()).round() as usize)
    }

    pub fn validate(&self) -> Result<()> {
        if self.n == 0 {
            return Err(Error::InvalidParameter(
                "series length must be positive".to_string(),
            ));
        }
        if !(self.noise_std.is_finite() && self.noise_std >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "noise_std must be finite and non-negative, got {}",
                self.noise_std
            )));
        }
        if !(self.cycle_period.is_finite() && self.cycle_period > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "cycle_period must be positive, got {}",
                self.cycle_period
            )));
        }
        let shape = [
            ("trend_max", self.trend_max),
            ("seasonal_amplitude", self.seasonal_amplitude),
            ("seasonal_cycles", self.seasonal_cycles),
            ("cycle_amplitude", self.cycle_amplitude),
        ];
        if let Some((name, value)) = shape.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }
        Ok(())
    }
}

/// Size of the text charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub height: usize,
    pub width: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            height: 12,
            width: 72,
        }
    }
}

impl Config {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from TOML file
    pub fn from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to TOML file
    pub fn save_toml(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
