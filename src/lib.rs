//! # Time Series Basics
//!
//! Companion library for an introduction to time series analysis:
//!
//! - what a time series is and the components it is built from
//!   (trend, seasonality, cyclicality, noise)
//! - seeded synthetic data generation
//! - stationarity and the Augmented Dickey-Fuller test
//! - differencing to remove a trend
//!
//! ## Quick Start
//!
//! ```rust
//! use time_series_basics::prelude::*;
//!
//! fn main() -> time_series_basics::Result<()> {
//!     // 100 daily points: trend 0→10, 1.5 seasonal cycles, N(0, 1) noise
//!     let parts = SeriesGenerator::new(GeneratorConfig::default())?.generate()?;
//!
//!     let before = adf_test(&parts.series.data)?;
//!     println!("p = {:.4} ({})", before.p_value, before.stationarity());
//!
//!     let diffed = parts.series.difference()?;
//!     let after = adf_test(&diffed.data)?;
//!     println!("p = {:.4} ({})", after.p_value, after.stationarity());
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod plot;
pub mod synthetic;
pub mod types;

pub use config::{Config, GeneratorConfig, PlotConfig};
pub use error::{Error, Result};
pub use types::TimeSeries;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::analysis::{
        adf_test, adf_test_with, decompose, difference, rolling_stationarity_check, AdfConfig,
        AdfResult, DecompositionModel, LagSelection, Regression, Stationarity,
        SIGNIFICANCE_LEVEL,
    };
    pub use crate::config::{Config, GeneratorConfig};
    pub use crate::plot::{bar_chart, line_chart};
    pub use crate::synthetic::{random_walk, white_noise, SeriesComponents, SeriesGenerator};
    pub use crate::types::TimeSeries;
    pub use crate::{Error, Result};
}
