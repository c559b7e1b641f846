//! # Synthetic time series
//!
//! Seeded generators for the components lesson: trend, seasonality,
//! cyclicality and Gaussian noise, plus random walks and white noise.

mod generator;
mod noise;

pub use generator::*;
pub use noise::*;
