//! # Time series analysis
//!
//! Stationarity tests, differencing, decomposition and descriptive statistics.

mod decomposition;
pub mod differencing;
mod mackinnon;
mod stationarity;
mod statistics;

pub use decomposition::*;
pub use differencing::{difference, difference_n, integrate, seasonal_difference};
pub use stationarity::*;
pub use statistics::*;
