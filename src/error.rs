//! Error types for the time series basics library

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Not enough observations for the requested operation
    #[error("Not enough data: need {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// A parameter is out of its valid range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The input series cannot be analysed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Regression design matrix could not be inverted
    #[error("Singular matrix: {0}")]
    SingularMatrix(String),

    /// Configuration could not be parsed or serialized
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
