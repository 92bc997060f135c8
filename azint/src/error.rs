//! Error types for integration operations.

use thiserror::Error;

use crate::ErrorModel;

/// Errors that can occur while preparing or running an integration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Shape mismatch for '{name}': expected {expected} values, got {actual}")]
    ShapeMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error(
        "Error model '{model}' is not implemented for {engine} histogram binning: \
         plain weighted histograms cannot assess the variance within a bin"
    )]
    UnsupportedErrorModel {
        model: ErrorModel,
        engine: &'static str,
    },

    #[error("Error model 'variance' requires a per-pixel variance array")]
    MissingVariance,

    #[error("Number of bins must be at least 1")]
    InvalidBinCount,

    #[error("Invalid {axis} range [{lo}, {hi}]: bounds must be finite with lo <= hi")]
    InvalidRange {
        axis: &'static str,
        lo: f64,
        hi: f64,
    },

    #[error("Cannot derive the {axis} range: no finite coordinate values")]
    EmptyInput { axis: &'static str },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigFile(#[from] common::SerdeFormatError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fail with [`Error::ShapeMismatch`] unless `actual == expected`.
pub(crate) fn check_len(name: &'static str, expected: usize, actual: usize) -> Result<()> {
    if actual != expected {
        return Err(Error::ShapeMismatch {
            name,
            expected,
            actual,
        });
    }
    Ok(())
}
