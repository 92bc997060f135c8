//! Azint - histogram-based azimuthal integration of detector images.
//!
//! Reduces a 2D detector frame to a 1D radial profile or a 2D
//! radial × azimuthal map by weighted histogramming:
//! - Per-pixel corrections (dark, flat, solid angle, polarization, absorption, mask, dummy)
//! - Equal-width binning over an explicit or data-derived range
//! - Intensity as the ratio of summed signal to summed normalization
//! - Optional error propagation (`variance`, `poisson`, `hybrid`)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use azint::{histogram1d, Corrections, Integrate1dConfig};
//!
//! let config = Integrate1dConfig::poisson(500);
//! let corrections = Corrections::default().with_mask(&mask);
//! let result = histogram1d(&radial, &raw, &corrections, &config)?;
//!
//! let sem = result.sem.unwrap_or_default();
//! for ((q, i), e) in result.positions.iter().zip(&result.intensity).zip(&sem) {
//!     println!("{q:.4} {i:.3} ± {e:.3}");
//! }
//! ```

pub mod config;
mod engine;
pub mod error;
mod error_model;
pub mod histogram;
pub mod preproc;
pub mod range;
pub mod reduce;
mod result;
mod sample;

// ============================================================================
// Integration
// ============================================================================

pub use engine::{
    histogram1d, histogram1d_samples, histogram2d, histogram2d_samples, Integrate1dConfig,
    Integrate2dConfig,
};
pub use result::{Integrate1dResult, Integrate2dResult};

// ============================================================================
// Inputs
// ============================================================================

pub use error_model::ErrorModel;
pub use preproc::{preprocess, Corrections};
pub use sample::PixelSample;

// ============================================================================
// Configuration and errors
// ============================================================================

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use range::{BinRange, Binning};
