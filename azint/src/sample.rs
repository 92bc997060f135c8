use serde::{Deserialize, Serialize};

/// Corrected contribution of a single detector pixel.
///
/// Invalid pixels are represented by [`PixelSample::INVALID`] so that they add
/// nothing to any accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelSample {
    /// Dark-subtracted signal.
    pub signal: f64,
    /// Estimated variance of `signal`; zero when no error model is active.
    pub variance: f64,
    /// Product of all multiplicative corrections.
    pub normalization: f64,
    /// Pixel validity weight, 1 for a valid pixel.
    pub count: f64,
}

impl PixelSample {
    pub const INVALID: Self = Self {
        signal: 0.0,
        variance: 0.0,
        normalization: 0.0,
        count: 0.0,
    };

    /// A valid pixel with unit count.
    pub fn new(signal: f64, variance: f64, normalization: f64) -> Self {
        Self {
            signal,
            variance,
            normalization,
            count: 1.0,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.count != 0.0
    }
}
