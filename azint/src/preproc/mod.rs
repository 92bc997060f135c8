//! Per-pixel correction stage.
//!
//! Turns a raw detector image plus optional correction terms into a flat list
//! of [`PixelSample`]s:
//!
//! - `signal = raw - dark`
//! - `normalization = normalization_factor * flat * solid_angle * polarization * absorption`
//! - `variance` according to the [`ErrorModel`]
//! - `count = 1`
//!
//! Masked, dummy-valued and non-finite pixels become [`PixelSample::INVALID`].

use rayon::prelude::*;

use crate::error::{check_len, Error, Result};
use crate::{ErrorModel, PixelSample};


/// Output chunk handed to each rayon task.
const CHUNK_SIZE: usize = 4096;

/// Optional correction terms applied to a raw image.
///
/// Every array, when present, holds one value per pixel in the same flattened
/// order as the raw image.
#[derive(Debug, Clone, Copy)]
pub struct Corrections<'a> {
    /// Dark current, subtracted from the raw signal.
    pub dark: Option<&'a [f64]>,
    /// Flat field, multiplied into the normalization. Also checked for dummies.
    pub flat: Option<&'a [f64]>,
    /// Solid angle of each pixel.
    pub solid_angle: Option<&'a [f64]>,
    /// Polarization correction factor.
    pub polarization: Option<&'a [f64]>,
    /// Sensor absorption correction factor.
    pub absorption: Option<&'a [f64]>,
    /// `true` where the pixel must be ignored.
    pub mask: Option<&'a [bool]>,
    /// Caller-supplied variance of the raw signal.
    pub variance: Option<&'a [f64]>,
    /// Variance of the dark current.
    pub dark_variance: Option<&'a [f64]>,
    /// Raw value marking an invalid pixel.
    pub dummy: Option<f64>,
    /// Tolerance around `dummy`.
    pub delta_dummy: Option<f64>,
    /// Global normalization factor.
    pub normalization_factor: f64,
}

impl Default for Corrections<'_> {
    fn default() -> Self {
        Self {
            dark: None,
            flat: None,
            solid_angle: None,
            polarization: None,
            absorption: None,
            mask: None,
            variance: None,
            dark_variance: None,
            dummy: None,
            delta_dummy: None,
            normalization_factor: 1.0,
        }
    }
}

impl<'a> Corrections<'a> {
    pub fn with_dark(mut self, dark: &'a [f64]) -> Self {
        self.dark = Some(dark);
        self
    }

    pub fn with_flat(mut self, flat: &'a [f64]) -> Self {
        self.flat = Some(flat);
        self
    }

    pub fn with_solid_angle(mut self, solid_angle: &'a [f64]) -> Self {
        self.solid_angle = Some(solid_angle);
        self
    }

    pub fn with_polarization(mut self, polarization: &'a [f64]) -> Self {
        self.polarization = Some(polarization);
        self
    }

    pub fn with_absorption(mut self, absorption: &'a [f64]) -> Self {
        self.absorption = Some(absorption);
        self
    }

    pub fn with_mask(mut self, mask: &'a [bool]) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn with_variance(mut self, variance: &'a [f64]) -> Self {
        self.variance = Some(variance);
        self
    }

    pub fn with_dark_variance(mut self, dark_variance: &'a [f64]) -> Self {
        self.dark_variance = Some(dark_variance);
        self
    }

    /// Mark raw values within `delta_dummy` of `dummy` as invalid.
    /// Without a tolerance only exact matches are invalid.
    pub fn with_dummy(mut self, dummy: f64, delta_dummy: Option<f64>) -> Self {
        self.dummy = Some(dummy);
        self.delta_dummy = delta_dummy;
        self
    }

    pub fn with_normalization_factor(mut self, factor: f64) -> Self {
        self.normalization_factor = factor;
        self
    }

    /// Check every supplied array against the pixel count.
    fn validate(&self, n_pixels: usize, error_model: ErrorModel) -> Result<()> {
        let float_terms = [
            ("dark", self.dark),
            ("flat", self.flat),
            ("solid_angle", self.solid_angle),
            ("polarization", self.polarization),
            ("absorption", self.absorption),
            ("variance", self.variance),
            ("dark_variance", self.dark_variance),
        ];
        for (name, term) in float_terms {
            if let Some(values) = term {
                check_len(name, n_pixels, values.len())?;
            }
        }
        if let Some(mask) = self.mask {
            check_len("mask", n_pixels, mask.len())?;
        }
        if error_model == ErrorModel::Variance && self.variance.is_none() {
            return Err(Error::MissingVariance);
        }
        Ok(())
    }

    #[inline]
    fn is_dummy(&self, value: f64) -> bool {
        match (self.dummy, self.delta_dummy) {
            (Some(dummy), Some(delta)) if delta > 0.0 => (value - dummy).abs() <= delta,
            (Some(dummy), _) => value == dummy,
            (None, _) => false,
        }
    }

    /// Correct pixel `i` whose raw value is `raw`.
    #[inline]
    fn correct_pixel(&self, i: usize, raw: f64, error_model: ErrorModel) -> PixelSample {
        if self.mask.is_some_and(|mask| mask[i]) || !raw.is_finite() || self.is_dummy(raw) {
            return PixelSample::INVALID;
        }

        let mut signal = raw;
        if let Some(dark) = self.dark {
            signal -= dark[i];
        }

        let mut normalization = self.normalization_factor;
        if let Some(flat) = self.flat {
            if self.is_dummy(flat[i]) {
                return PixelSample::INVALID;
            }
            normalization *= flat[i];
        }
        for term in [self.solid_angle, self.polarization, self.absorption]
            .into_iter()
            .flatten()
        {
            normalization *= term[i];
        }

        if !signal.is_finite() || !normalization.is_finite() || normalization == 0.0 {
            return PixelSample::INVALID;
        }

        let poisson = || raw.max(1.0);
        let mut variance = match error_model {
            ErrorModel::No | ErrorModel::Azimuthal => 0.0,
            // presence is checked in validate()
            ErrorModel::Variance => self.variance.map_or(0.0, |v| v[i]),
            ErrorModel::Poisson => poisson(),
            ErrorModel::Hybrid => match self.variance.map(|v| v[i]) {
                Some(v) if v.is_finite() => v,
                _ => poisson(),
            },
        };
        if matches!(
            error_model,
            ErrorModel::Variance | ErrorModel::Poisson | ErrorModel::Hybrid
        ) {
            if let Some(dark_variance) = self.dark_variance {
                variance += dark_variance[i];
            }
        }

        if !variance.is_finite() {
            return PixelSample::INVALID;
        }

        PixelSample {
            signal,
            variance,
            normalization,
            count: 1.0,
        }
    }
}

/// Apply `corrections` to every pixel of `raw`.
///
/// Fails with [`Error::ShapeMismatch`] if any correction array does not match
/// `raw.len()`, or [`Error::MissingVariance`] for [`ErrorModel::Variance`]
/// without a variance array.
pub fn preprocess(
    raw: &[f64],
    corrections: &Corrections<'_>,
    error_model: ErrorModel,
) -> Result<Vec<PixelSample>> {
    corrections.validate(raw.len(), error_model)?;

    let mut samples = vec![PixelSample::INVALID; raw.len()];
    samples
        .par_chunks_mut(CHUNK_SIZE)
        .enumerate()
        .for_each(|(chunk_idx, chunk)| {
            let start_idx = chunk_idx * CHUNK_SIZE;
            for (offset, sample) in chunk.iter_mut().enumerate() {
                let i = start_idx + offset;
                *sample = corrections.correct_pixel(i, raw[i], error_model);
            }
        });

    let n_valid = samples.iter().filter(|s| s.is_valid()).count();
    log::debug!(
        "Preprocessed {} pixels ({} valid, error model {})",
        raw.len(),
        n_valid,
        error_model
    );

    Ok(samples)
}
