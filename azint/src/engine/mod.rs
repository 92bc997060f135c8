//! 1D and 2D integration entry points.
//!
//! Each call runs the full pipeline: correct pixels, resolve the bin range,
//! accumulate the weighted histograms, then reduce them into intensities and
//! error estimates. Empty bins read `dummy` when one is given, otherwise
//! `empty`, otherwise 0.

use crate::error::{check_len, Error, Result};
use crate::histogram::{accumulate_1d, accumulate_2d, Fields};
use crate::preproc::{preprocess, Corrections};
use crate::range::{BinRange, Binning, UpperBound};
use crate::reduce::{empty_fill, reduce};
use crate::{ErrorModel, Integrate1dResult, Integrate2dResult, PixelSample};


/// Parameters of a 1D (radial) integration.
#[derive(Debug, Clone, PartialEq)]
pub struct Integrate1dConfig {
    /// Number of radial bins.
    pub npt: usize,
    pub error_model: ErrorModel,
    /// Explicit `(lo, hi)` of the radial axis; derived from the data when `None`.
    pub radial_range: Option<(f64, f64)>,
    /// Value of empty bins when no dummy is set.
    pub empty: Option<f64>,
}

impl Default for Integrate1dConfig {
    fn default() -> Self {
        Self {
            npt: 1000,
            error_model: ErrorModel::No,
            radial_range: None,
            empty: None,
        }
    }
}

impl Integrate1dConfig {
    /// `npt` bins, no error model.
    pub fn bins(npt: usize) -> Self {
        Self {
            npt,
            ..Default::default()
        }
    }

    /// `npt` bins with Poisson errors.
    pub fn poisson(npt: usize) -> Self {
        Self {
            npt,
            error_model: ErrorModel::Poisson,
            ..Default::default()
        }
    }

    pub fn with_error_model(mut self, error_model: ErrorModel) -> Self {
        self.error_model = error_model;
        self
    }

    pub fn with_radial_range(mut self, lo: f64, hi: f64) -> Self {
        self.radial_range = Some((lo, hi));
        self
    }

    pub fn with_empty(mut self, empty: f64) -> Self {
        self.empty = Some(empty);
        self
    }
}

/// Parameters of a 2D (radial × azimuthal) integration.
#[derive(Debug, Clone, PartialEq)]
pub struct Integrate2dConfig {
    /// `(n_radial, n_azimuthal)`. Zero counts are raised to 1.
    pub npt: (usize, usize),
    pub error_model: ErrorModel,
    pub radial_range: Option<(f64, f64)>,
    pub azimuth_range: Option<(f64, f64)>,
    pub empty: Option<f64>,
}

impl Default for Integrate2dConfig {
    fn default() -> Self {
        Self {
            npt: (100, 36),
            error_model: ErrorModel::No,
            radial_range: None,
            azimuth_range: None,
            empty: None,
        }
    }
}

impl Integrate2dConfig {
    pub fn bins(n_radial: usize, n_azimuthal: usize) -> Self {
        Self {
            npt: (n_radial, n_azimuthal),
            ..Default::default()
        }
    }

    /// Full circle in degrees split into `n_azimuthal` sectors.
    pub fn full_circle(n_radial: usize, n_azimuthal: usize) -> Self {
        Self {
            npt: (n_radial, n_azimuthal),
            azimuth_range: Some((-180.0, 180.0)),
            ..Default::default()
        }
    }

    pub fn with_error_model(mut self, error_model: ErrorModel) -> Self {
        self.error_model = error_model;
        self
    }

    pub fn with_radial_range(mut self, lo: f64, hi: f64) -> Self {
        self.radial_range = Some((lo, hi));
        self
    }

    pub fn with_azimuth_range(mut self, lo: f64, hi: f64) -> Self {
        self.azimuth_range = Some((lo, hi));
        self
    }

    pub fn with_empty(mut self, empty: f64) -> Self {
        self.empty = Some(empty);
        self
    }
}

/// Integrate `raw` over the radial axis.
///
/// `radial[i]` is the coordinate of pixel `i`. Fails with
/// [`Error::UnsupportedErrorModel`] for [`ErrorModel::Azimuthal`], which needs
/// the dispersion inside each bin and cannot come from plain histograms.
pub fn histogram1d(
    radial: &[f64],
    raw: &[f64],
    corrections: &Corrections<'_>,
    config: &Integrate1dConfig,
) -> Result<Integrate1dResult> {
    fields_1d(config.error_model)?;
    check_len("radial", raw.len(), radial.len())?;

    let samples = preprocess(raw, corrections, config.error_model)?;
    histogram1d_samples(radial, &samples, corrections.dummy, config)
}

/// Integrate already corrected samples over the radial axis.
pub fn histogram1d_samples(
    radial: &[f64],
    samples: &[PixelSample],
    dummy: Option<f64>,
    config: &Integrate1dConfig,
) -> Result<Integrate1dResult> {
    let error_model = config.error_model;
    let fields = fields_1d(error_model)?;
    check_len("radial", samples.len(), radial.len())?;

    let range = BinRange::resolve(config.radial_range, radial, "radial", UpperBound::Amplified)?;
    let binning = Binning::new(range, config.npt)?;

    let bins = accumulate_1d(radial, samples, &binning, fields);
    let fill = empty_fill(config.empty, dummy);
    let reduced = reduce(&bins, error_model, fill);

    log::debug!(
        "1D integration: {} pixels into {} bins over [{}, {}], error model {}",
        samples.len(),
        binning.npt(),
        range.lo(),
        range.hi(),
        error_model
    );

    Ok(Integrate1dResult::assemble(
        &binning,
        &bins,
        fields,
        reduced,
        error_model,
    ))
}

/// Integrate `raw` over a radial × azimuthal grid.
///
/// Result matrices are azimuthal-major. Only the combined standard error of the
/// mean is reported per cell.
pub fn histogram2d(
    radial: &[f64],
    azimuthal: &[f64],
    raw: &[f64],
    corrections: &Corrections<'_>,
    config: &Integrate2dConfig,
) -> Result<Integrate2dResult> {
    check_len("radial", raw.len(), radial.len())?;
    check_len("azimuthal", raw.len(), azimuthal.len())?;

    let samples = preprocess(raw, corrections, config.error_model)?;
    histogram2d_samples(radial, azimuthal, &samples, corrections.dummy, config)
}

/// Integrate already corrected samples over a radial × azimuthal grid.
pub fn histogram2d_samples(
    radial: &[f64],
    azimuthal: &[f64],
    samples: &[PixelSample],
    dummy: Option<f64>,
    config: &Integrate2dConfig,
) -> Result<Integrate2dResult> {
    check_len("radial", samples.len(), radial.len())?;
    check_len("azimuthal", samples.len(), azimuthal.len())?;

    let error_model = config.error_model;
    if error_model == ErrorModel::Azimuthal {
        log::warn!(
            "Error model 'azimuthal' is not supported by 2D histogram binning; \
             reporting zero-variance errors"
        );
    }
    let fields = if error_model.is_active() {
        Fields::VARIANCE
    } else {
        Fields::BASIC
    };

    let (n_radial, n_azimuthal) = config.npt;
    let radial_range =
        BinRange::resolve(config.radial_range, radial, "radial", UpperBound::Exact)?;
    let azimuthal_range = BinRange::resolve(
        config.azimuth_range,
        azimuthal,
        "azimuthal",
        UpperBound::Exact,
    )?;
    let radial_binning = Binning::new(radial_range, n_radial.max(1))?;
    let azimuthal_binning = Binning::new(azimuthal_range, n_azimuthal.max(1))?;

    let cells = accumulate_2d(
        radial,
        azimuthal,
        samples,
        &radial_binning,
        &azimuthal_binning,
        fields,
    );
    let fill = empty_fill(config.empty, dummy);

    log::debug!(
        "2D integration: {} pixels into {}x{} cells, error model {}",
        samples.len(),
        radial_binning.npt(),
        azimuthal_binning.npt(),
        error_model
    );

    Ok(Integrate2dResult::assemble(
        &radial_binning,
        &azimuthal_binning,
        &cells,
        fields,
        error_model,
        fill,
    ))
}

/// Sums a 1D pass needs for `error_model`.
fn fields_1d(error_model: ErrorModel) -> Result<Fields> {
    match error_model {
        ErrorModel::No => Ok(Fields::BASIC),
        ErrorModel::Variance | ErrorModel::Poisson | ErrorModel::Hybrid => Ok(Fields::ALL),
        ErrorModel::Azimuthal => Err(Error::UnsupportedErrorModel {
            model: error_model,
            engine: "1D",
        }),
    }
}
