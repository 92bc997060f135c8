//! Integration result records.

use common::Buffer2;
use serde::Serialize;

use crate::histogram::{BinAccumulator, Fields};
use crate::range::{BinRange, Binning};
use crate::reduce::{self, Reduced};
use crate::ErrorModel;

/// Result of a 1D integration. Every sequence has one entry per bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Integrate1dResult {
    /// Bin centers.
    pub positions: Vec<f64>,
    /// Mean corrected intensity per bin.
    pub intensity: Vec<f64>,
    /// Published error bar: the standard error of the mean.
    pub error: Option<Vec<f64>>,
    pub sum_signal: Vec<f64>,
    pub sum_variance: Option<Vec<f64>>,
    pub sum_normalization: Vec<f64>,
    pub sum_count: Vec<f64>,
    /// Variance-weighted dispersion, exposed for diagnostics.
    pub std: Option<Vec<f64>>,
    /// Standard error of the mean.
    pub sem: Option<Vec<f64>>,
    pub sum_normalization_sq: Option<Vec<f64>>,
    /// Range the bins cover after resolution.
    pub radial_range: BinRange,
    pub error_model: ErrorModel,
}

impl Integrate1dResult {
    pub(crate) fn assemble(
        binning: &Binning,
        bins: &[BinAccumulator],
        fields: Fields,
        reduced: Reduced,
        error_model: ErrorModel,
    ) -> Self {
        let column = |f: fn(&BinAccumulator) -> f64| bins.iter().map(f).collect::<Vec<_>>();

        Self {
            positions: binning.centers(),
            intensity: reduced.intensity,
            error: reduced.sem.clone(),
            sum_signal: column(|b| b.sum_signal),
            sum_variance: fields.variance.then(|| column(|b| b.sum_variance)),
            sum_normalization: column(|b| b.sum_normalization),
            sum_count: column(|b| b.sum_count),
            std: reduced.std,
            sem: reduced.sem,
            sum_normalization_sq: fields
                .normalization_sq
                .then(|| column(|b| b.sum_normalization_sq)),
            radial_range: binning.range(),
            error_model,
        }
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Result of a 2D integration.
///
/// Matrices are azimuthal-major: `width()` is the radial bin count, row `a`
/// holds azimuthal bin `a`, and element `(r, a)` is radial bin `r` of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Integrate2dResult {
    /// Radial bin centers.
    pub radial: Vec<f64>,
    /// Azimuthal bin centers.
    pub azimuthal: Vec<f64>,
    pub intensity: Buffer2<f64>,
    /// Standard error of the mean per cell.
    pub error: Option<Buffer2<f64>>,
    pub sum_signal: Buffer2<f64>,
    pub sum_variance: Option<Buffer2<f64>>,
    pub sum_normalization: Buffer2<f64>,
    pub sum_count: Buffer2<f64>,
    pub radial_range: BinRange,
    pub azimuthal_range: BinRange,
    pub error_model: ErrorModel,
}

impl Integrate2dResult {
    pub(crate) fn assemble(
        radial_binning: &Binning,
        azimuthal_binning: &Binning,
        cells: &Buffer2<BinAccumulator>,
        fields: Fields,
        error_model: ErrorModel,
        fill: f64,
    ) -> Self {
        Self {
            radial: radial_binning.centers(),
            azimuthal: azimuthal_binning.centers(),
            intensity: cells.map(|c| reduce::intensity(c, fill)),
            error: error_model
                .is_active()
                .then(|| cells.map(|c| reduce::sem(c, fill))),
            sum_signal: cells.map(|c| c.sum_signal),
            sum_variance: fields.variance.then(|| cells.map(|c| c.sum_variance)),
            sum_normalization: cells.map(|c| c.sum_normalization),
            sum_count: cells.map(|c| c.sum_count),
            radial_range: radial_binning.range(),
            azimuthal_range: azimuthal_binning.range(),
            error_model,
        }
    }

    /// `(n_radial, n_azimuthal)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.radial.len(), self.azimuthal.len())
    }
}
