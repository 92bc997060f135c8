//! Weighted histogram accumulation of pixel samples.
//!
//! Every pixel is classified once by its coordinate(s); all requested sample
//! fields are then summed into that bin in the same pass. Pixels outside the
//! range contribute to no bin. Large inputs are split into chunks that fill
//! private partial histograms in parallel, merged in chunk order.

use common::parallel::par_chunked_fold;
use common::Buffer2;

use crate::range::Binning;
use crate::PixelSample;


/// Which optional sums a pass fills in addition to signal, normalization and count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fields {
    /// Sum of `variance`.
    pub variance: bool,
    /// Sum of `normalization²`.
    pub normalization_sq: bool,
}

impl Fields {
    /// Signal, normalization and count only.
    pub const BASIC: Self = Self {
        variance: false,
        normalization_sq: false,
    };

    /// Everything, including `normalization²`.
    pub const ALL: Self = Self {
        variance: true,
        normalization_sq: true,
    };

    /// Adds the variance sum but not `normalization²`.
    pub const VARIANCE: Self = Self {
        variance: true,
        normalization_sq: false,
    };
}

/// Running sums of [`PixelSample`] fields for one bin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BinAccumulator {
    pub sum_signal: f64,
    pub sum_variance: f64,
    pub sum_normalization: f64,
    pub sum_normalization_sq: f64,
    pub sum_count: f64,
}

impl BinAccumulator {
    #[inline]
    pub fn add(&mut self, sample: &PixelSample, fields: Fields) {
        self.sum_signal += sample.signal;
        self.sum_normalization += sample.normalization;
        self.sum_count += sample.count;
        if fields.variance {
            self.sum_variance += sample.variance;
        }
        if fields.normalization_sq {
            self.sum_normalization_sq += sample.normalization * sample.normalization;
        }
    }

    #[inline]
    pub fn merge(&mut self, other: &Self) {
        self.sum_signal += other.sum_signal;
        self.sum_variance += other.sum_variance;
        self.sum_normalization += other.sum_normalization;
        self.sum_normalization_sq += other.sum_normalization_sq;
        self.sum_count += other.sum_count;
    }

    /// A bin is empty when no valid pixel contributed to it.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sum_count == 0.0
    }
}

fn merge_bins(total: &mut [BinAccumulator], partial: &[BinAccumulator]) {
    for (t, p) in total.iter_mut().zip(partial) {
        t.merge(p);
    }
}

/// Histogram `samples` over one axis.
///
/// `coords[i]` is the coordinate of `samples[i]`.
pub fn accumulate_1d(
    coords: &[f64],
    samples: &[PixelSample],
    binning: &Binning,
    fields: Fields,
) -> Vec<BinAccumulator> {
    assert_eq!(
        coords.len(),
        samples.len(),
        "coordinate count must match sample count"
    );
    let npt = binning.npt();

    par_chunked_fold(
        samples.len(),
        || vec![BinAccumulator::default(); npt],
        |bins, range| {
            for i in range {
                if let Some(k) = binning.bin_index(coords[i]) {
                    bins[k].add(&samples[i], fields);
                }
            }
        },
        |total, partial| merge_bins(total, &partial),
    )
}

/// Histogram `samples` over a radial × azimuthal grid.
///
/// The result is azimuthal-major: `width` is the radial bin count, `height`
/// the azimuthal bin count, and cell `(r, a)` holds radial bin `r` of
/// azimuthal bin `a`.
pub fn accumulate_2d(
    radial: &[f64],
    azimuthal: &[f64],
    samples: &[PixelSample],
    radial_binning: &Binning,
    azimuthal_binning: &Binning,
    fields: Fields,
) -> Buffer2<BinAccumulator> {
    assert_eq!(
        radial.len(),
        samples.len(),
        "radial coordinate count must match sample count"
    );
    assert_eq!(
        azimuthal.len(),
        samples.len(),
        "azimuthal coordinate count must match sample count"
    );
    let n_rad = radial_binning.npt();
    let n_azim = azimuthal_binning.npt();

    let cells = par_chunked_fold(
        samples.len(),
        || vec![BinAccumulator::default(); n_rad * n_azim],
        |cells, range| {
            for i in range {
                let Some(r) = radial_binning.bin_index(radial[i]) else {
                    continue;
                };
                let Some(a) = azimuthal_binning.bin_index(azimuthal[i]) else {
                    continue;
                };
                cells[a * n_rad + r].add(&samples[i], fields);
            }
        },
        |total, partial| merge_bins(total, &partial),
    );

    Buffer2::new(n_rad, n_azim, cells)
}
