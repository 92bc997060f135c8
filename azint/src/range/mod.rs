//! Coordinate range resolution and equal-width bin geometry.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};


/// Relative widening applied to a data-derived upper bound (`1 + 2^-32`), so
/// the pixel holding the maximum coordinate lands inside the last bin.
pub const RANGE_AMPLIFICATION: f64 = 1.0 + 1.0 / 4_294_967_296.0;

/// How the upper bound is derived when no explicit range is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpperBound {
    /// Maximum coordinate widened by [`RANGE_AMPLIFICATION`].
    Amplified,
    /// Maximum coordinate as observed.
    Exact,
}

/// Closed coordinate interval `[lo, hi]` covered by the bins of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BinRange {
    lo: f64,
    hi: f64,
}

impl BinRange {
    /// Validate an interval. A degenerate `lo == hi` is widened to `lo - 0.5 ..= hi + 0.5`.
    pub fn new(lo: f64, hi: f64, axis: &'static str) -> Result<Self> {
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(Error::InvalidRange { axis, lo, hi });
        }
        if lo == hi {
            return Ok(Self {
                lo: lo - 0.5,
                hi: hi + 0.5,
            });
        }
        Ok(Self { lo, hi })
    }

    /// Derive the interval from the finite values of `coords`.
    ///
    /// The minimum is taken over every finite coordinate, valid pixel or not.
    pub fn from_data(coords: &[f64], axis: &'static str, upper: UpperBound) -> Result<Self> {
        let (min, max) = coords
            .iter()
            .copied()
            .filter(|c| c.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), c| {
                (min.min(c), max.max(c))
            });
        if min > max {
            return Err(Error::EmptyInput { axis });
        }

        let hi = match upper {
            UpperBound::Exact => max,
            // a negative maximum is widened by dividing instead
            UpperBound::Amplified if max >= 0.0 => max * RANGE_AMPLIFICATION,
            UpperBound::Amplified => max / RANGE_AMPLIFICATION,
        };
        Self::new(min, hi, axis)
    }

    /// Use `explicit` verbatim when given, otherwise derive from `coords`.
    pub fn resolve(
        explicit: Option<(f64, f64)>,
        coords: &[f64],
        axis: &'static str,
        upper: UpperBound,
    ) -> Result<Self> {
        match explicit {
            Some((lo, hi)) => Self::new(lo, hi, axis),
            None => Self::from_data(coords, axis, upper),
        }
    }

    #[inline]
    pub fn lo(&self) -> f64 {
        self.lo
    }

    #[inline]
    pub fn hi(&self) -> f64 {
        self.hi
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.hi - self.lo
    }
}

/// `npt` equal-width bins over a [`BinRange`].
///
/// Bin `k` covers `[edge[k], edge[k + 1])`; the last bin also includes `hi`.
#[derive(Debug, Clone, PartialEq)]
pub struct Binning {
    range: BinRange,
    edges: Vec<f64>,
    /// `npt / span`, maps a coordinate offset to a fractional bin index.
    scale: f64,
}

impl Binning {
    pub fn new(range: BinRange, npt: usize) -> Result<Self> {
        if npt == 0 {
            return Err(Error::InvalidBinCount);
        }
        let step = range.span() / npt as f64;
        let mut edges: Vec<f64> = (0..=npt).map(|k| range.lo + k as f64 * step).collect();
        edges[npt] = range.hi;

        Ok(Self {
            range,
            edges,
            scale: npt as f64 / range.span(),
        })
    }

    #[inline]
    pub fn npt(&self) -> usize {
        self.edges.len() - 1
    }

    #[inline]
    pub fn range(&self) -> BinRange {
        self.range
    }

    /// The `npt + 1` bin edges.
    #[inline]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Midpoint of each pair of consecutive edges.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|e| (e[0] + e[1]) / 2.0).collect()
    }

    /// Bin holding `x`, or `None` if `x` is outside the range or NaN.
    #[inline]
    pub fn bin_index(&self, x: f64) -> Option<usize> {
        // negated comparison also rejects NaN
        if !(x >= self.range.lo && x <= self.range.hi) {
            return None;
        }
        let last = self.npt() - 1;
        let mut idx = (((x - self.range.lo) * self.scale) as usize).min(last);

        // the scaled index can be off by one next to an edge; the edges decide
        if x < self.edges[idx] {
            idx -= 1;
        } else if idx != last && x >= self.edges[idx + 1] {
            idx += 1;
        }
        Some(idx)
    }
}
