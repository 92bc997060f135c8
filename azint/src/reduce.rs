//! Per-bin reduction of accumulated sums into intensity and error estimates.

use crate::histogram::BinAccumulator;
use crate::ErrorModel;

/// Value written into empty bins.
///
/// A dummy value, when given, takes precedence over `empty`; without either
/// empty bins read 0.
#[inline]
pub fn empty_fill(empty: Option<f64>, dummy: Option<f64>) -> f64 {
    dummy.or(empty).unwrap_or(0.0)
}

/// Reduced values of a single bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinEstimate {
    /// `sum_signal / sum_normalization`.
    pub intensity: f64,
    /// `sqrt(sum_variance / sum_normalization_sq)`; `None` without an error model.
    pub std: Option<f64>,
    /// `sqrt(sum_variance) / sum_normalization`; `None` without an error model.
    pub sem: Option<f64>,
}

/// `sum_signal / sum_normalization`, or `fill` for an empty bin.
#[inline]
pub fn intensity(bin: &BinAccumulator, fill: f64) -> f64 {
    if bin.is_empty() {
        return fill;
    }
    bin.sum_signal / bin.sum_normalization
}

/// `sqrt(sum_variance / sum_normalization_sq)`, or `fill` for an empty bin.
#[inline]
pub fn std_dev(bin: &BinAccumulator, fill: f64) -> f64 {
    if bin.is_empty() {
        return fill;
    }
    (bin.sum_variance / bin.sum_normalization_sq).sqrt()
}

/// `sqrt(sum_variance) / sum_normalization`, or `fill` for an empty bin.
#[inline]
pub fn sem(bin: &BinAccumulator, fill: f64) -> f64 {
    if bin.is_empty() {
        return fill;
    }
    bin.sum_variance.sqrt() / bin.sum_normalization
}

impl BinEstimate {
    /// Reduce one bin. Empty bins (`sum_count == 0`) get `fill` everywhere.
    pub fn from_bin(bin: &BinAccumulator, error_model: ErrorModel, fill: f64) -> Self {
        let with_errors = match error_model {
            ErrorModel::No => false,
            ErrorModel::Variance
            | ErrorModel::Poisson
            | ErrorModel::Azimuthal
            | ErrorModel::Hybrid => true,
        };

        Self {
            intensity: intensity(bin, fill),
            std: with_errors.then(|| std_dev(bin, fill)),
            sem: with_errors.then(|| sem(bin, fill)),
        }
    }
}

/// Reduced profile: one entry per bin, errors present only with an error model.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduced {
    pub intensity: Vec<f64>,
    pub std: Option<Vec<f64>>,
    pub sem: Option<Vec<f64>>,
}

/// Reduce every bin of `bins` into fresh buffers.
pub fn reduce(bins: &[BinAccumulator], error_model: ErrorModel, fill: f64) -> Reduced {
    let estimates: Vec<BinEstimate> = bins
        .iter()
        .map(|bin| BinEstimate::from_bin(bin, error_model, fill))
        .collect();

    let intensity = estimates.iter().map(|e| e.intensity).collect();
    let (std, sem) = if error_model.is_active() {
        (
            estimates.iter().map(|e| e.std).collect::<Option<Vec<_>>>(),
            estimates.iter().map(|e| e.sem).collect::<Option<Vec<_>>>(),
        )
    } else {
        (None, None)
    };

    Reduced {
        intensity,
        std,
        sem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(signal: f64, variance: f64, norm: f64, norm_sq: f64, count: f64) -> BinAccumulator {
        BinAccumulator {
            sum_signal: signal,
            sum_variance: variance,
            sum_normalization: norm,
            sum_normalization_sq: norm_sq,
            sum_count: count,
        }
    }

    #[test]
    fn test_empty_fill_precedence() {
        assert_eq!(empty_fill(None, None), 0.0);
        assert_eq!(empty_fill(Some(-5.0), None), -5.0);
        assert_eq!(empty_fill(Some(-5.0), Some(-1.0)), -1.0);
        assert_eq!(empty_fill(None, Some(-1.0)), -1.0);
    }

    #[test]
    fn test_intensity_without_error_model() {
        let estimate = BinEstimate::from_bin(&bin(30.0, 0.0, 2.0, 0.0, 2.0), ErrorModel::No, 0.0);
        assert_eq!(estimate.intensity, 15.0);
        assert_eq!(estimate.std, None);
        assert_eq!(estimate.sem, None);
    }

    #[test]
    fn test_std_and_sem_formulas() {
        // two pixels, normalization 2 each, variance 8 each
        let b = bin(40.0, 16.0, 4.0, 8.0, 2.0);
        let estimate = BinEstimate::from_bin(&b, ErrorModel::Poisson, 0.0);
        assert_eq!(estimate.intensity, 10.0);
        assert_eq!(estimate.std, Some(2.0_f64.sqrt()));
        assert_eq!(estimate.sem, Some(1.0));
    }

    #[test]
    fn test_empty_bin_ignores_residual_sums() {
        let b = bin(3.0, 2.0, 0.0, 0.0, 0.0);
        for model in [ErrorModel::No, ErrorModel::Variance, ErrorModel::Hybrid] {
            let estimate = BinEstimate::from_bin(&b, model, -1.0);
            assert_eq!(estimate.intensity, -1.0);
            if model.is_active() {
                assert_eq!(estimate.std, Some(-1.0));
                assert_eq!(estimate.sem, Some(-1.0));
            } else {
                assert_eq!(estimate.std, None);
            }
        }
    }

    #[test]
    fn test_zero_normalization_is_not_an_error() {
        // non-empty bin whose normalization sums to zero
        let estimate = BinEstimate::from_bin(&bin(1.0, 1.0, 0.0, 0.0, 1.0), ErrorModel::Variance, 0.0);
        assert!(estimate.intensity.is_infinite());
        assert!(estimate.sem.is_some_and(|s| s.is_infinite()));
    }

    #[test]
    fn test_reduce_profile() {
        let bins = [bin(30.0, 30.0, 2.0, 2.0, 2.0), bin(0.0, 0.0, 0.0, 0.0, 0.0)];

        let reduced = reduce(&bins, ErrorModel::No, 7.0);
        assert_eq!(reduced.intensity, vec![15.0, 7.0]);
        assert!(reduced.std.is_none());
        assert!(reduced.sem.is_none());

        let reduced = reduce(&bins, ErrorModel::Poisson, 7.0);
        let sem = reduced.sem.unwrap();
        assert!((sem[0] - 30.0_f64.sqrt() / 2.0).abs() < 1e-12);
        assert_eq!(sem[1], 7.0);
        let std = reduced.std.unwrap();
        assert!((std[0] - 15.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(std[1], 7.0);
    }
}
