pub trait FloatExt: Sized {
    /// Absolute comparison against [`crate::EPSILON`].
    fn approximately_eq(self, other: Self) -> bool;

    /// Absolute-or-relative comparison: passes when the difference is within
    /// `tolerance`, either absolutely or scaled by the larger magnitude.
    fn close_to(self, other: Self, tolerance: Self) -> bool;
}

impl FloatExt for f32 {
    fn approximately_eq(self, other: Self) -> bool {
        (self - other).abs() < crate::EPSILON as f32
    }

    fn close_to(self, other: Self, tolerance: Self) -> bool {
        let diff = (self - other).abs();
        diff <= tolerance || diff <= tolerance * self.abs().max(other.abs())
    }
}

impl FloatExt for f64 {
    fn approximately_eq(self, other: Self) -> bool {
        (self - other).abs() < crate::EPSILON
    }

    fn close_to(self, other: Self, tolerance: Self) -> bool {
        let diff = (self - other).abs();
        diff <= tolerance || diff <= tolerance * self.abs().max(other.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn f64_approximately_eq() {
        assert!(1.0_f64.approximately_eq(1.0));
        assert!((0.1_f64 + 0.2_f64).approximately_eq(0.3));
        assert!(!1.0_f64.approximately_eq(1.0001));
    }

    #[test]
    fn nan_is_never_close() {
        assert!(!f64::NAN.approximately_eq(f64::NAN));
        assert!(!f64::NAN.close_to(0.0, 1.0));
        assert!(!0.0_f64.close_to(f64::NAN, 1.0));
    }

    #[test]
    fn close_to_scales_with_magnitude() {
        // 1e9 vs 1e9 + 1: absolute diff 1, relative 1e-9
        assert!(1e9_f64.close_to(1e9 + 1.0, 1e-6));
        assert!(!1.0_f64.close_to(1.1, 1e-6));
        assert!(1.0_f32.close_to(1.0000001, 1e-5));
    }

    #[test]
    fn close_to_is_symmetric() {
        let a = 3.0_f64;
        let b = 3.0000001_f64;
        assert_eq!(a.close_to(b, 1e-7), b.close_to(a, 1e-7));
    }
}
