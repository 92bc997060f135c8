use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Statistical model used to estimate and propagate per-pixel uncertainty.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ErrorModel {
    /// No uncertainty is propagated.
    #[default]
    No,
    /// Caller-supplied per-pixel variance.
    Variance,
    /// Variance equals the raw count (signal + dark).
    Poisson,
    /// Variance estimated from the dispersion of pixels within each bin.
    Azimuthal,
    /// Caller-supplied variance, Poisson where none is given.
    Hybrid,
}

impl ErrorModel {
    /// `true` for every model except [`ErrorModel::No`].
    #[inline]
    pub fn is_active(self) -> bool {
        self != Self::No
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_default_is_no() {
        assert_eq!(ErrorModel::default(), ErrorModel::No);
        assert!(!ErrorModel::No.is_active());
    }

    #[test]
    fn test_every_other_model_is_active() {
        for model in ErrorModel::iter().filter(|m| *m != ErrorModel::No) {
            assert!(model.is_active(), "{model} should be active");
        }
    }

    #[test]
    fn test_parse_and_display() {
        for model in ErrorModel::iter() {
            let name = model.to_string();
            assert_eq!(name, name.to_lowercase());
            assert_eq!(ErrorModel::from_str(&name).unwrap(), model);
        }
        assert_eq!(ErrorModel::from_str("Poisson").unwrap(), ErrorModel::Poisson);
        assert_eq!(ErrorModel::from_str("HYBRID").unwrap(), ErrorModel::Hybrid);
        assert!(ErrorModel::from_str("gaussian").is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ErrorModel::Azimuthal).unwrap();
        assert_eq!(json, "\"azimuthal\"");
        let back: ErrorModel = serde_json::from_str("\"variance\"").unwrap();
        assert_eq!(back, ErrorModel::Variance);
    }
}
