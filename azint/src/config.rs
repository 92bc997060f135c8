//! File-backed integration settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::{ErrorModel, Integrate1dConfig, Integrate2dConfig};

/// Integration settings as stored in a YAML or JSON file.
///
/// ```yaml
/// npt_radial: 500
/// npt_azimuthal: 36
/// error_model: poisson
/// radial_range: [0.5, 30.0]
/// empty: -1.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub npt_radial: usize,
    /// Azimuthal bin count; only used by 2D integration.
    pub npt_azimuthal: Option<usize>,
    pub error_model: ErrorModel,
    pub radial_range: Option<[f64; 2]>,
    pub azimuth_range: Option<[f64; 2]>,
    pub empty: Option<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            npt_radial: 1000,
            npt_azimuthal: None,
            error_model: ErrorModel::No,
            radial_range: None,
            azimuth_range: None,
            empty: None,
        }
    }
}

impl EngineConfig {
    /// Load from a `.yaml`/`.yml` or `.json` file and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = common::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Check bin counts and explicit ranges.
    pub fn validate(&self) -> Result<()> {
        if self.npt_radial == 0 {
            return Err(Error::Config("npt_radial must be at least 1".into()));
        }
        if self.npt_azimuthal == Some(0) {
            return Err(Error::Config("npt_azimuthal must be at least 1".into()));
        }
        for (name, range) in [
            ("radial_range", self.radial_range),
            ("azimuth_range", self.azimuth_range),
        ] {
            if let Some([lo, hi]) = range {
                if !lo.is_finite() || !hi.is_finite() || lo > hi {
                    return Err(Error::Config(format!(
                        "{name} [{lo}, {hi}] must be finite with lo <= hi"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn to_1d(&self) -> Integrate1dConfig {
        Integrate1dConfig {
            npt: self.npt_radial,
            error_model: self.error_model,
            radial_range: self.radial_range.map(|[lo, hi]| (lo, hi)),
            empty: self.empty,
        }
    }

    /// Without `npt_azimuthal` the 2D default of 36 sectors is used.
    pub fn to_2d(&self) -> Integrate2dConfig {
        let n_azimuthal = self
            .npt_azimuthal
            .unwrap_or(Integrate2dConfig::default().npt.1);
        Integrate2dConfig {
            npt: (self.npt_radial, n_azimuthal),
            error_model: self.error_model,
            radial_range: self.radial_range.map(|[lo, hi]| (lo, hi)),
            azimuth_range: self.azimuth_range.map(|[lo, hi]| (lo, hi)),
            empty: self.empty,
        }
    }
}

#[cfg(test)]
mod tests {
    use common::SerdeFormat;

    use super::*;

    #[test]
    fn test_parse_yaml() {
        let yaml = "npt_radial: 500\nnpt_azimuthal: 72\nerror_model: poisson\nradial_range: [0.5, 30.0]\nempty: -1.0\n";
        let config: EngineConfig = common::deserialize(yaml, SerdeFormat::Yaml).unwrap();

        assert_eq!(config.npt_radial, 500);
        assert_eq!(config.npt_azimuthal, Some(72));
        assert_eq!(config.error_model, ErrorModel::Poisson);
        assert_eq!(config.radial_range, Some([0.5, 30.0]));
        assert_eq!(config.azimuth_range, None);
        assert_eq!(config.empty, Some(-1.0));
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_json_with_defaults() {
        let json = r#"{ "npt_radial": 64, "error_model": "hybrid" }"#;
        let config: EngineConfig = common::deserialize(json, SerdeFormat::Json).unwrap();

        assert_eq!(config.npt_radial, 64);
        assert_eq!(config.error_model, ErrorModel::Hybrid);
        assert_eq!(config.npt_azimuthal, None);
        assert_eq!(config.empty, None);
    }

    #[test]
    fn test_unknown_error_model_rejected() {
        let json = r#"{ "error_model": "gaussian" }"#;
        assert!(common::deserialize::<EngineConfig>(json, SerdeFormat::Json).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = EngineConfig {
            npt_radial: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = EngineConfig {
            npt_azimuthal: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            azimuth_range: Some([180.0, -180.0]),
            ..Default::default()
        };
        let msg = config.validate().unwrap_err().to_string();
        assert!(msg.contains("azimuth_range"));
    }

    #[test]
    fn test_conversions() {
        let config = EngineConfig {
            npt_radial: 200,
            npt_azimuthal: None,
            error_model: ErrorModel::Variance,
            radial_range: Some([1.0, 2.0]),
            azimuth_range: Some([-90.0, 90.0]),
            empty: Some(-3.0),
        };

        let one = config.to_1d();
        assert_eq!(one.npt, 200);
        assert_eq!(one.radial_range, Some((1.0, 2.0)));
        assert_eq!(one.error_model, ErrorModel::Variance);
        assert_eq!(one.empty, Some(-3.0));

        let two = config.to_2d();
        assert_eq!(two.npt, (200, 36));
        assert_eq!(two.azimuth_range, Some((-90.0, 90.0)));
    }

    #[test]
    fn test_load_round_trip_through_file() {
        let dir = std::env::temp_dir().join("azint_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("engine.yaml");

        let config = EngineConfig {
            npt_radial: 128,
            npt_azimuthal: Some(18),
            error_model: ErrorModel::Poisson,
            ..Default::default()
        };
        common::save_to_file(&config, &path).unwrap();

        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_unknown_extension() {
        let err = EngineConfig::load("engine.toml").unwrap_err();
        assert!(matches!(err, Error::ConfigFile(_)));
    }
}
