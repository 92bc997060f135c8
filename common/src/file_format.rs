use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum FileExtensionError {
    #[error("Failed to get file extension")]
    MissingFileExtension,
    #[error("Unsupported file extension for file: {0}")]
    UnsupportedFileExtension(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SerdeFormatError {
    #[error(transparent)]
    Extension(#[from] FileExtensionError),
    #[error("YAML serialization failed")]
    Yaml(#[from] serde_yml::Error),
    #[error("JSON serialization failed")]
    Json(#[from] serde_json::Error),
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type SerdeFormatResult<T> = Result<T, SerdeFormatError>;

pub fn get_file_extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|os_str| os_str.to_str())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SerdeFormat {
    Yaml,
    Json,
}

impl SerdeFormat {
    pub fn from_path(path: &Path) -> Result<Self, FileExtensionError> {
        let ext = get_file_extension(path).ok_or(FileExtensionError::MissingFileExtension)?;

        if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
            Ok(Self::Yaml)
        } else if ext.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(FileExtensionError::UnsupportedFileExtension(
                path.display().to_string(),
            ))
        }
    }
}

pub fn serialize<T: Serialize>(value: &T, format: SerdeFormat) -> SerdeFormatResult<String> {
    match format {
        SerdeFormat::Yaml => Ok(serde_yml::to_string(value)?),
        SerdeFormat::Json => Ok(serde_json::to_string_pretty(value)?),
    }
}

pub fn deserialize<T: DeserializeOwned>(
    serialized: &str,
    format: SerdeFormat,
) -> SerdeFormatResult<T> {
    match format {
        SerdeFormat::Yaml => Ok(serde_yml::from_str(serialized)?),
        SerdeFormat::Json => Ok(serde_json::from_str(serialized)?),
    }
}

/// Reads and deserializes a file, picking the format from its extension.
pub fn load_from_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> SerdeFormatResult<T> {
    let path = path.as_ref();
    let format = SerdeFormat::from_path(path)?;
    let text = std::fs::read_to_string(path).map_err(|source| SerdeFormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    deserialize(&text, format)
}

/// Serializes `value` into a file, picking the format from its extension.
pub fn save_to_file<T: Serialize>(value: &T, path: impl AsRef<Path>) -> SerdeFormatResult<()> {
    let path = path.as_ref();
    let format = SerdeFormat::from_path(path)?;
    let text = serialize(value, format)?;
    std::fs::write(path, text).map_err(|source| SerdeFormatError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        bins: usize,
        range: Option<[f64; 2]>,
    }

    fn sample() -> Sample {
        Sample {
            name: "profile".to_string(),
            bins: 100,
            range: Some([0.0, 1.5]),
        }
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            SerdeFormat::from_path(Path::new("a/b.yaml")).unwrap(),
            SerdeFormat::Yaml
        );
        assert_eq!(
            SerdeFormat::from_path(Path::new("b.YML")).unwrap(),
            SerdeFormat::Yaml
        );
        assert_eq!(
            SerdeFormat::from_path(Path::new("b.json")).unwrap(),
            SerdeFormat::Json
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = SerdeFormat::from_path(Path::new("config.toml")).unwrap_err();
        assert!(err.to_string().contains("config.toml"));

        let err = SerdeFormat::from_path(Path::new("config")).unwrap_err();
        assert!(matches!(err, FileExtensionError::MissingFileExtension));
    }

    #[test]
    fn yaml_and_json_preserve_value() {
        for format in [SerdeFormat::Yaml, SerdeFormat::Json] {
            let text = serialize(&sample(), format).unwrap();
            let back: Sample = deserialize(&text, format).unwrap();
            assert_eq!(back, sample(), "format {:?}", format);
        }
    }

    #[test]
    fn load_missing_file_reports_path() {
        let err = load_from_file::<Sample>("/nonexistent/dir/config.yaml").unwrap_err();
        assert!(matches!(err, SerdeFormatError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/dir/config.yaml"));
    }

    #[test]
    fn save_then_load_file() {
        let path = std::env::temp_dir().join(format!("common_ff_{}.json", std::process::id()));
        save_to_file(&sample(), &path).unwrap();
        let back: Sample = load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(back, sample());
    }
}
