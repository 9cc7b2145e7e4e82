//! Configuration file loading for the review tool.

use std::path::{Path, PathBuf};

use cloud_eval::{ConfigError, FetcherConfig};
use serde::{Deserialize, Serialize};

/// Top-level settings, read from `review.toml` by default.
///
/// ```toml
/// openings_path = "data/openings.json"
///
/// [cloud_eval]
/// rate_limit_delay_ms = 250
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReviewConfig {
    /// Cloud evaluation client, cache and batching settings.
    #[serde(default)]
    pub cloud_eval: FetcherConfig,
    /// JSON opening catalog to use instead of the built-in one.
    #[serde(default)]
    pub openings_path: Option<PathBuf>,
}

impl ReviewConfig {
    /// Loads the configuration, returning defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] if it contains invalid TOML, or
    /// [`ConfigError::Invalid`] if a cloud-eval setting is unusable.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str::<Self>(&content)?
        } else {
            Self::default()
        };
        config.cloud_eval.validate()?;
        Ok(config)
    }

    /// Default configuration file: `review.toml` in the working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("review.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let config: ReviewConfig = toml::from_str(
            r#"
openings_path = "data/openings.json"

[cloud_eval]
base_url = "http://localhost:9000"
multi_pv = 1
max_attempts = 4
"#,
        )
        .unwrap();
        assert_eq!(
            config.openings_path,
            Some(PathBuf::from("data/openings.json"))
        );
        assert_eq!(config.cloud_eval.base_url, "http://localhost:9000");
        assert_eq!(config.cloud_eval.multi_pv, 1);
        assert_eq!(config.cloud_eval.max_attempts, 4);
        assert_eq!(config.cloud_eval.max_batch, 100);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: ReviewConfig = toml::from_str("").unwrap();
        assert_eq!(config, ReviewConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReviewConfig::load(&dir.path().join("review.toml")).unwrap();
        assert!(config.openings_path.is_none());
        assert_eq!(config.cloud_eval, FetcherConfig::default());
    }

    #[test]
    fn test_load_rejects_invalid_setting() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[cloud_eval]\nmax_batch = 0").unwrap();
        let err = ReviewConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_batch", .. }));
    }
}
