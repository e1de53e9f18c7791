//! Validation run configuration, loadable from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) reproduces
//! the plain `validate-data` behaviour.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validator::{NonFinitePolicy, RowPolicy, ValidationPolicy};

pub const DEFAULT_INPUT: &str = "data/breast_cancer.csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Report rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// CSV file to validate.
    pub input: PathBuf,
    pub non_finite: NonFinitePolicy,
    pub row_policy: RowPolicy,
    pub parallel: bool,
    pub parallel_threshold: usize,
    pub format: OutputFormat,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        let policy = ValidationPolicy::default();
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            non_finite: policy.non_finite,
            row_policy: policy.row_policy,
            parallel: policy.parallel,
            parallel_threshold: policy.parallel_threshold,
            format: OutputFormat::Text,
        }
    }
}

impl ValidatorConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            non_finite: self.non_finite,
            row_policy: self.row_policy,
            parallel: self.parallel,
            parallel_threshold: self.parallel_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = ValidatorConfig::from_toml("").unwrap();
        assert_eq!(config, ValidatorConfig::default());
        assert_eq!(config.input, PathBuf::from("data/breast_cancer.csv"));
        assert_eq!(config.policy(), ValidationPolicy::default());
    }

    #[test]
    fn parses_all_fields() {
        let config = ValidatorConfig::from_toml(
            r#"
            input = "other.csv"
            non_finite = "allow"
            row_policy = "first_error_per_row"
            parallel = true
            parallel_threshold = 10
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.input, PathBuf::from("other.csv"));
        assert_eq!(config.non_finite, NonFinitePolicy::Allow);
        assert_eq!(config.row_policy, RowPolicy::FirstErrorPerRow);
        assert!(config.parallel);
        assert_eq!(config.policy().parallel_threshold, 10);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ValidatorConfig::from_toml("strict = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ValidatorConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
