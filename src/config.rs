//! YAML configuration file support for showmatch.
//!
//! Lets a test suite or the `showmatch` binary keep its normalization and
//! comparison settings in one versioned YAML file instead of building them in
//! code.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! # showmatch configuration
//! version: "1.0"
//!
//! normalize:
//!   simplify_sequences: true
//!   replacements:
//!     - ["Float64", "Float"]
//!     - [{ pattern: "0x[0-9a-f]+" }, "ADDR"]
//!
//! compare:
//!   float_rule: { type: relative, rtol: 0.001 }
//!   int_rule: { type: exact }
//!   path_rule: { type: trailing_components, count: 2 }
//!   path_style: unix
//!   report_on_mismatch: true
//!   raise_on_mismatch: true
//! ```
//!
//! Replacement pairs use the same shape as
//! [`NormalizeConfig::with_replacement_spec`]: a list of two-element lists
//! whose first element is a literal string or a `{pattern: ..}` /
//! `{literal: ..}` map.

use std::fs;
use std::path::Path;

use compare::CompareConfig;
use normalize::{NormalizeConfig, NormalizeError};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error("invalid normalize.replacements: {0}")]
    Replacements(#[from] NormalizeError),
}

/// Top-level YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ShowMatchConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub normalize: NormalizeYamlConfig,

    #[serde(default)]
    pub compare: CompareConfig,
}

impl ShowMatchConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: ShowMatchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.normalize.to_normalize_config()?;
        self.compare
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("compare: {err}")))?;

        Ok(())
    }

    /// Build the normalizer settings, parsing the replacement table.
    pub fn normalize_config(&self) -> Result<NormalizeConfig, ConfigLoadError> {
        self.normalize.to_normalize_config()
    }

    pub fn compare_config(&self) -> CompareConfig {
        self.compare.clone()
    }
}

impl Default for ShowMatchConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            normalize: NormalizeYamlConfig::default(),
            compare: CompareConfig::default(),
        }
    }
}

/// Normalization section of the YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeYamlConfig {
    #[serde(default = "true_value")]
    pub simplify_sequences: bool,

    /// Raw replacement table; parsed and validated on load.
    #[serde(default)]
    pub replacements: JsonValue,
}

impl NormalizeYamlConfig {
    fn to_normalize_config(&self) -> Result<NormalizeConfig, ConfigLoadError> {
        let mut cfg = NormalizeConfig::default().with_replacement_spec(&self.replacements)?;
        if !self.simplify_sequences {
            cfg = cfg.without_sequence_simplification();
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

impl Default for NormalizeYamlConfig {
    fn default() -> Self {
        Self {
            simplify_sequences: true,
            replacements: JsonValue::Null,
        }
    }
}

fn true_value() -> bool {
    true
}
