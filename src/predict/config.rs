//! Prediction configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Where the rejection threshold comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionMode {
    /// Use the threshold stored on the tree
    #[default]
    FromTree,
    /// Never reject
    Disabled,
    /// Use `threshold` from this config instead of the tree's
    Override,
}

/// Options for a prediction call.
///
/// ```yaml
/// rejection: override
/// threshold: 0.75
/// record_paths: true
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictConfig {
    /// Rejection threshold source
    #[serde(default)]
    pub rejection: RejectionMode,

    /// Threshold used with `rejection: override`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Keep full descent paths in explained predictions
    #[serde(default)]
    pub record_paths: bool,
}

impl PredictConfig {
    /// Reject nothing, whatever the tree says.
    pub fn without_rejection() -> Self {
        Self { rejection: RejectionMode::Disabled, ..Self::default() }
    }

    /// Use `threshold` instead of the tree's threshold.
    pub fn with_threshold(threshold: f64) -> Self {
        Self { rejection: RejectionMode::Override, threshold: Some(threshold), ..Self::default() }
    }

    pub fn record_paths(mut self, record: bool) -> Self {
        self.record_paths = record;
        self
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a YAML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let yaml = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Check that `threshold` is present exactly when it is used, and usable.
    pub fn validate(&self) -> Result<()> {
        match (self.rejection, self.threshold) {
            (RejectionMode::Override, None) => Err(Error::ConfigError(
                "rejection: override requires a threshold".into(),
            )),
            (RejectionMode::Override, Some(t)) if !t.is_finite() || t < 0.0 => Err(
                Error::ConfigError(format!("threshold must be finite and >= 0, got {t}")),
            ),
            (RejectionMode::FromTree | RejectionMode::Disabled, Some(_)) => Err(Error::ConfigError(
                "threshold is only used with rejection: override".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Effective rejection threshold given the tree's own.
    pub fn effective_threshold(&self, tree_threshold: f64) -> f64 {
        match self.rejection {
            RejectionMode::FromTree => tree_threshold,
            RejectionMode::Disabled => 0.0,
            RejectionMode::Override => self.threshold.unwrap_or(0.0),
        }
    }
}
