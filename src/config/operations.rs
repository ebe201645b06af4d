//! Config loading, validation, and overrides.

use super::model::Config;
use crate::error::{PydeltaError, Result};
use std::path::Path;
use tracing::debug;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(PydeltaError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            PydeltaError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        debug!(path = %path.display(), "loaded config file");
        Self::from_yaml(&content)
    }

    /// Load config from `path` if it exists, defaults otherwise.
    ///
    /// An explicitly requested file that is missing is still an error; pass
    /// `required = false` for the implicit `pydelta.yaml` lookup.
    pub fn load_or_default<P: AsRef<Path>>(path: P, required: bool) -> Result<Self> {
        let path = path.as_ref();
        if !required && !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields are ignored; an empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| PydeltaError::UserError(format!("failed to parse config YAML: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            PydeltaError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `similarity_threshold` must lie in `0.0..=1.0`
    /// - `max_line_length` must be positive
    /// - `annotated_suffix` must be non-empty
    /// - `source_extensions` entries must be non-empty and have no leading dots
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(PydeltaError::UserError(format!(
                "config validation failed: similarity_threshold must be between 0 and 1 (found {})",
                self.similarity_threshold
            )));
        }

        if self.max_line_length == 0 {
            return Err(PydeltaError::UserError(
                "config validation failed: max_line_length must be greater than 0".to_string(),
            ));
        }

        if self.annotated_suffix.is_empty() {
            return Err(PydeltaError::UserError(
                "config validation failed: annotated_suffix must be non-empty".to_string(),
            ));
        }

        for ext in &self.source_extensions {
            if ext.is_empty() {
                return Err(PydeltaError::UserError(
                    "config validation failed: source_extensions entries must be non-empty"
                        .to_string(),
                ));
            }
            if ext.starts_with('.') {
                return Err(PydeltaError::UserError(format!(
                    "config validation failed: source_extensions entries must not have leading dots (found '{}'). Use '{}' instead.",
                    ext,
                    ext.trim_start_matches('.')
                )));
            }
        }

        Ok(())
    }

    /// Get source_extensions normalized to lowercase.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.source_extensions
            .iter()
            .map(|s| s.to_lowercase())
            .collect()
    }

    /// Replaces the threshold with a command-line value, re-validating it.
    pub fn with_threshold(mut self, threshold: Option<f64>) -> Result<Self> {
        if let Some(threshold) = threshold {
            self.similarity_threshold = threshold;
            self.validate()?;
        }
        Ok(self)
    }
}
