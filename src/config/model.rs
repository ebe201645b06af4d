//! Config struct definition and default implementation.

use crate::diff::DEFAULT_THRESHOLD;
use crate::standard::DEFAULT_MAX_LINE_LENGTH;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "pydelta.yaml";

/// Settings shared by every pydelta command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Comparison
    // =========================================================================
    /// Similarity at or above which two lines are paired as a modification.
    pub similarity_threshold: f64,

    /// Suffix added to the file stem of annotated copies.
    pub annotated_suffix: String,

    // =========================================================================
    // Coding standard
    // =========================================================================
    /// Longer lines are wrapped before parsing; any that cannot be wrapped
    /// produce a warning.
    pub max_line_length: usize,

    /// Accepted source file extensions, without leading dots.
    pub source_extensions: Vec<String>,

    // =========================================================================
    // Persistence
    // =========================================================================
    /// JSON store of recorded line counts.
    pub metrics_path: PathBuf,

    /// Append-only NDJSON run log.
    pub history_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_THRESHOLD,
            annotated_suffix: "_annotated".to_string(),
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            source_extensions: vec!["py".to_string()],
            metrics_path: PathBuf::from(".pydelta/metrics.json"),
            history_path: PathBuf::from(".pydelta/history.ndjson"),
        }
    }
}
