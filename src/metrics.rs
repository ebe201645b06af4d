//! Persistent registry of line counts, one entry per file name.
//!
//! Stored as a JSON object keyed by file name. Recording an existing name
//! replaces its entry. Every write replaces the whole file atomically.

use crate::counters::FileMetrics;
use crate::error::{PydeltaError, Result};
use crate::fs::atomic_write_file;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredMetrics {
    #[serde(flatten)]
    pub metrics: FileMetrics,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct MetricsStore {
    path: PathBuf,
    entries: BTreeMap<String, StoredMetrics>,
}

impl MetricsStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            debug!(path = %path.display(), "no metrics store yet");
            return Ok(Self {
                path,
                entries: BTreeMap::new(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            PydeltaError::UserError(format!(
                "failed to read metrics store '{}': {}",
                path.display(),
                e
            ))
        })?;
        let entries = if content.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&content).map_err(|e| {
                PydeltaError::UserError(format!(
                    "metrics store '{}' is corrupt: {}\n\
                     Fix: delete the file or restore it from a backup.",
                    path.display(),
                    e
                ))
            })?
        };

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Inserts or replaces the entry for `metrics.file_name`, then saves.
    pub fn record(&mut self, metrics: FileMetrics) -> Result<()> {
        let name = metrics.file_name.clone();
        self.entries.insert(
            name.clone(),
            StoredMetrics {
                metrics,
                updated_at: Utc::now(),
            },
        );
        self.save()?;
        info!(file = %name, path = %self.path.display(), "recorded metrics");
        Ok(())
    }

    pub fn get(&self, file_name: &str) -> Option<&StoredMetrics> {
        self.entries.get(file_name)
    }

    /// Every entry, sorted by file name.
    pub fn all(&self) -> Vec<&StoredMetrics> {
        self.entries.values().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            PydeltaError::UserError(format!("failed to serialize metrics store: {}", e))
        })?;
        atomic_write_file(&self.path, &format!("{}\n", json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::ClassMetrics;
    use tempfile::TempDir;

    fn sample(name: &str, physical: usize) -> FileMetrics {
        FileMetrics {
            file_name: name.to_string(),
            physical_lines: physical,
            logical_lines: 1,
            classes: vec![ClassMetrics {
                name: "others".to_string(),
                methods: 0,
                physical_lines: physical,
            }],
        }
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = MetricsStore::load(temp_dir.path().join("metrics.json")).unwrap();
        assert!(store.is_empty());
        assert!(store.get("calc.py").is_none());
    }

    #[test]
    fn test_record_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".pydelta").join("metrics.json");

        let mut store = MetricsStore::load(&path).unwrap();
        store.record(sample("calc.py", 10)).unwrap();

        let reloaded = MetricsStore::load(&path).unwrap();
        let entry = reloaded.get("calc.py").unwrap();
        assert_eq!(entry.metrics, sample("calc.py", 10));
    }

    #[test]
    fn test_record_replaces_existing_entry() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("metrics.json");

        let mut store = MetricsStore::load(&path).unwrap();
        store.record(sample("calc.py", 10)).unwrap();
        store.record(sample("calc.py", 12)).unwrap();

        let reloaded = MetricsStore::load(&path).unwrap();
        assert_eq!(reloaded.all().len(), 1);
        assert_eq!(reloaded.get("calc.py").unwrap().metrics.physical_lines, 12);
    }

    #[test]
    fn test_all_is_sorted_by_name() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = MetricsStore::load(temp_dir.path().join("metrics.json")).unwrap();

        store.record(sample("zeta.py", 1)).unwrap();
        store.record(sample("alpha.py", 2)).unwrap();

        let names: Vec<_> = store.all().iter().map(|e| e.metrics.file_name.as_str()).collect();
        assert_eq!(names, vec!["alpha.py", "zeta.py"]);
    }

    #[test]
    fn test_stored_json_is_flat() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("metrics.json");

        let mut store = MetricsStore::load(&path).unwrap();
        store.record(sample("calc.py", 3)).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["calc.py"]["physical_lines"], 3);
        assert!(raw["calc.py"]["updated_at"].is_string());
    }

    #[test]
    fn test_corrupt_store_is_user_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("metrics.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = MetricsStore::load(&path).unwrap_err();
        assert_eq!(err.exit_code(), crate::exit_codes::USER_ERROR);
        assert!(err.to_string().contains("is corrupt"));
    }
}
