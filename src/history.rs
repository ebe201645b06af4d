//! Append-only run history.
//!
//! Every `compare` and `count` run appends one NDJSON record (one JSON object
//! per line) to the configured `history_path`.
//!
//! # Record Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: `compare` or `count`
//! - `actor`: `user@HOST`
//! - `details`: freeform object with action-specific fields
//!
//! ```no_run
//! use pydelta::history::{Event, EventAction, append_event};
//! use serde_json::json;
//! use std::path::Path;
//!
//! let event = Event::new(EventAction::Count).with_details(json!({"file": "calc.py"}));
//! append_event(Path::new(".pydelta/history.ndjson"), &event)?;
//! # Ok::<(), pydelta::error::PydeltaError>(())
//! ```

use crate::error::{PydeltaError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Two versions of a file were compared.
    Compare,
    /// A file's lines were counted.
    Count,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Compare => write!(f, "compare"),
            EventAction::Count => write!(f, "count"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub ts: DateTime<Utc>,
    pub action: EventAction,
    /// `user@HOST` of whoever ran the command.
    pub actor: String,
    pub details: Value,
}

impl Event {
    /// New event stamped with the current time and actor.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor_string(),
            details: Value::Object(serde_json::Map::new()),
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serializes the event to a single JSON line.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            PydeltaError::UserError(format!("failed to serialize history record: {}", e))
        })
    }
}

fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Appends `event` as one line to the history file, creating it (and its
/// directory) if needed.
pub fn append_event(path: &Path, event: &Event) -> Result<()> {
    let line = event.to_ndjson_line()?;

    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        fs::create_dir_all(dir).map_err(|e| {
            PydeltaError::UserError(format!(
                "failed to create history directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| {
            PydeltaError::UserError(format!(
                "failed to open history file '{}': {}",
                path.display(),
                e
            ))
        })?;

    writeln!(file, "{}", line).map_err(|e| {
        PydeltaError::UserError(format!(
            "failed to write history record to '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.sync_all().map_err(|e| {
        PydeltaError::UserError(format!(
            "failed to sync history file '{}': {}",
            path.display(),
            e
        ))
    })?;

    Ok(())
}

/// Reads every record back. A missing file has no records.
pub fn read_events(path: &Path) -> Result<Vec<Event>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        PydeltaError::UserError(format!(
            "failed to read history file '{}': {}",
            path.display(),
            e
        ))
    })?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(n, line)| {
            serde_json::from_str(line).map_err(|e| {
                PydeltaError::UserError(format!(
                    "corrupt history record {} in '{}': {}",
                    n + 1,
                    path.display(),
                    e
                ))
            })
        })
        .collect()
}
