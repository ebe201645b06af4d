//! Marks changed statements in copies of the compared sources.
//!
//! Each change appends a trailing comment to the last physical line of its
//! statement: ` # DELETED` in the original, ` # ADDED <p>%` in the new
//! version. Statements spanning several physical lines also note how many
//! lines were folded into one.

use crate::diff::{Change, ChangeKind, NO_MATCH};
use crate::error::{PydeltaError, Result};
use crate::fs::atomic_write_file;
use crate::tree::LineMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Returns annotated copies of the original and new lines.
pub fn annotate<S: AsRef<str>>(
    original_lines: &[S],
    original_map: &LineMap,
    new_lines: &[S],
    new_map: &LineMap,
    changes: &[Change],
) -> (Vec<String>, Vec<String>) {
    let mut original: Vec<String> = original_lines.iter().map(|l| l.as_ref().to_string()).collect();
    let mut new: Vec<String> = new_lines.iter().map(|l| l.as_ref().to_string()).collect();

    for change in changes {
        let (lines, map) = match change.kind {
            ChangeKind::Deleted => (&mut original, original_map),
            ChangeKind::Added => (&mut new, new_map),
        };
        mark(lines, map, change);
    }

    (original, new)
}

fn mark(lines: &mut [String], map: &LineMap, change: &Change) {
    let Some(span) = map.get(&change.sequence_id) else {
        warn!(id = change.sequence_id, kind = %change.kind, "change has no line mapping, skipping");
        return;
    };
    let Some(line) = span.last().and_then(|&index| lines.get_mut(index)) else {
        warn!(id = change.sequence_id, "mapped line is out of range, skipping");
        return;
    };

    let mut marked = line.trim_end().to_string();
    marked.push_str(&marker(change));
    if span.len() > 1 {
        marked.push_str(&format!(" (previous {} lines count as 1)", span.len()));
    }
    *line = marked;
}

/// The comment appended for one change.
pub fn marker(change: &Change) -> String {
    match change.kind {
        ChangeKind::Deleted => " # DELETED".to_string(),
        ChangeKind::Added => format!(" # ADDED {}%", percent(change.similarity)),
    }
}

fn percent(similarity: f64) -> u32 {
    if similarity >= NO_MATCH {
        100
    } else {
        (similarity * 100.0).round() as u32
    }
}

/// `src/calc.py` + `_annotated` -> `src/calc_annotated.py`.
pub fn annotated_path(path: &Path, suffix: &str) -> Result<PathBuf> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| PydeltaError::UserError(format!("invalid source path '{}'", path.display())))?;

    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext),
        None => format!("{}{}", stem, suffix),
    };
    Ok(path.with_file_name(name))
}

/// Writes annotated lines next to `source` and returns the written path.
pub fn write_annotated(source: &Path, suffix: &str, lines: &[String]) -> Result<PathBuf> {
    let target = annotated_path(source, suffix)?;
    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }
    atomic_write_file(&target, &content)?;
    Ok(target)
}
