//! Change records produced by a tree comparison.

use serde::Serialize;
use std::fmt;

/// Similarity recorded when no credible counterpart exists.
pub const NO_MATCH: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Deleted,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Added => write!(f, "added"),
            ChangeKind::Deleted => write!(f, "deleted"),
        }
    }
}

/// One detected change.
///
/// `original` and `new` are sequence ids into the original and new trees.
/// Pure additions and deletions populate one side; a modification pairing
/// populates both. `sequence_id` is the id the record is filed under: the
/// original node's for deletions, the new node's for additions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    pub kind: ChangeKind,
    pub original: Option<usize>,
    pub new: Option<usize>,
    pub sequence_id: usize,
    pub similarity: f64,
}

impl Change {
    pub fn added(new: usize) -> Self {
        Self {
            kind: ChangeKind::Added,
            original: None,
            new: Some(new),
            sequence_id: new,
            similarity: NO_MATCH,
        }
    }

    pub fn deleted(original: usize) -> Self {
        Self {
            kind: ChangeKind::Deleted,
            original: Some(original),
            new: None,
            sequence_id: original,
            similarity: NO_MATCH,
        }
    }

    /// Both halves of a modification, filed under each side's id.
    pub fn modified(original: usize, new: usize, similarity: f64) -> [Self; 2] {
        [
            Self {
                kind: ChangeKind::Deleted,
                original: Some(original),
                new: Some(new),
                sequence_id: original,
                similarity,
            },
            Self {
                kind: ChangeKind::Added,
                original: Some(original),
                new: Some(new),
                sequence_id: new,
                similarity,
            },
        ]
    }

    #[cfg(test)]
    pub(crate) fn is_paired(&self) -> bool {
        self.original.is_some() && self.new.is_some()
    }
}

/// Tally of a change list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSummary {
    /// Additions with no similar counterpart.
    pub added_new: usize,
    /// Additions paired with a similar original line.
    pub added_modified: usize,
    pub deleted: usize,
}

impl ChangeSummary {
    pub fn from_changes(changes: &[Change]) -> Self {
        changes
            .iter()
            .fold(Self::default(), |mut summary, change| {
                match change.kind {
                    ChangeKind::Added if change.similarity >= NO_MATCH => summary.added_new += 1,
                    ChangeKind::Added => summary.added_modified += 1,
                    ChangeKind::Deleted => summary.deleted += 1,
                }
                summary
            })
    }

    pub fn total(&self) -> usize {
        self.added_new + self.added_modified + self.deleted
    }
}
