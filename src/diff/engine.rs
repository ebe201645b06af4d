//! Greedy, left-to-right comparison of two statement trees.
//!
//! Siblings are walked with one cursor per side. Identical texts are matched
//! and descended into; anything else goes through, in order, an existence
//! check in the original, a displacement check in the new version, and a
//! similarity pairing. The result depends on traversal order and is not a
//! minimal edit script.

use super::change::{Change, ChangeKind, NO_MATCH};
use super::similarity::{ratio, round2};
use crate::tree::SyntaxTree;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Similarity at or above which two lines count as versions of each other.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Compares two trees with the default threshold.
pub fn diff_trees(original: &SyntaxTree, new: &SyntaxTree) -> Vec<Change> {
    DiffSession::new(original, new, DEFAULT_THRESHOLD).run()
}

/// Bookkeeping for one comparison run.
#[derive(Debug)]
pub struct DiffSession<'a> {
    original: &'a SyntaxTree,
    new: &'a SyntaxTree,
    threshold: f64,
    changes: Vec<Change>,
    /// Original id -> new id it was matched to from the new side.
    matched_as_added: HashMap<usize, usize>,
    /// New id -> original id it was matched to from the original side.
    matched_as_deleted: HashMap<usize, usize>,
}

impl<'a> DiffSession<'a> {
    pub fn new(original: &'a SyntaxTree, new: &'a SyntaxTree, threshold: f64) -> Self {
        Self {
            original,
            new,
            threshold,
            changes: Vec::new(),
            matched_as_added: HashMap::new(),
            matched_as_deleted: HashMap::new(),
        }
    }

    /// Runs the comparison from both roots and returns the changes in
    /// discovery order.
    pub fn run(mut self) -> Vec<Change> {
        self.compare_children(0, 0);
        debug!(
            changes = self.changes.len(),
            threshold = self.threshold,
            "tree comparison finished"
        );
        self.changes
    }

    fn compare_children(&mut self, parent_a: usize, parent_b: usize) {
        let (original, new) = (self.original, self.new);
        let a = original.children(parent_a);
        let b = new.children(parent_b);
        let (mut i, mut j) = (0, 0);

        while i < a.len() && j < b.len() {
            let node_a = original.node(a[i]);
            if node_a.is_whitespace() {
                i += 1;
                continue;
            }
            let node_b = new.node(b[j]);
            if node_b.is_whitespace() {
                j += 1;
                continue;
            }

            if node_a.text == node_b.text {
                self.compare_children(a[i], b[j]);
                i += 1;
                j += 1;
                continue;
            }

            let similarity = ratio(&node_a.text, &node_b.text);

            if !self.exists_in_original(a, b, i, j) {
                j += 1;
            } else if self.exists_in_new(a, b, i, j) {
                trace!(id = a[i], "displaced in new version");
                self.delete_with_subtree(a[i]);
                i += 1;
            } else if similarity >= self.threshold {
                if self.find_similar(a, b, i, j) {
                    let rounded = round2(similarity);
                    self.changes.extend(Change::modified(a[i], b[j], rounded));
                    self.compare_children(a[i], b[j]);
                    i += 1;
                    j += 1;
                } else {
                    self.delete_with_subtree(a[i]);
                    i += 1;
                }
            } else if self.find_similar(a, b, i, j + 1) {
                // A better partner for a[i] lies further on; b[j] is new.
                self.changes.push(Change {
                    kind: ChangeKind::Added,
                    original: Some(a[i]),
                    new: Some(b[j]),
                    sequence_id: b[j],
                    similarity: NO_MATCH,
                });
                self.mark_subtree(new, b[j], ChangeKind::Added);
                j += 1;
            } else {
                self.delete_with_subtree(a[i]);
                i += 1;
            }
        }

        for &id in &a[i..] {
            if !original.node(id).is_whitespace() {
                self.delete_with_subtree(id);
            }
        }
        for &id in &b[j..] {
            if !new.node(id).is_whitespace() {
                self.add_with_subtree(id);
            }
        }
    }

    /// Whether `b[j]` has a counterpart in `a[i..]`, by an earlier pairing,
    /// by identical text, or by similarity.
    ///
    /// Records a pure addition and returns `false` when there is none. Text
    /// found only in the last slot of `a` while `i == 0` counts as wrapped
    /// from the tail to the head and is also reported as an addition.
    fn exists_in_original(&mut self, a: &[usize], b: &[usize], i: usize, j: usize) -> bool {
        let (original, new) = (self.original, self.new);
        let node_b = new.node(b[j]);

        for (k, &candidate) in a.iter().enumerate().skip(i) {
            if let Some(&paired) = self.matched_as_added.get(&candidate) {
                if paired == b[j] {
                    return true;
                }
                continue;
            }
            if original.node(candidate).text == node_b.text {
                if k == a.len() - 1 && i == 0 {
                    trace!(id = b[j], "wrapped from tail of original");
                    self.add_with_subtree(b[j]);
                    return false;
                }
                self.matched_as_added.insert(candidate, b[j]);
                return true;
            }
        }

        for &candidate in &a[i..] {
            let node_a = original.node(candidate);
            if ratio(&node_b.text, &node_a.text) >= self.threshold
                && !self.matched_as_added.contains_key(&candidate)
                && !text_in(new, b, &node_a.text)
            {
                self.matched_as_added.insert(candidate, b[j]);
                return true;
            }
        }

        self.add_with_subtree(b[j]);
        false
    }

    /// Whether `a[i]` reappears verbatim later in `b`, unclaimed.
    fn exists_in_new(&mut self, a: &[usize], b: &[usize], i: usize, j: usize) -> bool {
        let (original, new) = (self.original, self.new);
        let text = &original.node(a[i]).text;

        for &candidate in &b[j + 1..] {
            let node_b = new.node(candidate);
            if node_b.is_whitespace() {
                continue;
            }
            if node_b.text == *text && !self.matched_as_deleted.contains_key(&candidate) {
                self.matched_as_deleted.insert(candidate, a[i]);
                return true;
            }
        }
        false
    }

    /// Searches `b[from..]` for an unclaimed line similar to `a[i]` whose
    /// text does not already exist verbatim among `a`.
    fn find_similar(&mut self, a: &[usize], b: &[usize], i: usize, from: usize) -> bool {
        let (original, new) = (self.original, self.new);
        let text = &original.node(a[i]).text;

        for &candidate in b.iter().skip(from) {
            let node_b = new.node(candidate);
            if node_b.is_whitespace() {
                continue;
            }
            if ratio(text, &node_b.text) >= self.threshold
                && !self.matched_as_deleted.contains_key(&candidate)
                && !text_in(original, a, &node_b.text)
            {
                self.matched_as_deleted.insert(candidate, a[i]);
                return true;
            }
        }
        false
    }

    fn add_with_subtree(&mut self, id: usize) {
        let new = self.new;
        self.changes.push(Change::added(id));
        self.mark_subtree(new, id, ChangeKind::Added);
    }

    fn delete_with_subtree(&mut self, id: usize) {
        let original = self.original;
        self.changes.push(Change::deleted(id));
        self.mark_subtree(original, id, ChangeKind::Deleted);
    }

    /// Emits one change per non-blank descendant of `id`.
    fn mark_subtree(&mut self, tree: &SyntaxTree, id: usize, kind: ChangeKind) {
        for &child in tree.children(id) {
            if tree.node(child).is_whitespace() {
                continue;
            }
            self.changes.push(match kind {
                ChangeKind::Added => Change::added(child),
                ChangeKind::Deleted => Change::deleted(child),
            });
            self.mark_subtree(tree, child, kind);
        }
    }
}

/// Some sibling carries exactly `text`.
fn text_in(tree: &SyntaxTree, siblings: &[usize], text: &str) -> bool {
    siblings.iter().any(|&id| tree.node(id).text == text)
}
