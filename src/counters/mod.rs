//! Physical and logical line counts over a [`SyntaxTree`].
//!
//! Physical lines count statements as they would be written one per line:
//! `import os, sys` stands for two lines and `a, b = 1, 2` for two
//! assignments. Comments, docstrings and blank lines never count. Logical
//! lines count only the statements that open a unit of logic (definitions,
//! branches, loops, comprehensions and the like).

#[cfg(test)]
mod tests;

use crate::tree::{Node, NodeKind, SyntaxTree};
use serde::{Deserialize, Serialize};

/// Name of the pseudo-class that collects everything outside classes.
pub const OTHERS: &str = "others";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub name: String,
    pub methods: usize,
    pub physical_lines: usize,
}

/// Counts for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetrics {
    pub file_name: String,
    pub physical_lines: usize,
    pub logical_lines: usize,
    pub classes: Vec<ClassMetrics>,
}

impl FileMetrics {
    pub fn from_tree(file_name: impl Into<String>, tree: &SyntaxTree) -> Self {
        Self {
            file_name: file_name.into(),
            physical_lines: physical_lines(tree, 0),
            logical_lines: logical_lines(tree, 0),
            classes: class_metrics(tree),
        }
    }
}

/// Physical lines of the subtree rooted at `id`, `id` included.
pub fn physical_lines(tree: &SyntaxTree, id: usize) -> usize {
    let node = tree.node(id);
    own_physical_lines(node)
        + node
            .children
            .iter()
            .map(|&child| physical_lines(tree, child))
            .sum::<usize>()
}

fn own_physical_lines(node: &Node) -> usize {
    match node.kind {
        NodeKind::Import => import_lines(&node.text),
        NodeKind::Assignment => assignment_lines(&node.text),
        kind if kind.is_comment() => 0,
        kind if kind.is_code() => 1,
        _ => 0,
    }
}

/// `import a, b` imports two modules; `from m import a, b` is one statement.
fn import_lines(text: &str) -> usize {
    if !text.contains(',') || text.starts_with("from") {
        return 1;
    }
    text.split("import").nth(1).map_or(1, |names| names.split(',').count())
}

fn assignment_lines(text: &str) -> usize {
    text.split('=').next().map_or(1, |targets| targets.split(',').count())
}

/// Logical lines of the subtree rooted at `id`, `id` included.
///
/// A node with no text (other than the root) ends the walk below it.
pub fn logical_lines(tree: &SyntaxTree, id: usize) -> usize {
    let node = tree.node(id);
    if node.kind != NodeKind::Root && node.text.is_empty() {
        return 0;
    }

    usize::from(node.kind.is_logical())
        + node
            .children
            .iter()
            .map(|&child| logical_lines(tree, child))
            .sum::<usize>()
}

/// One entry per class in document order (nested classes included), then an
/// [`OTHERS`] entry with the physical lines outside every class.
pub fn class_metrics(tree: &SyntaxTree) -> Vec<ClassMetrics> {
    let mut classes: Vec<ClassMetrics> = tree
        .descendants(0)
        .into_iter()
        .filter(|(_, node)| node.kind == NodeKind::Class)
        .map(|(_, node)| ClassMetrics {
            name: class_name(&node.text).to_string(),
            methods: node
                .children
                .iter()
                .filter(|&&child| tree.node(child).kind == NodeKind::Method)
                .count(),
            physical_lines: physical_lines(tree, node.sequence_id),
        })
        .collect();

    classes.push(ClassMetrics {
        name: OTHERS.to_string(),
        methods: 0,
        physical_lines: lines_outside_classes(tree, 0),
    });
    classes
}

fn lines_outside_classes(tree: &SyntaxTree, id: usize) -> usize {
    let node = tree.node(id);
    if node.kind == NodeKind::Class {
        return 0;
    }
    own_physical_lines(node)
        + node
            .children
            .iter()
            .map(|&child| lines_outside_classes(tree, child))
            .sum::<usize>()
}

/// `class Foo(Base):` -> `Foo`.
pub fn class_name(text: &str) -> &str {
    let rest = text.strip_prefix("class").unwrap_or(text).trim_start();
    let end = rest.find(['(', ':']).unwrap_or(rest.len());
    rest[..end].trim()
}
