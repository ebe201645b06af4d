//! Recursive tree walk applying the standard.

use super::patterns::CompiledPatterns;
use super::types::{Rule, StandardReport, Violation};
use crate::error::Result;
use crate::tree::{NodeKind, SyntaxTree};
use tracing::debug;

pub const DEFAULT_MAX_LINE_LENGTH: usize = 80;

/// Checks one tree with a fresh checker.
pub fn check_tree<S: AsRef<str>>(
    tree: &SyntaxTree,
    lines: &[S],
    max_line_length: usize,
) -> Result<StandardReport> {
    Ok(StandardChecker::new(max_line_length)?.check(tree, lines))
}

#[derive(Debug, Clone)]
pub struct StandardChecker {
    patterns: CompiledPatterns,
    max_line_length: usize,
}

impl StandardChecker {
    pub fn new(max_line_length: usize) -> Result<Self> {
        Ok(Self {
            patterns: CompiledPatterns::new()?,
            max_line_length,
        })
    }

    /// Collects every violation in the tree, at most one per node, plus
    /// long-line warnings over `lines`.
    pub fn check<S: AsRef<str>>(&self, tree: &SyntaxTree, lines: &[S]) -> StandardReport {
        let mut report = StandardReport::default();

        if tree.root().children.is_empty() {
            report.violations.push(Violation::new(Rule::EmptyFile, None, ""));
        }
        for (_, node) in tree.descendants(0) {
            if let Some(rule) = self.node_rule(node.kind, !node.children.is_empty(), &node.text) {
                let line = tree
                    .lines_of(node.sequence_id)
                    .and_then(|lines| lines.first())
                    .map(|&index| index + 1);
                report
                    .violations
                    .push(Violation::new(rule, line, node.text.clone()));
            }
        }

        for (index, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let length = line.chars().count();
            if length > self.max_line_length {
                report.warnings.push(Violation::new(
                    Rule::LongLine,
                    Some(index + 1),
                    format!("{} > {} characters", length, self.max_line_length),
                ));
            }
        }

        debug!(
            violations = report.violations.len(),
            warnings = report.warnings.len(),
            "standard check finished"
        );
        report
    }

    fn node_rule(&self, kind: NodeKind, has_children: bool, text: &str) -> Option<Rule> {
        if kind == NodeKind::WhiteSpace || kind.is_comment() {
            return None;
        }
        if kind.is_container() && !has_children {
            return Some(Rule::EmptyBlock);
        }
        if self.patterns.has_multiple_statements(text) {
            return Some(Rule::MultipleStatements);
        }
        if kind.forbids_nesting() && self.patterns.has_nested_operators(text) {
            return Some(Rule::NestedOperators);
        }
        if self.patterns.has_lambda(text) {
            return Some(Rule::Lambda);
        }
        None
    }
}
