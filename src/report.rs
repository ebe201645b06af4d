//! Plain-text rendering for command output.
//!
//! Renderers return strings so commands decide where output goes and tests
//! can compare it directly.

use crate::counters::FileMetrics;
use crate::diff::{Change, ChangeSummary};
use crate::error::{PydeltaError, Result};
use crate::standard::StandardReport;
use crate::tree::SyntaxTree;
use std::fmt::Write;

const RULE_WIDTH: usize = 42;

/// Class breakdown and totals for one file.
pub fn file_metrics(metrics: &FileMetrics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", metrics.file_name);
    let _ = writeln!(out, "  {:24} {:>7} {:>8}", "Class", "Methods", "Physical");
    for class in &metrics.classes {
        let _ = writeln!(
            out,
            "  {:24} {:>7} {:>8}",
            class.name, class.methods, class.physical_lines
        );
    }
    let _ = writeln!(out, "  {}", "-".repeat(RULE_WIDTH));
    let _ = writeln!(
        out,
        "  Physical lines: {}   Logical lines: {}",
        metrics.physical_lines, metrics.logical_lines
    );
    out
}

/// Several files, separated by blank lines.
pub fn metrics_table<'a>(entries: impl IntoIterator<Item = &'a FileMetrics>) -> String {
    entries
        .into_iter()
        .map(file_metrics)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn change_counts(summary: &ChangeSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Changes");
    let _ = writeln!(out, "=======");
    let _ = writeln!(out, "  {:18} {:>5}", "added (new)", summary.added_new);
    let _ = writeln!(out, "  {:18} {:>5}", "added (modified)", summary.added_modified);
    let _ = writeln!(out, "  {:18} {:>5}", "deleted", summary.deleted);
    let _ = writeln!(out, "  {}", "-".repeat(24));
    let _ = writeln!(out, "  {:18} {:>5}", "total", summary.total());
    out
}

/// One-line summary printed after every comparison.
pub fn change_summary_line(original: &str, new: &str, summary: &ChangeSummary) -> String {
    format!(
        "{} -> {}: {} change(s) ({} added, {} modified, {} deleted)",
        original,
        new,
        summary.total(),
        summary.added_new,
        summary.added_modified,
        summary.deleted
    )
}

pub fn changes_json(changes: &[Change]) -> Result<String> {
    serde_json::to_string_pretty(changes)
        .map_err(|e| PydeltaError::UserError(format!("failed to serialize changes: {}", e)))
}

/// One node per line as `#<id> <kind> [lines] <text>`, indented by depth.
pub fn tree_outline(tree: &SyntaxTree) -> String {
    let mut out = String::new();
    for (depth, node) in tree.descendants(0) {
        let lines = tree
            .lines_of(node.sequence_id)
            .map(line_range)
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{}#{} {} [{}] {}",
            "  ".repeat(depth - 1),
            node.sequence_id,
            node.kind,
            lines,
            node.text.replace('\n', "\\n")
        );
    }
    out
}

/// 1-based `first-last`, or a single number.
fn line_range(indices: &[usize]) -> String {
    match (indices.first(), indices.last()) {
        (Some(first), Some(last)) if first != last => format!("{}-{}", first + 1, last + 1),
        (Some(first), _) => format!("{}", first + 1),
        _ => String::new(),
    }
}

pub fn standard_report(file: &str, report: &StandardReport) -> String {
    let mut out = String::new();
    if report.passed() {
        let _ = writeln!(out, "{}: coding standard OK", file);
    } else {
        let _ = writeln!(out, "{}: {} violation(s)", file, report.violations.len());
        for violation in &report.violations {
            let _ = writeln!(out, "  error: {}", violation);
        }
    }
    for warning in &report.warnings {
        let _ = writeln!(out, "  warning: {}", warning);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::ClassMetrics;
    use crate::standard::{Rule, Violation};
    use crate::tree::build_tree;

    #[test]
    fn test_tree_outline() {
        let tree = build_tree(&["def f(a,", "      b):", "    return a"]);
        let outline = tree_outline(&tree);

        assert_eq!(
            outline,
            "#1 function [1-2] def f(a, b):\n  #2 return [3] return a\n"
        );
    }

    #[test]
    fn test_tree_outline_escapes_newlines() {
        let tree = build_tree(&["\"\"\"", "Docs.", "\"\"\""]);
        let outline = tree_outline(&tree);
        assert!(outline.starts_with("#1 module_docstring [1-3] "));
        assert_eq!(outline.lines().count(), 1);
    }

    #[test]
    fn test_file_metrics() {
        let metrics = FileMetrics {
            file_name: "shapes.py".to_string(),
            physical_lines: 7,
            logical_lines: 3,
            classes: vec![
                ClassMetrics { name: "Circle".to_string(), methods: 2, physical_lines: 5 },
                ClassMetrics { name: "others".to_string(), methods: 0, physical_lines: 2 },
            ],
        };

        let text = file_metrics(&metrics);
        assert!(text.starts_with("shapes.py\n"));
        assert!(text.contains("Circle"));
        assert!(text.contains("Physical lines: 7   Logical lines: 3"));
    }

    #[test]
    fn test_change_counts() {
        let summary = ChangeSummary { added_new: 1, added_modified: 2, deleted: 3 };
        let text = change_counts(&summary);
        assert!(text.contains("added (modified)       2"));
        assert!(text.ends_with("total                  6\n"));
    }

    #[test]
    fn test_summary_line() {
        let summary = ChangeSummary { added_new: 1, added_modified: 0, deleted: 2 };
        assert_eq!(
            change_summary_line("a.py", "b.py", &summary),
            "a.py -> b.py: 3 change(s) (1 added, 0 modified, 2 deleted)"
        );
    }

    #[test]
    fn test_standard_report() {
        let report = StandardReport {
            violations: vec![Violation::new(Rule::Lambda, Some(4), "f = lambda: 0")],
            warnings: vec![Violation::new(Rule::LongLine, Some(9), "95 > 80 characters")],
        };
        let text = standard_report("calc.py", &report);

        assert!(text.starts_with("calc.py: 1 violation(s)\n"));
        assert!(text.contains("  error: line 4: lambda expressions are not allowed: f = lambda: 0"));
        assert!(text.contains("  warning: line 9: line too long: 95 > 80 characters"));
    }

    #[test]
    fn test_changes_json() {
        let json = changes_json(&[Change::deleted(3)]).unwrap();
        assert!(json.contains("\"kind\": \"deleted\""));
        assert!(json.contains("\"sequence_id\": 3"));
    }
}
