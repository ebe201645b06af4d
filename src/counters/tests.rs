//! Tests for the line counters.

use super::*;
use crate::tree::build_tree;

fn metrics(lines: &[&str]) -> FileMetrics {
    FileMetrics::from_tree("sample.py", &build_tree(lines))
}

// =========================================================================
// Physical lines
// =========================================================================

#[test]
fn test_plain_statements_count_once() {
    let m = metrics(&["def f(x):", "    y = x + 1", "    return y", "", "print(f(1))"]);
    assert_eq!(m.physical_lines, 4);
}

#[test]
fn test_multi_import_counts_each_module() {
    assert_eq!(metrics(&["import os, sys, re"]).physical_lines, 3);
    assert_eq!(metrics(&["import os"]).physical_lines, 1);
    assert_eq!(metrics(&["from os import path, sep"]).physical_lines, 1);
}

#[test]
fn test_tuple_assignment_counts_each_target() {
    assert_eq!(metrics(&["a, b = 1, 2"]).physical_lines, 2);
    assert_eq!(metrics(&["total = a + b"]).physical_lines, 1);
}

#[test]
fn test_comments_and_docstrings_are_free() {
    let m = metrics(&[
        "\"\"\"Module docs.\"\"\"",
        "# a comment",
        "def f():",
        "    \"\"\"",
        "    Function docs.",
        "    \"\"\"",
        "    return 1",
    ]);
    assert_eq!(m.physical_lines, 2);
}

#[test]
fn test_continuation_counts_as_one() {
    let m = metrics(&["values = [", "    1,", "    2,", "]", "show(values)"]);
    assert_eq!(m.physical_lines, 2);
}

#[test]
fn test_empty_file_counts_nothing() {
    let m = metrics(&[]);
    assert_eq!(m.physical_lines, 0);
    assert_eq!(m.logical_lines, 0);
}

// =========================================================================
// Logical lines
// =========================================================================

#[test]
fn test_logical_lines_count_units_of_logic() {
    let m = metrics(&[
        "import os",
        "def f(items):",
        "    for item in items:",
        "        if item:",
        "            print(item)",
        "    return None",
    ]);
    // def, for, if
    assert_eq!(m.logical_lines, 3);
}

#[test]
fn test_comprehension_is_logical() {
    assert_eq!(metrics(&["squares = [x * x for x in range(5)]"]).logical_lines, 1);
}

#[test]
fn test_assignments_are_not_logical() {
    assert_eq!(metrics(&["a = 1", "b = 2"]).logical_lines, 0);
}

// =========================================================================
// Per-class metrics
// =========================================================================

#[test]
fn test_class_metrics_and_others() {
    let m = metrics(&[
        "import math",
        "",
        "class Circle(Shape):",
        "    def __init__(self, r):",
        "        self.r = r",
        "",
        "    def area(self):",
        "        return math.pi * self.r ** 2",
        "",
        "class Empty:",
        "    pass",
        "",
        "print(Circle(1).area())",
    ]);

    assert_eq!(
        m.classes,
        vec![
            ClassMetrics { name: "Circle".to_string(), methods: 2, physical_lines: 5 },
            ClassMetrics { name: "Empty".to_string(), methods: 0, physical_lines: 2 },
            ClassMetrics { name: OTHERS.to_string(), methods: 0, physical_lines: 2 },
        ]
    );

    let class_total: usize = m.classes.iter().map(|c| c.physical_lines).sum();
    assert_eq!(class_total, m.physical_lines);
}

#[test]
fn test_file_without_classes_has_only_others() {
    let m = metrics(&["x = 1", "y = 2"]);
    assert_eq!(m.classes.len(), 1);
    assert_eq!(m.classes[0].name, OTHERS);
    assert_eq!(m.classes[0].physical_lines, 2);
}

#[test]
fn test_class_name() {
    assert_eq!(class_name("class Foo(Base):"), "Foo");
    assert_eq!(class_name("class Bar:"), "Bar");
    assert_eq!(class_name("class  Spaced :"), "Spaced");
}
