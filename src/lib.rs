//! Pydelta: line counting and structural change detection for Python sources.
//!
//! The core turns source lines into a statement tree ([`tree::build_tree`])
//! and compares two trees ([`diff::diff_trees`]) without ever failing on
//! malformed input. Everything else (configuration, metrics storage, the
//! coding standard, annotated output) is built around that core.

pub mod annotate;
pub mod brackets;
pub mod cli;
pub mod commands;
pub mod config;
pub mod counters;
pub mod diff;
pub mod error;
pub mod exit_codes;
pub mod format;
pub mod fs;
pub mod history;
pub mod logging;
pub mod metrics;
pub mod report;
pub mod scanner;
pub mod source;
pub mod standard;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_support;
