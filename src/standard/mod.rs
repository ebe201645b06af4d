//! Coding-standard checks over a built tree.
//!
//! The standard forbids:
//! - empty files and empty blocks,
//! - more than one statement per line (`a = 1; b = 2`),
//! - comprehensions or conditional expressions nested in one another,
//! - lambda expressions.
//!
//! Lines longer than the configured limit are reported as warnings and do
//! not fail the check.

mod checker;
mod patterns;
mod types;


pub use checker::{DEFAULT_MAX_LINE_LENGTH, StandardChecker, check_tree};
pub use patterns::CompiledPatterns;
pub use types::{Rule, StandardReport, Violation};
