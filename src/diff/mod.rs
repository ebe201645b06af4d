//! Structural comparison of two statement trees.
//!
//! [`diff_trees`] pairs statements across an original and a new
//! [`SyntaxTree`](crate::tree::SyntaxTree) and reports what was added and
//! deleted. A statement that was edited rather than replaced shows up as a
//! deletion and an addition carrying the same similarity below 1.0.

mod change;
mod engine;
mod similarity;


pub use change::{Change, ChangeKind, ChangeSummary, NO_MATCH};
pub use engine::{DEFAULT_THRESHOLD, DiffSession, diff_trees};
pub use similarity::{ratio, round2};
