//! Statement tree for Python sources.
//!
//! [`build_tree`] turns physical lines into a [`SyntaxTree`]: a root sentinel
//! owning classified statement nodes, nested by indentation, plus a map from
//! each node's sequence id to the physical lines merged into it.

mod builder;
mod classifier;
mod kind;
mod node;


pub use builder::{TreeBuilder, build_tree};
pub use classifier::Classifier;
pub use kind::NodeKind;
pub use node::{LineMap, Node, ROOT_INDENT, SyntaxTree};
