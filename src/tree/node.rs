//! Tree storage: an arena of nodes addressed by their sequence id.

use super::kind::NodeKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// Indent level given to the root sentinel; below any real column.
pub const ROOT_INDENT: isize = -1;

/// Original physical-line indices, per node sequence id.
pub type LineMap = BTreeMap<usize, Vec<usize>>;

/// One statement in the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    /// Logical line text, trimmed of indentation.
    pub text: String,
    pub indent_level: isize,
    /// Construction-order id; also the node's index in its tree.
    pub sequence_id: usize,
    pub children: Vec<usize>,
    #[serde(skip)]
    pub parent: Option<usize>,
}

impl Node {
    pub fn is_whitespace(&self) -> bool {
        self.kind == NodeKind::WhiteSpace
    }
}

/// A parsed source file: nodes in construction order plus the line map.
///
/// The root is always sequence id 0 and is absent from the line map.
#[derive(Debug, Clone, Serialize)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    line_map: LineMap,
}

impl SyntaxTree {
    /// A tree holding only the root sentinel.
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Root,
                text: String::from("root"),
                indent_level: ROOT_INDENT,
                sequence_id: 0,
                children: Vec::new(),
                parent: None,
            }],
            line_map: LineMap::new(),
        }
    }

    /// Appends a node under `parent` and returns its sequence id.
    pub(crate) fn attach(
        &mut self,
        parent: usize,
        kind: NodeKind,
        text: String,
        indent_level: isize,
        lines: Vec<usize>,
    ) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            text,
            indent_level,
            sequence_id: id,
            children: Vec::new(),
            parent: Some(parent),
        });
        self.nodes[parent].children.push(id);
        self.line_map.insert(id, lines);
        id
    }

    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    /// Looks up a node by sequence id.
    ///
    /// Ids are only ever produced by this tree, so an unknown id is a caller
    /// bug and panics like slice indexing does.
    pub fn node(&self, id: usize) -> &Node {
        &self.nodes[id]
    }

    pub fn children(&self, id: usize) -> &[usize] {
        &self.nodes[id].children
    }

    pub fn line_map(&self) -> &LineMap {
        &self.line_map
    }

    /// Physical lines merged into the node, if it is not the root.
    pub fn lines_of(&self, id: usize) -> Option<&[usize]> {
        self.line_map.get(&id).map(Vec::as_slice)
    }

    /// Total nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always has its root, so it is empty when nothing else was added.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Statement nodes, excluding the root and blank-line markers.
    pub fn count_nodes(&self) -> usize {
        self.nodes
            .iter()
            .skip(1)
            .filter(|n| !n.is_whitespace())
            .count()
    }

    /// Depth-first, document-order walk of the subtree under `id` (exclusive),
    /// yielding each node with its depth below `id`.
    pub fn descendants(&self, id: usize) -> Vec<(usize, &Node)> {
        let mut out = Vec::new();
        let mut stack: Vec<(usize, usize)> = self.nodes[id]
            .children
            .iter()
            .rev()
            .map(|&c| (c, 1))
            .collect();

        while let Some((current, depth)) = stack.pop() {
            let node = &self.nodes[current];
            out.push((depth, node));
            stack.extend(node.children.iter().rev().map(|&c| (c, depth + 1)));
        }
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }
}
