//! Maps one logical line to its statement category.
//!
//! Docstring sub-kinds and the method/function split depend on what came
//! before, so the classifier carries three flags for the duration of a single
//! parse. They change only when a definition is classified: `class` sets
//! in-class and clears in-method, any `def` clears module-level. Dedenting
//! never resets them.

use super::kind::NodeKind;
use crate::brackets::{closing_for, match_bracket};
use crate::scanner::find_outside_quotes;
use tracing::trace;

/// Ordered control-flow prefixes.
const CONTROL_FLOW: &[(&str, NodeKind)] = &[
    ("if ", NodeKind::If),
    ("elif ", NodeKind::Elif),
    ("else:", NodeKind::Else),
    ("for ", NodeKind::For),
    ("while ", NodeKind::While),
    ("match ", NodeKind::Match),
    ("case ", NodeKind::Case),
];

const JUMPS: &[(&str, NodeKind)] = &[
    ("return ", NodeKind::Return),
    ("break", NodeKind::Break),
    ("continue", NodeKind::Continue),
    ("raise ", NodeKind::Raise),
    ("assert ", NodeKind::Assert),
];

/// Stateful line classifier. One instance per parse.
#[derive(Debug)]
pub struct Classifier {
    in_class: bool,
    at_module_level: bool,
    in_method: bool,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            in_class: false,
            at_module_level: true,
            in_method: false,
        }
    }

    /// Classifies one logical line. First matching rule wins.
    pub fn classify(&mut self, line: &str) -> NodeKind {
        let line = line.trim();
        if line.is_empty() {
            return NodeKind::WhiteSpace;
        }

        if let Some(rest) = line.strip_prefix("async ") {
            return self.classify(rest);
        }

        if line.starts_with("\"\"\"") || line.starts_with("'''") {
            return self.docstring_kind();
        }

        if line.starts_with('#') {
            return NodeKind::Comment;
        }

        if is_upper(line) && line.contains('=') {
            return NodeKind::Constant;
        }
        if line.starts_with("import ") || line.starts_with("from ") {
            return NodeKind::Import;
        }

        if let Some(kind) = self.definition(line) {
            return kind;
        }

        if let Some(kind) = prefixed(line, CONTROL_FLOW) {
            return kind;
        }

        if let Some(kind) = comprehension(line) {
            return kind;
        }

        if let Some(kind) = compound(line) {
            return kind;
        }

        if let Some(kind) = prefixed(line, JUMPS) {
            return kind;
        }

        if line.contains("@property") {
            return NodeKind::Property;
        }
        if line.starts_with('@') {
            return NodeKind::Decorator;
        }

        if is_assignment(line) {
            NodeKind::Assignment
        } else {
            NodeKind::Expression
        }
    }

    fn docstring_kind(&self) -> NodeKind {
        if self.at_module_level {
            NodeKind::ModuleDocstring
        } else if self.in_class {
            NodeKind::ClassDocstring
        } else {
            NodeKind::FunctionDocstring
        }
    }

    fn definition(&mut self, line: &str) -> Option<NodeKind> {
        let kind = if line.starts_with("def ") {
            self.at_module_level = false;
            if self.in_class {
                self.in_method = true;
                NodeKind::Method
            } else {
                NodeKind::Function
            }
        } else if line.starts_with("class ") {
            self.in_class = true;
            self.in_method = false;
            NodeKind::Class
        } else {
            return None;
        };
        trace!(%kind, in_class = self.in_class, in_method = self.in_method, "definition");
        Some(kind)
    }
}

fn prefixed(line: &str, table: &[(&str, NodeKind)]) -> Option<NodeKind> {
    table
        .iter()
        .find(|(prefix, _)| line.starts_with(prefix))
        .map(|&(_, kind)| kind)
}

/// Every cased character is uppercase and at least one exists.
fn is_upper(line: &str) -> bool {
    let mut cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Interior of the first `open` bracket up to its true partner.
fn bracket_interior(line: &str, open: char) -> Option<&str> {
    let close = closing_for(open)?;
    let start = line.find(open)?;
    let end = match_bracket(line, start, (open, close))?;
    line.get(start + 1..end)
}

fn comprehension(line: &str) -> Option<NodeKind> {
    if let Some(inner) = bracket_interior(line, '[')
        && inner.contains(" for ")
    {
        return Some(NodeKind::ListComprehension);
    }

    if let Some(inner) = bracket_interior(line, '{')
        && let Some(for_pos) = inner.find(" for ")
    {
        return if inner[..for_pos].contains(" : ") {
            Some(NodeKind::DictComprehension)
        } else {
            Some(NodeKind::SetComprehension)
        };
    }

    if let Some(inner) = bracket_interior(line, '(')
        && inner.contains(" for ")
    {
        return Some(NodeKind::GeneratorExpression);
    }

    None
}

fn compound(line: &str) -> Option<NodeKind> {
    if line.starts_with("with ") {
        return Some(NodeKind::With);
    }
    if line.starts_with("try:") {
        return Some(NodeKind::Try);
    }
    if line.starts_with("except") {
        return Some(NodeKind::Except);
    }
    if line.starts_with("finally:") {
        return Some(NodeKind::Finally);
    }
    if line.contains(" if ") && line.contains(" else ") && !line.starts_with("if ") {
        return Some(NodeKind::Ternary);
    }
    None
}

/// An `=` that is not a keyword argument inside the first call's parentheses.
fn is_assignment(line: &str) -> bool {
    let Some(eq) = line.find('=') else {
        return false;
    };
    let open = find_outside_quotes(line, "(", 0, true);
    let close = find_outside_quotes(line, ")", 0, true);
    match (open, close) {
        (Some(open), Some(close)) => !(eq > open && eq < close),
        _ => true,
    }
}
