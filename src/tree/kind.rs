//! Statement categories and the static capability tables built on them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of statement categories a node can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Root,
    Import,
    Assignment,
    Function,
    Class,
    Method,
    If,
    Elif,
    Else,
    For,
    While,
    Match,
    Case,
    With,
    Try,
    Except,
    Finally,
    ListComprehension,
    DictComprehension,
    SetComprehension,
    GeneratorExpression,
    Ternary,
    ModuleDocstring,
    ClassDocstring,
    FunctionDocstring,
    Comment,
    InlineComment,
    Constant,
    Property,
    Decorator,
    Return,
    Break,
    Continue,
    Raise,
    Assert,
    Expression,
    WhiteSpace,
}

/// Kinds that may own children.
const CONTAINER_KINDS: &[NodeKind] = &[
    NodeKind::Root,
    NodeKind::Function,
    NodeKind::Class,
    NodeKind::Method,
    NodeKind::If,
    NodeKind::Elif,
    NodeKind::Else,
    NodeKind::For,
    NodeKind::While,
    NodeKind::Match,
    NodeKind::Case,
    NodeKind::With,
    NodeKind::Try,
    NodeKind::Except,
    NodeKind::Finally,
];

/// Kinds counted as one logical line each.
const LOGICAL_KINDS: &[NodeKind] = &[
    NodeKind::Function,
    NodeKind::Method,
    NodeKind::Class,
    NodeKind::If,
    NodeKind::For,
    NodeKind::While,
    NodeKind::Match,
    NodeKind::ListComprehension,
    NodeKind::DictComprehension,
    NodeKind::SetComprehension,
    NodeKind::GeneratorExpression,
    NodeKind::Ternary,
    NodeKind::With,
    NodeKind::Try,
    NodeKind::Property,
    NodeKind::Decorator,
];

/// Documentation and comment kinds; never counted as code.
const COMMENT_KINDS: &[NodeKind] = &[
    NodeKind::ModuleDocstring,
    NodeKind::FunctionDocstring,
    NodeKind::ClassDocstring,
    NodeKind::Comment,
    NodeKind::InlineComment,
];

/// Kinds counted as one physical line each. Imports and assignments are
/// counted separately because they may stand for several lines.
const CODE_KINDS: &[NodeKind] = &[
    NodeKind::Function,
    NodeKind::Class,
    NodeKind::If,
    NodeKind::Elif,
    NodeKind::Else,
    NodeKind::For,
    NodeKind::While,
    NodeKind::Match,
    NodeKind::Case,
    NodeKind::Expression,
    NodeKind::ListComprehension,
    NodeKind::DictComprehension,
    NodeKind::SetComprehension,
    NodeKind::GeneratorExpression,
    NodeKind::Ternary,
    NodeKind::With,
    NodeKind::Try,
    NodeKind::Except,
    NodeKind::Finally,
    NodeKind::Constant,
    NodeKind::Method,
    NodeKind::Property,
    NodeKind::Decorator,
    NodeKind::Return,
    NodeKind::Break,
    NodeKind::Continue,
    NodeKind::Raise,
    NodeKind::Assert,
];

/// Kinds that must not nest another comprehension or ternary.
const NO_NESTING_KINDS: &[NodeKind] = &[
    NodeKind::Ternary,
    NodeKind::ListComprehension,
    NodeKind::DictComprehension,
    NodeKind::SetComprehension,
    NodeKind::GeneratorExpression,
];

impl NodeKind {
    /// Whether nodes of this kind may own children.
    pub fn is_container(self) -> bool {
        CONTAINER_KINDS.contains(&self)
    }

    pub fn is_logical(self) -> bool {
        LOGICAL_KINDS.contains(&self)
    }

    pub fn is_comment(self) -> bool {
        COMMENT_KINDS.contains(&self)
    }

    pub fn is_code(self) -> bool {
        CODE_KINDS.contains(&self)
    }

    pub fn forbids_nesting(self) -> bool {
        NO_NESTING_KINDS.contains(&self)
    }

    pub fn is_docstring(self) -> bool {
        matches!(
            self,
            NodeKind::ModuleDocstring | NodeKind::ClassDocstring | NodeKind::FunctionDocstring
        )
    }

    /// Stable snake_case name, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Import => "import",
            NodeKind::Assignment => "assignment",
            NodeKind::Function => "function",
            NodeKind::Class => "class",
            NodeKind::Method => "method",
            NodeKind::If => "if",
            NodeKind::Elif => "elif",
            NodeKind::Else => "else",
            NodeKind::For => "for",
            NodeKind::While => "while",
            NodeKind::Match => "match",
            NodeKind::Case => "case",
            NodeKind::With => "with",
            NodeKind::Try => "try",
            NodeKind::Except => "except",
            NodeKind::Finally => "finally",
            NodeKind::ListComprehension => "list_comprehension",
            NodeKind::DictComprehension => "dict_comprehension",
            NodeKind::SetComprehension => "set_comprehension",
            NodeKind::GeneratorExpression => "generator_expression",
            NodeKind::Ternary => "ternary",
            NodeKind::ModuleDocstring => "module_docstring",
            NodeKind::ClassDocstring => "class_docstring",
            NodeKind::FunctionDocstring => "function_docstring",
            NodeKind::Comment => "comment",
            NodeKind::InlineComment => "inline_comment",
            NodeKind::Constant => "constant",
            NodeKind::Property => "property",
            NodeKind::Decorator => "decorator",
            NodeKind::Return => "return",
            NodeKind::Break => "break",
            NodeKind::Continue => "continue",
            NodeKind::Raise => "raise",
            NodeKind::Assert => "assert",
            NodeKind::Expression => "expression",
            NodeKind::WhiteSpace => "white_space",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
