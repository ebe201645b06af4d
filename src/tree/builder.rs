//! Turns physical source lines into a [`SyntaxTree`].
//!
//! Per physical line the builder:
//! 1. merges multi-line string literals (docstrings and `x = """...`) into one
//!    statement,
//! 2. otherwise joins bracket and backslash continuations into one logical
//!    line,
//! 3. classifies the logical line,
//! 4. attaches it under the innermost open container whose indent is lower,
//! 5. opens a new container when the statement can own children.
//!
//! Malformed input never aborts the build: an unterminated string or bracket
//! run simply ends the statement at the last line.

use super::classifier::Classifier;
use super::node::{ROOT_INDENT, SyntaxTree};
use crate::scanner::{count_outside_quotes, find_outside_quotes};
use tracing::debug;

pub(super) const TRIPLE_DOUBLE: &str = "\"\"\"";
pub(super) const TRIPLE_SINGLE: &str = "'''";

/// Builds the tree for one file.
pub fn build_tree<S: AsRef<str>>(lines: &[S]) -> SyntaxTree {
    TreeBuilder::new().build(lines)
}

/// State for one parse. Not reusable across files.
#[derive(Debug)]
pub struct TreeBuilder {
    classifier: Classifier,
    open_delimiter_depth: isize,
    string_delimiter: Option<&'static str>,
    pending: Vec<String>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            classifier: Classifier::new(),
            open_delimiter_depth: 0,
            string_delimiter: None,
            pending: Vec::new(),
        }
    }

    pub fn build<S: AsRef<str>>(mut self, lines: &[S]) -> SyntaxTree {
        let mut tree = SyntaxTree::new();
        let mut stack: Vec<(usize, isize)> = vec![(0, ROOT_INDENT)];
        let mut previous_indent: isize = 0;
        let mut index = 0;

        while index < lines.len() {
            let first = index;
            let (text, consumed) = self.next_statement(lines, index);
            index = consumed.last().map_or(index, |&last| last + 1);

            let indent = if text.is_empty() {
                previous_indent
            } else {
                let indent = leading_whitespace(lines[first].as_ref());
                previous_indent = indent;
                indent
            };
            let kind = self.classifier.classify(&text);

            while stack.len() > 1 && stack.last().is_some_and(|&(_, top)| top >= indent) {
                stack.pop();
            }
            let parent = stack.last().map_or(0, |&(id, _)| id);

            let id = tree.attach(parent, kind, text, indent, consumed);
            if kind.is_container() {
                stack.push((id, indent));
            }
        }

        debug!(
            lines = lines.len(),
            nodes = tree.len(),
            "built syntax tree"
        );
        tree
    }

    /// Reads one logical statement starting at `start`.
    ///
    /// Returns its text and the physical line indices it consumed.
    fn next_statement<S: AsRef<str>>(&mut self, lines: &[S], start: usize) -> (String, Vec<usize>) {
        let first = lines[start].as_ref().trim();

        if let Some(delimiter) = self.opens_multiline_string(first) {
            return self.collect_string(lines, start, delimiter);
        }

        self.open_delimiter_depth += bracket_balance(first);
        if !self.continues(first) {
            self.open_delimiter_depth = 0;
            return (first.to_string(), vec![start]);
        }

        self.pending.push(strip_continuation(first));
        let mut consumed = vec![start];
        let mut index = start + 1;
        while index < lines.len() {
            let line = lines[index].as_ref().trim();
            self.open_delimiter_depth += bracket_balance(line);
            self.pending.push(strip_continuation(line));
            consumed.push(index);
            if !self.continues(line) {
                break;
            }
            index += 1;
        }

        self.open_delimiter_depth = 0;
        let joined = self.pending.join(" ");
        self.pending.clear();
        (joined, consumed)
    }

    fn continues(&self, trimmed: &str) -> bool {
        self.open_delimiter_depth > 0 || trimmed.ends_with('\\')
    }

    /// Consumes lines until one carries the closing delimiter.
    fn collect_string<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        start: usize,
        delimiter: &'static str,
    ) -> (String, Vec<usize>) {
        self.string_delimiter = Some(delimiter);
        let mut parts = vec![lines[start].as_ref().trim()];
        let mut consumed = vec![start];

        for (index, line) in lines.iter().enumerate().skip(start + 1) {
            let line = line.as_ref().trim();
            parts.push(line);
            consumed.push(index);
            if line.contains(delimiter) {
                break;
            }
        }

        self.string_delimiter = None;
        (parts.join("\n"), consumed)
    }

    /// Delimiter of a triple-quoted literal that starts on this line and does
    /// not end on it.
    pub(super) fn opens_multiline_string(&self, trimmed: &str) -> Option<&'static str> {
        if self.string_delimiter.is_some() {
            return None;
        }

        let double = find_outside_quotes(trimmed, TRIPLE_DOUBLE, 0, false);
        let single = find_outside_quotes(trimmed, TRIPLE_SINGLE, 0, false);
        let delimiter = match (double, single) {
            (None, None) => return None,
            (Some(_), _) => TRIPLE_DOUBLE,
            (None, Some(_)) => TRIPLE_SINGLE,
        };

        if is_string_assignment(trimmed) {
            let markers = trimmed.matches(TRIPLE_DOUBLE).count()
                + trimmed.matches(TRIPLE_SINGLE).count();
            return (markers < 2).then_some(delimiter);
        }

        if trimmed.starts_with(TRIPLE_DOUBLE) || trimmed.starts_with(TRIPLE_SINGLE) {
            let body = &trimmed[3..];
            return (!body.ends_with(delimiter)).then_some(delimiter);
        }

        None
    }
}

/// Right-hand side of the first `=` holds a triple quote.
pub(super) fn is_string_assignment(trimmed: &str) -> bool {
    let mut parts = trimmed.split('=');
    parts.next();
    parts
        .next()
        .is_some_and(|rhs| rhs.contains(TRIPLE_DOUBLE) || rhs.contains(TRIPLE_SINGLE))
}

/// Openers minus closers outside quotes and comments.
pub(super) fn bracket_balance(line: &str) -> isize {
    let opens: usize = ['(', '[', '{'].iter().map(|&c| count_outside_quotes(line, c)).sum();
    let closes: usize = [')', ']', '}'].iter().map(|&c| count_outside_quotes(line, c)).sum();
    opens as isize - closes as isize
}

pub(super) fn strip_continuation(trimmed: &str) -> String {
    trimmed
        .strip_suffix('\\')
        .map_or(trimmed, str::trim_end)
        .to_string()
}

fn leading_whitespace(line: &str) -> isize {
    (line.len() - line.trim_start().len()) as isize
}
