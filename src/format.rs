//! Re-wraps lines that exceed the configured length before they are parsed.
//!
//! A long line is split according to what it holds:
//! - `import a, b` breaks between names with `\` continuations;
//! - `from m import a, b` becomes a parenthesized list, one name per line;
//! - a `def` header puts one parameter per line inside its parentheses;
//! - an assignment from a call puts one argument per line;
//! - anything else breaks between words with `\` continuations.
//!
//! A trailing comment moves to its own lines. The tree builder joins the
//! pieces back into one statement, so wrapping changes the physical layout but
//! never the number of statements.

use crate::brackets::match_bracket;
use crate::scanner::find_outside_quotes;
use tracing::{debug, warn};

/// Checked in order; at equal positions the earlier entry wins.
const ASSIGNMENT_OPERATORS: &[&str] = &[
    "+=", "-=", "**=", "*=", "//=", "/=", "%=", "@=", ">>=", "<<=", "&=", "|=", "^=", "==", "=",
];

const DEFINITION_PAD: &str = "        ";
const ITEM_PAD: &str = "    ";

/// Wraps every line of a file.
pub fn wrap_lines<S: AsRef<str>>(lines: &[S], max_length: usize) -> Vec<String> {
    let wrapped: Vec<String> = lines
        .iter()
        .flat_map(|line| wrap_line(line.as_ref(), max_length))
        .collect();
    if wrapped.len() != lines.len() {
        debug!(before = lines.len(), after = wrapped.len(), "wrapped long lines");
    }
    wrapped
}

/// Splits one physical line into lines no longer than `max_length` where
/// that is possible. A line that already fits comes back unchanged.
pub fn wrap_line(line: &str, max_length: usize) -> Vec<String> {
    if width(line) <= max_length {
        return vec![line.to_string()];
    }

    let indent = &line[..line.len() - line.trim_start().len()];
    let (code, comment) = split_comment(line);
    let trimmed = code.trim_start();

    let mut wrapped = if trimmed.is_empty() {
        Vec::new()
    } else if width(code) <= max_length {
        vec![code.to_string()]
    } else if trimmed.starts_with("import ") {
        wrap_import(trimmed, indent, max_length)
    } else if trimmed.starts_with("from ") {
        wrap_from_import(trimmed, indent, max_length)
    } else if (trimmed.starts_with("def ") || trimmed.starts_with("async def "))
        && trimmed.contains('(')
    {
        wrap_definition(trimmed, indent).unwrap_or_else(|| wrap_words(trimmed, indent, max_length))
    } else if trimmed.contains('=') {
        wrap_assignment(trimmed, indent, max_length)
    } else {
        wrap_words(trimmed, indent, max_length)
    };

    if let Some(comment) = comment {
        wrapped.extend(wrap_comment(comment, indent, max_length));
    }
    wrapped
}

fn width(text: &str) -> usize {
    text.chars().count()
}

/// Code before an unquoted `#`, and the comment from the `#` on.
fn split_comment(line: &str) -> (&str, Option<&str>) {
    match find_outside_quotes(line, "#", 0, false) {
        Some(pos) => (line[..pos].trim_end(), Some(&line[pos..])),
        None => (line, None),
    }
}

fn wrap_comment(comment: &str, indent: &str, max_length: usize) -> Vec<String> {
    let text = comment.trim_start_matches('#').trim();
    let full = format!("{indent}# {text}");
    if text.is_empty() || width(&full) <= max_length {
        return vec![full.trim_end().to_string()];
    }

    let mut words = text.split_whitespace();
    let first = words.next().unwrap_or_default();
    let mut current = format!("{indent}# {first}");
    let mut wrapped = Vec::new();
    for word in words {
        if width(&current) + 1 + width(word) <= max_length {
            current.push(' ');
            current.push_str(word);
        } else {
            wrapped.push(std::mem::replace(&mut current, format!("{indent}# {word}")));
        }
    }
    wrapped.push(current);
    wrapped
}

/// `import a, b, c` keeps the names on `\`-continued lines.
fn wrap_import(trimmed: &str, indent: &str, max_length: usize) -> Vec<String> {
    let prefix = format!("{indent}import ");
    let names = trimmed["import ".len()..]
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let mut wrapped = Vec::new();
    let mut current = prefix.clone();
    for name in names {
        if current == prefix {
            current.push_str(name);
        } else if width(&current) + 2 + width(name) + 3 <= max_length {
            current.push_str(", ");
            current.push_str(name);
        } else {
            current.push_str(", \\");
            wrapped.push(std::mem::replace(&mut current, format!("{indent}{name}")));
        }
    }
    wrapped.push(current);
    wrapped
}

/// `from m import a, b` becomes a parenthesized list, one name per line.
fn wrap_from_import(trimmed: &str, indent: &str, max_length: usize) -> Vec<String> {
    let (head, names) = match trimmed.find('(') {
        Some(open) => match match_bracket(trimmed, open, ('(', ')')) {
            Some(close) => (trimmed[..open].trim_end(), &trimmed[open + 1..close]),
            None => return wrap_words(trimmed, indent, max_length),
        },
        None => match trimmed.find(" import ") {
            Some(pos) => {
                let split = pos + " import".len();
                (&trimmed[..split], &trimmed[split..])
            }
            None => return wrap_words(trimmed, indent, max_length),
        },
    };

    let names = split_top_level(names);
    if names.is_empty() {
        return wrap_words(trimmed, indent, max_length);
    }
    let mut wrapped = vec![format!("{indent}{head} (")];
    wrapped.extend(listed(&names, indent, ITEM_PAD, ""));
    wrapped.push(format!("{indent})"));
    wrapped
}

/// One parameter per line; the text after the closing parenthesis stays on
/// the last one.
fn wrap_definition(trimmed: &str, indent: &str) -> Option<Vec<String>> {
    let open = trimmed.find('(')?;
    let close = match_bracket(trimmed, open, ('(', ')'))?;
    let params = split_top_level(&trimmed[open + 1..close]);
    if params.is_empty() {
        return None;
    }

    let mut wrapped = vec![format!("{indent}{}(", &trimmed[..open])];
    wrapped.extend(listed(&params, indent, DEFINITION_PAD, &trimmed[close..]));
    Some(wrapped)
}

/// `target = callee(a, b)` puts one argument per line. Anything else falls
/// back to word wrapping.
fn wrap_assignment(trimmed: &str, indent: &str, max_length: usize) -> Vec<String> {
    let Some((pos, operator)) = first_operator(trimmed) else {
        return wrap_words(trimmed, indent, max_length);
    };
    let is_comparison = operator == "=="
        || (operator == "=" && pos > 0 && matches!(trimmed.as_bytes()[pos - 1], b'<' | b'>' | b'!'));
    if is_comparison || find_outside_quotes(trimmed, ",", 0, true).is_none() {
        return wrap_words(trimmed, indent, max_length);
    }

    let target = trimmed[..pos].trim();
    let value = &trimmed[pos + operator.len()..];
    let call = value.find('(').and_then(|open| {
        let close = match_bracket(value, open, ('(', ')'))?;
        Some((value[..open].trim(), &value[open + 1..close], value[close..].trim()))
    });
    let Some((callee, args, rest)) = call else {
        return wrap_words(trimmed, indent, max_length);
    };
    let args = split_top_level(args);
    if !is_callee(callee) || args.is_empty() {
        return wrap_words(trimmed, indent, max_length);
    }

    let mut wrapped = vec![format!("{indent}{target} {operator} {callee}(")];
    wrapped.extend(listed(&args, indent, ITEM_PAD, ""));
    wrapped.push(format!("{indent}{rest}"));
    wrapped
}

fn first_operator(trimmed: &str) -> Option<(usize, &'static str)> {
    let mut best: Option<(usize, &'static str)> = None;
    for &operator in ASSIGNMENT_OPERATORS {
        if let Some(pos) = find_outside_quotes(trimmed, operator, 0, true)
            && best.is_none_or(|(best_pos, _)| pos < best_pos)
        {
            best = Some((pos, operator));
        }
    }
    best
}

/// A dotted name such as `compute` or `self.store.get`.
fn is_callee(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.')
}

/// Breaks between words, ending each continued line with ` \`.
///
/// A first word too long for any line leaves the line as it is.
fn wrap_words(trimmed: &str, indent: &str, max_length: usize) -> Vec<String> {
    let mut words = trimmed.split_whitespace();
    let Some(first) = words.next() else {
        return vec![indent.to_string()];
    };
    if width(indent) + width(first) + 2 > max_length {
        warn!(line = trimmed, "line is too long to wrap");
        return vec![format!("{indent}{trimmed}")];
    }

    let mut wrapped = Vec::new();
    let mut current = format!("{indent}{first}");
    for word in words {
        if width(&current) + width(word) + 2 <= max_length {
            current.push(' ');
            current.push_str(word);
        } else {
            current.push_str(" \\");
            wrapped.push(std::mem::replace(&mut current, format!("{indent}{word}")));
        }
    }
    wrapped.push(current);
    wrapped
}

/// One item per line under `indent + pad`, comma-separated, with `last_suffix`
/// after the final item.
fn listed(items: &[String], indent: &str, pad: &str, last_suffix: &str) -> Vec<String> {
    let last = items.len().saturating_sub(1);
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let suffix = if i == last { last_suffix } else { "," };
            format!("{indent}{pad}{item}{suffix}")
        })
        .collect()
}

/// Splits on commas outside brackets and string literals; empty pieces
/// (a trailing comma) are dropped.
fn split_top_level(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in text.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            current.push(c);
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                pieces.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    pieces.push(current);

    pieces
        .into_iter()
        .map(|piece| piece.trim().to_string())
        .filter(|piece| !piece.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{NodeKind, build_tree};

    #[test]
    fn test_short_line_is_unchanged() {
        assert_eq!(wrap_line("    x = 1  # note", 80), vec!["    x = 1  # note"]);
    }

    #[test]
    fn test_call_assignment_puts_one_argument_per_line() {
        assert_eq!(
            wrap_line("total = compute(first, second, third)", 30),
            vec!["total = compute(", "    first,", "    second,", "    third", ")"]
        );
    }

    #[test]
    fn test_call_assignment_keeps_nested_arguments_whole() {
        assert_eq!(
            wrap_line("    pair = make(build(1, 2), 'a, b')", 20),
            vec!["    pair = make(", "        build(1, 2),", "        'a, b'", "    )"]
        );
    }

    #[test]
    fn test_assignment_without_call_is_word_wrapped() {
        assert_eq!(
            wrap_line("same = first_value == second_value", 24),
            vec!["same = first_value == \\", "second_value"]
        );
        assert_eq!(
            wrap_line("ok = check(first) <= limit(second, third)", 24),
            vec!["ok = check(", "    first", ") <= limit(second, third)"]
        );
    }

    #[test]
    fn test_definition_puts_one_parameter_per_line() {
        assert_eq!(
            wrap_line("    def area(self, width, height) -> int:", 30),
            vec![
                "    def area(",
                "            self,",
                "            width,",
                "            height) -> int:",
            ]
        );
    }

    #[test]
    fn test_plain_import_uses_backslashes() {
        assert_eq!(
            wrap_line("import alpha, beta, gamma, delta", 20),
            vec!["import alpha, \\", "beta, gamma, \\", "delta"]
        );
    }

    #[test]
    fn test_from_import_becomes_parenthesized() {
        assert_eq!(
            wrap_line("from shapes import circle, square, triangle", 30),
            vec!["from shapes import (", "    circle,", "    square,", "    triangle", ")"]
        );
        assert_eq!(
            wrap_line("from shapes import (circle, square, triangle)", 30),
            vec!["from shapes import (", "    circle,", "    square,", "    triangle", ")"]
        );
    }

    #[test]
    fn test_trailing_comment_moves_to_own_lines() {
        assert_eq!(
            wrap_line("x = 1  # keep the value small for now", 20),
            vec!["x = 1", "# keep the value", "# small for now"]
        );
    }

    #[test]
    fn test_comment_only_line_keeps_indent() {
        assert_eq!(
            wrap_line("    # one two three four five", 16),
            vec!["    # one two", "    # three four", "    # five"]
        );
    }

    #[test]
    fn test_generic_line_breaks_between_words() {
        assert_eq!(
            wrap_line("print(first_value and second_value or third)", 25),
            vec!["print(first_value and \\", "second_value or third)"]
        );
    }

    #[test]
    fn test_unbreakable_line_is_left_alone() {
        let line = "    call_a_function_with_a_very_long_name()";
        assert_eq!(wrap_line(line, 20), vec![line]);
    }

    #[test]
    fn test_wrapped_line_parses_as_one_statement() {
        let lines = wrap_lines(&["result = compute(alpha, beta, gamma)", "show(result)"], 20);
        assert_eq!(lines.len(), 6);

        let tree = build_tree(&lines);
        assert_eq!(tree.count_nodes(), 2);
        let first = tree.root().children[0];
        assert_eq!(tree.node(first).kind, NodeKind::Assignment);
        assert_eq!(tree.node(first).text, "result = compute( alpha, beta, gamma )");
        assert_eq!(tree.lines_of(first), Some(&[0, 1, 2, 3, 4][..]));
    }

    #[test]
    fn test_word_wrapped_line_parses_as_one_statement() {
        let lines = wrap_lines(&["value = alpha + beta + gamma + delta"], 16);
        assert!(lines.len() > 1);

        let tree = build_tree(&lines);
        assert_eq!(tree.count_nodes(), 1);
        let id = tree.root().children[0];
        assert_eq!(tree.node(id).text, "value = alpha + beta + gamma + delta");
    }

    #[test]
    fn test_split_top_level() {
        assert_eq!(split_top_level("a, (b, c), 'd, e',"), vec!["a", "(b, c)", "'d, e'"]);
        assert!(split_top_level("  ").is_empty());
    }
}
