//! Nested delimiter matching.
//!
//! Bracket counting here is purely structural: it does not consult the
//! scanner, so callers that care about brackets inside string literals must
//! filter candidate positions themselves.


/// Characters that end a sub-expression when met at top level.
const EXPRESSION_BOUNDARIES: &[u8] = b" ,)]}\n";

/// Returns the closing partner for an opening bracket.
pub fn closing_for(open: char) -> Option<char> {
    match open {
        '(' => Some(')'),
        '[' => Some(']'),
        '{' => Some('}'),
        _ => None,
    }
}

/// Finds the index of the bracket that closes the one at `open_pos`.
///
/// Depth counting starts at `open_pos + 1`. Returns `None` when the depth
/// never returns to zero before the end of `text`, or when `open_pos` is past
/// the end.
pub fn match_bracket(text: &str, open_pos: usize, pair: (char, char)) -> Option<usize> {
    let (open, close) = pair;
    let bytes = text.as_bytes();
    if open_pos >= bytes.len() || !open.is_ascii() || !close.is_ascii() {
        return None;
    }

    let (open, close) = (open as u8, close as u8);
    let mut depth = 1usize;
    for (pos, &b) in bytes.iter().enumerate().skip(open_pos + 1) {
        if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Some(pos);
            }
        }
    }
    None
}

/// Finds where the sub-expression starting at `start` ends.
///
/// Bracketed groups opened by `(` or `[` are skipped whole; an unmatched one
/// runs to the end of the text. Otherwise the first top-level boundary
/// character (space, comma, closing bracket, newline) ends the expression.
pub fn find_expression_boundary(text: &str, start: usize) -> usize {
    let bytes = text.as_bytes();
    let mut pos = start;

    while pos < bytes.len() {
        let b = bytes[pos];
        if b == b'(' || b == b'[' {
            let open = b as char;
            let pair = (open, closing_for(open).unwrap_or(open));
            match match_bracket(text, pos, pair) {
                Some(close) => pos = close + 1,
                None => return bytes.len(),
            }
            continue;
        }
        if EXPRESSION_BOUNDARIES.contains(&b) {
            return pos;
        }
        pos += 1;
    }

    bytes.len()
}
