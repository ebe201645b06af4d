//! Quote and comment aware scanning primitives.
//!
//! Every other stage of the parser goes through these helpers when it needs to
//! know whether a character is real code or sits inside a string literal.
//! All positions are byte offsets; only ASCII delimiters are ever inspected,
//! so offsets returned here are always valid `str` slice boundaries.
//!
//! None of these functions fail. "Not found" is `None` and "not quoted" is
//! `false`.

#[cfg(test)]
mod tests;

const BACKSLASH: u8 = b'\\';

/// Returns whether `pos` lies inside a quoted literal.
///
/// With `require_closed == false` this is a forward parity scan from the start
/// of `text`: a quote type only toggles while the other type is not open.
/// It does not notice a literal that is never terminated later on the line.
///
/// With `require_closed == true` the scan walks backward from `pos` to the
/// nearest opening quote that is not itself nested in the other quote type,
/// then forward to confirm a matching close exists before the end of `text`.
pub fn is_inside_quotes(text: &str, pos: usize, require_closed: bool) -> bool {
    if require_closed {
        inside_closed_quotes(text.as_bytes(), pos)
    } else {
        inside_open_quotes(text.as_bytes(), pos)
    }
}

fn inside_open_quotes(bytes: &[u8], pos: usize) -> bool {
    let mut in_single = false;
    let mut in_double = false;
    let mut escaped = false;

    for &b in bytes.iter().take(pos) {
        if b == BACKSLASH {
            escaped = !escaped;
            continue;
        }
        if !escaped {
            match b {
                b'\'' if !in_double => in_single = !in_single,
                b'"' if !in_single => in_double = !in_double,
                _ => {}
            }
        }
        escaped = false;
    }

    in_single || in_double
}

fn inside_closed_quotes(bytes: &[u8], pos: usize) -> bool {
    let Some(quote) = opening_quote_before(bytes, pos) else {
        return false;
    };

    let mut escaped = false;
    for &b in bytes.iter().skip(pos + 1) {
        if b == BACKSLASH {
            escaped = !escaped;
            continue;
        }
        if !escaped && b == quote {
            return true;
        }
        escaped = false;
    }
    false
}

/// Nearest unescaped quote before `pos` with no quote of the other type
/// anywhere in front of it.
fn opening_quote_before(bytes: &[u8], pos: usize) -> Option<u8> {
    let mut escaped = false;
    let mut i = pos.min(bytes.len());

    while i > 0 {
        i -= 1;
        let b = bytes[i];
        if b == BACKSLASH {
            escaped = !escaped;
            continue;
        }
        if !escaped && is_quote(b) && !other_quote_before(bytes, i, b) {
            return Some(b);
        }
        escaped = false;
    }
    None
}

fn other_quote_before(bytes: &[u8], end: usize, quote: u8) -> bool {
    let other = if quote == b'\'' { b'"' } else { b'\'' };
    let mut escaped = false;
    let mut i = end;

    while i > 0 {
        i -= 1;
        let b = bytes[i];
        if b == BACKSLASH {
            escaped = !escaped;
            continue;
        }
        if !escaped && b == other {
            return true;
        }
        escaped = false;
    }
    false
}

fn is_quote(b: u8) -> bool {
    b == b'\'' || b == b'"'
}

/// Finds `needle` at or after `start`, skipping matches that sit inside
/// quotes according to [`is_inside_quotes`].
pub fn find_outside_quotes(
    text: &str,
    needle: &str,
    start: usize,
    require_closed: bool,
) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }

    let mut from = start;
    while from <= text.len() {
        let offset = text.get(from..)?.find(needle)?;
        let pos = from + offset;
        if !is_inside_quotes(text, pos, require_closed) {
            return Some(pos);
        }
        from = next_char_boundary(text, pos);
    }
    None
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    let mut next = pos + 1;
    while next < text.len() && !text.is_char_boundary(next) {
        next += 1;
    }
    next
}

/// Counts occurrences of the ASCII character `ch` that are neither quoted nor
/// part of a trailing `#` comment.
///
/// A quote with no closing partner on the line is treated as an ordinary
/// character, so a stray apostrophe does not hide the rest of the line.
/// Non-ASCII characters are never counted.
pub fn count_outside_quotes(text: &str, ch: char) -> usize {
    if !ch.is_ascii() {
        return 0;
    }

    let bytes = text.as_bytes();
    let target = ch as u8;
    let mut count = 0;
    let mut index = 0;
    let mut escaped = false;

    while index < bytes.len() {
        let b = bytes[index];
        if b == BACKSLASH {
            escaped = !escaped;
            index += 1;
            continue;
        }
        if b == b'#' {
            break;
        }

        if !escaped && is_quote(b) {
            match closing_quote(bytes, index) {
                Some(close) => index = close + 1,
                None => {
                    if b == target {
                        count += 1;
                    }
                    index += 1;
                }
            }
        } else {
            if b == target {
                count += 1;
            }
            index += 1;
        }
        escaped = false;
    }

    count
}

/// Index of the quote that closes the one at `open`, skipping escape pairs.
fn closing_quote(bytes: &[u8], open: usize) -> Option<usize> {
    let quote = bytes[open];
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            BACKSLASH => i += 2,
            b if b == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}
