//! Tests for the quote-aware scanner.

use super::*;

// =========================================================================
// is_inside_quotes
// =========================================================================

#[test]
fn test_position_inside_double_quotes() {
    let text = r#"a = "x, y""#;
    assert!(is_inside_quotes(text, 6, false));
    assert!(!is_inside_quotes(text, 0, false));
}

#[test]
fn test_apostrophe_inside_double_quotes_does_not_toggle() {
    let text = r#"s = "it's" + x"#;
    let plus = text.find('+').unwrap();
    assert!(!is_inside_quotes(text, plus, false));
}

#[test]
fn test_escaped_quote_does_not_close_literal() {
    let text = r#"s = "a\"b" + c"#;
    let b = text.find('b').unwrap();
    assert!(is_inside_quotes(text, b, false));
    let plus = text.find('+').unwrap();
    assert!(!is_inside_quotes(text, plus, false));
}

#[test]
fn test_closed_mode_requires_terminating_quote() {
    let text = r#"x = "("#;
    // Open parity says yes, but the literal never closes.
    assert!(is_inside_quotes(text, 5, false));
    assert!(!is_inside_quotes(text, 5, true));
}

#[test]
fn test_closed_mode_detects_bracket_in_string() {
    let text = r#"print("a(b)")"#;
    assert!(is_inside_quotes(text, 8, true));
    assert!(!is_inside_quotes(text, 5, true));
}

#[test]
fn test_closed_mode_without_any_quote() {
    assert!(!is_inside_quotes("value = compute(1)", 10, true));
}

// =========================================================================
// find_outside_quotes
// =========================================================================

#[test]
fn test_find_skips_quoted_matches() {
    let text = r#"s = "a=b"; t = 1"#;
    assert_eq!(find_outside_quotes(text, "=", 3, false), Some(13));
}

#[test]
fn test_find_from_start_position() {
    let text = "a = b = c";
    assert_eq!(find_outside_quotes(text, "=", 0, false), Some(2));
    assert_eq!(find_outside_quotes(text, "=", 3, false), Some(6));
}

#[test]
fn test_find_returns_none_when_exhausted() {
    assert_eq!(find_outside_quotes(r#"x = "==""#, "==", 0, false), None);
    assert_eq!(find_outside_quotes("abc", "z", 0, false), None);
    assert_eq!(find_outside_quotes("abc", "a", 10, false), None);
}

#[test]
fn test_find_multibyte_text() {
    let text = "nombre = \"año\" # ñ";
    assert_eq!(find_outside_quotes(text, "#", 0, false), Some(text.find('#').unwrap()));
}

// =========================================================================
// count_outside_quotes
// =========================================================================

#[test]
fn test_count_ignores_strings_and_comments() {
    assert_eq!(count_outside_quotes(r#"x = "a=b" # a=b"#, '='), 1);
}

#[test]
fn test_count_brackets_in_call_with_string_argument() {
    assert_eq!(count_outside_quotes(r#"print("(")"#, '('), 1);
    assert_eq!(count_outside_quotes(r#"print("(")"#, ')'), 1);
}

#[test]
fn test_count_with_stray_apostrophe() {
    assert_eq!(count_outside_quotes("it's (", '('), 1);
}

#[test]
fn test_count_skips_escaped_quote_inside_literal() {
    assert_eq!(count_outside_quotes(r#"x = "a\"(" + ("#, '('), 1);
}

#[test]
fn test_count_open_bracket_run() {
    assert_eq!(count_outside_quotes("result = foo(bar(1,", '('), 2);
    assert_eq!(count_outside_quotes("result = foo(bar(1,", ')'), 0);
}

#[test]
fn test_count_non_ascii_character_is_zero() {
    assert_eq!(count_outside_quotes("ñ = 1", 'ñ'), 0);
}
