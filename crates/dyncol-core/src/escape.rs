//! Quoting for SQL string literals and identifiers.

/// Append `s` as a single-quoted SQL string literal.
///
/// Escapes are applied in a single pass over the input, so the backslash
/// introduced by one escape is never escaped again:
///
/// | char | output |
/// |---|---|
/// | `\` | `\\` |
/// | backspace | `\b` |
/// | `'` | `\'` |
/// | NUL | `\0` |
///
/// Every other character, control characters included, is copied as is.
pub fn push_quoted_literal(s: &str, out: &mut String) {
    out.reserve(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\'' => out.push_str("\\'"),
            '\0' => out.push_str("\\0"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
}

/// Quote `s` as a single-quoted SQL string literal. See [`push_quoted_literal`].
///
/// ```
/// use dyncol_core::escape::quote_literal;
/// assert_eq!(quote_literal(r"it's a\b"), r"'it\'s a\\b'");
/// ```
pub fn quote_literal(s: &str) -> String {
    let mut out = String::new();
    push_quoted_literal(s, &mut out);
    out
}

/// Append `name` as a backtick-quoted identifier, doubling embedded backticks.
pub fn push_quoted_identifier(name: &str, out: &mut String) {
    out.reserve(name.len() + 2);
    out.push('`');
    for ch in name.chars() {
        if ch == '`' {
            out.push('`');
        }
        out.push(ch);
    }
    out.push('`');
}

/// Quote `name` as a backtick-quoted identifier. See [`push_quoted_identifier`].
pub fn quote_identifier(name: &str) -> String {
    let mut out = String::new();
    push_quoted_identifier(name, &mut out);
    out
}
