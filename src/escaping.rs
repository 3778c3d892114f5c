//! Escaping for text interpolated into generated Go string literals
//!
//! Zero literals (`""`), user-supplied tag arguments and struct tags inside
//! `*new(struct{...})` can all carry quotes or backslashes; every piece of
//! text placed between `"` delimiters in generated code goes through here.

/// Escape a string for the body of a Go interpreted string literal
///
/// Escapes: backslash, double quotes, newlines, carriage returns, tabs
pub fn escape_go_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Wrap a string in quotes as a Go interpreted string literal
pub fn quote_go_string(s: &str) -> String {
    format!("\"{}\"", escape_go_string(s))
}
