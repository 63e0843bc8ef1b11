//! Indentation helpers for layout-sensitive insertions.

/// Indentation unit for nested structure created by key proposals.
pub const INDENT_BY: usize = 2;

pub fn indent_str(indent: usize) -> String {
    " ".repeat(indent)
}

/// Re-indents a structural text fragment relative to `indent`: every line
/// after a newline gets `indent` spaces prefixed. The first line is left
/// alone (it continues the line it is inserted into).
pub fn apply_indentation(text: &str, indent: usize) -> String {
    let prefix = indent_str(indent);
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        out.push(c);
        if c == '\n' {
            out.push_str(&prefix);
        }
    }
    out
}
