//! Range-edit conversion and application.

use assist::DocumentEdits;
use serde::Serialize;

/// A single replacement in byte offsets against the original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    pub start: usize,
    pub end: usize,
    pub new_text: String,
}

/// Normalized, sorted, non-overlapping range edits for one proposal.
pub(crate) fn text_edits(edits: &DocumentEdits) -> Vec<TextEdit> {
    edits
        .to_range_edits()
        .into_iter()
        .map(|(start, end, new_text)| TextEdit {
            start,
            end,
            new_text,
        })
        .collect()
}

/// Applies sorted, non-overlapping byte edits to `source`.
pub fn apply_text_edits(source: &str, edits: &[TextEdit]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut pos = 0usize;
    for edit in edits {
        debug_assert!(edit.start >= pos && edit.end >= edit.start);
        out.push_str(&source[pos..edit.start]);
        out.push_str(&edit.new_text);
        pos = edit.end;
    }
    out.push_str(&source[pos..]);
    out
}
