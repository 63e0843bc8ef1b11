//! An ordered insert/delete plan over document text.
//! All offsets address the *original* text; ops compose left-to-right into
//! one replacement.

#[derive(Debug, Clone, PartialEq, Eq)]
enum EditOp {
    Insert { offset: usize, text: String },
    Delete { start: usize, end: usize },
}

impl EditOp {
    fn anchor(&self) -> usize {
        match self {
            EditOp::Insert { offset, .. } => *offset,
            EditOp::Delete { start, .. } => *start,
        }
    }
}

/// A position-anchored set of insert/delete operations.
///
/// Ops anchored at the same offset apply in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentEdits {
    ops: Vec<EditOp>,
}

impl DocumentEdits {
    pub fn insert(&mut self, offset: usize, text: impl Into<String>) {
        self.ops.push(EditOp::Insert {
            offset,
            text: text.into(),
        });
    }

    pub fn delete(&mut self, start: usize, end: usize) {
        debug_assert!(start <= end);
        self.ops.push(EditOp::Delete { start, end });
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Lowest anchor offset across all ops — the point where the proposal
    /// starts touching the document.
    pub fn first_edit_start(&self) -> Option<usize> {
        self.ops.iter().map(EditOp::anchor).min()
    }

    /// Rewrites the primary inserted text: the insertion with the lowest
    /// anchor whose text contains non-whitespace. `f` receives the byte
    /// offset of the first non-whitespace character within that text and
    /// the text itself, and returns the replacement. No-op when no
    /// qualifying insertion exists.
    pub fn transform_first_edit(&mut self, f: impl FnOnce(usize, &str) -> String) {
        let target = self
            .ops
            .iter_mut()
            .filter_map(|op| match op {
                EditOp::Insert { offset, text } if !text.trim().is_empty() => {
                    Some((*offset, text))
                }
                _ => None,
            })
            .min_by_key(|(offset, _)| *offset);
        if let Some((_, text)) = target {
            let local = text
                .char_indices()
                .find(|(_, c)| !c.is_whitespace())
                .map(|(i, _)| i)
                .unwrap_or(0);
            *text = f(local, text);
        }
    }

    /// Renders the plan into new text. Deleted spans are skipped, inserted
    /// text is emitted at its anchor; an insert anchored inside an already
    /// deleted span is emitted at the deletion point.
    pub fn apply(&self, source: &str) -> String {
        let mut sorted: Vec<&EditOp> = self.ops.iter().collect();
        sorted.sort_by_key(|op| op.anchor());

        let mut out = String::with_capacity(source.len());
        let mut pos = 0usize;
        for op in sorted {
            match op {
                EditOp::Insert { offset, text } => {
                    if *offset > pos {
                        out.push_str(&source[pos..*offset]);
                        pos = *offset;
                    }
                    out.push_str(text);
                }
                EditOp::Delete { start, end } => {
                    if *start > pos {
                        out.push_str(&source[pos..*start]);
                    }
                    pos = usize::max(pos, *end);
                }
            }
        }
        out.push_str(&source[pos..]);
        out
    }

    /// Normalized `(start, end, new_text)` replacements, sorted and
    /// non-overlapping, for editor protocols that want range edits.
    pub fn to_range_edits(&self) -> Vec<(usize, usize, String)> {
        let mut sorted: Vec<&EditOp> = self.ops.iter().collect();
        sorted.sort_by_key(|op| op.anchor());

        let mut out: Vec<(usize, usize, String)> = Vec::new();
        for op in sorted {
            let (start, end, text) = match op {
                EditOp::Insert { offset, text } => (*offset, *offset, text.as_str()),
                EditOp::Delete { start, end } => (*start, *end, ""),
            };
            match out.last_mut() {
                // Merge an op that lands on the tail of the previous range.
                Some((_, prev_end, prev_text)) if start <= *prev_end => {
                    *prev_end = usize::max(*prev_end, end);
                    prev_text.push_str(text);
                }
                _ => out.push((start, end, text.to_string())),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::DocumentEdits;

    #[test]
    fn delete_then_insert_replaces_the_span() {
        let mut edits = DocumentEdits::default();
        edits.delete(5, 7);
        edits.insert(7, "value");
        assert_eq!(edits.apply("key: va"), "key: value");
    }

    #[test]
    fn inserts_at_the_same_offset_apply_in_order() {
        let mut edits = DocumentEdits::default();
        edits.insert(4, " ");
        edits.insert(4, "one");
        edits.insert(4, "\n  two");
        assert_eq!(edits.apply("key:"), "key: one\n  two");
    }

    #[test]
    fn insert_anchored_inside_deleted_span_lands_at_the_deletion_point() {
        let mut edits = DocumentEdits::default();
        edits.delete(0, 2);
        edits.insert(0, "name");
        assert_eq!(edits.apply("na: rest"), "name: rest");
    }

    #[test]
    fn transform_first_edit_targets_first_non_whitespace_insertion() {
        let mut edits = DocumentEdits::default();
        edits.insert(4, " ");
        edits.insert(4, "item");
        edits.transform_first_edit(|local, text| {
            assert_eq!(local, 0);
            format!("- {text}")
        });
        assert_eq!(edits.apply("key:"), "key: - item");
    }

    #[test]
    fn transform_first_edit_reports_offset_past_leading_whitespace() {
        let mut edits = DocumentEdits::default();
        edits.insert(0, "\n  name: ");
        edits.transform_first_edit(|local, text| {
            assert_eq!(local, 3);
            text.to_string()
        });
    }

    #[test]
    fn transform_first_edit_without_qualifying_edit_is_a_no_op() {
        let mut edits = DocumentEdits::default();
        edits.insert(0, "  ");
        edits.delete(0, 1);
        let before = edits.clone();
        edits.transform_first_edit(|_, _| unreachable!("no qualifying edit"));
        assert_eq!(edits, before);
    }

    #[test]
    fn range_edits_merge_a_replacement() {
        let mut edits = DocumentEdits::default();
        edits.delete(5, 7);
        edits.insert(7, "value");
        assert_eq!(edits.to_range_edits(), vec![(5, 7, "value".to_string())]);
    }
}
