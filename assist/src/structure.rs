//! Minimal indentation-based YAML structure parser.
//!
//! This is not a YAML content parser: it only recovers the block structure
//! (mappings, sequence items, plain scalars) that completion and hover need
//! to navigate, and exposes read-only text queries over the original source.
//! All offsets are UTF-8 byte offsets.

use std::collections::BTreeSet;

use crate::path::{PathSegment, YamlPath};

/// A contiguous byte region of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start: usize,
    pub end: usize,
}

impl Region {
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SNodeKind {
    /// Root of one sub-document in the stream.
    Document,
    /// `name:` with an optional inline scalar value on the same line.
    Key {
        name: String,
        value_range: Option<Region>,
    },
    /// A `- ` marker; its content hangs below as children.
    SeqItem,
    /// A plain scalar line.
    Raw,
}

/// One node of the recovered block structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SNode {
    pub kind: SNodeKind,
    /// Column of the first content character.
    pub indent: usize,
    /// Offset of the first content character.
    pub start: usize,
    /// End offset (exclusive) of the last line belonging to this node.
    pub end: usize,
    pub children: Vec<SNode>,
}

impl SNode {
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            SNodeKind::Key { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn value_region(&self) -> Option<Region> {
        match &self.kind {
            SNodeKind::Key { value_range, .. } => *value_range,
            _ => None,
        }
    }

    /// Key names of the direct children — the properties already defined at
    /// this node.
    pub fn defined_keys(&self) -> BTreeSet<String> {
        self.children
            .iter()
            .filter_map(|child| child.name().map(str::to_string))
            .collect()
    }

    /// Column where child keys of this node live (existing children win,
    /// otherwise one indent unit deeper; document roots stay at zero).
    pub fn child_key_indent(&self) -> usize {
        if let Some(child) = self.children.first() {
            return child.indent;
        }
        match self.kind {
            SNodeKind::Document => 0,
            _ => self.indent + crate::indent::INDENT_BY,
        }
    }
}

/// A parsed YAML stream: original text plus one structure tree per
/// sub-document.
#[derive(Debug, Clone)]
pub struct YamlDocument {
    text: String,
    documents: Vec<SNode>,
}

impl YamlDocument {
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        let documents = parse_documents(&text);
        Self { text, documents }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn documents(&self) -> &[SNode] {
        &self.documents
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(offset..)?.chars().next()
    }

    /// Offset of the start of the line containing `offset`.
    pub fn line_start(&self, offset: usize) -> usize {
        let offset = usize::min(offset, self.text.len());
        self.text[..offset]
            .rfind('\n')
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    /// Text from the start of the line up to (excluding) `offset`.
    pub fn line_text_before(&self, offset: usize) -> &str {
        let offset = usize::min(offset, self.text.len());
        &self.text[self.line_start(offset)..offset]
    }

    /// The partial token being typed: the contiguous run of non-delimiter
    /// characters immediately preceding `offset`, within the current line.
    pub fn prefix_at(&self, offset: usize) -> &str {
        let line = self.line_text_before(offset);
        let start = line
            .char_indices()
            .rev()
            .take_while(|&(_, c)| {
                !c.is_whitespace() && !matches!(c, ':' | ',' | '#' | '[' | ']' | '{' | '}')
            })
            .last()
            .map(|(i, _)| i)
            .unwrap_or(line.len());
        &line[start..]
    }

    /// Resolves a path from the root of sub-document `selector`.
    pub fn node_at(&self, selector: usize, path: &YamlPath) -> Option<&SNode> {
        let mut node = self.documents.get(selector)?;
        for segment in path.segments() {
            node = match segment {
                PathSegment::ValueAtKey(name) | PathSegment::KeyAtKey(name) => node
                    .children
                    .iter()
                    .find(|child| child.name() == Some(name))?,
                PathSegment::ValueAtIndex(index) => node
                    .children
                    .iter()
                    .filter(|child| matches!(child.kind, SNodeKind::SeqItem))
                    .nth(*index)?,
            };
        }
        Some(node)
    }

    /// Resolves a cursor offset to `(document selector, path)`.
    ///
    /// A cursor inside a key token yields a trailing `KeyAtKey` segment; a
    /// cursor in value position (after the colon, or on a deeper-indented
    /// line) yields the corresponding `ValueAt*` segments.
    pub fn path_at(&self, offset: usize) -> (usize, YamlPath) {
        let offset = usize::min(offset, self.text.len());
        let selector = self
            .documents
            .iter()
            .position(|doc| doc.start <= offset && offset <= doc.end)
            .or_else(|| {
                self.documents
                    .iter()
                    .rposition(|doc| doc.start <= offset)
            })
            .unwrap_or(0);

        let line_start = self.line_start(offset);
        let col = offset - line_start;
        let line_indent = self.text[line_start..]
            .chars()
            .take_while(|c| *c == ' ')
            .count();
        let eff_col = usize::min(col, line_indent);

        let mut segments = Vec::new();
        if let Some(root) = self.documents.get(selector) {
            self.descend(root, offset, eff_col, &mut segments);
        }
        (selector, YamlPath::from_segments(segments))
    }

    fn descend(&self, node: &SNode, offset: usize, eff_col: usize, out: &mut Vec<PathSegment>) {
        // Last child starting at or before the cursor is the only candidate.
        let mut claimed: Option<(&SNode, Option<usize>)> = None;
        let mut seq_index = 0usize;
        for child in &node.children {
            let index = match child.kind {
                SNodeKind::SeqItem => {
                    let i = seq_index;
                    seq_index += 1;
                    Some(i)
                }
                _ => None,
            };
            if child.start <= offset {
                claimed = Some((child, index));
            }
        }
        let Some((child, index)) = claimed else {
            return;
        };

        // Beyond the child's parsed extent (e.g. a blank line below it), the
        // cursor belongs to the child only when indented deeper.
        if offset > child.end && eff_col <= child.indent {
            return;
        }

        match &child.kind {
            SNodeKind::Document => self.descend(child, offset, eff_col, out),
            SNodeKind::SeqItem => {
                out.push(PathSegment::ValueAtIndex(index.unwrap_or(0)));
                self.descend(child, offset, eff_col, out);
            }
            SNodeKind::Key { name, .. } => {
                let key_end = child.start + name.len();
                if offset <= key_end && offset <= child.end && self.line_start(offset) == self.line_start(child.start) {
                    out.push(PathSegment::KeyAtKey(name.clone()));
                    return;
                }
                out.push(PathSegment::ValueAtKey(name.clone()));
                self.descend(child, offset, eff_col, out);
            }
            SNodeKind::Raw => {}
        }
    }
}

fn parse_documents(text: &str) -> Vec<SNode> {
    let mut documents = Vec::new();
    let mut builder = DocumentBuilder::new(0);

    let mut line_start = 0usize;
    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        let line_end_abs = line_start + content.len();
        let trimmed = content.trim_start_matches(' ');

        if trimmed.starts_with("---") {
            // A separator before any content just re-anchors the first document.
            if builder.has_content() {
                documents.push(builder.finish());
            }
            builder = DocumentBuilder::new(line_start + line.len());
        } else if !trimmed.is_empty() && !trimmed.starts_with('#') && !trimmed.starts_with('%') {
            let indent = content.len() - trimmed.len();
            builder.push_line(line_start, indent, trimmed, line_end_abs);
        }
        line_start += line.len();
    }
    documents.push(builder.finish());
    documents
}

struct DocumentBuilder {
    stack: Vec<SNode>,
    last_line_end: usize,
}

impl DocumentBuilder {
    fn new(start: usize) -> Self {
        Self {
            stack: vec![SNode {
                kind: SNodeKind::Document,
                indent: 0,
                start,
                end: start,
                children: Vec::new(),
            }],
            last_line_end: start,
        }
    }

    /// Pops every open node at `indent` or deeper into its parent.
    fn has_content(&self) -> bool {
        self.stack.len() > 1 || self.stack.first().is_some_and(|root| !root.children.is_empty())
    }

    fn close_to(&mut self, indent: usize) {
        while self.stack.len() > 1 && self.stack.last().is_some_and(|n| n.indent >= indent) {
            let mut node = self.stack.pop().expect("guarded by len check");
            node.end = self.last_line_end;
            self.stack
                .last_mut()
                .expect("document root stays on the stack")
                .children
                .push(node);
        }
    }

    fn push_line(&mut self, line_start: usize, indent: usize, content: &str, line_end: usize) {
        self.close_to(indent);

        let mut cur_indent = indent;
        let mut rest = content;

        // Peel sequence markers; each opens a node the rest hangs below.
        while rest == "-" || rest.starts_with("- ") {
            self.stack.push(SNode {
                kind: SNodeKind::SeqItem,
                indent: cur_indent,
                start: line_start + cur_indent,
                end: line_end,
                children: Vec::new(),
            });
            if rest == "-" {
                rest = "";
                cur_indent += 1;
            } else {
                rest = &rest[2..];
                cur_indent += 2;
                while let Some(stripped) = rest.strip_prefix(' ') {
                    rest = stripped;
                    cur_indent += 1;
                }
            }
        }

        if !rest.is_empty() && !rest.starts_with('#') {
            let start = line_start + cur_indent;
            let kind = match split_key(rest) {
                Some((name, value)) => {
                    let value_range = value.map(|(rel, v)| Region {
                        start: start + rel,
                        end: start + rel + v.len(),
                    });
                    SNodeKind::Key {
                        name: name.to_string(),
                        value_range,
                    }
                }
                None => SNodeKind::Raw,
            };
            self.stack.push(SNode {
                kind,
                indent: cur_indent,
                start,
                end: line_end,
                children: Vec::new(),
            });
        }

        self.last_line_end = line_end;
    }

    fn finish(mut self) -> SNode {
        self.close_to(0);
        let mut root = self.stack.pop().expect("document root stays on the stack");
        root.end = self.last_line_end;
        root
    }
}

/// Splits `name: value` at the first mapping colon outside quotes.
/// Returns the key name (quotes stripped) and, when an inline value is
/// present, its byte offset within `content` and its text (comments and
/// trailing blanks stripped).
fn split_key(content: &str) -> Option<(&str, Option<(usize, &str)>)> {
    let mut quote: Option<char> = None;
    for (i, c) in content.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, ':') => {
                let after = &content[i + 1..];
                if after.is_empty() || after.starts_with(' ') {
                    let name = content[..i].trim().trim_matches(['\'', '"']);
                    if name.is_empty() {
                        return None;
                    }
                    let skipped = after.len() - after.trim_start_matches(' ').len();
                    let vstart = i + 1 + skipped;
                    let value = content[vstart..]
                        .split('#')
                        .next()
                        .map(str::trim_end)
                        .filter(|v| !v.is_empty())
                        .map(|v| (vstart, v));
                    return Some((name, value));
                }
            }
            _ => {}
        }
    }
    None
}
