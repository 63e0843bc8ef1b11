//! Editor-facing assist layer.
//!
//! Resolves a byte cursor to a schema context, runs the completion core,
//! then ranks, limits, and converts proposals into serializable items with
//! range edits. Coordinates are UTF-8 byte offsets (`[start, end)`),
//! matching `assist`.

mod edit;
mod rank;
mod tests;

use assist::{AssistContext, PathSegment, Proposal, ProposalKind, SchemaType, YamlPath, YamlDocument};
use serde::Serialize;

pub use edit::{TextEdit, apply_text_edits};

pub const DEFAULT_MAX_PROPOSALS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssistConfig {
    pub max_proposals: usize,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            max_proposals: DEFAULT_MAX_PROPOSALS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Key,
    Value,
    Error,
}

/// One ranked completion item, ready for an editor protocol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionItem {
    pub label: String,
    pub kind: ItemKind,
    pub score: f64,
    pub deemphasized: bool,
    pub edits: Vec<TextEdit>,
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionResult {
    pub items: Vec<CompletionItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hover {
    pub markdown: String,
}

/// Computes ranked completions at a byte cursor.
pub fn completions(
    source: &str,
    root_type: &SchemaType,
    cursor: usize,
    config: AssistConfig,
) -> CompletionResult {
    let doc = YamlDocument::parse(source);
    let (selector, path) = doc.path_at(cursor);

    // A cursor inside a key token completes within the context that owns
    // the key, with the partial name as the query.
    let mut segments = path.segments().to_vec();
    if matches!(segments.last(), Some(PathSegment::KeyAtKey(_))) {
        segments.pop();
    }

    let context_path = YamlPath::from_segments(segments.clone());
    let Some(node) = doc
        .node_at(selector, &context_path)
        .or_else(|| doc.documents().get(selector))
    else {
        return CompletionResult { items: Vec::new() };
    };

    let root = AssistContext::top_level(&doc, selector, root_type.clone());
    let proposals = complete_at(&root, &segments, node, cursor);
    let ranked = rank::rank(proposals);

    let items = ranked
        .into_iter()
        .take(config.max_proposals)
        .map(to_item)
        .collect();
    CompletionResult { items }
}

/// Computes hover content at a byte cursor.
pub fn hover(source: &str, root_type: &SchemaType, cursor: usize) -> Option<Hover> {
    let doc = YamlDocument::parse(source);
    let (selector, path) = doc.path_at(cursor);
    let root = AssistContext::top_level(&doc, selector, root_type.clone());
    hover_at(&root, path.segments()).map(|renderable| Hover {
        markdown: renderable.as_markdown().to_string(),
    })
}

/// Descends the context tree along `segments`; children borrow their parent
/// and live on the stack of this recursion.
fn complete_at(
    ctx: &AssistContext,
    segments: &[PathSegment],
    node: &assist::SNode,
    offset: usize,
) -> Vec<Proposal> {
    match segments.split_first() {
        None => ctx.get_completions(node, offset),
        Some((segment, rest)) => match ctx.traverse(segment) {
            Some(child) => complete_at(&child, rest, node, offset),
            None => Vec::new(),
        },
    }
}

fn hover_at(ctx: &AssistContext, segments: &[PathSegment]) -> Option<assist::Renderable> {
    match segments.split_first() {
        None => ctx.hover_info(),
        Some((segment @ PathSegment::KeyAtKey(_), [])) => ctx.hover_info_for(segment),
        Some((segment, rest)) => hover_at(&ctx.traverse(segment)?, rest),
    }
}

fn to_item(proposal: Proposal) -> CompletionItem {
    CompletionItem {
        label: proposal.label.clone(),
        kind: match proposal.kind {
            ProposalKind::Key => ItemKind::Key,
            ProposalKind::Value => ItemKind::Value,
            ProposalKind::Error => ItemKind::Error,
        },
        score: proposal.effective_score(),
        deemphasized: proposal.is_deemphasized(),
        edits: edit::text_edits(&proposal.edits),
        documentation: proposal
            .documentation
            .as_ref()
            .map(|doc| doc.as_markdown().to_string()),
    }
}
