//! The recursive type-directed completion and hover engine.
//!
//! An [`AssistContext`] represents "what is valid to type here" for one
//! schema type at one document path. Contexts form a tree: traversal into
//! nested YAML structure creates children holding a non-owning reference to
//! their parent (used for hover delegation only). Contexts live for a single
//! request and hold no cross-request state.

use tracing::{debug, warn};

use crate::edits::DocumentEdits;
use crate::fuzzy;
use crate::hover;
use crate::indent::{INDENT_BY, apply_indentation, indent_str};
use crate::path::{PathSegment, YamlPath};
use crate::proposal::{DEEMP_DASH_PROPOSAL, Proposal, ProposalKind};
use crate::render::Renderable;
use crate::schema::{self, DynamicSchemaContext, SchemaType, TypedProperty};
use crate::structure::{Region, SNode, YamlDocument};

pub struct AssistContext<'a> {
    doc: &'a YamlDocument,
    document_selector: usize,
    path: YamlPath,
    ty: SchemaType,
    parent: Option<&'a AssistContext<'a>>,
}

impl<'a> AssistContext<'a> {
    /// Root context for one sub-document of the stream.
    pub fn top_level(doc: &'a YamlDocument, document_selector: usize, ty: SchemaType) -> Self {
        Self {
            doc,
            document_selector,
            path: YamlPath::EMPTY,
            ty,
            parent: None,
        }
    }

    pub fn ty(&self) -> &SchemaType {
        &self.ty
    }

    pub fn path(&self) -> &YamlPath {
        &self.path
    }

    /// Completion proposals for the cursor at `offset` inside `node`.
    ///
    /// Value and key completion are mutually exclusive; dash-relaxed
    /// completions are appended for sequencable types regardless. The result
    /// is unranked — ordering and limiting are the caller's job.
    pub fn get_completions(&self, node: &SNode, offset: usize) -> Vec<Proposal> {
        if let Some(assistant) = self.ty.custom_assistant()
            && let Some(region) = custom_assist_region(node, offset)
        {
            return assistant.completions(self.doc, region, offset - region.start);
        }

        let query = self.doc.prefix_at(offset).to_string();
        let mut completions = self.value_completions(node, offset, &query);
        if completions.is_empty() {
            completions = self.key_completions(offset, &query);
        }
        if self.ty.is_sequencable() {
            completions.extend(self.dashed_completions(node, offset));
        }
        completions
    }

    /// Descends one path segment, returning `None` when the schema does not
    /// extend below this point (not an error: completion is schema-blind
    /// from there on).
    pub fn traverse(&self, segment: &PathSegment) -> Option<AssistContext<'_>> {
        match segment {
            PathSegment::ValueAtKey(key) => {
                if self.ty.is_sequencable() || self.ty.is_map() {
                    return self.child_with(segment, self.ty.domain_type());
                }
                let property_ty = schema::property_of(&self.ty, key).map(|p| p.ty);
                self.child_with(segment, property_ty)
            }
            PathSegment::ValueAtIndex(_) if self.ty.is_sequencable() => {
                self.child_with(segment, self.ty.domain_type())
            }
            _ => None,
        }
    }

    /// Hover for this context: delegates to the parent with the last path
    /// segment, since hover content is attached to typed properties.
    pub fn hover_info(&self) -> Option<Renderable> {
        let parent = self.parent?;
        parent.hover_info_for(self.path.last_segment()?)
    }

    /// Hover for one segment resolved against this context's properties.
    pub fn hover_info_for(&self, segment: &PathSegment) -> Option<Renderable> {
        let name = segment.property_name()?;
        let property = schema::property_of(&self.ty, name)?;
        Some(hover::property_hover(
            &self.path.to_property_string(),
            &self.ty,
            &property,
        ))
    }

    /// Value positions have no dedicated hover at this layer; show the same
    /// content as the enclosing context.
    pub fn value_hover_info(&self, _region: Region) -> Option<Renderable> {
        self.hover_info()
    }

    /// Position-derived facts about the concrete document. Falls back to an
    /// empty context (everything undefined) when the node cannot be
    /// resolved.
    pub fn schema_context(&self) -> DynamicSchemaContext {
        match self.context_node() {
            Some(node) => {
                let full_path = self
                    .path
                    .prepend(PathSegment::ValueAtIndex(self.document_selector));
                DynamicSchemaContext::new(full_path, node.defined_keys())
            }
            None => {
                debug!(
                    path = %self.path.to_property_string(),
                    "schema context unresolved, treating all properties as undefined"
                );
                DynamicSchemaContext::empty()
            }
        }
    }

    /// The document node this context's path points at.
    pub fn context_node(&self) -> Option<&'a SNode> {
        self.doc.node_at(self.document_selector, &self.path)
    }

    fn value_completions(&self, node: &SNode, offset: usize, query: &str) -> Vec<Proposal> {
        let hints = match self.ty.hint_values(&self.schema_context()) {
            Ok(hints) => hints,
            Err(e) => return vec![Proposal::error_message(e.display_message())],
        };
        if hints.is_empty() {
            return Vec::new();
        }

        let reference_indent = match self.context_node() {
            Some(context_node) => context_node.indent,
            None => {
                // Not always correct, but better than nothing.
                debug!("reference indent unresolved, falling back to the cursor node");
                node.indent
            }
        };

        let query_start = offset - query.len();
        let mut completions = Vec::new();
        for hint in hints {
            let score = fuzzy::match_score(query, &hint.value);
            if score != 0.0 && hint.value != query {
                let mut edits = DocumentEdits::default();
                edits.delete(query_start, offset);
                if query_start > 0
                    && self
                        .doc
                        .char_at(query_start - 1)
                        .is_some_and(|c| !c.is_whitespace())
                {
                    edits.insert(offset, " ");
                }
                edits.insert(offset, hint.value.clone());
                if let Some(extra) = &hint.extra_insertion {
                    edits.insert(offset, apply_indentation(extra, reference_indent));
                }
                completions.push(Proposal::value(&hint, self.ty.clone(), score, edits));
            }
        }
        completions
    }

    fn key_completions(&self, offset: usize, query: &str) -> Vec<Proposal> {
        let properties = self.ty.properties();
        if properties.is_empty() {
            return Vec::new();
        }

        let query_start = offset - query.len();
        let dynamic_ctx = self.schema_context();
        let key_indent = self
            .context_node()
            .map(SNode::child_key_indent)
            .unwrap_or(0);

        for tier in sort_into_tiers(properties) {
            let undefined: Vec<&TypedProperty> = tier
                .iter()
                .filter(|p| !dynamic_ctx.is_defined(&p.name))
                .collect();
            if undefined.is_empty() {
                continue;
            }

            // Only the first tier with undefined properties produces
            // proposals, even when nothing in it matches the query.
            let mut proposals = Vec::new();
            for property in undefined {
                let score = fuzzy::match_score(query, &property.name);
                if score == 0.0 {
                    continue;
                }
                let mut edits = DocumentEdits::default();
                edits.delete(query_start, offset);
                if query_start > 0
                    && self
                        .doc
                        .char_at(query_start - 1)
                        .is_some_and(|c| !c.is_whitespace())
                {
                    edits.insert(query_start, " ");
                }
                let mut text = String::new();
                if !self.doc.line_text_before(query_start).trim().is_empty() {
                    // The key needs its own line below the current content.
                    text.push('\n');
                    text.push_str(&indent_str(key_indent));
                }
                text.push_str(&property.name);
                text.push_str(&append_text_for(&property.ty, key_indent));
                edits.insert(query_start, text);
                proposals.push(Proposal::key_property(property, score, edits));
            }
            return proposals;
        }
        Vec::new()
    }

    fn dashed_completions(&self, node: &SNode, offset: usize) -> Vec<Proposal> {
        match self.relax_for_dashes() {
            Some(relaxed) => relaxed
                .get_completions(node, offset)
                .into_iter()
                .map(|proposal| dash_decorated(proposal, self.doc, node))
                .collect(),
            None => Vec::new(),
        }
    }

    /// A derivative context that pretends the expected type is the sequence
    /// item type. Its proposals get dash markers retrofitted by
    /// [`dash_decorated`]; the delegate's proposals are never mutated in
    /// place.
    fn relax_for_dashes(&self) -> Option<AssistContext<'_>> {
        if !self.ty.is_sequencable() {
            return None;
        }
        match self.ty.domain_type() {
            Some(item_ty) => Some(AssistContext {
                doc: self.doc,
                document_selector: self.document_selector,
                path: self.path.clone(),
                ty: item_ty,
                parent: self.parent,
            }),
            None => {
                warn!(
                    ty = self.ty.name(),
                    "dash relaxation skipped, item type unresolvable"
                );
                None
            }
        }
    }

    fn child_with(
        &self,
        segment: &PathSegment,
        ty: Option<SchemaType>,
    ) -> Option<AssistContext<'_>> {
        let ty = ty?;
        let mut child = AssistContext {
            doc: self.doc,
            document_selector: self.document_selector,
            path: self.path.append(segment.clone()),
            ty,
            parent: Some(self),
        };
        let narrowed = child.ty.narrow(&child.schema_context());
        if let Some(narrowed) = narrowed {
            child.ty = narrowed;
        }
        Some(child)
    }
}

/// Region a custom provider owns: the inline value of the cursor node.
fn custom_assist_region(node: &SNode, offset: usize) -> Option<Region> {
    let region = node.value_region()?;
    region.contains(offset).then_some(region)
}

/// Divides properties into tiers of decreasing significance: primary, then
/// required-but-not-primary, then the rest. Declaration order is preserved
/// within a tier. Only the first tier that still has undefined properties
/// generates proposals; this keeps noise down when starting a new entity.
pub fn sort_into_tiers(properties: Vec<TypedProperty>) -> [Vec<TypedProperty>; 3] {
    let mut primary = Vec::new();
    let mut required = Vec::new();
    let mut other = Vec::new();
    for property in properties {
        if property.primary {
            primary.push(property);
        } else if property.required {
            required.push(property);
        } else {
            other.push(property);
        }
    }
    [primary, required, other]
}

/// Text appended after a completed key, depending on the value type it
/// expects: nested structure opens an indented line, sequences open a dash
/// placeholder, scalars just get the separator.
fn append_text_for(ty: &SchemaType, key_indent: usize) -> String {
    if ty.is_sequencable() {
        format!(":\n{}- ", indent_str(key_indent))
    } else if ty.is_map() || !ty.properties().is_empty() {
        format!(":\n{}", indent_str(key_indent + INDENT_BY))
    } else {
        ": ".to_string()
    }
}

/// Retrofits a YAML `- ` marker onto a proposal produced by a dash-relaxed
/// context, and deemphasizes it below direct proposals.
fn dash_decorated(mut proposal: Proposal, doc: &YamlDocument, node: &SNode) -> Proposal {
    // Value proposals inserted right after a key sit on a non-empty line and
    // need their own line before the dash.
    let needs_newline = proposal.kind == ProposalKind::Value
        && proposal
            .edits
            .first_edit_start()
            .is_some_and(|at| !doc.line_text_before(at).trim().is_empty());
    let dash_indent = node.indent;

    proposal.edits.transform_first_edit(|local, text| {
        if needs_newline {
            format!(
                "{}\n{}- {}",
                &text[..local],
                indent_str(dash_indent),
                &text[local..]
            )
        } else if local > 2 && &text[local - 2..local] == "  " {
            // Replace the already-planned indent instead of adding to it.
            format!("{}- {}", &text[..local - 2], &text[local..])
        } else {
            format!("{}- {}", &text[..local], &text[local..])
        }
    });
    proposal.label = format!("- {}", proposal.label);
    proposal.deemphasize(DEEMP_DASH_PROPOSAL)
}
