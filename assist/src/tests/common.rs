//! Shared demo schema and completion helpers for the test suite.
//!
//! Sources use a `$0` marker for the cursor, mirroring editor fixtures.

use crate::context::AssistContext;
use crate::path::{PathSegment, YamlPath};
use crate::proposal::Proposal;
use crate::schema::types::{MapType, ObjectType, ScalarType, SequenceType};
use crate::schema::{SchemaType, TypedProperty, ValueHint};
use crate::structure::{SNode, YamlDocument};

pub fn string_ty() -> SchemaType {
    ScalarType::named("string").into_type()
}

pub fn int_ty() -> SchemaType {
    ScalarType::named("int").into_type()
}

pub fn tag_ty() -> SchemaType {
    ScalarType::named("Tag")
        .with_hints(vec![ValueHint::new("stable"), ValueHint::new("beta")])
        .into_type()
}

pub fn restart_policy_ty() -> SchemaType {
    ScalarType::named("RestartPolicy")
        .with_hints(vec![
            ValueHint::new("always"),
            ValueHint::new("never"),
            ValueHint::new("on-failure").describe("Restart only after a non-zero exit."),
        ])
        .into_type()
}

pub fn container_ty() -> SchemaType {
    ObjectType::named("Container")
        .with_property(
            TypedProperty::new("image", string_ty())
                .primary()
                .describe("Container image reference."),
        )
        .with_property(TypedProperty::new("ports", SequenceType::of(int_ty())).required())
        .with_property(TypedProperty::new("command", SequenceType::of(string_ty())))
        .into_type()
}

/// Root demo type: one primary property, one required, several others.
pub fn deployment_ty() -> SchemaType {
    ObjectType::named("Deployment")
        .with_property(
            TypedProperty::new("name", string_ty())
                .primary()
                .describe("Entity name."),
        )
        .with_property(TypedProperty::new("replicas", int_ty()).required())
        .with_property(TypedProperty::new("restart", restart_policy_ty()))
        .with_property(TypedProperty::new("env", MapType::of(string_ty())))
        .with_property(TypedProperty::new("tags", SequenceType::of(tag_ty())))
        .with_property(TypedProperty::new(
            "containers",
            SequenceType::of(container_ty()),
        ))
        .into_type()
}

/// Strips the `$0` cursor marker, returning the clean source and the offset.
pub fn doc_with_cursor(source: &str) -> (String, usize) {
    let cursor = source.find("$0").expect("source must contain a $0 marker");
    (source.replace("$0", ""), cursor)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Full resolution pipeline: parse, locate the cursor, traverse, complete.
pub fn completions_at(root_ty: &SchemaType, source: &str) -> Vec<Proposal> {
    init_tracing();
    let (text, cursor) = doc_with_cursor(source);
    let doc = YamlDocument::parse(text);
    let (selector, path) = doc.path_at(cursor);

    let mut segments = path.segments().to_vec();
    if matches!(segments.last(), Some(PathSegment::KeyAtKey(_))) {
        segments.pop();
    }
    let node = doc
        .node_at(selector, &YamlPath::from_segments(segments.clone()))
        .or_else(|| doc.documents().get(selector))
        .expect("cursor node");

    let root = AssistContext::top_level(&doc, selector, root_ty.clone());
    complete_at(&root, &segments, node, cursor)
}

fn complete_at(
    ctx: &AssistContext,
    segments: &[PathSegment],
    node: &SNode,
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

pub fn labels(proposals: &[Proposal]) -> Vec<&str> {
    proposals.iter().map(|p| p.label.as_str()).collect()
}

/// Applies the edits of the proposal with `label` to the marker-stripped
/// source.
pub fn apply_labeled(root_ty: &SchemaType, source: &str, label: &str) -> String {
    let (text, _) = doc_with_cursor(source);
    let proposals = completions_at(root_ty, source);
    let proposal = proposals
        .iter()
        .find(|p| p.label == label)
        .unwrap_or_else(|| panic!("no proposal labeled {label:?} in {:?}", labels(&proposals)));
    proposal.edits.apply(&text)
}
