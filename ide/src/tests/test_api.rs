use assist::schema::types::{ObjectType, ScalarType};
use assist::{
    DynamicSchemaContext, HintError, SchemaType, TypeDef, TypedProperty, ValueHint,
};

use crate::{AssistConfig, apply_text_edits, completions, hover};

fn mode_root(hints: &[&str]) -> SchemaType {
    let mode = ScalarType::named("Mode")
        .with_hints(hints.iter().copied().map(ValueHint::new).collect())
        .into_type();
    ObjectType::named("Config")
        .with_property(TypedProperty::new("mode", mode).describe("Execution mode."))
        .into_type()
}

#[test]
fn items_are_ranked_by_score_descending() {
    let root = mode_root(&["sofa", "fast"]);
    let source = "mode: fa";
    let result = completions(source, &root, source.len(), AssistConfig::default());
    let labels: Vec<_> = result.items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, ["fast", "sofa"]);
    assert!(result.items[0].score > result.items[1].score);
}

#[test]
fn max_proposals_caps_the_result() {
    let root = mode_root(&["sofa", "fast"]);
    let source = "mode: fa";
    let config = AssistConfig { max_proposals: 1 };
    let result = completions(source, &root, source.len(), config);
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].label, "fast");
}

/// A sequence that also accepts an inline scalar value.
#[derive(Debug)]
struct FlexList;

impl TypeDef for FlexList {
    fn name(&self) -> &str {
        "FlexList"
    }

    fn is_sequencable(&self) -> bool {
        true
    }

    fn domain_type(&self) -> Option<SchemaType> {
        Some(
            ScalarType::named("Item")
                .with_hints(vec![ValueHint::new("item")])
                .into_type(),
        )
    }

    fn hint_values(&self, _ctx: &DynamicSchemaContext) -> Result<Vec<ValueHint>, HintError> {
        Ok(vec![ValueHint::new("inline")])
    }
}

#[test]
fn dashed_items_sort_after_direct_ones_and_are_flagged() {
    let root = ObjectType::named("Root")
        .with_property(TypedProperty::new("list", std::sync::Arc::new(FlexList)))
        .into_type();
    let source = "list: ";
    let result = completions(source, &root, source.len(), AssistConfig::default());
    let labels: Vec<_> = result.items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, ["inline", "- item"]);
    assert!(!result.items[0].deemphasized);
    assert!(result.items[1].deemphasized);
    assert!(result.items[1].score < result.items[0].score);
}

#[test]
fn item_edits_apply_cleanly_to_the_source() {
    let root = mode_root(&["fast"]);
    let source = "mode:";
    let result = completions(source, &root, source.len(), AssistConfig::default());
    let item = &result.items[0];
    assert_eq!(apply_text_edits(source, &item.edits), "mode: fast");
}

#[test]
fn items_serialize_with_lowercase_kinds() {
    let root = mode_root(&["fast"]);
    let source = "mode: ";
    let result = completions(source, &root, source.len(), AssistConfig::default());
    let json = serde_json::to_value(&result).expect("serializable");
    let item = &json["items"][0];
    assert_eq!(item["label"], "fast");
    assert_eq!(item["kind"], "value");
    assert_eq!(item["deemphasized"], false);
    assert!(item["edits"][0]["start"].is_u64());
}

#[test]
fn hover_resolves_key_and_value_positions() {
    let root = mode_root(&["fast"]);
    let source = "mode: fast\n";

    let on_key = hover(source, &root, 2).expect("hover on key");
    assert!(on_key.markdown.starts_with("**mode**"));
    assert!(on_key.markdown.contains("Execution mode."));

    let on_value = hover(source, &root, 8).expect("hover on value");
    assert_eq!(on_value, on_key);

    assert!(hover(source, &root, source.len()).is_none());
}

#[test]
fn unknown_context_yields_no_items() {
    let root = mode_root(&["fast"]);
    let source = "other:\n  deep: x";
    let result = completions(source, &root, source.len(), AssistConfig::default());
    assert!(result.items.is_empty());
}
