use insta::assert_snapshot;

use super::common::{apply_labeled, completions_at, deployment_ty, labels};
use crate::proposal::DEEMP_DASH_PROPOSAL;
use crate::schema::types::{ObjectType, ScalarType, SequenceType};
use crate::schema::{TypeDef, TypedProperty, ValueHint};

#[test]
fn sequence_value_position_offers_dashed_hints() {
    let proposals = completions_at(&deployment_ty(), "tags:\n  $0");
    assert_snapshot!(labels(&proposals).join(", "), @"- stable, - beta");
    assert!(proposals.iter().all(|p| p.is_deemphasized()));
}

#[test]
fn dashed_hints_rank_below_direct_proposals() {
    let proposals = completions_at(&deployment_ty(), "tags:\n  $0");
    for proposal in &proposals {
        assert_eq!(proposal.deemphasis, DEEMP_DASH_PROPOSAL);
        assert!(proposal.effective_score() < proposal.score);
    }
}

#[test]
fn dash_is_inserted_on_the_blank_item_line() {
    let applied = apply_labeled(&deployment_ty(), "tags:\n  $0", "- stable");
    assert_eq!(applied, "tags:\n  - stable");
}

#[test]
fn value_right_after_the_key_moves_to_its_own_dashed_line() {
    let applied = apply_labeled(&deployment_ty(), "tags:$0", "- beta");
    assert_eq!(applied, "tags: \n- beta");
}

#[test]
fn nested_sequence_keeps_the_key_indent_for_the_dash() {
    let step = ScalarType::named("Step")
        .with_hints(vec![ValueHint::new("foo: bar")])
        .into_type();
    let spec = ObjectType::named("Spec")
        .with_property(TypedProperty::new("steps", SequenceType::of(step)))
        .into_type();
    let root = ObjectType::named("Pipeline")
        .with_property(TypedProperty::new("spec", spec))
        .into_type();

    let applied = apply_labeled(&root, "spec:\n  steps:$0", "- foo: bar");
    assert_eq!(applied, "spec:\n  steps: \n  - foo: bar");
}

#[test]
fn dashed_key_proposal_absorbs_its_planned_indent() {
    // The relaxed key proposal plans "\n  image: "; the dash replaces the
    // two-space indent instead of stacking in front of it.
    let applied = apply_labeled(&deployment_ty(), "containers:$0", "- image");
    assert_eq!(applied, "containers: \n- image: ");
}

#[test]
fn cursor_behind_an_existing_dash_gets_plain_hints() {
    let proposals = completions_at(&deployment_ty(), "tags:\n  - $0");
    assert_eq!(labels(&proposals), ["stable", "beta"]);
    assert!(proposals.iter().all(|p| !p.is_deemphasized()));

    let applied = apply_labeled(&deployment_ty(), "tags:\n  - $0", "stable");
    assert_eq!(applied, "tags:\n  - stable");
}

#[test]
fn non_sequencable_types_get_no_dashed_variants() {
    let proposals = completions_at(&deployment_ty(), "restart: $0");
    assert_eq!(labels(&proposals), ["always", "never", "on-failure"]);
}

/// Sequencable but with no resolvable item type.
#[derive(Debug)]
struct UntypedSeq;

impl TypeDef for UntypedSeq {
    fn name(&self) -> &str {
        "untyped[]"
    }

    fn is_sequencable(&self) -> bool {
        true
    }
}

#[test]
fn unresolvable_item_type_skips_relaxation() {
    let root = ObjectType::named("Root")
        .with_property(TypedProperty::new("items", std::sync::Arc::new(UntypedSeq)))
        .into_type();
    let proposals = completions_at(&root, "items: $0");
    assert!(proposals.is_empty());
}
