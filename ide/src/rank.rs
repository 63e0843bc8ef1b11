//! Proposal ranking: effective score descending, stable.
//!
//! The core emits proposals unranked; deemphasis (dash-relaxed items) is
//! folded into the effective score so direct proposals win ties.

use std::cmp::Ordering;

use assist::Proposal;

pub(crate) fn rank(mut proposals: Vec<Proposal>) -> Vec<Proposal> {
    proposals.sort_by(|a, b| {
        b.effective_score()
            .partial_cmp(&a.effective_score())
            .unwrap_or(Ordering::Equal)
    });
    proposals
}
