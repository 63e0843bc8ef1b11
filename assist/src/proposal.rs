//! Scored, labeled, edit-carrying completion proposals.

use crate::edits::DocumentEdits;
use crate::render::Renderable;
use crate::schema::{SchemaType, TypedProperty, ValueHint};

/// Deemphasis applied to dash-relaxed proposals so direct proposals win at
/// equal score.
pub const DEEMP_DASH_PROPOSAL: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalKind {
    Key,
    Value,
    Error,
}

/// One completion proposal. Ordering is by [`Proposal::effective_score`]
/// descending; ties keep enumeration order (sorting is stable).
#[derive(Debug, Clone)]
pub struct Proposal {
    pub label: String,
    pub kind: ProposalKind,
    pub score: f64,
    pub deemphasis: f64,
    pub ty: Option<SchemaType>,
    pub edits: DocumentEdits,
    pub documentation: Option<Renderable>,
}

impl Proposal {
    pub fn value(hint: &ValueHint, ty: SchemaType, score: f64, edits: DocumentEdits) -> Self {
        Self {
            label: hint.label.clone(),
            kind: ProposalKind::Value,
            score,
            deemphasis: 0.0,
            ty: Some(ty),
            edits,
            documentation: hint.documentation.clone(),
        }
    }

    pub fn key_property(property: &TypedProperty, score: f64, edits: DocumentEdits) -> Self {
        Self {
            label: property.name.clone(),
            kind: ProposalKind::Key,
            score,
            deemphasis: 0.0,
            ty: Some(property.ty.clone()),
            edits,
            documentation: property.documentation.clone(),
        }
    }

    /// A visible error entry; carries no edits and sorts above everything so
    /// the failure is not silently hidden.
    pub fn error_message(message: impl Into<String>) -> Self {
        Self {
            label: message.into(),
            kind: ProposalKind::Error,
            score: f64::MAX,
            deemphasis: 0.0,
            ty: None,
            edits: DocumentEdits::default(),
            documentation: None,
        }
    }

    pub fn deemphasize(mut self, by: f64) -> Self {
        self.deemphasis += by;
        self
    }

    pub fn is_deemphasized(&self) -> bool {
        self.deemphasis > 0.0
    }

    pub fn effective_score(&self) -> f64 {
        self.score - self.deemphasis
    }
}
