//! Type-directed completion core for a schema-aware YAML assistant.
//!
//! Given a parsed document, a byte cursor, and a schema type, the
//! [`AssistContext`] produces edit-bearing completion proposals for keys,
//! values, and sequence items, plus hover text for the same positions.
//! All offsets are UTF-8 byte offsets into the original source, `[start, end)`.

pub mod context;
mod edits;
pub mod fuzzy;
mod hover;
pub mod indent;
mod path;
mod proposal;
mod render;
pub mod schema;
pub mod structure;
mod tests;

pub use context::AssistContext;
pub use edits::DocumentEdits;
pub use path::{PathSegment, YamlPath};
pub use proposal::{DEEMP_DASH_PROPOSAL, Proposal, ProposalKind};
pub use render::Renderable;
pub use schema::{
    CompletionProvider, DynamicSchemaContext, HintError, SchemaType, TypeDef, TypedProperty,
    ValueHint,
};
pub use structure::{Region, SNode, SNodeKind, YamlDocument};
