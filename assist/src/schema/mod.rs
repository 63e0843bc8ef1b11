//! The schema-type facade consumed by the completion core.
//!
//! A schema is a tree of typed nodes describing what is valid at each
//! document position. The core queries types exclusively through [`TypeDef`]
//! and never mutates them.

pub mod context;
pub mod types;

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::proposal::Proposal;
use crate::render::Renderable;
use crate::structure::{Region, YamlDocument};

pub use context::DynamicSchemaContext;

/// Shared handle to a schema type. Multiple handles may represent different
/// facets of the same logical type (see [`TypeDef::narrow`]).
pub type SchemaType = Arc<dyn TypeDef>;

/// Capability interface over one schema type.
///
/// Defaults describe an opaque scalar: not sequencable, not a map, no
/// properties, no hints, no custom assistant, no narrowing.
pub trait TypeDef: fmt::Debug + Send + Sync {
    /// Display name, used in hovers and diagnostics.
    fn name(&self) -> &str;

    fn is_sequencable(&self) -> bool {
        false
    }

    fn is_map(&self) -> bool {
        false
    }

    /// Item type of a sequence, or value type of a map.
    fn domain_type(&self) -> Option<SchemaType> {
        None
    }

    /// Declared properties, in declaration order (tiering relies on it).
    fn properties(&self) -> Vec<TypedProperty> {
        Vec::new()
    }

    /// Candidate values for this type at the given position.
    fn hint_values(&self, _ctx: &DynamicSchemaContext) -> Result<Vec<ValueHint>, HintError> {
        Ok(Vec::new())
    }

    /// A type-specific completion provider that owns a document sub-region.
    fn custom_assistant(&self) -> Option<&dyn CompletionProvider> {
        None
    }

    /// Narrows this declared type using concrete document facts (e.g. a
    /// discriminated union resolved by a sibling field). `None` keeps the
    /// declared type.
    fn narrow(&self, _ctx: &DynamicSchemaContext) -> Option<SchemaType> {
        None
    }
}

/// Looks up a declared property by name.
pub fn property_of(ty: &SchemaType, name: &str) -> Option<TypedProperty> {
    ty.properties().into_iter().find(|p| p.name == name)
}

/// A property declared by a schema type.
#[derive(Debug, Clone)]
pub struct TypedProperty {
    pub name: String,
    pub ty: SchemaType,
    pub primary: bool,
    pub required: bool,
    pub documentation: Option<Renderable>,
}

impl TypedProperty {
    pub fn new(name: impl Into<String>, ty: SchemaType) -> Self {
        Self {
            name: name.into(),
            ty,
            primary: false,
            required: false,
            documentation: None,
        }
    }

    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn describe(mut self, markdown: impl Into<String>) -> Self {
        self.documentation = Some(Renderable::markdown(markdown));
        self
    }
}

/// A schema-declared candidate value.
#[derive(Debug, Clone)]
pub struct ValueHint {
    pub value: String,
    pub label: String,
    pub documentation: Option<Renderable>,
    /// Structural fragment appended after the value, indentation-normalized
    /// to the reference node's indent (e.g. a child-key skeleton).
    pub extra_insertion: Option<String>,
}

impl ValueHint {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            documentation: None,
            extra_insertion: None,
        }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn describe(mut self, markdown: impl Into<String>) -> Self {
        self.documentation = Some(Renderable::markdown(markdown));
        self
    }

    pub fn with_extra_insertion(mut self, extra: impl Into<String>) -> Self {
        self.extra_insertion = Some(extra.into());
        self
    }
}

/// A type-specific completion provider claiming a document sub-region.
pub trait CompletionProvider: fmt::Debug + Send + Sync {
    /// Completions for `region`; `offset` is relative to the region start.
    fn completions(&self, doc: &YamlDocument, region: Region, offset: usize) -> Vec<Proposal>;
}

/// A schema type's value-hint source failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HintError {
    /// A value could not be parsed; the displayed message carries no
    /// wrapping diagnostic context.
    #[error("{0}")]
    ValueParse(String),
    /// Any other hint-source failure, optionally wrapped in context.
    #[error("{message}")]
    Failed {
        message: String,
        context: Option<String>,
    },
}

impl HintError {
    pub fn failed(message: impl Into<String>) -> Self {
        HintError::Failed {
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(self, context: impl Into<String>) -> Self {
        match self {
            // Parse errors suppress any wrapping context.
            HintError::ValueParse(message) => HintError::ValueParse(message),
            HintError::Failed { message, .. } => HintError::Failed {
                message,
                context: Some(context.into()),
            },
        }
    }

    /// Human-readable message for the error proposal.
    pub fn display_message(&self) -> String {
        match self {
            HintError::ValueParse(message) => message.clone(),
            HintError::Failed { message, context } => match context {
                Some(context) => format!("{context}: {message}"),
                None => message.clone(),
            },
        }
    }
}
