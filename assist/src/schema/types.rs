//! Concrete schema-type variants.
//!
//! Schemas are assembled from these building blocks: objects with declared
//! properties, scalars with (possibly fallible) value hints, sequences,
//! maps, and discriminated unions narrowed by sibling fields.

use std::fmt;
use std::sync::Arc;

use super::{
    CompletionProvider, DynamicSchemaContext, HintError, SchemaType, TypeDef, TypedProperty,
    ValueHint,
};

/// A mapping with a fixed set of declared properties.
#[derive(Debug)]
pub struct ObjectType {
    name: String,
    properties: Vec<TypedProperty>,
}

impl ObjectType {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, property: TypedProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn into_type(self) -> SchemaType {
        Arc::new(self)
    }
}

impl TypeDef for ObjectType {
    fn name(&self) -> &str {
        &self.name
    }

    fn properties(&self) -> Vec<TypedProperty> {
        self.properties.clone()
    }
}

type HintFn = Box<dyn Fn(&DynamicSchemaContext) -> Result<Vec<ValueHint>, HintError> + Send + Sync>;

enum HintSource {
    None,
    Static(Vec<ValueHint>),
    Dynamic(HintFn),
}

/// A scalar leaf type, optionally carrying value hints or a custom
/// completion provider.
pub struct ScalarType {
    name: String,
    hints: HintSource,
    assistant: Option<Box<dyn CompletionProvider>>,
}

impl ScalarType {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hints: HintSource::None,
            assistant: None,
        }
    }

    pub fn with_hints(mut self, hints: Vec<ValueHint>) -> Self {
        self.hints = HintSource::Static(hints);
        self
    }

    /// Hints computed per position; the source may fail (e.g. a malformed
    /// constraint), which surfaces as a single error proposal.
    pub fn with_hint_source(
        mut self,
        source: impl Fn(&DynamicSchemaContext) -> Result<Vec<ValueHint>, HintError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.hints = HintSource::Dynamic(Box::new(source));
        self
    }

    pub fn with_assistant(mut self, assistant: Box<dyn CompletionProvider>) -> Self {
        self.assistant = Some(assistant);
        self
    }

    pub fn into_type(self) -> SchemaType {
        Arc::new(self)
    }
}

impl fmt::Debug for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarType")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl TypeDef for ScalarType {
    fn name(&self) -> &str {
        &self.name
    }

    fn hint_values(&self, ctx: &DynamicSchemaContext) -> Result<Vec<ValueHint>, HintError> {
        match &self.hints {
            HintSource::None => Ok(Vec::new()),
            HintSource::Static(hints) => Ok(hints.clone()),
            HintSource::Dynamic(source) => source(ctx),
        }
    }

    fn custom_assistant(&self) -> Option<&dyn CompletionProvider> {
        self.assistant.as_deref()
    }
}

/// A sequence of `item` values.
#[derive(Debug)]
pub struct SequenceType {
    name: String,
    item: SchemaType,
}

impl SequenceType {
    pub fn of(item: SchemaType) -> SchemaType {
        Arc::new(Self {
            name: format!("{}[]", item.name()),
            item,
        })
    }
}

impl TypeDef for SequenceType {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_sequencable(&self) -> bool {
        true
    }

    fn domain_type(&self) -> Option<SchemaType> {
        Some(self.item.clone())
    }
}

/// A mapping with arbitrary keys and a uniform value type.
#[derive(Debug)]
pub struct MapType {
    name: String,
    value: SchemaType,
}

impl MapType {
    pub fn of(value: SchemaType) -> SchemaType {
        Arc::new(Self {
            name: format!("Map<string, {}>", value.name()),
            value,
        })
    }
}

impl TypeDef for MapType {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_map(&self) -> bool {
        true
    }

    fn domain_type(&self) -> Option<SchemaType> {
        Some(self.value.clone())
    }
}

/// A union of object variants, narrowed by properties the document already
/// defines. While unresolved it exposes the union of all variant properties.
#[derive(Debug)]
pub struct UnionType {
    name: String,
    variants: Vec<SchemaType>,
}

impl UnionType {
    pub fn named(name: impl Into<String>, variants: Vec<SchemaType>) -> SchemaType {
        Arc::new(Self {
            name: name.into(),
            variants,
        })
    }
}

impl TypeDef for UnionType {
    fn name(&self) -> &str {
        &self.name
    }

    fn properties(&self) -> Vec<TypedProperty> {
        let mut out: Vec<TypedProperty> = Vec::new();
        for variant in &self.variants {
            for property in variant.properties() {
                if !out.iter().any(|p| p.name == property.name) {
                    out.push(property);
                }
            }
        }
        out
    }

    fn narrow(&self, ctx: &DynamicSchemaContext) -> Option<SchemaType> {
        let mut resolved: Option<&SchemaType> = None;
        for variant in &self.variants {
            let discriminated = variant
                .properties()
                .iter()
                .any(|p| ctx.is_defined(&p.name));
            if discriminated {
                if resolved.is_some() {
                    // Ambiguous: more than one variant matches.
                    return None;
                }
                resolved = Some(variant);
            }
        }
        resolved.cloned()
    }
}
