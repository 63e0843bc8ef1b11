//! Per-position, read-only facts derived from the concrete document.

use std::collections::BTreeSet;

use crate::path::YamlPath;

/// What the document already says at one position: the full path from the
/// document stream root and the property names defined at the node.
///
/// An empty context exists as an error fallback; it treats every property
/// as undefined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicSchemaContext {
    path: YamlPath,
    defined_properties: BTreeSet<String>,
}

impl DynamicSchemaContext {
    pub fn new(path: YamlPath, defined_properties: BTreeSet<String>) -> Self {
        Self {
            path,
            defined_properties,
        }
    }

    /// Fallback context when the document node cannot be resolved.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &YamlPath {
        &self.path
    }

    pub fn defined_properties(&self) -> &BTreeSet<String> {
        &self.defined_properties
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.defined_properties.contains(name)
    }
}
