//! Hover content templates for typed properties.

use crate::render::Renderable;
use crate::schema::{SchemaType, TypedProperty};

/// Markdown hover for one declared property: name, type, owning context
/// path, and the property's own documentation when present.
pub fn property_hover(
    context_path: &str,
    owner: &SchemaType,
    property: &TypedProperty,
) -> Renderable {
    let mut md = format!("**{}**  \n`{}`", property.name, property.ty.name());
    if context_path.is_empty() {
        md.push_str(&format!("  \nproperty of `{}`", owner.name()));
    } else {
        md.push_str(&format!(
            "  \nproperty of `{}` at `{}`",
            owner.name(),
            context_path
        ));
    }
    if let Some(doc) = &property.documentation {
        md.push_str("\n\n");
        md.push_str(doc.as_markdown());
    }
    Renderable::markdown(md)
}
