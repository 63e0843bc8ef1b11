/// Renderable hover/documentation content.
///
/// Rendering is the editor host's job; this core only carries markdown text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderable {
    markdown: String,
}

impl Renderable {
    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            markdown: text.into(),
        }
    }

    pub fn as_markdown(&self) -> &str {
        &self.markdown
    }
}
