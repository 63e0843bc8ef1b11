use std::fmt;

/// One step of a path relative to a document root.
///
/// `KeyAtKey` addresses the key token itself, the two `ValueAt*` variants
/// address the value below it. Paths are plain values; equality is
/// segment-wise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    KeyAtKey(String),
    ValueAtKey(String),
    ValueAtIndex(usize),
}

impl PathSegment {
    /// The property name this segment addresses, if it addresses one.
    pub fn property_name(&self) -> Option<&str> {
        match self {
            PathSegment::KeyAtKey(name) | PathSegment::ValueAtKey(name) => Some(name),
            PathSegment::ValueAtIndex(_) => None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::KeyAtKey(name) | PathSegment::ValueAtKey(name) => write!(f, "{name}"),
            PathSegment::ValueAtIndex(index) => write!(f, "[{index}]"),
        }
    }
}

/// An immutable ordered sequence of [`PathSegment`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct YamlPath {
    segments: Vec<PathSegment>,
}

impl YamlPath {
    pub const EMPTY: YamlPath = YamlPath {
        segments: Vec::new(),
    };

    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// A one-segment path addressing the value at `name`.
    pub fn from_simple_property(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::ValueAtKey(name.into())],
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last_segment(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    pub fn append(&self, segment: PathSegment) -> YamlPath {
        let mut segments = self.segments.clone();
        segments.push(segment);
        YamlPath { segments }
    }

    pub fn prepend(&self, segment: PathSegment) -> YamlPath {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.push(segment);
        segments.extend(self.segments.iter().cloned());
        YamlPath { segments }
    }

    /// Dotted property notation; indices render as `[i]`.
    pub fn to_property_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                PathSegment::ValueAtIndex(index) => {
                    out.push_str(&format!("[{index}]"));
                }
                other => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(&other.to_string());
                }
            }
        }
        out
    }
}
