//! Chapter type representing a single content unit of the book

/// A single chapter, from raw source to rendered fragment
#[derive(Debug, Clone, PartialEq)]
pub struct Chapter {
    /// Identifier from the configured order
    pub id: String,

    /// Resolved title (override or book default)
    pub title: String,

    /// Zero-based index within the order
    pub position: usize,

    /// Source text as loaded
    pub raw: String,

    /// Rendered HTML fragment
    pub fragment: String,
}

impl Chapter {
    /// Create a chapter with no content yet
    pub fn new(id: impl Into<String>, title: impl Into<String>, position: usize) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            position,
            raw: String::new(),
            fragment: String::new(),
        }
    }

    /// Set the raw source
    pub fn with_raw(mut self, raw: impl Into<String>) -> Self {
        self.raw = raw.into();
        self
    }

    /// Set the rendered fragment
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = fragment.into();
        self
    }

    /// 1-based chapter number
    pub fn number(&self) -> usize {
        self.position + 1
    }
}
