//! Rendered output documents

/// A fully rendered document, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name relative to the output directory
    pub name: String,

    /// Complete HTML
    pub body: String,
}

impl Document {
    pub fn new(name: impl Into<String>, body: String) -> Self {
        Self {
            name: name.into(),
            body,
        }
    }
}
