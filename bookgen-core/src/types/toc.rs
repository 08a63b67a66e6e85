//! Navigation types shared by the table of contents and prev/next links

use serde::Serialize;

/// A link to one chapter, as exposed to templates
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NavLink {
    /// Chapter identifier
    pub id: String,

    /// Display title
    pub title: String,

    /// Target page or anchor
    pub href: String,
}

impl NavLink {
    /// Create a new link
    pub fn new(id: impl Into<String>, title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            href: href.into(),
        }
    }
}
