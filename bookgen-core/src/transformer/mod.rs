//! Transformers turning raw chapter sources into HTML fragments

mod html;
mod markdown;

pub use html::HtmlTransformer;
pub use markdown::MarkdownTransformer;

use crate::error::TransformError;

/// Trait for converting a chapter's raw source into an HTML fragment
pub trait Transformer: Send + Sync {
    /// Convert raw content into a fragment
    fn transform(&self, raw: &str) -> Result<String, TransformError>;

    /// Name used to select this transformer in the configuration
    fn name(&self) -> &str;

    /// Source file extensions this transformer usually reads
    fn supported_extensions(&self) -> &[&str];
}

/// Get a transformer by its configured name
pub fn transformer_for_name(name: &str) -> Option<Box<dyn Transformer>> {
    match name.to_lowercase().as_str() {
        "markdown" | "md" | "commonmark" => Some(Box::new(MarkdownTransformer::new())),
        "html" | "passthrough" => Some(Box::new(HtmlTransformer::new())),
        _ => None,
    }
}
