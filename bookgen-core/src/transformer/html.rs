//! Pass-through transformer for chapters already written as HTML

use super::Transformer;
use crate::error::TransformError;

/// Uses the source as the fragment unchanged
#[derive(Debug, Default)]
pub struct HtmlTransformer;

impl HtmlTransformer {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for HtmlTransformer {
    fn transform(&self, raw: &str) -> Result<String, TransformError> {
        if let Some(offset) = raw.find('\0') {
            return Err(TransformError::MalformedContent(format!(
                "NUL byte at offset {}",
                offset
            )));
        }
        Ok(raw.to_string())
    }

    fn name(&self) -> &str {
        "html"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }
}
