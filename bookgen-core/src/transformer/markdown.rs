//! Markdown transformer implementation

use super::Transformer;
use crate::error::TransformError;
use pulldown_cmark::{html, Options, Parser};

/// Transformer for CommonMark with common extensions
pub struct MarkdownTransformer {
    /// Whether to enable tables extension
    enable_tables: bool,
    /// Whether to enable strikethrough extension
    enable_strikethrough: bool,
    /// Whether to enable footnotes extension
    enable_footnotes: bool,
}

impl MarkdownTransformer {
    pub fn new() -> Self {
        Self {
            enable_tables: true,
            enable_strikethrough: true,
            enable_footnotes: true,
        }
    }

    /// Enable or disable tables parsing
    pub fn with_tables(mut self, enable: bool) -> Self {
        self.enable_tables = enable;
        self
    }

    /// Enable or disable strikethrough parsing
    pub fn with_strikethrough(mut self, enable: bool) -> Self {
        self.enable_strikethrough = enable;
        self
    }

    /// Enable or disable footnotes parsing
    pub fn with_footnotes(mut self, enable: bool) -> Self {
        self.enable_footnotes = enable;
        self
    }

    fn get_parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.enable_tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.enable_strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.enable_footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        options
    }
}

impl Default for MarkdownTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer for MarkdownTransformer {
    fn transform(&self, raw: &str) -> Result<String, TransformError> {
        let parser = Parser::new_ext(raw, self.get_parser_options());
        let mut fragment = String::with_capacity(raw.len() * 3 / 2);
        html::push_html(&mut fragment, parser);
        Ok(fragment)
    }

    fn name(&self) -> &str {
        "markdown"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["md", "markdown", "mdown", "mkd"]
    }
}
