//! Header/footer templates
//!
//! Templates use `{{ name }}` placeholders and are rendered with strict
//! undefined handling: a placeholder with no value is a
//! [`TemplateError::Unresolved`], never an empty string. Every substituted
//! value is HTML-escaped, covering `& < > " '` and nothing else.

use crate::config::TemplatePaths;
use crate::error::TemplateError;
use minijinja::{AutoEscape, Environment, ErrorKind, Output, State, UndefinedBehavior, Value};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

/// The templates a generation run renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateRole {
    /// Opens the combined document
    Header,
    /// Closes the combined document
    Footer,
    /// Opens every standalone page
    HeaderSingle,
    /// Closes every standalone page
    FooterSingle,
}

impl TemplateRole {
    pub fn name(self) -> &'static str {
        match self {
            TemplateRole::Header => "header",
            TemplateRole::Footer => "footer",
            TemplateRole::HeaderSingle => "header_single",
            TemplateRole::FooterSingle => "footer_single",
        }
    }
}

/// Escape text for HTML content and double- or single-quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The anchor preceding each chapter inside the combined document
pub fn chapter_marker(id: &str, title: &str) -> String {
    format!(
        "<a id=\"{}\" class=\"chapter-marker\" data-title=\"{}\"></a>\n",
        escape_html(id),
        escape_html(title)
    )
}

/// Writes values through [`escape_html`] unless marked safe or escaping is off
fn html_formatter(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &Value,
) -> Result<(), minijinja::Error> {
    if value.is_undefined() {
        return Err(minijinja::Error::from(ErrorKind::UndefinedError));
    }
    if value.is_safe() || matches!(state.auto_escape(), AutoEscape::None) {
        write!(out, "{value}")?;
    } else if let Some(s) = value.as_str() {
        out.write_str(&escape_html(s))?;
    } else {
        out.write_str(&escape_html(&value.to_string()))?;
    }
    Ok(())
}

/// Named templates rendered against serializable contexts
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// An engine with no templates registered
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.set_formatter(html_formatter);
        env.set_keep_trailing_newline(true);
        Self { env }
    }

    /// Read the four configured templates from disk
    pub async fn load(paths: &TemplatePaths) -> Result<Self, TemplateError> {
        let mut engine = Self::new();
        for (role, path) in [
            (TemplateRole::Header, &paths.header),
            (TemplateRole::Footer, &paths.footer),
            (TemplateRole::HeaderSingle, &paths.header_single),
            (TemplateRole::FooterSingle, &paths.footer_single),
        ] {
            let source = read_template(path).await?;
            engine.add_template(role.name(), source)?;
            tracing::debug!("Loaded {} template from {}", role.name(), path.display());
        }
        Ok(engine)
    }

    /// Register (or replace) a template. Syntax errors surface here.
    pub fn add_template(
        &mut self,
        name: &str,
        source: impl Into<String>,
    ) -> Result<(), TemplateError> {
        self.env
            .add_template_owned(name.to_string(), source.into())
            .map_err(|source| TemplateError::Syntax {
                name: name.to_string(),
                source,
            })
    }

    /// Render a registered template
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|source| TemplateError::Render {
                name: name.to_string(),
                source,
            })?;
        template.render(context).map_err(|source| {
            if source.kind() == ErrorKind::UndefinedError {
                TemplateError::Unresolved {
                    name: name.to_string(),
                    source,
                }
            } else {
                TemplateError::Render {
                    name: name.to_string(),
                    source,
                }
            }
        })
    }

    /// Render the template registered for `role`
    pub fn render_role<S: Serialize>(
        &self,
        role: TemplateRole,
        context: S,
    ) -> Result<String, TemplateError> {
        self.render(role.name(), context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_template(path: &Path) -> Result<String, TemplateError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| TemplateError::Unreadable {
            path: path.to_path_buf(),
            source,
        })
}
