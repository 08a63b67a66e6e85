//! Composes standalone pages and the combined book from rendered chapters

use crate::config::Config;
use crate::error::Result;
use crate::template::{chapter_marker, TemplateEngine, TemplateRole};
use crate::types::{Chapter, Document, NavLink};
use serde::Serialize;

/// Values available to the single-page header and footer
#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    pub title: &'a str,
    pub book_title: &'a str,
    pub id: &'a str,
    pub position: usize,
    pub number: usize,
    pub total: usize,
    pub prev: Option<&'a NavLink>,
    pub next: Option<&'a NavLink>,
    pub chapters: &'a [NavLink],
    pub combined_href: &'a str,
}

/// Values available to the book header and footer
#[derive(Debug, Serialize)]
pub struct BookContext<'a> {
    pub title: &'a str,
    pub book_title: &'a str,
    pub total: usize,
    pub chapters: &'a [NavLink],
}

/// Everything a run will write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    /// One page per chapter, in declared order
    pub pages: Vec<Document>,
    pub combined: Document,
}

/// Builds pages one chapter at a time while accumulating the combined body.
///
/// Chapters must be added in declared order; the combined buffer is only
/// ever appended to.
pub struct PageAssembler<'a> {
    config: &'a Config,
    templates: &'a TemplateEngine,
    /// Table of contents linking to standalone pages
    page_links: Vec<NavLink>,
    /// Table of contents linking to anchors inside the combined document
    anchor_links: Vec<NavLink>,
    buffer: String,
    added: usize,
}

impl<'a> PageAssembler<'a> {
    pub fn new(config: &'a Config, templates: &'a TemplateEngine) -> Self {
        let page_links = config
            .order()
            .iter()
            .map(|id| NavLink::new(id, config.resolve_title(id), config.page_name(id)))
            .collect();
        let anchor_links = config
            .order()
            .iter()
            .map(|id| NavLink::new(id, config.resolve_title(id), format!("#{id}")))
            .collect();
        Self {
            config,
            templates,
            page_links,
            anchor_links,
            buffer: String::new(),
            added: 0,
        }
    }

    /// Render the standalone page for `chapter` and append its fragment to
    /// the combined buffer
    pub fn add_chapter(&mut self, chapter: &Chapter) -> Result<Document> {
        debug_assert_eq!(chapter.position, self.added, "chapters added out of order");
        let position = chapter.position;

        let context = PageContext {
            title: &chapter.title,
            book_title: self.config.default_title(),
            id: &chapter.id,
            position,
            number: chapter.number(),
            total: self.page_links.len(),
            prev: position
                .checked_sub(1)
                .and_then(|i| self.page_links.get(i)),
            next: self.page_links.get(position + 1),
            chapters: &self.page_links,
            combined_href: self.config.combined_name(),
        };
        let header = self
            .templates
            .render_role(TemplateRole::HeaderSingle, &context)?;
        let footer = self
            .templates
            .render_role(TemplateRole::FooterSingle, &context)?;

        let mut body =
            String::with_capacity(header.len() + chapter.fragment.len() + footer.len());
        body.push_str(&header);
        body.push_str(&chapter.fragment);
        body.push_str(&footer);

        self.buffer
            .push_str(&chapter_marker(&chapter.id, &chapter.title));
        self.buffer.push_str(&chapter.fragment);
        self.added += 1;

        Ok(Document::new(self.config.page_name(&chapter.id), body))
    }

    /// Wrap the accumulated chapters in the book header and footer
    pub fn finish(self) -> Result<Document> {
        let context = BookContext {
            title: self.config.default_title(),
            book_title: self.config.default_title(),
            total: self.anchor_links.len(),
            chapters: &self.anchor_links,
        };
        let header = self.templates.render_role(TemplateRole::Header, &context)?;
        let footer = self.templates.render_role(TemplateRole::Footer, &context)?;

        let mut body = String::with_capacity(header.len() + self.buffer.len() + footer.len());
        body.push_str(&header);
        body.push_str(&self.buffer);
        body.push_str(&footer);

        Ok(Document::new(self.config.combined_name(), body))
    }
}

/// Assemble every page and the combined document from chapters in order
pub fn assemble(
    config: &Config,
    templates: &TemplateEngine,
    chapters: &[Chapter],
) -> Result<Assembly> {
    let mut assembler = PageAssembler::new(config, templates);
    let pages = chapters
        .iter()
        .map(|chapter| assembler.add_chapter(chapter))
        .collect::<Result<Vec<_>>>()?;
    let combined = assembler.finish()?;
    Ok(Assembly { pages, combined })
}
