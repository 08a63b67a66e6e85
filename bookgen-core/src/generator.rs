//! The generation entry point
//!
//! A run loads every chapter in declared order, transforms them in parallel,
//! renders every document in memory and only then writes. Any failure before
//! the write phase leaves the output directory untouched.

use crate::assembler::{assemble, Assembly};
use crate::config::Config;
use crate::error::{BookgenError, Result};
use crate::loader::ContentLoader;
use crate::storage::{LocalStorage, StorageProvider};
use crate::template::TemplateEngine;
use crate::transformer::{transformer_for_name, MarkdownTransformer, Transformer};
use crate::types::Chapter;
use crate::writer::OutputWriter;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Files written by a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Standalone pages, in declared order
    pub pages: Vec<PathBuf>,

    /// The combined document
    pub combined: PathBuf,
}

/// Runs the whole pipeline for one validated configuration
pub struct Generator {
    config: Config,
    transformer: Box<dyn Transformer>,
    input: Arc<dyn StorageProvider>,
    output: Arc<dyn StorageProvider>,
    templates: Option<TemplateEngine>,
}

impl Generator {
    /// Reads from `config.input()`, writes to `config.output()`, using the
    /// configured transformer and templates
    pub fn new(config: Config) -> Self {
        let transformer = transformer_for_name(config.transformer())
            .unwrap_or_else(|| Box::new(MarkdownTransformer::new()));
        let input = Arc::new(LocalStorage::new(config.input()));
        let output = Arc::new(LocalStorage::new(config.output()));
        Self {
            config,
            transformer,
            input,
            output,
            templates: None,
        }
    }

    /// Use a different content transformer
    pub fn with_transformer(mut self, transformer: impl Transformer + 'static) -> Self {
        self.transformer = Box::new(transformer);
        self
    }

    /// Read chapter sources from `storage` instead of the input directory
    pub fn with_input_storage(mut self, storage: Arc<dyn StorageProvider>) -> Self {
        self.input = storage;
        self
    }

    /// Write documents to `storage` instead of the output directory
    pub fn with_output_storage(mut self, storage: Arc<dyn StorageProvider>) -> Self {
        self.output = storage;
        self
    }

    /// Use already registered templates instead of reading the configured files
    pub fn with_templates(mut self, templates: TemplateEngine) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn loader(&self) -> ContentLoader {
        ContentLoader::new(self.input.clone(), self.config.extension())
    }

    /// Load every chapter in declared order and resolve its title
    pub async fn load_chapters(&self) -> Result<Vec<Chapter>> {
        let loader = self.loader();
        let mut chapters = Vec::with_capacity(self.config.order().len());
        for (position, id) in self.config.order().iter().enumerate() {
            let raw = loader.load(id).await?;
            chapters.push(Chapter::new(id, self.config.resolve_title(id), position).with_raw(raw));
        }
        Ok(chapters)
    }

    /// Fill in every chapter's fragment.
    ///
    /// Chapters are transformed in parallel but results are matched back by
    /// index, and the first failure in declared order is the one reported.
    pub fn transform_chapters(&self, mut chapters: Vec<Chapter>) -> Result<Vec<Chapter>> {
        let transformer = &*self.transformer;
        let results: Vec<_> = chapters
            .par_iter()
            .map(|chapter| transformer.transform(&chapter.raw))
            .collect();

        for (chapter, result) in chapters.iter_mut().zip(results) {
            chapter.fragment = result.map_err(|source| BookgenError::Transform {
                id: chapter.id.clone(),
                source,
            })?;
            tracing::debug!(
                "Transformed '{}' with {} ({} bytes)",
                chapter.id,
                transformer.name(),
                chapter.fragment.len()
            );
        }
        Ok(chapters)
    }

    /// Render every document without writing anything
    pub async fn render(&self) -> Result<Assembly> {
        let loaded;
        let templates = match &self.templates {
            Some(templates) => templates,
            None => {
                loaded = TemplateEngine::load(self.config.templates()).await?;
                &loaded
            }
        };

        let chapters = self.load_chapters().await?;
        let chapters = self.transform_chapters(chapters)?;
        assemble(&self.config, templates, &chapters)
    }

    /// Render everything, then write it
    pub async fn run(&self) -> Result<GenerationReport> {
        let started = Instant::now();
        let assembly = self.render().await?;
        let report = OutputWriter::new(self.output.clone())
            .commit(&assembly)
            .await?;
        tracing::info!(
            "Generated {} pages and {} in {:?}",
            report.pages.len(),
            report.combined.display(),
            started.elapsed()
        );
        Ok(report)
    }

    /// Confirm that every template parses and every chapter has a source,
    /// without transforming or writing anything
    pub async fn check(&self) -> Result<()> {
        if self.templates.is_none() {
            TemplateEngine::load(self.config.templates()).await?;
        }
        let loader = self.loader();
        for id in self.config.order() {
            if !loader.exists(id).await? {
                return Err(BookgenError::ContentNotFound {
                    id: id.clone(),
                    path: loader.resolve(id),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigValidator, RawConfig, RawDefaults};
    use crate::error::TransformError;
    use crate::storage::MemoryStorage;

    fn config(order: &[&str]) -> Config {
        config_with(order, RawConfig::default())
    }

    fn config_with(order: &[&str], extra: RawConfig) -> Config {
        ConfigValidator::validate(RawConfig {
            header: Some("h".into()),
            footer: Some("f".into()),
            header_single: Some("hs".into()),
            footer_single: Some("fs".into()),
            input: Some("in".into()),
            output: Some("out".into()),
            defaults: Some(RawDefaults {
                title: Some("Book".into()),
            }),
            order: Some(order.iter().map(|s| s.to_string()).collect()),
            ..extra
        })
        .unwrap()
    }

    fn templates() -> TemplateEngine {
        let mut engine = TemplateEngine::new();
        engine.add_template("header", "[book]").unwrap();
        engine.add_template("footer", "[/book]").unwrap();
        engine.add_template("header_single", "[{{ title }}]").unwrap();
        engine.add_template("footer_single", "[/]").unwrap();
        engine
    }

    /// Fails on any chapter containing "boom"
    struct Picky;

    impl Transformer for Picky {
        fn transform(&self, raw: &str) -> std::result::Result<String, TransformError> {
            if raw.contains("boom") {
                Err(TransformError::MalformedContent("boom".into()))
            } else {
                Ok(raw.to_uppercase())
            }
        }

        fn name(&self) -> &str {
            "picky"
        }

        fn supported_extensions(&self) -> &[&str] {
            &["txt"]
        }
    }

    fn generator(order: &[&str], input: Arc<MemoryStorage>, output: Arc<MemoryStorage>) -> Generator {
        Generator::new(config(order))
            .with_transformer(Picky)
            .with_templates(templates())
            .with_input_storage(input)
            .with_output_storage(output)
    }

    #[tokio::test]
    async fn test_run_writes_pages_then_combined() {
        let input = Arc::new(MemoryStorage::new());
        input.insert("a.md", "one");
        input.insert("b.md", "two");
        let output = Arc::new(MemoryStorage::new());

        let report = generator(&["a", "b"], input, output.clone())
            .run()
            .await
            .unwrap();

        assert_eq!(report.pages.len(), 2);
        assert_eq!(output.get_string("a.html").unwrap(), "[Book]ONE[/]");
        assert!(output
            .get_string("single.html")
            .unwrap()
            .contains("ONE"));
    }

    #[tokio::test]
    async fn test_html_transformer_reads_html_sources() {
        let config = config_with(
            &["a"],
            RawConfig {
                transformer: Some("html".into()),
                ..Default::default()
            },
        );
        let input = Arc::new(MemoryStorage::new());
        input.insert("a.html", "<p>Input/Output</p>");
        let output = Arc::new(MemoryStorage::new());

        Generator::new(config)
            .with_templates(templates())
            .with_input_storage(input)
            .with_output_storage(output.clone())
            .run()
            .await
            .unwrap();

        assert_eq!(
            output.get_string("a.html").unwrap(),
            "[Book]<p>Input/Output</p>[/]"
        );
    }

    #[tokio::test]
    async fn test_first_failure_in_order_is_reported() {
        let input = Arc::new(MemoryStorage::new());
        for (id, raw) in [("a", "ok"), ("b", "boom"), ("c", "boom")] {
            input.insert(format!("{id}.md"), raw);
        }
        let output = Arc::new(MemoryStorage::new());

        let err = generator(&["a", "b", "c"], input, output.clone())
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, BookgenError::Transform { ref id, .. } if id == "b"));
        assert!(output.paths().is_empty());
    }

    #[tokio::test]
    async fn test_check_reports_missing_chapter() {
        let input = Arc::new(MemoryStorage::new());
        input.insert("a.md", "x");
        let generator = generator(&["a", "b"], input, Arc::new(MemoryStorage::new()));
        assert!(matches!(
            generator.check().await,
            Err(BookgenError::ContentNotFound { ref id, .. }) if id == "b"
        ));
    }
}
