//! Book configuration and its validation
//!
//! A [`RawConfig`] mirrors `book.toml` with every field optional, so that the
//! validator rather than the deserializer reports what is missing.
//! [`ConfigValidator::validate`] turns it into an immutable [`Config`]; nothing
//! in this module touches the filesystem except [`RawConfig::load`].

use crate::error::ConfigError;
use crate::transformer::transformer_for_name;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Default file name of the combined single-page document
pub const DEFAULT_COMBINED_NAME: &str = "single.html";

/// Default content transformer
pub const DEFAULT_TRANSFORMER: &str = "markdown";

/// Default source file extension
pub const DEFAULT_EXTENSION: &str = "md";

/// Unvalidated configuration, as read from `book.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    /// Book-mode header template
    pub header: Option<PathBuf>,
    /// Book-mode footer template
    pub footer: Option<PathBuf>,
    /// Single-page header template
    pub header_single: Option<PathBuf>,
    /// Single-page footer template
    pub footer_single: Option<PathBuf>,
    /// Directory holding chapter sources
    pub input: Option<PathBuf>,
    /// Directory receiving generated pages
    pub output: Option<PathBuf>,
    pub defaults: Option<RawDefaults>,
    /// Chapter identifiers in reading order
    pub order: Option<Vec<String>>,
    /// Per-chapter title overrides
    #[serde(default)]
    pub titles: BTreeMap<String, String>,
    pub combined_name: Option<String>,
    pub transformer: Option<String>,
    pub extension: Option<String>,
    #[serde(default)]
    pub allow_empty_order: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawDefaults {
    pub title: Option<String>,
}

impl RawConfig {
    /// Parse a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read a TOML file, resolving relative paths against its directory
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let raw = Self::from_toml_str(&contents)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(raw.with_base_dir(base))
    }

    /// Rebase every relative path onto `base`
    pub fn with_base_dir(mut self, base: &Path) -> Self {
        for field in [
            &mut self.header,
            &mut self.footer,
            &mut self.header_single,
            &mut self.footer_single,
            &mut self.input,
            &mut self.output,
        ] {
            if let Some(p) = field.as_mut() {
                if p.is_relative() && !p.as_os_str().is_empty() {
                    *p = base.join(&*p);
                }
            }
        }
        self
    }
}

/// The four header/footer templates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplatePaths {
    pub header: PathBuf,
    pub footer: PathBuf,
    pub header_single: PathBuf,
    pub footer_single: PathBuf,
}

/// A validated configuration. Only [`ConfigValidator`] can build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    templates: TemplatePaths,
    input: PathBuf,
    output: PathBuf,
    default_title: String,
    order: Vec<String>,
    titles: BTreeMap<String, String>,
    combined_name: String,
    transformer: String,
    extension: String,
}

impl Config {
    pub fn templates(&self) -> &TemplatePaths {
        &self.templates
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn default_title(&self) -> &str {
        &self.default_title
    }

    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn titles(&self) -> &BTreeMap<String, String> {
        &self.titles
    }

    pub fn combined_name(&self) -> &str {
        &self.combined_name
    }

    pub fn transformer(&self) -> &str {
        &self.transformer
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Override if one is configured, otherwise the default title
    pub fn resolve_title(&self, id: &str) -> &str {
        self.titles
            .get(id)
            .map(String::as_str)
            .unwrap_or(&self.default_title)
    }

    /// Output file name of a chapter's standalone page
    pub fn page_name(&self, id: &str) -> String {
        format!("{id}.html")
    }

    /// Same configuration writing to a different output directory
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        ConfigValidator::validate(raw)
    }
}

/// Checks and normalizes a [`RawConfig`]
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(raw: RawConfig) -> Result<Config, ConfigError> {
        let templates = TemplatePaths {
            header: required_path(raw.header, "header")?,
            footer: required_path(raw.footer, "footer")?,
            header_single: required_path(raw.header_single, "header_single")?,
            footer_single: required_path(raw.footer_single, "footer_single")?,
        };
        let input = required_path(raw.input, "input")?;
        let output = required_path(raw.output, "output")?;

        let default_title = raw
            .defaults
            .and_then(|d| d.title)
            .ok_or(ConfigError::MissingField("defaults.title"))?;
        if default_title.is_empty() {
            return Err(ConfigError::EmptyField {
                field: "defaults.title",
            });
        }

        let order = raw.order.ok_or(ConfigError::MissingField("order"))?;
        if order.is_empty() && !raw.allow_empty_order {
            return Err(ConfigError::EmptyOrder);
        }
        let mut seen = HashSet::with_capacity(order.len());
        for (index, id) in order.iter().enumerate() {
            if !is_valid_identifier(id) {
                return Err(ConfigError::InvalidIdentifier {
                    index,
                    id: id.clone(),
                });
            }
            if !seen.insert(id.as_str()) {
                return Err(ConfigError::DuplicateIdentifier {
                    index,
                    id: id.clone(),
                });
            }
        }

        let combined_name = raw
            .combined_name
            .unwrap_or_else(|| DEFAULT_COMBINED_NAME.to_string());
        let stem = combined_name
            .strip_suffix(".html")
            .filter(|stem| !stem.is_empty() && is_valid_identifier(stem))
            .ok_or_else(|| ConfigError::InvalidCombinedName(combined_name.clone()))?;
        if seen.contains(stem) {
            return Err(ConfigError::CombinedNameCollision {
                name: combined_name.clone(),
                id: stem.to_string(),
            });
        }

        let transformer = raw
            .transformer
            .unwrap_or_else(|| DEFAULT_TRANSFORMER.to_string());
        let selected = transformer_for_name(&transformer)
            .ok_or_else(|| ConfigError::UnknownTransformer(transformer.clone()))?;

        // Without an explicit extension, read what the transformer expects
        let extension = match raw.extension {
            Some(ext) => {
                let trimmed = ext.trim_start_matches('.');
                if !trimmed.is_empty() && !is_valid_identifier(trimmed) {
                    return Err(ConfigError::InvalidExtension(ext));
                }
                trimmed.to_string()
            }
            None => selected
                .supported_extensions()
                .first()
                .copied()
                .unwrap_or(DEFAULT_EXTENSION)
                .to_string(),
        };

        for id in raw.titles.keys() {
            if !seen.contains(id.as_str()) {
                tracing::warn!("Title override for '{}' does not match any chapter", id);
            }
        }

        Ok(Config {
            templates,
            input,
            output,
            default_title,
            order,
            titles: raw.titles,
            combined_name,
            transformer,
            extension,
        })
    }
}

fn required_path(value: Option<PathBuf>, field: &'static str) -> Result<PathBuf, ConfigError> {
    let path = value.ok_or(ConfigError::MissingField(field))?;
    if path.as_os_str().is_empty() {
        return Err(ConfigError::EmptyField { field });
    }
    Ok(path)
}

/// Identifiers become file names, so they are restricted to a portable set
pub fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty()
        && !id.starts_with('.')
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw(order: &[&str]) -> RawConfig {
        RawConfig {
            header: Some("layouts/header.html".into()),
            footer: Some("layouts/footer.html".into()),
            header_single: Some("layouts/header_single.html".into()),
            footer_single: Some("layouts/footer_single.html".into()),
            input: Some("content".into()),
            output: Some("output".into()),
            defaults: Some(RawDefaults {
                title: Some("Untitled".into()),
            }),
            order: Some(order.iter().map(|s| s.to_string()).collect()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_config_applies_defaults() {
        let config = ConfigValidator::validate(raw(&["a", "b"])).unwrap();
        assert_eq!(config.order(), ["a", "b"]);
        assert_eq!(config.combined_name(), "single.html");
        assert_eq!(config.transformer(), "markdown");
        assert_eq!(config.extension(), "md");
        assert_eq!(config.page_name("a"), "a.html");
        assert!(config.titles().is_empty());
    }

    #[test]
    fn test_missing_fields_are_named() {
        let mut r = raw(&["a"]);
        r.header_single = None;
        assert!(matches!(
            ConfigValidator::validate(r),
            Err(ConfigError::MissingField("header_single"))
        ));

        let mut r = raw(&["a"]);
        r.defaults = Some(RawDefaults { title: None });
        assert!(matches!(
            ConfigValidator::validate(r),
            Err(ConfigError::MissingField("defaults.title"))
        ));

        let mut r = raw(&["a"]);
        r.order = None;
        assert!(matches!(
            ConfigValidator::validate(r),
            Err(ConfigError::MissingField("order"))
        ));

        let mut r = raw(&["a"]);
        r.output = Some(PathBuf::new());
        assert!(matches!(
            ConfigValidator::validate(r),
            Err(ConfigError::EmptyField { field: "output" })
        ));
    }

    #[test]
    fn test_empty_order_needs_permission() {
        assert!(matches!(
            ConfigValidator::validate(raw(&[])),
            Err(ConfigError::EmptyOrder)
        ));

        let mut r = raw(&[]);
        r.allow_empty_order = true;
        assert!(ConfigValidator::validate(r).unwrap().order().is_empty());
    }

    #[test]
    fn test_invalid_identifiers() {
        for bad in ["", "../etc", "a/b", ".hidden", "with space"] {
            let err = ConfigValidator::validate(raw(&["ok", bad])).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidIdentifier { index: 1, .. }),
                "{bad:?} gave {err}"
            );
        }
    }

    #[test]
    fn test_duplicate_names_offending_entry() {
        let err = ConfigValidator::validate(raw(&["a", "b", "a"])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateIdentifier { index: 2, ref id } if id == "a"
        ));
        assert!(err.to_string().contains("'a'"));
    }

    #[test]
    fn test_combined_name_checks() {
        let mut r = raw(&["single", "b"]);
        assert!(matches!(
            ConfigValidator::validate(r.clone()),
            Err(ConfigError::CombinedNameCollision { .. })
        ));

        r.combined_name = Some("book.html".into());
        assert_eq!(
            ConfigValidator::validate(r.clone()).unwrap().combined_name(),
            "book.html"
        );

        r.combined_name = Some("sub/book.html".into());
        assert!(matches!(
            ConfigValidator::validate(r),
            Err(ConfigError::InvalidCombinedName(_))
        ));
    }

    #[test]
    fn test_unknown_transformer() {
        let mut r = raw(&["a"]);
        r.transformer = Some("asciidoc".into());
        assert!(matches!(
            ConfigValidator::validate(r),
            Err(ConfigError::UnknownTransformer(name)) if name == "asciidoc"
        ));
    }

    #[test]
    fn test_extension_normalized() {
        let mut r = raw(&["a"]);
        r.extension = Some(".markdown".into());
        let config = ConfigValidator::validate(r).unwrap();
        assert_eq!(config.extension(), "markdown");
    }

    #[test]
    fn test_extension_follows_transformer() {
        let mut r = raw(&["a"]);
        r.transformer = Some("html".into());
        let config = ConfigValidator::validate(r.clone()).unwrap();
        assert_eq!(config.extension(), "html");

        r.extension = Some("htm".into());
        assert_eq!(ConfigValidator::validate(r).unwrap().extension(), "htm");
    }

    #[test]
    fn test_invalid_extension_rejected() {
        for bad in ["md/x", "../x", "m d"] {
            let mut r = raw(&["a"]);
            r.extension = Some(bad.into());
            assert!(
                matches!(
                    ConfigValidator::validate(r),
                    Err(ConfigError::InvalidExtension(ref ext)) if ext == bad
                ),
                "{bad:?} was accepted"
            );
        }

        let mut r = raw(&["a"]);
        r.extension = Some(String::new());
        assert_eq!(ConfigValidator::validate(r).unwrap().extension(), "");
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
            header = "layouts/header.hdbs"
            footer = "layouts/footer.html"
            header_single = "layouts/header_single.hdbs"
            footer_single = "layouts/footer_single.html"
            input = "content"
            output = "output"
            order = ["index", "ch1"]

            [defaults]
            title = "Mixu's Node book"

            [titles]
            ch1 = "1. Introduction"
        "#;
        let raw = RawConfig::from_toml_str(toml)
            .unwrap()
            .with_base_dir(Path::new("/books/node"));
        assert_eq!(raw.input, Some(PathBuf::from("/books/node/content")));

        let config = Config::try_from(raw).unwrap();
        assert_eq!(config.resolve_title("ch1"), "1. Introduction");
        assert_eq!(config.resolve_title("index"), "Mixu's Node book");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = RawConfig::from_toml_str("heder = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(msg) if msg.contains("heder")));
    }

    proptest! {
        #[test]
        fn prop_duplicates_always_rejected(
            ids in proptest::collection::vec("[a-z][a-z0-9]{0,6}", 1..8),
            pick in any::<proptest::sample::Index>(),
        ) {
            let mut order: Vec<&str> = ids.iter().map(String::as_str).collect();
            let dup = order[pick.index(order.len())];
            order.push(dup);
            prop_assert!(
                matches!(
                    ConfigValidator::validate(raw(&order)),
                    Err(ConfigError::DuplicateIdentifier { .. })
                ),
                "duplicate was accepted"
            );
        }

        #[test]
        fn prop_title_resolution(
            ids in proptest::collection::btree_set("[a-z]{1,5}", 1..8),
            overridden in proptest::collection::vec(any::<bool>(), 8),
        ) {
            let order: Vec<&str> = ids.iter().map(String::as_str).collect();
            let mut r = raw(&order);
            for (i, id) in order.iter().enumerate() {
                if overridden[i] {
                    r.titles.insert(id.to_string(), format!("Title of {id}"));
                }
            }
            let config = ConfigValidator::validate(r).unwrap();
            for (i, id) in order.iter().enumerate() {
                let expected = if overridden[i] {
                    format!("Title of {id}")
                } else {
                    "Untitled".to_string()
                };
                prop_assert_eq!(config.resolve_title(id), expected.as_str());
            }
        }
    }
}
