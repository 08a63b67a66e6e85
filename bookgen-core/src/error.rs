//! Error types for Bookgen Core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using BookgenError
pub type Result<T> = std::result::Result<T, BookgenError>;

/// Top-level error type for a generation run
#[derive(Debug, Error)]
pub enum BookgenError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Content not found for chapter '{id}' (looked for {})", .path.display())]
    ContentNotFound { id: String, path: PathBuf },

    #[error("Transformation failed for chapter '{id}': {source}")]
    Transform {
        id: String,
        #[source]
        source: TransformError,
    },

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while validating a configuration.
///
/// Every variant names the offending field so a broken `book.toml` can be
/// fixed without reading the generator.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field '{field}' must not be empty")]
    EmptyField { field: &'static str },

    #[error("Field 'order' is empty (set allow_empty_order to permit this)")]
    EmptyOrder,

    #[error("Invalid chapter identifier {id:?} at order[{index}]")]
    InvalidIdentifier { index: usize, id: String },

    #[error("Duplicate chapter identifier '{id}' at order[{index}]")]
    DuplicateIdentifier { index: usize, id: String },

    #[error("Invalid combined_name {0:?}: must be a plain file name ending in .html")]
    InvalidCombinedName(String),

    #[error("combined_name '{name}' collides with the page for chapter '{id}'")]
    CombinedNameCollision { name: String, id: String },

    #[error("Invalid extension {0:?}: must be a plain file extension")]
    InvalidExtension(String),

    #[error("Unknown transformer '{0}'")]
    UnknownTransformer(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Failed to read configuration {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while converting raw content into a fragment
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Content is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::string::FromUtf8Error),

    #[error("Malformed content: {0}")]
    MalformedContent(String),
}

/// Errors raised while loading or rendering header/footer templates
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to read template {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Syntax error in template '{name}': {source}")]
    Syntax {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("Unresolved placeholder in template '{name}': {source}")]
    Unresolved {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("Failed to render template '{name}': {source}")]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Errors that occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Backend error at {path}: {source}")]
    Backend {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
