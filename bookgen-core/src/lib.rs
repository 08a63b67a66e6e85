//! Bookgen Core Library
//!
//! Turns an ordered set of chapter sources into one standalone HTML page per
//! chapter plus a combined single-page book. A validated [`Config`] is handed
//! to a [`Generator`], which loads, transforms, assembles and writes.

pub mod assembler;
pub mod config;
pub mod error;
pub mod generator;
pub mod loader;
pub mod storage;
pub mod template;
pub mod transformer;
pub mod types;
pub mod writer;

pub use assembler::{Assembly, PageAssembler};
pub use config::{Config, ConfigValidator, RawConfig};
pub use error::{BookgenError, ConfigError, Result, TemplateError, TransformError};
pub use generator::{GenerationReport, Generator};
pub use template::TemplateEngine;
pub use types::{Chapter, Document, NavLink};
