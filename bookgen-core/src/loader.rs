//! Reads chapter sources from the input storage

use crate::error::{BookgenError, Result, StorageError, TransformError};
use crate::storage::StorageProvider;
use std::path::PathBuf;
use std::sync::Arc;

/// Resolves chapter identifiers to `<id>.<extension>` under the input root
pub struct ContentLoader {
    storage: Arc<dyn StorageProvider>,
    extension: String,
}

impl ContentLoader {
    pub fn new(storage: Arc<dyn StorageProvider>, extension: impl Into<String>) -> Self {
        Self {
            storage,
            extension: extension.into(),
        }
    }

    /// Source path of `id`, relative to the input root
    pub fn source_name(&self, id: &str) -> String {
        if self.extension.is_empty() {
            id.to_string()
        } else {
            format!("{id}.{}", self.extension)
        }
    }

    /// Where `id` is looked up, for diagnostics
    pub fn resolve(&self, id: &str) -> PathBuf {
        self.storage.location(&self.source_name(id))
    }

    /// Load the raw source of one chapter
    pub async fn load(&self, id: &str) -> Result<String> {
        let name = self.source_name(id);
        let bytes = self.storage.read(&name).await.map_err(|e| match e {
            StorageError::NotFound(_) | StorageError::InvalidPath(_) => {
                BookgenError::ContentNotFound {
                    id: id.to_string(),
                    path: self.resolve(id),
                }
            }
            StorageError::Backend { path, source } => BookgenError::Io {
                path: path.into(),
                source,
            },
        })?;

        let raw = String::from_utf8(bytes).map_err(|e| BookgenError::Transform {
            id: id.to_string(),
            source: TransformError::InvalidEncoding(e),
        })?;
        tracing::debug!("Loaded chapter '{}' ({} bytes)", id, raw.len());
        Ok(raw)
    }

    /// Whether a source exists for `id`
    pub async fn exists(&self, id: &str) -> Result<bool> {
        let name = self.source_name(id);
        match self.storage.exists(&name).await {
            Ok(found) => Ok(found),
            Err(StorageError::Backend { path, source }) => Err(BookgenError::Io {
                path: path.into(),
                source,
            }),
            Err(_) => Ok(false),
        }
    }
}
