//! Storage abstraction for chapter sources and generated output

use crate::error::StorageError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Abstract storage provider trait
///
/// Paths are relative to the provider's root and use `/` separators.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Read data from the given path
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>>;

    /// Write data to the given path, replacing any previous contents.
    ///
    /// Implementations must never leave a partially written file behind.
    async fn write(&self, path: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Check if a path exists
    async fn exists(&self, path: &str) -> StorageResult<bool>;

    /// Where `path` lives, for error messages
    fn location(&self, path: &str) -> PathBuf;
}

/// Normalize a relative path, rejecting any component that escapes the root
fn normalize(path: &str) -> StorageResult<PathBuf> {
    use std::path::Component;

    let mut normalized = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::Normal(c) => normalized.push(c),
            Component::CurDir => {}
            Component::ParentDir | Component::Prefix(_) | Component::RootDir => {
                return Err(StorageError::InvalidPath(path.to_string()));
            }
        }
    }
    if normalized.as_os_str().is_empty() {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    Ok(normalized)
}

/// Local filesystem storage provider
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a new local storage provider with the given root directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn full_path(&self, path: &str) -> StorageResult<PathBuf> {
        Ok(self.root.join(normalize(path)?))
    }
}

fn backend_error(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::Backend {
        path: path.display().to_string(),
        source,
    }
}

#[async_trait]
impl StorageProvider for LocalStorage {
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>> {
        let full_path = self.full_path(path)?;
        tokio::fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::NotFound(full_path.display().to_string())
            } else {
                backend_error(&full_path, e)
            }
        })
    }

    async fn write(&self, path: &str, data: Vec<u8>) -> StorageResult<()> {
        let full_path = self.full_path(path)?;
        let parent = full_path.parent().unwrap_or(self.root.as_path()).to_path_buf();
        tokio::fs::create_dir_all(&parent)
            .await
            .map_err(|e| backend_error(&parent, e))?;

        // Write next to the target and rename over it, so readers only ever
        // see the old file or the complete new one.
        let file_name = full_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let staging = parent.join(format!(".{file_name}.bookgen-tmp"));

        if let Err(e) = tokio::fs::write(&staging, data).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(backend_error(&full_path, e));
        }
        if let Err(e) = tokio::fs::rename(&staging, &full_path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(backend_error(&full_path, e));
        }
        Ok(())
    }

    async fn exists(&self, path: &str) -> StorageResult<bool> {
        let full_path = self.full_path(path)?;
        tokio::fs::try_exists(&full_path)
            .await
            .map_err(|e| backend_error(&full_path, e))
    }

    fn location(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

/// In-memory storage provider (for testing)
#[derive(Default)]
pub struct MemoryStorage {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file
    pub fn insert(&self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), data.into());
    }

    /// Read a file back as UTF-8 text
    pub fn get_string(&self, path: &str) -> Option<String> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .map(|d| String::from_utf8_lossy(d).into_owned())
    }

    /// All stored paths, sorted
    pub fn paths(&self) -> Vec<String> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl StorageProvider for MemoryStorage {
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>> {
        normalize(path)?;
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn write(&self, path: &str, data: Vec<u8>) -> StorageResult<()> {
        normalize(path)?;
        self.insert(path, data);
        Ok(())
    }

    async fn exists(&self, path: &str) -> StorageResult<bool> {
        normalize(path)?;
        Ok(self
            .data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(path))
    }

    fn location(&self, path: &str) -> PathBuf {
        PathBuf::from(path)
    }
}
