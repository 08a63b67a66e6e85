//! Persists rendered documents to the output storage

use crate::assembler::Assembly;
use crate::error::{BookgenError, Result, StorageError};
use crate::generator::GenerationReport;
use crate::storage::StorageProvider;
use crate::types::Document;
use std::path::PathBuf;
use std::sync::Arc;

/// Writes documents under the output root, one file each
pub struct OutputWriter {
    storage: Arc<dyn StorageProvider>,
}

impl OutputWriter {
    pub fn new(storage: Arc<dyn StorageProvider>) -> Self {
        Self { storage }
    }

    /// Write one document, replacing any file of the same name
    pub async fn write(&self, document: &Document) -> Result<PathBuf> {
        let location = self.storage.location(&document.name);
        self.storage
            .write(&document.name, document.body.clone().into_bytes())
            .await
            .map_err(|e| match e {
                StorageError::Backend { path, source } => BookgenError::Io {
                    path: path.into(),
                    source,
                },
                other => BookgenError::Io {
                    path: location.clone(),
                    source: std::io::Error::new(std::io::ErrorKind::InvalidInput, other),
                },
            })?;
        tracing::info!("Wrote {}", location.display());
        Ok(location)
    }

    /// Write every standalone page in order, then the combined document.
    ///
    /// The combined document is only written once every page has been; the
    /// first failure stops the commit.
    pub async fn commit(&self, assembly: &Assembly) -> Result<GenerationReport> {
        let mut pages = Vec::with_capacity(assembly.pages.len());
        for page in &assembly.pages {
            pages.push(self.write(page).await?);
        }
        let combined = self.write(&assembly.combined).await?;
        Ok(GenerationReport { pages, combined })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{LocalStorage, MemoryStorage};

    fn assembly() -> Assembly {
        Assembly {
            pages: vec![
                Document::new("a.html", "<a/>".to_string()),
                Document::new("b.html", "<b/>".to_string()),
            ],
            combined: Document::new("single.html", "<a/><b/>".to_string()),
        }
    }

    #[tokio::test]
    async fn test_commit_writes_all() {
        let storage = Arc::new(MemoryStorage::new());
        let writer = OutputWriter::new(storage.clone());
        let report = writer.commit(&assembly()).await.unwrap();

        assert_eq!(
            report.pages,
            vec![PathBuf::from("a.html"), PathBuf::from("b.html")]
        );
        assert_eq!(report.combined, PathBuf::from("single.html"));
        assert_eq!(storage.get_string("single.html").unwrap(), "<a/><b/>");
        assert_eq!(storage.paths().len(), 3);
    }

    #[tokio::test]
    async fn test_write_failure_names_path() {
        let dir = tempfile::TempDir::new().unwrap();
        // A regular file where the output directory should be
        let blocker = dir.path().join("out");
        std::fs::write(&blocker, "not a directory").unwrap();

        let writer = OutputWriter::new(Arc::new(LocalStorage::new(&blocker)));
        match writer.commit(&assembly()).await {
            Err(BookgenError::Io { path, .. }) => assert!(path.starts_with(&blocker)),
            other => panic!("expected Io error, got {:?}", other),
        }
    }
}
