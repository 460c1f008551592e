//! JSON file storage backend
//!
//! Writes are staged in a hidden temporary file next to the target and then
//! renamed over it, so a reader never observes a half-written document.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{Document, DocumentStorage, ParseError, StoreError};

/// Document persisted as a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Creates a backend for the given file path
    ///
    /// The file does not need to exist; it is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the data file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "data.json".to_string());
        let tmp_name = format!(".{}.tmp.{}", file_name, uuid::Uuid::new_v4());

        match self.path.parent() {
            Some(parent) => parent.join(tmp_name),
            None => PathBuf::from(tmp_name),
        }
    }
}

#[async_trait]
impl DocumentStorage for FileStorage {
    async fn load(&self) -> Document {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Data file absent, using empty document");
                return Document::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read data file, using empty document");
                return Document::default();
            }
        };

        let (document, err) = Document::parse_or_default(&raw);
        if let Some(e) = err {
            warn!(path = %self.path.display(), error = %e, "Malformed data file, using empty document");
        }
        document
    }

    async fn load_for_update(&self) -> Result<Document, StoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Document::default()),
            Err(e) => return Err(e.into()),
        };

        match Document::parse(&raw) {
            Ok(document) => Ok(document),
            Err(ParseError::Malformed(e)) => {
                warn!(path = %self.path.display(), error = %e, "Replacing malformed data file");
                Ok(Document::default())
            }
            Err(ParseError::Incompatible(e)) => {
                warn!(path = %self.path.display(), error = %e, "Refusing to overwrite incompatible data file");
                Err(StoreError::Incompatible {
                    location: self.path.display().to_string(),
                    source: e,
                })
            }
        }
    }

    async fn save(&self, document: &Document) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(document)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp_path = self.temp_path();

        if let Err(e) = tokio::fs::write(&tmp_path, &bytes).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        if let Err(e) = tokio::fs::rename(&tmp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        debug!(path = %self.path.display(), bytes = bytes.len(), "Data file written");
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}
