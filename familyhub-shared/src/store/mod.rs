//! Document store for FamilyHub
//!
//! All application state lives in a single JSON document holding four
//! collections (`users`, `posts`, `tasks`, `categories`). This module owns
//! that document and is the only place that loads or persists it.
//!
//! # Modules
//!
//! - `document`: The persisted [`Document`] shape
//! - `file`: [`FileStorage`], a JSON file on disk (production)
//! - `memory`: [`MemoryStorage`], an in-process document (tests, ephemeral runs)
//!
//! # Concurrency
//!
//! Every mutation goes through [`DocumentStore::mutate`], which holds a
//! single writer lock across load → mutate → save. Two concurrent mutating
//! requests are therefore strictly ordered and neither clobbers the other.
//! Reads ([`DocumentStore::snapshot`], [`DocumentStore::read`]) do not take
//! the lock and observe the last committed document.
//!
//! # Unreadable data
//!
//! Reads fail open to the empty document. Writes are stricter: a file that
//! is valid JSON but does not fit the schema is refused rather than
//! overwritten, so foreign records are never silently dropped.
//!
//! # Example
//!
//! ```
//! use familyhub_shared::store::{DocumentStore, StoreError};
//!
//! # async fn example() -> Result<(), StoreError> {
//! let store = DocumentStore::in_memory();
//!
//! store
//!     .mutate(|doc| {
//!         doc.categories.insert("life".to_string(), vec!["family".to_string()]);
//!         Ok::<_, StoreError>(())
//!     })
//!     .await?;
//!
//! let count = store.read(|doc| doc.categories.len()).await;
//! assert_eq!(count, 1);
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod file;
pub mod memory;

pub use document::{Document, ParseError};
pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Error type for persistence operations
///
/// Plain loads never fail. Mutations fail when the document cannot be
/// loaded safely for update or cannot be written back.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying I/O failed
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document is JSON but does not fit the schema; writes are refused
    #[error("Stored document at {location} is incompatible: {source}")]
    Incompatible {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// Document could not be serialized
    #[error("Failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Storage backend capability
///
/// Implementations decide where the document lives. They do not need to
/// coordinate writers; [`DocumentStore`] already serializes mutations.
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Returns the current document
    ///
    /// Must fail open: an absent or malformed document yields
    /// [`Document::default`], never an error.
    async fn load(&self) -> Document;

    /// Returns the current document as the base for a mutation
    ///
    /// Unlike [`DocumentStorage::load`] this may refuse: a backend returns an
    /// error when saving over what it holds would lose data.
    async fn load_for_update(&self) -> Result<Document, StoreError> {
        Ok(self.load().await)
    }

    /// Persists the full document, replacing any prior content
    async fn save(&self, document: &Document) -> Result<(), StoreError>;

    /// Short backend name used in logs
    fn name(&self) -> &str;
}

/// Single owner of the application document
///
/// Cheap to share behind an `Arc`; handlers receive it via application state.
pub struct DocumentStore {
    storage: Arc<dyn DocumentStorage>,
    writer: Mutex<()>,
}

impl DocumentStore {
    /// Creates a store over the given backend
    pub fn new(storage: impl DocumentStorage + 'static) -> Self {
        Self::from_arc(Arc::new(storage))
    }

    /// Creates a store over a shared backend
    pub fn from_arc(storage: Arc<dyn DocumentStorage>) -> Self {
        Self {
            storage,
            writer: Mutex::new(()),
        }
    }

    /// Creates a store backed by an empty in-memory document
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// Returns a copy of the last committed document
    pub async fn snapshot(&self) -> Document {
        self.storage.load().await
    }

    /// Runs a read-only query against the last committed document
    pub async fn read<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&Document) -> T,
    {
        let document = self.storage.load().await;
        f(&document)
    }

    /// Applies a mutation under the writer lock
    ///
    /// The document is loaded, handed to `f`, and saved only if `f` returns
    /// `Ok`. An error from `f` leaves the persisted document untouched.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or the load/save failure converted into
    /// `E`. A refused load runs nothing and writes nothing.
    pub async fn mutate<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Document) -> Result<T, E>,
        E: From<StoreError>,
    {
        let _guard = self.writer.lock().await;

        let mut document = self.storage.load_for_update().await?;
        let output = f(&mut document)?;

        self.storage.save(&document).await?;
        debug!(
            backend = self.storage.name(),
            users = document.users.len(),
            posts = document.posts.len(),
            tasks = document.tasks.len(),
            "Document committed"
        );

        Ok(output)
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("backend", &self.storage.name())
            .finish()
    }
}
