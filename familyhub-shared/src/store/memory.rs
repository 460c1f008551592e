//! In-memory storage backend

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use super::{Document, DocumentStorage, StoreError};

/// Document held in process memory
///
/// Used by tests and for runs that do not need to survive a restart.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    document: RwLock<Document>,
    saves: AtomicU64,
}

impl MemoryStorage {
    /// Creates an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend seeded with a document
    pub fn with_document(document: Document) -> Self {
        Self {
            document: RwLock::new(document),
            saves: AtomicU64::new(0),
        }
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> u64 {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStorage for MemoryStorage {
    async fn load(&self) -> Document {
        self.document.read().await.clone()
    }

    async fn save(&self, document: &Document) -> Result<(), StoreError> {
        *self.document.write().await = document.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
