//! Chunk store trait for dependency injection and testing
//!
//! Upload handlers keep a document's chunk set around between the upload
//! call and the later quiz-generation call. The store is an explicit,
//! injectable collaborator with caller-controlled lifecycle rather than an
//! ambient process-wide singleton.

use async_trait::async_trait;
use quizgen_chunking::ChunkSet;

use crate::error::StorageResult;

/// Keyed storage for chunk sets
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// Store a chunk set under `key`, replacing any previous entry
    async fn put(&self, key: &str, set: ChunkSet) -> StorageResult<()>;

    /// Fetch the chunk set stored under `key`, if still present
    async fn get(&self, key: &str) -> StorageResult<Option<ChunkSet>>;

    /// Drop the entry under `key`; returns whether one existed
    async fn remove(&self, key: &str) -> StorageResult<bool>;

    /// Number of stored chunk sets
    async fn len(&self) -> StorageResult<usize>;

    /// Whether the store holds no chunk sets
    async fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len().await? == 0)
    }
}
