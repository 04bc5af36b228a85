//! In-memory chunk store with TTL expiry and LRU bounding
//!
//! Bounded on two axes: entries older than the TTL read as absent (and are
//! dropped on contact), and once the capacity is reached the least recently
//! used entry is evicted. Suits the upload-then-generate flow where chunk
//! sets are only useful for minutes, not days.

use async_trait::async_trait;
use lru::LruCache;
use quizgen_chunking::ChunkSet;
use quizgen_config::StoreConfig;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::traits::ChunkStore;

struct StoredEntry {
    set: ChunkSet,
    stored_at: Instant,
}

/// LRU-bounded, TTL-expiring in-memory chunk store
pub struct MemoryChunkStore {
    entries: Mutex<LruCache<String, StoredEntry>>,
    ttl: Duration,
}

impl MemoryChunkStore {
    /// Create a store holding at most `capacity` entries for up to `ttl` each
    ///
    /// # Errors
    /// Returns `StorageError::Configuration` for a zero capacity.
    pub fn new(capacity: usize, ttl: Duration) -> StorageResult<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or_else(|| {
            StorageError::Configuration("store capacity must be positive".to_string())
        })?;
        Ok(Self {
            entries: Mutex::new(LruCache::new(capacity)),
            ttl,
        })
    }

    /// Create a store from the central configuration
    ///
    /// # Errors
    /// Returns `StorageError::Configuration` for a zero capacity.
    pub fn from_config(config: &StoreConfig) -> StorageResult<Self> {
        Self::new(config.capacity, Duration::from_secs(config.ttl_seconds))
    }

    /// Drop every expired entry; returns how many were removed
    pub fn purge_expired(&self) -> StorageResult<usize> {
        let mut entries = self.lock()?;
        let expired: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.stored_at.elapsed() > self.ttl)
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            entries.pop(key);
        }
        if !expired.is_empty() {
            debug!(count = expired.len(), "purged expired chunk sets");
        }
        Ok(expired.len())
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, LruCache<String, StoredEntry>>> {
        self.entries
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))
    }
}

#[async_trait]
impl ChunkStore for MemoryChunkStore {
    async fn put(&self, key: &str, set: ChunkSet) -> StorageResult<()> {
        let mut entries = self.lock()?;
        let entry = StoredEntry {
            set,
            stored_at: Instant::now(),
        };
        if let Some((evicted, _)) = entries.push(key.to_string(), entry) {
            if evicted != key {
                debug!(key = %evicted, "evicted least recently used chunk set");
            }
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Option<ChunkSet>> {
        let mut entries = self.lock()?;
        let hit = entries
            .get(key)
            .map(|entry| (entry.stored_at.elapsed() <= self.ttl).then(|| entry.set.clone()));
        match hit {
            Some(Some(set)) => Ok(Some(set)),
            Some(None) => {
                entries.pop(key);
                debug!(key, "chunk set expired");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, key: &str) -> StorageResult<bool> {
        let mut entries = self.lock()?;
        Ok(entries.pop(key).is_some())
    }

    async fn len(&self) -> StorageResult<usize> {
        Ok(self.lock()?.len())
    }
}
