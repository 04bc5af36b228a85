//! Mock chunk store for testing

// Test-double patterns: panicking on poisoned locks is fine here
#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use quizgen_chunking::ChunkSet;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::{StorageError, StorageResult};
use crate::traits::ChunkStore;

type EntryMap = Arc<Mutex<HashMap<String, ChunkSet>>>;

/// Unbounded mock store with error injection for exercising caller
/// error paths
#[derive(Clone, Default)]
pub struct MockChunkStore {
    pub entries: EntryMap,

    // Behavior controls for testing
    pub should_fail_next: Arc<Mutex<bool>>,
    pub error_message: Arc<Mutex<String>>,
}

impl MockChunkStore {
    /// Create a new mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the next operation to fail with `message`
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    pub fn fail_next(&self, message: &str) {
        *self.should_fail_next.lock().unwrap() = true;
        *self.error_message.lock().unwrap() = message.to_string();
    }

    fn check_fail(&self) -> StorageResult<()> {
        let mut should_fail = self.should_fail_next.lock().unwrap();
        if *should_fail {
            *should_fail = false;
            let message = self.error_message.lock().unwrap().clone();
            return Err(StorageError::Unexpected {
                message,
                correlation_id: None,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ChunkStore for MockChunkStore {
    async fn put(&self, key: &str, set: ChunkSet) -> StorageResult<()> {
        self.check_fail()?;
        self.entries.lock().unwrap().insert(key.to_string(), set);
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<Option<ChunkSet>> {
        self.check_fail()?;
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn remove(&self, key: &str) -> StorageResult<bool> {
        self.check_fail()?;
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }

    async fn len(&self) -> StorageResult<usize> {
        self.check_fail()?;
        Ok(self.entries.lock().unwrap().len())
    }
}
