//! Quizgen chunk store crate
//!
//! Keyed storage for chunk sets between the upload call and the later
//! quiz-generation call. Ships an in-memory TTL/LRU implementation and a
//! mock; anything implementing [`ChunkStore`] can be injected instead.

pub mod error;
pub mod memory;
pub mod mock;
pub mod traits;

// Re-export main types
pub use error::{StorageError, StorageResult};
pub use memory::MemoryChunkStore;
pub use mock::MockChunkStore;
pub use traits::ChunkStore;
