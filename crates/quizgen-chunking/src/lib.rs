//! Quizgen chunking crate
//!
//! Token-aware recursive text chunking for the quizgen document pipeline:
//! documents are normalized, split at the most natural boundaries that fit a
//! token budget, and reassembled into overlapping chunks sized for retrieval
//! and question generation.

pub mod assembler;
pub mod counter;
pub mod error;
pub mod normalize;
pub mod service;
pub mod splitter;
pub mod types;
pub mod validator;

// Re-export main types
pub use assembler::OverlapAssembler;
pub use counter::{
    HeuristicCounter, TiktokenCounter, TokenCount, TokenCounter, TokenCounterRef,
    TokenCounterRegistry,
};
pub use error::{ChunkingError, ChunkingResult};
pub use normalize::clean_text;
pub use service::{Chunker, chunk_text};
pub use splitter::BoundarySplitter;
pub use types::{Chunk, ChunkMetadata, ChunkSet, ChunkStats};
pub use validator::{ChunkValidator, ValidationOutcome};
