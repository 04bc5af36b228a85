//! Chunking service facade
//!
//! Ties the pipeline together: normalize the document once, split it into
//! boundary-aware pieces, assemble overlapping chunks, and hand back either
//! the raw chunk list or a [`ChunkSet`] ready for storage.

use crate::assembler::OverlapAssembler;
use crate::counter::{DEFAULT_COUNTER_MAX_TOKENS, TokenCounterRef, TokenCounterRegistry};
use crate::error::ChunkingResult;
use crate::normalize;
use crate::splitter::BoundarySplitter;
use crate::types::{Chunk, ChunkMetadata, ChunkSet};
use crate::validator::ChunkValidator;
use quizgen_config::{ChunkingConfig, Validate};
use std::sync::Arc;
use tracing::debug;

/// Token-aware document chunker
///
/// Configuration is validated at construction, so an invalid overlap/target
/// combination never reaches the splitter.
pub struct Chunker {
    counter: TokenCounterRef,
    config: ChunkingConfig,
}

impl Chunker {
    /// Create a chunker, resolving the token counter from the configured
    /// encoding name.
    ///
    /// # Errors
    /// Returns `ChunkingError::Configuration` when the configuration is
    /// invalid.
    pub fn new(config: ChunkingConfig) -> ChunkingResult<Self> {
        config.validate()?;
        let registry = TokenCounterRegistry::new(DEFAULT_COUNTER_MAX_TOKENS);
        let counter = registry.for_encoding(&config.encoding);
        Ok(Self { counter, config })
    }

    /// Create a chunker with an injected token counter.
    ///
    /// # Errors
    /// Returns `ChunkingError::Configuration` when the configuration is
    /// invalid.
    pub fn with_counter(counter: TokenCounterRef, config: ChunkingConfig) -> ChunkingResult<Self> {
        config.validate()?;
        Ok(Self { counter, config })
    }

    /// The active configuration
    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Count tokens in `text` with the chunker's counter
    pub fn count_tokens(&self, text: &str) -> usize {
        self.counter.count(text)
    }

    /// Split a document into overlapping chunks.
    ///
    /// The text is normalized first; all sizing and round-trip guarantees are
    /// relative to the cleaned text. Empty (or whitespace-only) input yields
    /// an empty chunk list.
    ///
    /// # Errors
    /// Infallible today beyond the constructor's validation; kept fallible so
    /// counter or configuration failures can surface without an API break.
    pub fn chunk_text(&self, text: &str, metadata: &ChunkMetadata) -> ChunkingResult<Vec<Chunk>> {
        let cleaned = normalize::clean_text(text);
        if cleaned.is_empty() {
            return Ok(Vec::new());
        }

        let splitter = BoundarySplitter::new(
            Arc::clone(&self.counter),
            self.config.target_tokens,
            self.config.min_piece_tokens,
            self.config.separators.clone(),
        );
        let pieces = splitter.split(&cleaned);

        let assembler = OverlapAssembler::new(
            Arc::clone(&self.counter),
            self.config.target_tokens,
            self.config.overlap_tokens,
        );
        let chunks = assembler.assemble(pieces, metadata);

        debug!(
            chunks = chunks.len(),
            source_chars = cleaned.chars().count(),
            counter = self.counter.name(),
            "document chunked"
        );
        Ok(chunks)
    }

    /// Chunk a document and bundle the result with statistics.
    ///
    /// # Errors
    /// Same failure surface as [`Self::chunk_text`].
    pub fn chunk_set(&self, text: &str, metadata: &ChunkMetadata) -> ChunkingResult<ChunkSet> {
        Ok(ChunkSet::new(self.chunk_text(text, metadata)?))
    }

    /// Validator matching this chunker's configuration
    pub fn validator(&self) -> ChunkValidator {
        ChunkValidator::from_config(&self.config)
    }
}

/// One-call convenience wrapper: chunk `text` with default settings apart
/// from the given sizes.
///
/// # Errors
/// Returns `ChunkingError::Configuration` when `target_tokens` is zero or
/// `overlap_tokens` is not strictly below it.
pub fn chunk_text(
    text: &str,
    target_tokens: usize,
    overlap_tokens: usize,
    metadata: ChunkMetadata,
) -> ChunkingResult<Vec<Chunk>> {
    let config = ChunkingConfig::with_sizes(target_tokens, overlap_tokens);
    Chunker::new(config)?.chunk_text(text, &metadata)
}
