//! Chunk set validation and statistics

use crate::types::{Chunk, ChunkStats};
use quizgen_config::ChunkingConfig;
use serde::{Deserialize, Serialize};

/// Tokenizers are not additive across concatenation boundaries, so coverage
/// comparisons allow this much slack.
const TOKEN_TOLERANCE: f64 = 0.1;

/// Result of a chunk set quality check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Whether the chunk set is usable downstream
    pub valid: bool,
    /// Human-readable failure reason, absent on success
    pub reason: Option<String>,
}

impl ValidationOutcome {
    fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    fn fail(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// Quality checks over an assembled chunk set
pub struct ChunkValidator {
    target_tokens: usize,
    overlap_tokens: usize,
    min_chunk_tokens: usize,
    max_small_fraction: f64,
    max_size_factor: f64,
}

impl ChunkValidator {
    /// Build a validator from the chunking configuration that produced the set
    pub fn from_config(config: &ChunkingConfig) -> Self {
        Self {
            target_tokens: config.target_tokens,
            overlap_tokens: config.overlap_tokens,
            min_chunk_tokens: config.min_piece_tokens,
            max_small_fraction: config.max_small_fraction,
            max_size_factor: config.max_size_factor,
        }
    }

    /// Check that a chunk set is suitable for downstream processing.
    ///
    /// Fails when the set is empty, when too many chunks are undersized, or
    /// when any chunk blows past the size ceiling.
    pub fn validate(&self, chunks: &[Chunk]) -> ValidationOutcome {
        if chunks.is_empty() {
            return ValidationOutcome::fail("no chunks created");
        }

        let small = chunks
            .iter()
            .filter(|c| c.token_count < self.min_chunk_tokens)
            .count();
        let small_fraction = small as f64 / chunks.len() as f64;
        if small_fraction > self.max_small_fraction {
            return ValidationOutcome::fail(format!(
                "{small} of {} chunks fall below {} tokens",
                chunks.len(),
                self.min_chunk_tokens
            ));
        }

        let ceiling = (self.target_tokens as f64 * self.max_size_factor) as usize;
        if let Some(big) = chunks.iter().find(|c| c.token_count > ceiling) {
            return ValidationOutcome::fail(format!(
                "chunk {} exceeds maximum size ({} > {ceiling} tokens)",
                big.chunk_id, big.token_count
            ));
        }

        ValidationOutcome::ok()
    }

    /// [`Self::validate`] plus a coverage sanity check against the source:
    /// the set's total tokens must cover the source document and must not
    /// exceed it by more than the per-boundary overlap allowance.
    pub fn validate_against_source(
        &self,
        chunks: &[Chunk],
        source_tokens: usize,
    ) -> ValidationOutcome {
        let base = self.validate(chunks);
        if !base.valid {
            return base;
        }

        let total: usize = chunks.iter().map(|c| c.token_count).sum();
        let boundaries = chunks.len().saturating_sub(1);
        let expected_max = source_tokens + boundaries * self.overlap_tokens;

        let lower = (source_tokens as f64 * (1.0 - TOKEN_TOLERANCE)).floor() as usize;
        let upper = (expected_max as f64 * (1.0 + TOKEN_TOLERANCE)).ceil() as usize;
        if total < lower || total > upper {
            return ValidationOutcome::fail(format!(
                "chunk set totals {total} tokens, expected between {lower} and {upper} \
                 for a {source_tokens}-token source"
            ));
        }

        ValidationOutcome::ok()
    }

    /// Aggregate statistics, as exposed alongside chunk sets. Pure.
    pub fn stats(chunks: &[Chunk]) -> ChunkStats {
        ChunkStats::from_chunks(chunks)
    }
}
