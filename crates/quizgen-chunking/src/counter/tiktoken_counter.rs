//! Tiktoken-based token counter for BPE encodings

use super::traits::TokenCounter;
use crate::error::{ChunkingError, ChunkingResult};
use tiktoken_rs::{CoreBPE, cl100k_base, o200k_base, p50k_base, p50k_edit, r50k_base};

/// Token counter backed by a tiktoken BPE encoding
///
/// Counts are exact for any model served by the named encoding, which is what
/// makes chunk token budgets meaningful downstream.
pub struct TiktokenCounter {
    /// Encoding name for identification
    encoding_name: String,
    /// The tiktoken encoder
    encoder: CoreBPE,
    /// Maximum tokens the associated models support
    max_tokens: usize,
}

impl TiktokenCounter {
    /// Encodings this counter can construct
    pub const ENCODINGS: [&'static str; 5] = [
        "cl100k_base",
        "o200k_base",
        "p50k_base",
        "p50k_edit",
        "r50k_base",
    ];

    /// Create a counter for the named encoding
    ///
    /// # Errors
    /// Returns `ChunkingError::TokenCounting` for unknown encoding names or
    /// when the encoder tables fail to build.
    pub fn new(encoding_name: &str, max_tokens: usize) -> ChunkingResult<Self> {
        let encoder = match encoding_name {
            "cl100k_base" => cl100k_base(),
            "o200k_base" => o200k_base(),
            "p50k_base" => p50k_base(),
            "p50k_edit" => p50k_edit(),
            "r50k_base" => r50k_base(),
            other => {
                return Err(ChunkingError::token_counting(format!(
                    "unknown encoding: {other}"
                )));
            }
        }
        .map_err(|e| ChunkingError::token_counting(e.to_string()))?;

        Ok(Self {
            encoding_name: encoding_name.to_string(),
            encoder,
            max_tokens,
        })
    }

    /// The `cl100k_base` encoding used by most recent chat models
    pub fn cl100k(max_tokens: usize) -> ChunkingResult<Self> {
        Self::new("cl100k_base", max_tokens)
    }
}

impl TokenCounter for TiktokenCounter {
    fn name(&self) -> &str {
        &self.encoding_name
    }

    fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    fn count(&self, text: &str) -> usize {
        self.encoder.encode_ordinary(text).len()
    }

    fn is_exact(&self) -> bool {
        true
    }

    fn count_batch(&self, texts: &[&str]) -> Vec<usize> {
        texts
            .iter()
            .map(|text| self.encoder.encode_ordinary(text).len())
            .collect()
    }
}
