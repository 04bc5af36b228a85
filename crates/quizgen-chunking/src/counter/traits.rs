//! Trait definitions for token counting

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A token count together with how it was obtained, so callers can tell a
/// real tokenizer measurement from a character-ratio estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    /// Number of tokens
    pub tokens: usize,
    /// True when produced by an actual tokenizer, false for estimates
    pub exact: bool,
}

/// Trait for counting tokens in text
///
/// Implementations provide encoding-specific counting without coupling the
/// chunker to any particular tokenizer crate.
pub trait TokenCounter: Send + Sync {
    /// Get the name/identifier of this counter
    fn name(&self) -> &str;

    /// Maximum number of tokens the underlying model can handle
    fn max_tokens(&self) -> usize;

    /// Count tokens in the given text
    ///
    /// Must be fast, deterministic for the same input, and return 0 for
    /// empty input. Never fails.
    fn count(&self, text: &str) -> usize;

    /// Whether counts come from a real tokenizer rather than an estimate
    fn is_exact(&self) -> bool;

    /// Count plus the exact/estimated flag in one call
    fn measure(&self, text: &str) -> TokenCount {
        TokenCount {
            tokens: self.count(text),
            exact: self.is_exact(),
        }
    }

    /// Count tokens for multiple texts
    fn count_batch(&self, texts: &[&str]) -> Vec<usize> {
        texts.iter().map(|text| self.count(text)).collect()
    }
}

/// Type alias for shared token counter
pub type TokenCounterRef = Arc<dyn TokenCounter>;
