//! Token counter registry keyed by encoding name

use super::heuristic_counter::HeuristicCounter;
use super::tiktoken_counter::TiktokenCounter;
use super::traits::TokenCounterRef;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Name under which the estimating fallback counter is registered
pub const HEURISTIC_ENCODING: &str = "heuristic";

/// Registry resolving encoding names to shared token counters
///
/// Every tiktoken encoding that constructs is registered eagerly; unknown
/// names resolve to the heuristic estimator so counting never fails at
/// lookup time.
pub struct TokenCounterRegistry {
    counters: HashMap<String, TokenCounterRef>,
    fallback: TokenCounterRef,
}

impl TokenCounterRegistry {
    /// Create a registry with all constructible encodings registered
    pub fn new(max_tokens: usize) -> Self {
        let mut counters = HashMap::new();

        for encoding in TiktokenCounter::ENCODINGS {
            match TiktokenCounter::new(encoding, max_tokens) {
                Ok(counter) => {
                    counters.insert(encoding.to_string(), Arc::new(counter) as TokenCounterRef);
                }
                Err(e) => warn!(encoding, error = %e, "encoding unavailable"),
            }
        }

        let fallback: TokenCounterRef =
            Arc::new(HeuristicCounter::new(HEURISTIC_ENCODING, max_tokens));
        counters.insert(HEURISTIC_ENCODING.to_string(), Arc::clone(&fallback));

        Self { counters, fallback }
    }

    /// Resolve an encoding name, falling back to the heuristic estimator
    pub fn for_encoding(&self, encoding: &str) -> TokenCounterRef {
        self.counters.get(encoding).cloned().unwrap_or_else(|| {
            warn!(encoding, "unknown encoding, token counts will be estimates");
            Arc::clone(&self.fallback)
        })
    }

    /// The estimating fallback counter
    pub fn fallback(&self) -> TokenCounterRef {
        Arc::clone(&self.fallback)
    }

    /// Register an additional counter under the given name
    pub fn register(&mut self, encoding: String, counter: TokenCounterRef) {
        self.counters.insert(encoding, counter);
    }

    /// List all registered encoding names, sorted
    pub fn list_encodings(&self) -> Vec<String> {
        let mut encodings: Vec<String> = self.counters.keys().cloned().collect();
        encodings.sort();
        encodings
    }
}
