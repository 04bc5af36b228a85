//! Token counting for chunk size budgets

pub mod heuristic_counter;
pub mod registry;
pub mod tiktoken_counter;
pub mod traits;

pub use heuristic_counter::HeuristicCounter;
pub use registry::TokenCounterRegistry;
pub use tiktoken_counter::TiktokenCounter;
pub use traits::{TokenCount, TokenCounter, TokenCounterRef};

/// Context ceiling assumed for counters when the caller has no model limit
pub const DEFAULT_COUNTER_MAX_TOKENS: usize = 8192;
