//! Error types for the chunking crate

use quizgen_common::CommonError;
use thiserror::Error;

/// Chunking-specific error types
#[derive(Error, Debug)]
pub enum ChunkingError {
    /// Invalid chunking configuration, raised before any splitting begins
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Token counting error
    #[error("Token counting error: {0}")]
    TokenCounting(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Other error (fallback)
    #[error("Other error: {0}")]
    Other(String),
}

impl ChunkingError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a token counting error
    pub fn token_counting(msg: impl Into<String>) -> Self {
        Self::TokenCounting(msg.into())
    }
}

impl CommonError for ChunkingError {
    fn io_error(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    fn config_error(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    fn parse_error(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    fn other_error(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

quizgen_common::impl_common_conversions!(ChunkingError);

impl From<quizgen_config::ConfigError> for ChunkingError {
    fn from(e: quizgen_config::ConfigError) -> Self {
        Self::Configuration(e.to_string())
    }
}

/// Result type alias for chunking operations
pub type ChunkingResult<T> = Result<T, ChunkingError>;
