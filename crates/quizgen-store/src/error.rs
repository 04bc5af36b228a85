//! Error types for the chunk store

use quizgen_common::{CommonError, CorrelationId};
use thiserror::Error;

/// Storage-specific error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Another holder of the store lock panicked
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),

    /// Unexpected storage failure, tagged for log correlation
    #[error("storage failure: {message}")]
    Unexpected {
        message: String,
        correlation_id: Option<CorrelationId>,
    },

    /// Invalid store configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

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

impl StorageError {
    /// Create an unexpected-failure error with a fresh correlation ID
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
            correlation_id: Some(CorrelationId::new()),
        }
    }
}

impl CommonError for StorageError {
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

quizgen_common::impl_common_conversions!(StorageError);

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
