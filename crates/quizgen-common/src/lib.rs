//! Common utilities shared across the quizgen crates
//!
//! Error-handling traits and macros, correlation IDs for cross-crate
//! diagnostics, and one-time environment bootstrap.

pub mod error;
pub mod init;
pub mod tracing;

pub use error::{CommonError, ErrorContext};
pub use init::initialize_environment;
pub use tracing::CorrelationId;
