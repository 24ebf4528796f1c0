//! Unified error types for the extractor.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{AttemptFailure, Error, ErrorKind, ParseError, Result};
