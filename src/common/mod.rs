//! Common types and utilities shared by the legacy and XML-package walkers.

// Submodule declarations
pub mod binary;
pub mod detection;
pub mod error;

// Re-exports for convenience
pub use detection::{FileFormat, detect_format};
pub use error::{Error, ErrorKind, Result};
