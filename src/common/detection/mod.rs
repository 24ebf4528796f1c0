//! File format detection utilities.
//!
//! Detection reads only the leading signature bytes and the file name; it
//! never parses the container.

// Submodule declarations
pub mod functions;
pub mod types;
pub mod utils;

// Re-exports
pub use functions::{
    Detection, detect_file_format_from_bytes, detect_file_format_from_name, detect_format,
};
pub use types::FileFormat;
