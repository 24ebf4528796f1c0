/// Constants for the compound file format
pub mod consts;

/// Compound file parsing
mod file;

/// Sorted position tables
pub mod plcf;

/// Property modifier lists
pub mod sprm;

/// Legacy Word document (.doc) reader
pub mod doc;

pub use file::{DirectoryEntry, OleError, OleFile, is_ole_file};
