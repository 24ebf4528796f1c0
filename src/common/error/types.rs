//! Crate-level error types.
//!
//! Format-specific layers keep their own error enums (`OleError`, `DocError`,
//! `OoxmlError`); this module folds them into the four outcomes a caller has
//! to tell apart.
use crate::common::detection::FileFormat;
use std::fmt;
use thiserror::Error;

/// Failure of a single parsing strategy.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Legacy binary document error
    #[cfg(feature = "ole")]
    #[error(transparent)]
    Doc(#[from] crate::ole::doc::DocError),

    /// XML package error
    #[cfg(feature = "ooxml")]
    #[error(transparent)]
    Ooxml(#[from] crate::ooxml::OoxmlError),

    /// Support for the format was compiled out
    #[error("Feature '{0}' is disabled. Enable it with --features {0}")]
    FeatureDisabled(&'static str),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// A strategy that was tried and the reason it failed.
#[derive(Debug)]
pub struct AttemptFailure {
    /// Name of the strategy, e.g. `"package"` or `"raw-xml"`
    pub strategy: &'static str,
    /// Why it failed
    pub error: ParseError,
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.strategy, self.error)
    }
}

fn describe_attempts(attempts: &[AttemptFailure]) -> String {
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Main error type for extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// Neither a legacy binary nor an XML-package Word file
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// No bytes were supplied
    #[error("Input is empty")]
    EmptyInput,

    /// Every strategy for a recognised format failed
    #[error("Failed to parse {format} file: {}", describe_attempts(.attempts))]
    ParseFailure {
        format: FileFormat,
        attempts: Vec<AttemptFailure>,
    },

    /// Parsing succeeded but produced only whitespace
    #[error("Document contains no extractable text")]
    EmptyResult,

    /// Reading the input stream failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Error::EmptyInput => ErrorKind::EmptyInput,
            Error::ParseFailure { .. } => ErrorKind::ParseFailure,
            Error::EmptyResult => ErrorKind::EmptyResult,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

/// Stable classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnsupportedFormat,
    EmptyInput,
    ParseFailure,
    EmptyResult,
    Io,
}

impl ErrorKind {
    /// Upper-snake code for logs and API responses.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            ErrorKind::EmptyInput => "EMPTY_INPUT",
            ErrorKind::ParseFailure => "PARSE_FAILURE",
            ErrorKind::EmptyResult => "EMPTY_RESULT",
            ErrorKind::Io => "IO_ERROR",
        }
    }

    /// Whether the file itself could not be understood (`FORMAT_ERROR`).
    pub fn is_format_error(self) -> bool {
        matches!(self, ErrorKind::UnsupportedFormat | ErrorKind::ParseFailure)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Result type for extraction.
pub type Result<T> = std::result::Result<T, Error>;
