/// Package implementation for legacy Word documents (.doc).
use super::super::{OleError, OleFile};
use super::document::Document;
use super::parts::fib::FileInformationBlock;
use crate::common::binary::BinaryError;
use std::fs::File;
use std::io::{self, Cursor, Read, Seek};
use std::path::Path;

/// Error types for DOC file parsing.
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("OLE error: {0}")]
    Ole(#[from] OleError),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("Stream not found: {0}")]
    StreamNotFound(String),
    #[error("Corrupted file: {0}")]
    Corrupted(String),
    #[error("Corrupted file: {0}")]
    Binary(#[from] BinaryError),
    #[error("Encrypted documents are not supported")]
    Encrypted,
}

/// Result type for DOC operations.
pub type Result<T> = std::result::Result<T, DocError>;

/// A Word (.doc) package.
///
/// Wraps the compound file and hands out the main [`Document`].
///
/// # Examples
///
/// ```rust,no_run
/// use longan::document::DocumentWalker;
/// use longan::ole::doc::Package;
///
/// let mut pkg = Package::open("paper.doc")?;
/// let doc = pkg.document()?;
/// let model = doc.walk()?;
/// println!("{} paragraphs", model.paragraph_count());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Package<R: Read + Seek = File> {
    ole: OleFile<R>,
}

impl Package<File> {
    /// Open a .doc package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Package::from_reader(File::open(path)?)
    }
}

impl<'a> Package<Cursor<&'a [u8]>> {
    /// Open a .doc package held in memory.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self> {
        Package::from_reader(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> Package<R> {
    /// Create a Package from any reader that implements Read + Seek.
    pub fn from_reader(reader: R) -> Result<Self> {
        let ole = OleFile::open(reader)?;
        if !ole.exists(&["WordDocument"]) {
            return Err(DocError::InvalidFormat(
                "Not a valid Word document: WordDocument stream not found".to_string(),
            ));
        }
        Ok(Self { ole })
    }

    /// Load the WordDocument stream and its table stream.
    pub fn document(&mut self) -> Result<Document> {
        let word_document = self.ole.open_stream(&["WordDocument"])?;
        let fib = FileInformationBlock::parse(&word_document)?;
        if fib.is_encrypted() {
            return Err(DocError::Encrypted);
        }

        let table_name = fib.table_stream_name();
        let table_stream = match self.ole.open_stream(&[table_name]) {
            Ok(stream) => stream,
            Err(OleError::StreamNotFound(_)) => {
                return Err(DocError::StreamNotFound(table_name.to_string()));
            },
            Err(e) => return Err(e.into()),
        };

        log::debug!(
            "doc: nFib 0x{:04X}, {} characters of main text, table stream {}, fast-saved {}",
            fib.version(),
            fib.ccp_text(),
            table_name,
            fib.is_complex()
        );
        Ok(Document::new(word_document, table_stream, fib))
    }
}
