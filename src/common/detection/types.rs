//! File format type enumeration.

use std::fmt;

/// Word document container formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileFormat {
    /// Legacy Word binary document (OLE2 compound file, .doc)
    Doc,
    /// Word XML package (OOXML ZIP package, .docx)
    Docx,
}

impl FileFormat {
    /// Conventional file extension, without the dot.
    #[inline]
    pub fn extension(self) -> &'static str {
        match self {
            FileFormat::Doc => "doc",
            FileFormat::Docx => "docx",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
