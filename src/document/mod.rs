//! Format-neutral document model.
//!
//! Both walkers lower their native object model into these types at entry,
//! so the layout code never touches OLE or OOXML APIs.
//!
//! # Example
//!
//! ```
//! use longan::document::{Block, Document, Paragraph, Run};
//!
//! let mut doc = Document::new();
//! doc.push(Block::Paragraph(Paragraph::from_runs([
//!     Run::plain("Answer: "),
//!     Run::underlined("12"),
//! ])));
//! assert_eq!(doc.paragraph_count(), 1);
//! ```

mod paragraph;
mod table;

pub use paragraph::{Paragraph, Run};
pub use table::{Cell, Row, Table};

/// A top-level block of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

/// An ordered sequence of blocks as they appear in the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Create an empty document.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from blocks.
    #[inline]
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Append a block.
    #[inline]
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// The blocks, in document order.
    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Whether the document has no blocks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Number of top-level paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Paragraph(_)))
            .count()
    }

    /// Number of top-level tables.
    pub fn table_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Table(_)))
            .count()
    }
}

/// Traverses a format-specific object model in original document order.
///
/// Implementations exist for the legacy binary document and for both access
/// paths into an XML package. Interleaved paragraphs and tables must come
/// out interleaved.
pub trait DocumentWalker {
    /// Error raised by the underlying format.
    type Error;

    /// Lower every top-level block into the format-neutral model.
    fn walk(&self) -> Result<Document, Self::Error>;
}
