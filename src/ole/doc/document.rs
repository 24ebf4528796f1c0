/// The main story of a Word binary document.
use super::package::Result;
use super::parts::fib::{FIB_CLX, FIB_PLCF_BTE_CHPX, FIB_PLCF_BTE_PAPX, FileInformationBlock};
use super::parts::fkp::{BinTable, CharProps, ParaProps};
use super::parts::piece_table::PieceTable;
use super::parts::text::{RawParagraph, read_paragraphs};
use super::table::TableAssembler;
use crate::document::{self as model, DocumentWalker};

/// WordDocument and table streams with their parsed FIB.
#[derive(Debug, Clone)]
pub struct Document {
    word_document: Vec<u8>,
    table_stream: Vec<u8>,
    fib: FileInformationBlock,
}

impl Document {
    pub(crate) fn new(
        word_document: Vec<u8>,
        table_stream: Vec<u8>,
        fib: FileInformationBlock,
    ) -> Self {
        Self {
            word_document,
            table_stream,
            fib,
        }
    }

    #[inline]
    pub fn fib(&self) -> &FileInformationBlock {
        &self.fib
    }

    /// Slice of the table stream referenced by a FIB pointer.
    fn table_slice(&self, index: usize) -> Option<&[u8]> {
        let (fc, lcb) = self.fib.table_pointer(index)?;
        let start = fc as usize;
        let slice = self
            .table_stream
            .get(start..start.saturating_add(lcb as usize));
        if slice.is_none() {
            log::warn!("FIB pointer {index} lies outside the table stream");
        }
        slice
    }

    fn piece_table(&self) -> Result<PieceTable> {
        match self.table_slice(FIB_CLX) {
            Some(clx) => PieceTable::parse(clx),
            None => Ok(PieceTable::single(
                self.fib.ccp_text(),
                self.fib.fc_min(),
                !self.fib.has_extended_chars(),
            )),
        }
    }

    /// Main text cut into paragraphs, with their table flags.
    pub(crate) fn raw_paragraphs(&self) -> Result<Vec<RawParagraph>> {
        let pieces = self.piece_table()?;
        let characters = match self.table_slice(FIB_PLCF_BTE_CHPX) {
            Some(bte) => BinTable::<CharProps>::characters(&self.word_document, bte)?,
            None => BinTable::default(),
        };
        let paragraphs = match self.table_slice(FIB_PLCF_BTE_PAPX) {
            Some(bte) => BinTable::<ParaProps>::paragraphs(&self.word_document, bte)?,
            None => BinTable::default(),
        };
        log::debug!(
            "doc: {} pieces, {} character ranges, {} paragraph ranges",
            pieces.pieces().len(),
            characters.ranges().len(),
            paragraphs.ranges().len()
        );
        Ok(read_paragraphs(
            &self.word_document,
            &pieces,
            &characters,
            &paragraphs,
            self.fib.ccp_text(),
        ))
    }

    /// Plain text of the main story, one line per paragraph.
    pub fn text(&self) -> Result<String> {
        let mut text = String::new();
        for raw in self.raw_paragraphs()? {
            text.push_str(&raw.paragraph.text());
            text.push('\n');
        }
        Ok(text)
    }
}

impl DocumentWalker for Document {
    type Error = super::package::DocError;

    fn walk(&self) -> Result<model::Document> {
        let mut assembler = TableAssembler::new();
        for raw in self.raw_paragraphs()? {
            assembler.push(raw);
        }
        Ok(model::Document::from_blocks(assembler.finish()))
    }
}
