//! Direct, lenient reading of `word/document.xml`.
//!
//! This path ignores `[Content_Types].xml` and every relationship part, and
//! streams the main part without checking end-tag names. When the XML turns
//! out to be broken, the blocks read up to that point are kept.

use super::wml::{is_skipped, is_transparent, run_content_char, underline_on};
use super::xml::resolve_reference;
use crate::document::{self as model, Block, Cell, DocumentWalker, Paragraph, Row, Run, Table};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::part_name;
use crate::ooxml::opc::{PackURI, PhysPkgReader};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// `word/document.xml` read straight out of the archive.
#[derive(Debug, Clone)]
pub struct RawDocument {
    xml: Vec<u8>,
}

impl RawDocument {
    /// Pull `word/document.xml` out of a ZIP archive.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut phys = PhysPkgReader::new(bytes)?;
        let xml = phys.blob_for(&PackURI::new(part_name::WORD_DOCUMENT)?)?;
        Ok(Self { xml })
    }

    /// Wrap an already extracted main part.
    pub fn from_xml(xml: Vec<u8>) -> Self {
        Self { xml }
    }
}

impl DocumentWalker for RawDocument {
    type Error = OoxmlError;

    fn walk(&self) -> Result<model::Document> {
        let mut walker = StreamWalker::default();
        let outcome = walker.read(&self.xml);
        let blocks = walker.finish();
        match outcome {
            Ok(()) => Ok(model::Document::from_blocks(blocks)),
            Err(e) if !blocks.is_empty() => {
                log::warn!(
                    "document.xml is malformed, keeping {} blocks read before: {e}",
                    blocks.len()
                );
                Ok(model::Document::from_blocks(blocks))
            },
            Err(e) => Err(e),
        }
    }
}

/// Table under construction; nested tables only bump `depth`.
#[derive(Debug, Default)]
struct TableState {
    depth: usize,
    rows: Vec<Row>,
    cells: Vec<Cell>,
    paragraphs: Vec<Paragraph>,
    in_cell: bool,
}

#[derive(Debug, Default)]
struct StreamWalker {
    blocks: Vec<Block>,
    table: TableState,
    paragraph: Option<Paragraph>,
    run: Option<Run>,
    in_run_props: bool,
    in_text: bool,
    /// Depth inside a skipped subtree; 0 when not skipping
    skip_depth: usize,
}

impl StreamWalker {
    fn read(&mut self, xml: &[u8]) -> Result<()> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().check_end_names = false;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => self.start(e, false),
                Event::Empty(ref e) => {
                    self.start(e, true);
                    if self.skip_depth == 0 {
                        self.end(e.local_name().as_ref());
                    }
                },
                Event::End(ref e) => self.end(e.local_name().as_ref()),
                Event::Text(ref t) if self.collecting_text() => {
                    self.push_text(&String::from_utf8_lossy(t.as_ref()));
                },
                Event::CData(ref t) if self.collecting_text() => {
                    self.push_text(&String::from_utf8_lossy(t.as_ref()));
                },
                Event::GeneralRef(ref r) if self.collecting_text() => {
                    if let Some(resolved) = resolve_reference(r.as_ref()) {
                        self.push_text(&resolved);
                    }
                },
                Event::Eof => return Ok(()),
                _ => {},
            }
            buf.clear();
        }
    }

    #[inline]
    fn collecting_text(&self) -> bool {
        self.skip_depth == 0 && self.in_text && self.run.is_some()
    }

    fn push_text(&mut self, text: &str) {
        if let Some(run) = self.run.as_mut() {
            run.text.push_str(text);
        }
    }

    fn start(&mut self, e: &BytesStart<'_>, empty: bool) {
        if self.skip_depth > 0 {
            if !empty {
                self.skip_depth += 1;
            }
            return;
        }
        let local = e.local_name();
        let name = local.as_ref();
        if is_skipped(name) {
            if !empty {
                self.skip_depth = 1;
            }
            return;
        }
        if is_transparent(name) {
            return;
        }

        match name {
            b"tbl" => {
                self.flush_paragraph_outside_table();
                self.table.depth += 1;
            },
            b"tr" if self.table.depth == 1 => self.table.cells.clear(),
            b"tc" if self.table.depth == 1 => {
                self.table.paragraphs.clear();
                self.table.in_cell = true;
            },
            b"p" => self.paragraph = Some(Paragraph::new()),
            b"r" if self.paragraph.is_some() => self.run = Some(Run::plain("")),
            b"rPr" if self.run.is_some() => self.in_run_props = true,
            b"u" if self.in_run_props => {
                if let Some(run) = self.run.as_mut() {
                    run.underlined = underline_on(attr(e, b"val").as_deref());
                }
            },
            b"t" if self.run.is_some() => self.in_text = true,
            _ if self.run.is_some() && !self.in_run_props => {
                if let Some(c) = run_content_char(name, attr(e, b"type").as_deref())
                    && let Some(run) = self.run.as_mut()
                {
                    run.text.push(c);
                }
            },
            _ => {},
        }
    }

    fn end(&mut self, name: &[u8]) {
        if self.skip_depth > 0 {
            self.skip_depth -= 1;
            return;
        }
        match name {
            b"t" => self.in_text = false,
            b"rPr" => self.in_run_props = false,
            b"r" => {
                if let (Some(run), Some(paragraph)) = (self.run.take(), self.paragraph.as_mut()) {
                    paragraph.push(run);
                }
                self.in_text = false;
                self.in_run_props = false;
            },
            b"p" => {
                if let Some(paragraph) = self.paragraph.take() {
                    if self.table.depth > 0 {
                        self.table.paragraphs.push(paragraph);
                    } else {
                        self.blocks.push(Block::Paragraph(paragraph));
                    }
                }
            },
            b"tc" if self.table.depth == 1 => {
                let paragraphs = std::mem::take(&mut self.table.paragraphs);
                self.table.cells.push(Cell::new(paragraphs));
                self.table.in_cell = false;
            },
            b"tr" if self.table.depth == 1 => {
                let cells = std::mem::take(&mut self.table.cells);
                self.table.rows.push(Row::new(cells));
            },
            b"tbl" if self.table.depth > 0 => {
                self.table.depth -= 1;
                if self.table.depth == 0 {
                    self.flush_table();
                }
            },
            _ => {},
        }
    }

    /// A paragraph left open by broken markup is closed before a table starts.
    fn flush_paragraph_outside_table(&mut self) {
        if self.table.depth == 0
            && let Some(paragraph) = self.paragraph.take()
        {
            self.blocks.push(Block::Paragraph(paragraph));
        }
    }

    fn flush_table(&mut self) {
        let table = std::mem::take(&mut self.table);
        let mut rows = table.rows;
        let mut cells = table.cells;
        if table.in_cell || !table.paragraphs.is_empty() {
            cells.push(Cell::new(table.paragraphs));
        }
        if !cells.is_empty() {
            rows.push(Row::new(cells));
        }
        self.blocks.push(Block::Table(Table::new(rows)));
    }

    /// Close whatever is still open and hand back the blocks.
    fn finish(&mut self) -> Vec<Block> {
        if let (Some(run), Some(paragraph)) = (self.run.take(), self.paragraph.as_mut()) {
            paragraph.push(run);
        }
        if let Some(paragraph) = self.paragraph.take() {
            if self.table.depth > 0 {
                self.table.paragraphs.push(paragraph);
            } else {
                self.blocks.push(Block::Paragraph(paragraph));
            }
        }
        if self.table.depth > 0 {
            self.flush_table();
        }
        std::mem::take(&mut self.blocks)
    }
}

/// Unescaped value of the attribute with local name `key`, leniently.
fn attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == key)
        .map(|a| match a.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&a.value).into_owned(),
        })
}
