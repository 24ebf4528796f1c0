/// Line buffer for the layout pass.
///
/// `LayoutWriter` receives blocks in document order and appends one
/// newline-terminated line per rendered paragraph or table line.
use super::config::LayoutConfig;
use super::paragraph::render_paragraph;
use super::table::render_table;
use crate::document::{Block, Document, Paragraph, Table};

/// Accumulates rendered lines.
#[derive(Debug)]
pub struct LayoutWriter<'a> {
    /// The output buffer
    buffer: String,
    config: &'a LayoutConfig,
}

impl<'a> LayoutWriter<'a> {
    /// Create a new writer with the given configuration.
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self {
            buffer: String::with_capacity(4096),
            config,
        }
    }

    /// Write every block of a document, in order.
    pub fn write_document(&mut self, document: &Document) {
        for block in document.blocks() {
            self.write_block(block);
        }
    }

    /// Route a block to the paragraph or table renderer.
    #[inline]
    pub fn write_block(&mut self, block: &Block) {
        match block {
            Block::Paragraph(paragraph) => self.write_paragraph(paragraph),
            Block::Table(table) => self.write_table(table),
        }
    }

    /// Write a free-standing paragraph. Empty paragraphs emit nothing.
    pub fn write_paragraph(&mut self, paragraph: &Paragraph) {
        if let Some(line) = render_paragraph(paragraph, self.config) {
            self.write_line(&line);
        }
    }

    /// Write the lines of a table.
    pub fn write_table(&mut self, table: &Table) {
        let lines = render_table(table, self.config);
        if self.config.separate_tables {
            self.write_line("");
        }
        for line in &lines {
            self.write_line(line);
        }
        if self.config.separate_tables {
            self.write_line("");
        }
    }

    /// Append one line and its terminating newline.
    #[inline]
    pub fn write_line(&mut self, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    /// Get the final text.
    pub fn finish(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Cell, Row, Run};

    fn text_table(rows: &[&[&str]]) -> Table {
        Table::new(
            rows.iter()
                .map(|row| {
                    Row::new(
                        row.iter()
                            .map(|t| Cell::new(vec![Paragraph::from_runs([Run::plain(*t)])]))
                            .collect(),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_interleaved_order() {
        let doc = Document::from_blocks(vec![
            Block::Paragraph(Paragraph::from_runs([Run::plain("P1")])),
            Block::Table(text_table(&[&["A", "B"]])),
            Block::Paragraph(Paragraph::from_runs([Run::plain("P2")])),
        ]);
        let config = LayoutConfig::default();
        let mut writer = LayoutWriter::new(&config);
        writer.write_document(&doc);
        let out = writer.finish();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.first(), Some(&"P1"));
        assert!(lines[1].starts_with('_'));
        assert!(lines[2].starts_with("| A"));
        assert_eq!(lines.last(), Some(&"P2"));
        assert!(out.ends_with("P2\n"));
    }

    #[test]
    fn test_separated_tables() {
        let config = LayoutConfig::new().with_separate_tables(true);
        let mut writer = LayoutWriter::new(&config);
        writer.write_table(&text_table(&[&["A", "B"]]));
        let out = writer.finish();
        assert!(out.starts_with('\n'));
        assert!(out.ends_with("_\n\n"));
    }

    #[test]
    fn test_empty_paragraph_emits_nothing() {
        let config = LayoutConfig::default();
        let mut writer = LayoutWriter::new(&config);
        writer.write_paragraph(&Paragraph::new());
        writer.write_paragraph(&Paragraph::from_runs([Run::plain("")]));
        assert_eq!(writer.finish(), "");
    }
}
