/// Table reconstruction from paragraph marks.
///
/// The binary format has no table objects: a table is a sequence of
/// paragraphs flagged as in-table. A cell mark closes a cell, and a cell
/// mark whose paragraph is a table terminating paragraph (TTP) closes a row.
/// Paragraphs of nested tables are folded into the enclosing cell.
use super::parts::text::RawParagraph;
use crate::document::{Block, Cell, Paragraph, Row, Table};

/// Groups raw paragraphs into blocks, preserving order.
#[derive(Debug, Default)]
pub(crate) struct TableAssembler {
    blocks: Vec<Block>,
    rows: Vec<Row>,
    cells: Vec<Cell>,
    paragraphs: Vec<Paragraph>,
}

impl TableAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, raw: RawParagraph) {
        let depth = raw.props.table_depth();
        if depth == 0 {
            self.flush_table();
            self.blocks.push(Block::Paragraph(raw.paragraph));
            return;
        }

        if depth > 1 {
            // Row ends of nested tables carry no text.
            if !raw.props.inner_row_end {
                self.paragraphs.push(raw.paragraph);
            }
            return;
        }

        if raw.props.row_end {
            if !self.paragraphs.is_empty() {
                self.close_cell();
            }
            self.close_row();
        } else {
            self.paragraphs.push(raw.paragraph);
            if raw.cell_mark {
                self.close_cell();
            }
        }
    }

    fn close_cell(&mut self) {
        self.cells
            .push(Cell::new(std::mem::take(&mut self.paragraphs)));
    }

    fn close_row(&mut self) {
        self.rows.push(Row::new(std::mem::take(&mut self.cells)));
    }

    fn flush_table(&mut self) {
        if !self.paragraphs.is_empty() {
            self.close_cell();
        }
        if !self.cells.is_empty() {
            self.close_row();
        }
        if !self.rows.is_empty() {
            let rows = std::mem::take(&mut self.rows);
            self.blocks.push(Block::Table(Table::new(rows)));
        }
    }

    pub fn finish(mut self) -> Vec<Block> {
        self.flush_table();
        self.blocks
    }
}
