//! Tables of the format-neutral model.

use super::Paragraph;

/// A table cell: an ordered sequence of paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub paragraphs: Vec<Paragraph>,
}

impl Cell {
    /// Create a cell from paragraphs.
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a row from cells.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }
}

/// A 2-D grid of cells. Rows may have different cell counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a table from rows.
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Number of columns: the largest cell count of any row, at least 1.
    pub fn column_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.cells.len())
            .max()
            .unwrap_or(0)
            .max(1)
    }

    /// Every paragraph of every cell, in row-major order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .flat_map(|cell| cell.paragraphs.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Run;

    #[test]
    fn test_column_count_uses_widest_row() {
        let cell = || Cell::new(vec![Paragraph::from_runs([Run::plain("x")])]);
        let table = Table::new(vec![
            Row::new(vec![cell()]),
            Row::new(vec![cell(), cell(), cell()]),
            Row::new(vec![]),
        ]);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.paragraphs().count(), 4);
        assert_eq!(Table::default().column_count(), 1);
    }
}
