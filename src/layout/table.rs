//! Table layout reconstruction.
//!
//! Single-column tables are answer sheets: each paragraph becomes a line
//! padded with underscores to a common width. Wider tables are data tables,
//! drawn as fixed-width rows between underscore borders.

use super::config::LayoutConfig;
use super::normalize::normalize_text;
use super::paragraph::render_cell_paragraph;
use super::width::{display_width, pad_right, underscores};
use crate::document::{Cell, Table};

/// Lay out a table as text lines.
///
/// # Examples
///
/// ```
/// use longan::document::{Cell, Paragraph, Row, Run, Table};
/// use longan::layout::{table::render_table, LayoutConfig};
///
/// let cell = |s: &str| Cell::new(vec![Paragraph::from_runs([Run::plain(s)])]);
/// let table = Table::new(vec![Row::new(vec![cell("AB"), cell("C")])]);
///
/// let lines = render_table(&table, &LayoutConfig::default());
/// assert_eq!(lines[1], "| AB         | C          |");
/// assert_eq!(lines[0], "_".repeat(27));
/// ```
pub fn render_table(table: &Table, config: &LayoutConfig) -> Vec<String> {
    if table.column_count() == 1 {
        render_essay_table(table, config)
    } else {
        render_data_table(table, config)
    }
}

/// Answer-sheet layout for a single-column table.
///
/// Empty paragraphs become bare underscore lines; content lines start with
/// three underscores and are padded with underscores to the line width.
pub fn render_essay_table(table: &Table, config: &LayoutConfig) -> Vec<String> {
    let texts: Vec<String> = table
        .paragraphs()
        .map(|p| normalize_text(&render_cell_paragraph(p)))
        .collect();

    let widest = texts.iter().map(|t| display_width(t)).max().unwrap_or(0);
    let line_width = config
        .essay_min_line_width
        .max(widest + 2 * config.essay_side_padding);

    texts
        .iter()
        .map(|text| {
            if text.is_empty() {
                return underscores(line_width);
            }
            let fill = line_width
                .saturating_sub(display_width(text) + config.essay_side_padding)
                .max(config.underline_text_padding);
            let mut line = underscores(config.essay_side_padding);
            line.push_str(text);
            line.push_str(&underscores(fill));
            line
        })
        .collect()
}

/// Bordered fixed-width layout for a multi-column table.
///
/// Rows without cells are skipped; rows shorter than the widest row are
/// padded with empty cells.
pub fn render_data_table(table: &Table, config: &LayoutConfig) -> Vec<String> {
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .filter(|row| !row.cells.is_empty())
        .map(|row| row.cells.iter().map(cell_text).collect())
        .collect();

    let columns = table.column_count();
    let mut widths = vec![config.min_column_width; columns];
    for row in &rows {
        for (width, text) in widths.iter_mut().zip(row) {
            *width = (*width).max(display_width(text));
        }
    }

    let total = widths.iter().sum::<usize>() + 3 * (columns - 1) + 4;
    let border = underscores(total);

    let mut lines = Vec::with_capacity(rows.len() * 2 + 1);
    lines.push(border.clone());
    for row in &rows {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, &width)| pad_right(row.get(i).map_or("", String::as_str), width))
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
        lines.push(border.clone());
    }
    lines
}

/// Text of a data cell: its non-empty paragraphs joined with spaces.
fn cell_text(cell: &Cell) -> String {
    let joined = cell
        .paragraphs
        .iter()
        .map(render_cell_paragraph)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    normalize_text(&joined)
}
