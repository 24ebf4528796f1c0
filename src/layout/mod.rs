//! Plain-text layout of the document model.
//!
//! This module turns a [`Document`] into the line-oriented text handed to
//! downstream consumers. Paragraphs become single lines with underlined
//! answers and blanks rewritten as underscore markers, and tables become
//! either answer-sheet lines or bordered grids.
//!
//! # Examples
//!
//! ```
//! use longan::document::{Block, Document, Paragraph, Run};
//! use longan::layout::{render_document, LayoutConfig};
//!
//! let doc = Document::from_blocks(vec![
//!     Block::Paragraph(Paragraph::from_runs([
//!         Run::plain("1. The capital of China is "),
//!         Run::underlined("Beijing"),
//!     ])),
//!     Block::Paragraph(Paragraph::from_runs([Run::underlined("   ")])),
//! ]);
//!
//! let text = render_document(&doc, &LayoutConfig::default());
//! let lines: Vec<&str> = text.lines().collect();
//! assert_eq!(lines[0], "1. The capital of China is ___Beijing___");
//! assert_eq!(lines[1], "_".repeat(80));
//! ```

mod config;
pub mod normalize;
pub mod paragraph;
pub mod run;
pub mod table;
pub mod width;
mod writer;

pub use config::LayoutConfig;
pub use normalize::normalize_text;
pub use width::display_width;
pub use writer::LayoutWriter;

use crate::document::Document;

/// Render a whole document with the given configuration.
pub fn render_document(document: &Document, config: &LayoutConfig) -> String {
    let mut writer = LayoutWriter::new(config);
    writer.write_document(document);
    writer.finish()
}
