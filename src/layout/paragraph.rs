//! Paragraph rendering.
//!
//! A paragraph is rendered by concatenating its classified runs. Free-standing
//! paragraphs additionally collapse to a full-width underscore line when they
//! hold a blank underline and no real text; inside table cells that collapse
//! never happens.

use super::config::LayoutConfig;
use super::run::{classify_run, RunClass};
use super::width::underscores;
use crate::document::Paragraph;

/// Concatenated run output together with the paragraph's classification flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedParagraph {
    /// Concatenated text of every run
    pub text: String,
    /// Some run contributed non-whitespace content
    pub has_real_text: bool,
    /// Some underlined run held only whitespace
    pub has_blank_underline: bool,
}

impl RenderedParagraph {
    /// Whether the paragraph is a pure fill-in line.
    #[inline]
    pub fn is_blank_line(&self) -> bool {
        self.has_blank_underline && !self.has_real_text
    }
}

/// Classify every run of `paragraph` and concatenate the results.
pub fn render_runs(paragraph: &Paragraph) -> RenderedParagraph {
    let mut rendered = RenderedParagraph::default();
    for run in paragraph.runs() {
        let class = classify_run(run);
        rendered.has_real_text |= class.is_real();
        rendered.has_blank_underline |= matches!(class, RunClass::BlankUnderline);
        rendered.text.push_str(class.as_str());
    }
    rendered
}

/// Render a free-standing paragraph.
///
/// Returns `None` when the paragraph produces no text at all, in which case
/// no line is emitted.
///
/// # Examples
///
/// ```
/// use longan::document::{Paragraph, Run};
/// use longan::layout::{paragraph::render_paragraph, LayoutConfig};
///
/// let config = LayoutConfig::default();
/// let blank = Paragraph::from_runs([Run::underlined("      ")]);
/// assert_eq!(render_paragraph(&blank, &config), Some("_".repeat(80)));
///
/// let answer = Paragraph::from_runs([Run::plain("Answer: "), Run::underlined("42")]);
/// assert_eq!(render_paragraph(&answer, &config).as_deref(), Some("Answer: _42_"));
///
/// assert_eq!(render_paragraph(&Paragraph::new(), &config), None);
/// ```
pub fn render_paragraph(paragraph: &Paragraph, config: &LayoutConfig) -> Option<String> {
    let rendered = render_runs(paragraph);
    if rendered.is_blank_line() {
        return Some(underscores(config.blank_line_width));
    }
    (!rendered.text.is_empty()).then_some(rendered.text)
}

/// Render a paragraph that sits inside a table cell.
///
/// Blank underlines contribute nothing here.
#[inline]
pub fn render_cell_paragraph(paragraph: &Paragraph) -> String {
    render_runs(paragraph).text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Run;

    #[test]
    fn test_blank_with_real_text_keeps_text() {
        let config = LayoutConfig::default();
        let para = Paragraph::from_runs([Run::plain("Name:"), Run::underlined("     ")]);
        assert_eq!(render_paragraph(&para, &config).as_deref(), Some("Name:"));
    }

    #[test]
    fn test_blank_beside_whitespace_collapses() {
        let config = LayoutConfig::default().with_blank_line_width(5);
        let para = Paragraph::from_runs([Run::plain("  "), Run::underlined("   ")]);
        assert_eq!(render_paragraph(&para, &config).as_deref(), Some("_____"));
    }

    #[test]
    fn test_whitespace_only_paragraph_is_emitted() {
        let config = LayoutConfig::default();
        let para = Paragraph::from_runs([Run::plain("   ")]);
        assert_eq!(render_paragraph(&para, &config).as_deref(), Some("   "));
    }

    #[test]
    fn test_cell_paragraph_never_collapses() {
        let para = Paragraph::from_runs([Run::underlined("    ")]);
        assert_eq!(render_cell_paragraph(&para), "");
        let rendered = render_runs(&para);
        assert!(rendered.is_blank_line());
    }

    #[test]
    fn test_adjacent_underlined_runs_marked_separately() {
        let para = Paragraph::from_runs([Run::underlined("1"), Run::underlined("2")]);
        assert_eq!(render_cell_paragraph(&para), "_1__2_");
    }
}
