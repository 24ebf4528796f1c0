//! Lowering of a `w:body` element tree into the document model.

use super::wml::{is_skipped, is_transparent, run_content_char, underline_on};
use super::xml::{XmlElement, XmlNode};
use crate::document::{Block, Cell, Paragraph, Row, Run, Table};

/// Walk the block-level children of `w:body` in order.
pub(crate) fn walk_body(body: &XmlElement) -> Vec<Block> {
    let mut blocks = Vec::new();
    collect_blocks(body, &mut blocks);
    blocks
}

fn collect_blocks(parent: &XmlElement, blocks: &mut Vec<Block>) {
    for element in parent.elements() {
        match element.name.as_str() {
            "p" => blocks.push(Block::Paragraph(paragraph(element))),
            "tbl" => blocks.push(Block::Table(table(element))),
            name if is_transparent(name.as_bytes()) => collect_blocks(element, blocks),
            _ => {},
        }
    }
}

fn paragraph(p: &XmlElement) -> Paragraph {
    let mut paragraph = Paragraph::new();
    collect_runs(p, &mut paragraph);
    paragraph
}

fn collect_runs(parent: &XmlElement, paragraph: &mut Paragraph) {
    for element in parent.elements() {
        match element.name.as_str() {
            "r" => paragraph.push(run(element)),
            name if is_skipped(name.as_bytes()) => {},
            name if is_transparent(name.as_bytes()) => collect_runs(element, paragraph),
            _ => {},
        }
    }
}

fn run(r: &XmlElement) -> Run {
    let underlined = r
        .child("rPr")
        .and_then(|props| props.child("u"))
        .is_some_and(|u| underline_on(u.attr("val")));

    let mut text = String::new();
    for element in r.elements() {
        match element.name.as_str() {
            "t" => text.push_str(&element.text()),
            name => {
                if let Some(c) = run_content_char(name.as_bytes(), element.attr("type")) {
                    text.push(c);
                }
            },
        }
    }
    Run::new(text, underlined)
}

fn table(tbl: &XmlElement) -> Table {
    let mut rows = Vec::new();
    collect_rows(tbl, &mut rows);
    Table::new(rows)
}

fn collect_rows(parent: &XmlElement, rows: &mut Vec<Row>) {
    for element in parent.elements() {
        match element.name.as_str() {
            "tr" => {
                let mut cells = Vec::new();
                collect_cells(element, &mut cells);
                rows.push(Row::new(cells));
            },
            name if is_transparent(name.as_bytes()) => collect_rows(element, rows),
            _ => {},
        }
    }
}

fn collect_cells(parent: &XmlElement, cells: &mut Vec<Cell>) {
    for element in parent.elements() {
        match element.name.as_str() {
            "tc" => {
                let mut paragraphs = Vec::new();
                collect_cell_paragraphs(element, &mut paragraphs);
                cells.push(Cell::new(paragraphs));
            },
            name if is_transparent(name.as_bytes()) => collect_cells(element, cells),
            _ => {},
        }
    }
}

/// Paragraphs of a cell; nested tables contribute their paragraphs in order.
fn collect_cell_paragraphs(parent: &XmlElement, paragraphs: &mut Vec<Paragraph>) {
    for node in &parent.children {
        let XmlNode::Element(element) = node else {
            continue;
        };
        match element.name.as_str() {
            "p" => paragraphs.push(paragraph(element)),
            "tbl" | "tr" | "tc" => collect_cell_paragraphs(element, paragraphs),
            name if is_transparent(name.as_bytes()) => collect_cell_paragraphs(element, paragraphs),
            _ => {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::xml::parse;

    fn body(inner: &str) -> Vec<Block> {
        let xml = format!(r#"<w:body xmlns:w="urn:w">{inner}</w:body>"#);
        walk_body(&parse(xml.as_bytes()).unwrap())
    }

    fn only_paragraph(blocks: &[Block]) -> &Paragraph {
        match blocks {
            [Block::Paragraph(p)] => p,
            other => panic!("expected one paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_runs_and_underline() {
        let blocks = body(
            r#"<w:p><w:pPr><w:rPr><w:u w:val="single"/></w:rPr></w:pPr>
               <w:r><w:t>Answer: </w:t></w:r>
               <w:r><w:rPr><w:u/></w:rPr><w:t>12</w:t></w:r>
               <w:r><w:rPr><w:u w:val="none"/></w:rPr><w:t>.</w:t></w:r></w:p>"#,
        );
        let p = only_paragraph(&blocks);
        let runs = p.runs();
        assert_eq!(runs.len(), 3);
        assert!(!runs[0].underlined);
        assert_eq!(runs[0].text, "Answer: ");
        assert!(runs[1].underlined);
        assert!(!runs[2].underlined);
    }

    #[test]
    fn test_containers_and_revisions() {
        let blocks = body(
            r#"<w:sdt><w:sdtPr><w:alias w:val="x"/></w:sdtPr><w:sdtContent>
                 <w:p><w:hyperlink><w:r><w:t>link</w:t></w:r></w:hyperlink>
                   <w:ins><w:r><w:t>+new</w:t></w:r></w:ins>
                   <w:del><w:r><w:delText>old</w:delText></w:r></w:del>
                   <w:r><w:fldChar w:fldCharType="begin"/></w:r>
                   <w:r><w:instrText>PAGE</w:instrText></w:r>
                   <w:r><w:t>7</w:t></w:r>
                   <w:r><w:tab/><w:t>x</w:t><w:br/><w:noBreakHyphen/></w:r>
                   <w:r><w:drawing><w:t>hidden</w:t></w:drawing></w:r></w:p>
               </w:sdtContent></w:sdt>"#,
        );
        assert_eq!(only_paragraph(&blocks).text(), "link+new7\tx\n-");
    }

    #[test]
    fn test_order_and_nested_tables() {
        let blocks = body(
            r#"<w:p><w:r><w:t>before</w:t></w:r></w:p>
               <w:tbl><w:tblPr/><w:tr><w:tc><w:p><w:r><w:t>a</w:t></w:r></w:p>
                 <w:tbl><w:tr><w:tc><w:p><w:r><w:t>inner</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
                 <w:p/></w:tc><w:tc><w:p><w:r><w:t>b</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
               <w:p><w:r><w:t>after</w:t></w:r></w:p><w:sectPr/>"#,
        );
        assert_eq!(blocks.len(), 3);
        let Block::Table(table) = &blocks[1] else {
            panic!("expected a table");
        };
        assert_eq!(table.column_count(), 2);
        let first: Vec<String> = table.rows[0].cells[0]
            .paragraphs
            .iter()
            .map(Paragraph::text)
            .collect();
        assert_eq!(first, vec!["a", "inner", ""]);
    }
}
