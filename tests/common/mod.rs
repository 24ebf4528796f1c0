//! In-memory fixtures for the integration tests.
//!
//! `.docx` files are written with the `zip` writer. `.doc` files are
//! assembled from a version 3 compound file holding a `WordDocument` stream
//! (FIB, UTF-16 text, one CHPX and one PAPX page) and a `1Table` stream
//! (piece table and the two bin tables).
#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const DOCUMENT_CT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
pub const MACRO_DOCUMENT_CT: &str = "application/vnd.ms-word.document.macroEnabled.main+xml";
pub const OFFICE_DOCUMENT_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

// ---------------------------------------------------------------------------
// .docx
// ---------------------------------------------------------------------------

/// Zip the given `(name, contents)` members.
pub fn zip_parts(parts: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, data) in parts {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// `[Content_Types].xml` declaring `main_part` with `content_type`.
pub fn content_types(main_part: &str, content_type: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="{main_part}" ContentType="{content_type}"/>
</Types>"#
    )
}

/// `_rels/.rels` pointing the office-document relationship at `target`.
pub fn package_rels(target: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="{OFFICE_DOCUMENT_REL}" Target="{target}"/>
</Relationships>"#
    )
}

/// A `w:document` wrapping `body`.
pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{WML_NS}"><w:body>{body}<w:sectPr/></w:body></w:document>"#
    )
}

/// A well-formed `.docx` whose body is `body`.
pub fn docx(body: &str) -> Vec<u8> {
    docx_with_document(&document_xml(body))
}

/// A `.docx` with the standard package parts around an arbitrary main part.
pub fn docx_with_document(document: &str) -> Vec<u8> {
    zip_parts(&[
        (
            "[Content_Types].xml",
            content_types("/word/document.xml", DOCUMENT_CT).as_bytes(),
        ),
        ("_rels/.rels", package_rels("word/document.xml").as_bytes()),
        ("word/document.xml", document.as_bytes()),
    ])
}

/// `<w:p>` made of `(text, underlined)` runs.
pub fn p(runs: &[(&str, bool)]) -> String {
    let mut xml = String::from("<w:p>");
    for (text, underlined) in runs {
        xml.push_str("<w:r>");
        if *underlined {
            xml.push_str(r#"<w:rPr><w:u w:val="single"/></w:rPr>"#);
        }
        xml.push_str(r#"<w:t xml:space="preserve">"#);
        xml.push_str(text);
        xml.push_str("</w:t></w:r>");
    }
    xml.push_str("</w:p>");
    xml
}

/// `<w:tbl>` whose cells each hold one paragraph per string.
pub fn tbl(rows: &[&[&[&str]]]) -> String {
    let mut xml = String::from("<w:tbl><w:tblPr/>");
    for row in rows {
        xml.push_str("<w:tr>");
        for cell in *row {
            xml.push_str("<w:tc><w:tcPr/>");
            for text in *cell {
                if text.is_empty() {
                    xml.push_str("<w:p/>");
                } else {
                    xml.push_str(&p(&[(text, false)]));
                }
            }
            xml.push_str("</w:tc>");
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

// ---------------------------------------------------------------------------
// .doc
// ---------------------------------------------------------------------------

const SECTOR: usize = 512;
const ENDOFCHAIN: u32 = 0xFFFF_FFFE;
const FREESECT: u32 = 0xFFFF_FFFF;
const FATSECT: u32 = 0xFFFF_FFFD;
const NOSTREAM: u32 = 0xFFFF_FFFF;

/// Byte offset of the text in the WordDocument stream
const TEXT_FC: usize = 0x400;
/// Page numbers of the two FKPs
const CHPX_PAGE: usize = 8;
const PAPX_PAGE: usize = 9;
const WORD_DOCUMENT_LEN: usize = (PAPX_PAGE + 1) * 512;
const TABLE_LEN: usize = 4096;

/// Table role of a paragraph mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// Ordinary paragraph outside a table
    Body,
    /// Paragraph inside a cell, ended by `\r`
    CellParagraph,
    /// Last paragraph of a cell, ended by `\x07`
    CellEnd,
    /// Row-end mark, `\x07` with the TTP flag
    RowEnd,
    /// Cell of a table nested one level deeper
    InnerCellEnd,
    /// Row-end mark of a nested table
    InnerRowEnd,
}

impl Mark {
    fn char(self) -> u16 {
        match self {
            Mark::Body | Mark::CellParagraph => 0x0D,
            _ => 0x07,
        }
    }

    /// `istd` followed by the paragraph grpprl.
    fn papx(self) -> Option<Vec<u8>> {
        const IN_TABLE: [u8; 3] = [0x16, 0x24, 0x01];
        const TTP: [u8; 3] = [0x17, 0x24, 0x01];
        const ITAP_2: [u8; 6] = [0x49, 0x66, 0x02, 0x00, 0x00, 0x00];
        const INNER_CELL: [u8; 3] = [0x4B, 0x24, 0x01];
        const INNER_TTP: [u8; 3] = [0x4C, 0x24, 0x01];

        let sprms: Vec<&[u8]> = match self {
            Mark::Body => return None,
            Mark::CellParagraph | Mark::CellEnd => vec![&IN_TABLE],
            Mark::RowEnd => vec![&IN_TABLE, &TTP],
            Mark::InnerCellEnd => vec![&IN_TABLE, &ITAP_2, &INNER_CELL],
            Mark::InnerRowEnd => vec![&IN_TABLE, &ITAP_2, &INNER_CELL, &INNER_TTP],
        };
        let mut papx = vec![0u8, 0u8];
        for sprm in sprms {
            papx.extend_from_slice(sprm);
        }
        Some(papx)
    }
}

/// Builder for a Word 97 binary document.
#[derive(Debug, Default)]
pub struct DocBuilder {
    text: Vec<u16>,
    /// `(cp_start, cp_end, underlined)`, contiguous
    runs: Vec<(usize, usize, bool)>,
    /// `(cp_start, cp_end, mark)`, contiguous
    paragraphs: Vec<(usize, usize, Mark)>,
    paragraph_start: usize,
    encrypted: bool,
}

impl DocBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a run of text.
    pub fn run(mut self, text: &str, underlined: bool) -> Self {
        let start = self.text.len();
        self.text.extend(text.encode_utf16());
        if self.text.len() > start {
            self.runs.push((start, self.text.len(), underlined));
        }
        self
    }

    /// Close the current paragraph with the given mark.
    pub fn end(mut self, mark: Mark) -> Self {
        let at = self.text.len();
        self.text.push(mark.char());
        self.runs.push((at, at + 1, false));
        self.paragraphs.push((self.paragraph_start, at + 1, mark));
        self.paragraph_start = at + 1;
        self
    }

    /// Shorthand for a body paragraph of `(text, underlined)` runs.
    pub fn paragraph(self, runs: &[(&str, bool)]) -> Self {
        runs.iter()
            .fold(self, |b, (text, underlined)| b.run(text, *underlined))
            .end(Mark::Body)
    }

    /// A full single-level table; each cell holds one paragraph per string.
    pub fn table(mut self, rows: &[&[&[&str]]]) -> Self {
        for row in rows {
            for cell in *row {
                let count = cell.len().max(1);
                for i in 0..count {
                    let text = cell.get(i).copied().unwrap_or("");
                    let mark = if i + 1 == count {
                        Mark::CellEnd
                    } else {
                        Mark::CellParagraph
                    };
                    self = self.run(text, false).end(mark);
                }
            }
            self = self.end(Mark::RowEnd);
        }
        self
    }

    /// Set `fEncrypted` in the FIB.
    pub fn encrypted(mut self) -> Self {
        self.encrypted = true;
        self
    }

    pub fn build(self) -> Vec<u8> {
        let (word_document, table) = self.streams();
        compound_file(&[("WordDocument", &word_document), ("1Table", &table)])
    }

    fn fc(cp: usize) -> u32 {
        (TEXT_FC + cp * 2) as u32
    }

    fn streams(&self) -> (Vec<u8>, Vec<u8>) {
        assert!(TEXT_FC + self.text.len() * 2 <= CHPX_PAGE * 512, "text too long");
        let mut word = vec![0u8; WORD_DOCUMENT_LEN];
        let mut table = vec![0u8; TABLE_LEN];
        let ccp = self.text.len();

        // FIB: FibBase, csw 14, cslw 22, 93 fc/lcb pairs
        let flags: u16 = 0x0200 | if self.encrypted { 0x0100 } else { 0 };
        put_u16(&mut word, 0, 0xA5EC);
        put_u16(&mut word, 2, 0x00C1);
        put_u16(&mut word, 10, flags);
        put_u32(&mut word, 24, TEXT_FC as u32);
        put_u32(&mut word, 28, Self::fc(ccp));
        put_u16(&mut word, 32, 14);
        put_u16(&mut word, 62, 22);
        put_u32(&mut word, 76, ccp as u32);
        put_u16(&mut word, 152, 93);
        let pair = |index: usize| 154 + index * 8;

        // text
        for (i, unit) in self.text.iter().enumerate() {
            put_u16(&mut word, TEXT_FC + i * 2, *unit);
        }

        // CLX: one uncompressed piece covering the whole text
        let clx_at = 0;
        table[clx_at] = 0x02;
        put_u32(&mut table, clx_at + 1, 16);
        put_u32(&mut table, clx_at + 5, 0);
        put_u32(&mut table, clx_at + 9, ccp as u32);
        put_u32(&mut table, clx_at + 15, TEXT_FC as u32);
        put_u32(&mut word, pair(33), clx_at as u32);
        put_u32(&mut word, pair(33) + 4, 21);

        // CHPX FKP
        let page = &mut word[CHPX_PAGE * 512..(CHPX_PAGE + 1) * 512];
        let crun = self.runs.len();
        assert!(crun * 5 + 4 < 500, "too many runs");
        for (i, (start, _, _)) in self.runs.iter().enumerate() {
            put_u32(page, i * 4, Self::fc(*start));
        }
        put_u32(page, crun * 4, Self::fc(ccp));
        // sprmCKul = single, stored once at the end of the page
        page[500..504].copy_from_slice(&[3, 0x3E, 0x2A, 0x01]);
        for (i, (_, _, underlined)) in self.runs.iter().enumerate() {
            if *underlined {
                page[(crun + 1) * 4 + i] = (500 / 2) as u8;
            }
        }
        page[511] = crun as u8;

        // PAPX FKP
        let page = &mut word[PAPX_PAGE * 512..(PAPX_PAGE + 1) * 512];
        let cpara = self.paragraphs.len();
        assert!((cpara + 1) * 4 + cpara * 13 < 300, "too many paragraphs");
        for (i, (start, _, _)) in self.paragraphs.iter().enumerate() {
            put_u32(page, i * 4, Self::fc(*start));
        }
        put_u32(page, cpara * 4, Self::fc(ccp));
        let mut heap = 510;
        let mut placed: Vec<(Mark, usize)> = Vec::new();
        for (i, (_, _, mark)) in self.paragraphs.iter().enumerate() {
            let Some(papx) = mark.papx() else {
                continue;
            };
            let offset = match placed.iter().find(|(m, _)| m == mark) {
                Some((_, offset)) => *offset,
                None => {
                    let encoded = if papx.len() % 2 == 1 {
                        let mut v = vec![papx.len().div_ceil(2) as u8];
                        v.extend_from_slice(&papx);
                        v
                    } else {
                        let mut v = vec![0u8, (papx.len() / 2) as u8];
                        v.extend_from_slice(&papx);
                        v
                    };
                    heap = (heap - encoded.len()) & !1;
                    page[heap..heap + encoded.len()].copy_from_slice(&encoded);
                    placed.push((*mark, heap));
                    heap
                },
            };
            page[(cpara + 1) * 4 + i * 13] = (offset / 2) as u8;
        }
        page[511] = cpara as u8;

        // bin tables: a single page each
        let bte = |table: &mut [u8], at: usize, pn: usize| {
            put_u32(table, at, Self::fc(0));
            put_u32(table, at + 4, Self::fc(ccp));
            put_u32(table, at + 8, pn as u32);
        };
        bte(&mut table, 64, CHPX_PAGE);
        bte(&mut table, 96, PAPX_PAGE);
        put_u32(&mut word, pair(12), 64);
        put_u32(&mut word, pair(12) + 4, 12);
        put_u32(&mut word, pair(13), 96);
        put_u32(&mut word, pair(13) + 4, 12);

        (word, table)
    }
}

fn put_u16(buf: &mut [u8], at: usize, value: u16) {
    buf[at..at + 2].copy_from_slice(&value.to_le_bytes());
}

fn put_u32(buf: &mut [u8], at: usize, value: u32) {
    buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

/// A version 3 compound file with the given root-level streams.
///
/// Streams must be at least 4096 bytes so that they live in regular sectors.
/// Layout: FAT in sector 0, directory in sector 1, stream data after that.
pub fn compound_file(streams: &[(&str, &[u8])]) -> Vec<u8> {
    assert!(streams.len() <= 3, "one directory sector holds four entries");
    let mut fat = vec![FREESECT; SECTOR / 4];
    fat[0] = FATSECT;
    fat[1] = ENDOFCHAIN;

    let mut next = 2usize;
    let mut starts = Vec::new();
    for (_, data) in streams {
        assert!(data.len() >= 4096, "stream would belong in the mini stream");
        let count = data.len().div_ceil(SECTOR);
        starts.push(next);
        for s in next..next + count {
            fat[s] = if s + 1 == next + count {
                ENDOFCHAIN
            } else {
                (s + 1) as u32
            };
        }
        next += count;
    }
    assert!(next <= SECTOR / 4, "a single FAT sector is not enough");

    let mut file = vec![0u8; SECTOR * (next + 1)];
    // header
    file[..8].copy_from_slice(b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1");
    put_u16(&mut file, 24, 0x3E);
    put_u16(&mut file, 26, 3);
    put_u16(&mut file, 28, 0xFFFE);
    put_u16(&mut file, 30, 9);
    put_u16(&mut file, 32, 6);
    put_u32(&mut file, 44, 1);
    put_u32(&mut file, 48, 1);
    put_u32(&mut file, 56, 4096);
    put_u32(&mut file, 60, ENDOFCHAIN);
    put_u32(&mut file, 68, ENDOFCHAIN);
    put_u32(&mut file, 76, 0);
    for i in 1..109 {
        put_u32(&mut file, 76 + i * 4, FREESECT);
    }

    // FAT
    let sector = |n: usize| SECTOR * (n + 1);
    for (i, entry) in fat.iter().enumerate() {
        put_u32(&mut file, sector(0) + i * 4, *entry);
    }

    // directory: root, then the streams chained as right siblings
    let dir = sector(1);
    let mut entry = |index: usize, name: &str, kind: u8, right: u32, child: u32, start: u32, size: usize| {
        let at = dir + index * 128;
        let units: Vec<u16> = name.encode_utf16().collect();
        for (i, unit) in units.iter().enumerate() {
            put_u16(&mut file, at + i * 2, *unit);
        }
        put_u16(&mut file, at + 64, ((units.len() + 1) * 2) as u16);
        file[at + 66] = kind;
        file[at + 67] = 1;
        put_u32(&mut file, at + 68, NOSTREAM);
        put_u32(&mut file, at + 72, right);
        put_u32(&mut file, at + 76, child);
        put_u32(&mut file, at + 116, start);
        put_u32(&mut file, at + 120, size as u32);
    };
    let child = if streams.is_empty() { NOSTREAM } else { 1 };
    entry(0, "Root Entry", 5, NOSTREAM, child, ENDOFCHAIN, 0);
    for (i, (name, data)) in streams.iter().enumerate() {
        let right = if i + 1 < streams.len() {
            (i + 2) as u32
        } else {
            NOSTREAM
        };
        entry(i + 1, name, 2, right, NOSTREAM, starts[i] as u32, data.len());
    }
    for index in streams.len() + 1..4 {
        let at = dir + index * 128;
        put_u32(&mut file, at + 68, NOSTREAM);
        put_u32(&mut file, at + 72, NOSTREAM);
        put_u32(&mut file, at + 76, NOSTREAM);
    }

    // stream data
    for ((_, data), start) in streams.iter().zip(&starts) {
        let at = sector(*start);
        file[at..at + data.len()].copy_from_slice(data);
    }
    file
}
