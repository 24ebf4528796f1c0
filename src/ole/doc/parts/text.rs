/// Character stream of the main document.
///
/// Walks the piece table in CP order, decodes each piece, attaches character
/// formatting by FC and cuts the stream into paragraphs at paragraph and cell
/// marks. Field instructions are dropped and field results kept.
use super::fkp::{BinTable, CharProps, ParaProps};
use super::piece_table::{PieceTable, TextPiece};
use crate::document::{Paragraph, Run};
use encoding_rs::WINDOWS_1252;

/// Paragraph mark
const PARAGRAPH_MARK: char = '\r';
/// Cell mark and row mark
const CELL_MARK: char = '\x07';
const FIELD_BEGIN: char = '\x13';
const FIELD_SEPARATOR: char = '\x14';
const FIELD_END: char = '\x15';

/// A paragraph cut from the character stream, with the properties of its mark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParagraph {
    pub paragraph: Paragraph,
    pub props: ParaProps,
    /// Terminated by a cell mark rather than a paragraph mark
    pub cell_mark: bool,
}

/// Identity of the formatting span a character belongs to.
type RunKey = (usize, Option<usize>);

#[derive(Default)]
struct StreamState {
    paragraphs: Vec<RawParagraph>,
    runs: Vec<Run>,
    text: String,
    key: Option<RunKey>,
    underlined: bool,
    /// One entry per open field: true once its separator has been seen
    fields: Vec<bool>,
    last_fc: u32,
}

impl StreamState {
    fn in_instruction(&self) -> bool {
        self.fields.iter().any(|in_result| !in_result)
    }

    fn push_char(&mut self, c: char, key: RunKey, underlined: bool) {
        if self.key != Some(key) {
            self.flush_run();
            self.key = Some(key);
            self.underlined = underlined;
        }
        self.text.push(c);
    }

    fn flush_run(&mut self) {
        if !self.text.is_empty() {
            self.runs
                .push(Run::new(std::mem::take(&mut self.text), self.underlined));
        }
        self.key = None;
    }

    fn end_paragraph(&mut self, props: ParaProps, cell_mark: bool) {
        self.flush_run();
        self.paragraphs.push(RawParagraph {
            paragraph: Paragraph::from_runs(self.runs.drain(..)),
            props,
            cell_mark,
        });
    }
}

/// Map a visible character to its text form; `None` drops it.
fn visible_char(c: char) -> Option<char> {
    match c {
        // vertical tab is a soft line break
        '\x0b' => Some('\n'),
        // non-breaking hyphen
        '\x1e' => Some('-'),
        '\t' => Some('\t'),
        c if c < ' ' => None,
        c => Some(c),
    }
}

/// Decode a piece into `(char, fc)` pairs.
fn decode_piece(word_document: &[u8], piece: &TextPiece, cp_limit: u32) -> Vec<(char, u32)> {
    let chars = piece.cp_end.min(cp_limit).saturating_sub(piece.cp_start) as usize;
    let start = piece.fc as usize;
    let want = chars * piece.char_size() as usize;
    let end = start.saturating_add(want).min(word_document.len());
    let Some(bytes) = word_document.get(start..end) else {
        log::warn!("text piece at fc {} lies outside the WordDocument stream", piece.fc);
        return Vec::new();
    };
    if bytes.len() < want {
        log::warn!("text piece at fc {} is truncated", piece.fc);
    }

    if piece.compressed {
        let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
        text.chars()
            .zip(piece.fc..)
            .collect()
    } else {
        let units = bytes
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]));
        let mut fc = piece.fc;
        char::decode_utf16(units)
            .map(|r| {
                let c = r.unwrap_or(char::REPLACEMENT_CHARACTER);
                let at = fc;
                fc += 2 * c.len_utf16().min(2) as u32;
                (c, at)
            })
            .collect()
    }
}

/// Cut the main document text into paragraphs.
///
/// Only `[0, ccp_text)` is read; footnotes, headers and other subdocuments
/// follow the main text in CP space and are ignored.
pub fn read_paragraphs(
    word_document: &[u8],
    pieces: &PieceTable,
    characters: &BinTable<CharProps>,
    paragraphs: &BinTable<ParaProps>,
    ccp_text: u32,
) -> Vec<RawParagraph> {
    let mut state = StreamState::default();

    for (piece_index, piece) in pieces.pieces().iter().enumerate() {
        if piece.cp_start >= ccp_text {
            break;
        }
        for (c, fc) in decode_piece(word_document, piece, ccp_text) {
            state.last_fc = fc;
            match c {
                FIELD_BEGIN => state.fields.push(false),
                FIELD_SEPARATOR => {
                    if let Some(in_result) = state.fields.last_mut() {
                        *in_result = true;
                    }
                },
                FIELD_END => {
                    state.fields.pop();
                },
                PARAGRAPH_MARK | CELL_MARK => {
                    let props = paragraphs.find(fc).map(|(_, p)| *p).unwrap_or_default();
                    state.end_paragraph(props, c == CELL_MARK);
                },
                _ if state.in_instruction() => {},
                c => {
                    if let Some(c) = visible_char(c) {
                        let (chpx, props) = match characters.find(fc) {
                            Some((index, props)) => (Some(index), *props),
                            None => (None, CharProps::default()),
                        };
                        state.push_char(c, (piece_index, chpx), props.underlined);
                    }
                },
            }
        }
    }

    if !state.text.is_empty() || !state.runs.is_empty() {
        let props = paragraphs
            .find(state.last_fc)
            .map(|(_, p)| *p)
            .unwrap_or_default();
        state.end_paragraph(props, false);
    }

    state.paragraphs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compressed_doc(text: &[u8]) -> (Vec<u8>, PieceTable) {
        let mut word = vec![0u8; 0x100];
        word.extend_from_slice(text);
        let table = PieceTable::single(text.len() as u32, 0x100, true);
        (word, table)
    }

    fn texts(paragraphs: &[RawParagraph]) -> Vec<String> {
        paragraphs.iter().map(|p| p.paragraph.text()).collect()
    }

    #[test]
    fn test_paragraph_split() {
        let (word, pieces) = compressed_doc(b"One\rTwo\x0blines\rtail");
        let paras = read_paragraphs(&word, &pieces, &BinTable::default(), &BinTable::default(), 22);
        assert_eq!(texts(&paras), vec!["One", "Two\nlines", "tail"]);
        assert!(paras.iter().all(|p| !p.cell_mark));
    }

    #[test]
    fn test_ccp_text_limits_stream() {
        let (word, pieces) = compressed_doc(b"Main\rfootnote\r");
        let paras = read_paragraphs(&word, &pieces, &BinTable::default(), &BinTable::default(), 5);
        assert_eq!(texts(&paras), vec!["Main"]);
    }

    #[test]
    fn test_fields_keep_result_only() {
        let (word, pieces) =
            compressed_doc(b"See \x13 PAGEREF _Toc1 \\h \x143\x15 and \x13 SEQ \x15done\r");
        let len = word.len() as u32 - 0x100;
        let paras = read_paragraphs(&word, &pieces, &BinTable::default(), &BinTable::default(), len);
        assert_eq!(texts(&paras), vec!["See 3 and done"]);
    }

    #[test]
    fn test_control_characters() {
        let (word, pieces) = compressed_doc(b"a\x1eb\x1fc\x01d\te\x0cf\r");
        let paras = read_paragraphs(&word, &pieces, &BinTable::default(), &BinTable::default(), 13);
        assert_eq!(texts(&paras), vec!["a-bcd\tef"]);
    }

    #[test]
    fn test_unicode_piece() {
        let mut word = vec![0u8; 0x40];
        for unit in "中文\r".encode_utf16() {
            word.extend_from_slice(&unit.to_le_bytes());
        }
        let pieces = PieceTable::single(3, 0x40, false);
        let paras = read_paragraphs(&word, &pieces, &BinTable::default(), &BinTable::default(), 3);
        assert_eq!(texts(&paras), vec!["中文"]);
    }

    #[test]
    fn test_cell_mark_flag() {
        let (word, pieces) = compressed_doc(b"A\x07\x07");
        let paras = read_paragraphs(&word, &pieces, &BinTable::default(), &BinTable::default(), 3);
        assert_eq!(paras.len(), 2);
        assert!(paras[0].cell_mark);
        assert!(paras[1].paragraph.is_empty());
    }
}
