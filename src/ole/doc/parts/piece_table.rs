/// Piece table: where each stretch of document text is stored.
///
/// The CLX in the table stream starts with zero or more `Prc` records
/// (type 0x01) followed by the `Pcdt` (type 0x02), a PLC of 8-byte piece
/// descriptors. Each piece maps a CP range to a byte offset in the
/// WordDocument stream and says whether its text is cp1252 or UTF-16.
use super::super::package::{DocError, Result};
use crate::common::binary::{read_u16_le, read_u32_le};
use crate::ole::plcf::Plcf;

const CLX_PRC: u8 = 0x01;
const CLX_PCDT: u8 = 0x02;
const PCD_SIZE: usize = 8;
/// `fCompressed` bit of `FcCompressed`
const FC_COMPRESSED: u32 = 0x4000_0000;

/// A run of text stored contiguously.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPiece {
    pub cp_start: u32,
    pub cp_end: u32,
    /// Byte offset of the first character in the WordDocument stream
    pub fc: u32,
    /// Single-byte cp1252 text rather than UTF-16LE
    pub compressed: bool,
}

impl TextPiece {
    #[inline]
    pub fn len(&self) -> u32 {
        self.cp_end.saturating_sub(self.cp_start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes per character.
    #[inline]
    pub fn char_size(&self) -> u32 {
        if self.compressed { 1 } else { 2 }
    }
}

/// All pieces of a document, ordered by CP.
#[derive(Debug, Clone, Default)]
pub struct PieceTable {
    pieces: Vec<TextPiece>,
}

impl PieceTable {
    /// Parse the CLX structure.
    pub fn parse(clx: &[u8]) -> Result<Self> {
        let mut offset = 0;
        while clx.get(offset) == Some(&CLX_PRC) {
            let size = read_u16_le(clx, offset + 1)? as usize;
            offset += 3 + size;
        }
        if clx.get(offset) != Some(&CLX_PCDT) {
            return Err(DocError::Corrupted("CLX has no piece table".to_string()));
        }
        let lcb = read_u32_le(clx, offset + 1)? as usize;
        let start = offset + 5;
        let plc = clx
            .get(start..start.saturating_add(lcb).min(clx.len()))
            .ok_or_else(|| DocError::Corrupted("piece table out of range".to_string()))?;
        let plc = Plcf::parse(plc, PCD_SIZE)?;

        let mut pieces = plc
            .iter()
            .filter_map(|(cp_start, cp_end, pcd)| {
                let raw = read_u32_le(pcd, 2).ok()?;
                let compressed = raw & FC_COMPRESSED != 0;
                let fc = if compressed {
                    (raw & !FC_COMPRESSED) / 2
                } else {
                    raw
                };
                (cp_end > cp_start).then_some(TextPiece {
                    cp_start,
                    cp_end,
                    fc,
                    compressed,
                })
            })
            .collect::<Vec<_>>();
        pieces.sort_by_key(|p| p.cp_start);
        Ok(Self { pieces })
    }

    /// A single piece covering `[0, ccp)` for files without a CLX.
    pub fn single(ccp: u32, fc: u32, compressed: bool) -> Self {
        Self {
            pieces: vec![TextPiece {
                cp_start: 0,
                cp_end: ccp,
                fc,
                compressed,
            }],
        }
    }

    #[inline]
    pub fn pieces(&self) -> &[TextPiece] {
        &self.pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clx_bytes(pieces: &[(u32, u32, u32)], with_prc: bool) -> Vec<u8> {
        let mut plc = Vec::new();
        let mut cp = 0u32;
        plc.extend_from_slice(&cp.to_le_bytes());
        for &(len, _, _) in pieces {
            cp += len;
            plc.extend_from_slice(&cp.to_le_bytes());
        }
        for &(_, fc, flags) in pieces {
            plc.extend_from_slice(&0u16.to_le_bytes());
            plc.extend_from_slice(&(fc | flags).to_le_bytes());
            plc.extend_from_slice(&0u16.to_le_bytes());
        }
        let mut clx = Vec::new();
        if with_prc {
            clx.extend_from_slice(&[CLX_PRC, 0x03, 0x00, 0xAA, 0xBB, 0xCC]);
        }
        clx.push(CLX_PCDT);
        clx.extend_from_slice(&(plc.len() as u32).to_le_bytes());
        clx.extend_from_slice(&plc);
        clx
    }

    #[test]
    fn test_compressed_and_unicode_pieces() {
        let clx = clx_bytes(&[(5, 0x800 * 2, FC_COMPRESSED), (3, 0x1000, 0)], true);
        let table = PieceTable::parse(&clx).unwrap();
        let pieces = table.pieces();
        assert_eq!(pieces.len(), 2);
        assert_eq!(
            pieces[0],
            TextPiece {
                cp_start: 0,
                cp_end: 5,
                fc: 0x800,
                compressed: true
            }
        );
        assert_eq!(pieces[1].fc, 0x1000);
        assert!(!pieces[1].compressed);
        assert_eq!(pieces[1].char_size(), 2);
    }

    #[test]
    fn test_missing_pcdt() {
        assert!(PieceTable::parse(&[0x05, 0x00]).is_err());
        assert!(PieceTable::parse(&[]).is_err());
    }
}
