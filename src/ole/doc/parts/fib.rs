/// File Information Block (FIB) parser.
///
/// The FIB sits at offset 0 of the WordDocument stream. It identifies the
/// file, says which table stream holds the formatting tables, gives the
/// length of the main text and points at every other structure through the
/// `FibRgFcLcb` array of (offset, length) pairs.
use super::super::package::{DocError, Result};
use crate::common::binary::{read_u16_le, read_u32_le};
use zerocopy::{FromBytes, LE, U16, U32};
use zerocopy_derive::FromBytes as DeriveFromBytes;

/// Word 97 and later
pub const WORD97_IDENT: u16 = 0xA5EC;
/// Word 6 and Word 95
pub const WORD6_IDENT: u16 = 0xA5DC;

/// `FibRgFcLcb` index of the character property bin table
pub const FIB_PLCF_BTE_CHPX: usize = 12;
/// `FibRgFcLcb` index of the paragraph property bin table
pub const FIB_PLCF_BTE_PAPX: usize = 13;
/// `FibRgFcLcb` index of the CLX (piece table)
pub const FIB_CLX: usize = 33;

/// `fWhichTblStm`: formatting tables live in `1Table`
const FLAG_WHICH_TABLE: u16 = 0x0200;
/// `fEncrypted`
const FLAG_ENCRYPTED: u16 = 0x0100;
/// `fComplex`: the file has been fast-saved
const FLAG_COMPLEX: u16 = 0x0004;
/// `fExtChar`: text without a piece table is UTF-16
const FLAG_EXT_CHAR: u16 = 0x1000;

/// The fixed 32-byte head of the FIB.
#[derive(Debug, Clone, DeriveFromBytes)]
#[repr(C)]
struct FibBase {
    w_ident: U16<LE>,
    n_fib: U16<LE>,
    unused: U16<LE>,
    lid: U16<LE>,
    pn_next: U16<LE>,
    flags: U16<LE>,
    n_fib_back: U16<LE>,
    l_key: U32<LE>,
    envr: u8,
    flags2: u8,
    reserved3: U16<LE>,
    reserved4: U16<LE>,
    /// First text byte in files without a piece table
    fc_min: U32<LE>,
    fc_mac: U32<LE>,
}

const FIB_BASE_SIZE: usize = 32;

/// Parsed File Information Block.
#[derive(Debug, Clone)]
pub struct FileInformationBlock {
    n_fib: u16,
    flags: u16,
    fc_min: u32,
    ccp_text: u32,
    fc_lcb: Vec<(u32, u32)>,
}

impl FileInformationBlock {
    /// Parse the FIB at the start of the WordDocument stream.
    pub fn parse(word_document: &[u8]) -> Result<Self> {
        let base = word_document
            .get(..FIB_BASE_SIZE)
            .and_then(|head| FibBase::read_from_bytes(head).ok())
            .ok_or_else(|| DocError::Corrupted("WordDocument stream too short for FIB".to_string()))?;

        let ident = base.w_ident.get();
        if ident != WORD97_IDENT && ident != WORD6_IDENT {
            return Err(DocError::InvalidFormat(format!(
                "Invalid FIB magic number: 0x{ident:04X}"
            )));
        }

        // csw, fibRgW, cslw, fibRgLw, cbRgFcLcb, fibRgFcLcb
        let csw = read_u16_le(word_document, FIB_BASE_SIZE)? as usize;
        let rg_lw_count_at = FIB_BASE_SIZE + 2 + csw * 2;
        let cslw = read_u16_le(word_document, rg_lw_count_at)? as usize;
        let rg_lw = rg_lw_count_at + 2;
        // ccpText is the fourth FibRgLw97 field
        let ccp_text = if cslw > 3 {
            read_u32_le(word_document, rg_lw + 12)?
        } else {
            0
        };

        let fc_lcb_count_at = rg_lw + cslw * 4;
        let pairs = read_u16_le(word_document, fc_lcb_count_at).unwrap_or(0) as usize;
        let fc_lcb_start = fc_lcb_count_at + 2;
        let fc_lcb = (0..pairs)
            .map_while(|i| {
                let at = fc_lcb_start + i * 8;
                Some((
                    read_u32_le(word_document, at).ok()?,
                    read_u32_le(word_document, at + 4).ok()?,
                ))
            })
            .collect();

        Ok(Self {
            n_fib: base.n_fib.get(),
            flags: base.flags.get(),
            fc_min: base.fc_min.get(),
            ccp_text,
            fc_lcb,
        })
    }

    /// File format version (`nFib`).
    #[inline]
    pub fn version(&self) -> u16 {
        self.n_fib
    }

    /// Name of the stream holding the formatting tables.
    #[inline]
    pub fn table_stream_name(&self) -> &'static str {
        if self.flags & FLAG_WHICH_TABLE != 0 {
            "1Table"
        } else {
            "0Table"
        }
    }

    #[inline]
    pub fn is_encrypted(&self) -> bool {
        self.flags & FLAG_ENCRYPTED != 0
    }

    #[inline]
    pub fn is_complex(&self) -> bool {
        self.flags & FLAG_COMPLEX != 0
    }

    /// Whether text stored without a piece table is UTF-16.
    #[inline]
    pub fn has_extended_chars(&self) -> bool {
        self.flags & FLAG_EXT_CHAR != 0
    }

    /// Number of characters in the main document.
    #[inline]
    pub fn ccp_text(&self) -> u32 {
        self.ccp_text
    }

    /// Byte offset of the text in files without a piece table.
    #[inline]
    pub fn fc_min(&self) -> u32 {
        self.fc_min
    }

    /// `(fc, lcb)` pair at `index`, or `None` when absent or empty.
    pub fn table_pointer(&self, index: usize) -> Option<(u32, u32)> {
        self.fc_lcb
            .get(index)
            .copied()
            .filter(|&(_, lcb)| lcb > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal Word 97 FIB: csw 14, cslw 22, 93 fc/lcb pairs.
    fn fib_bytes(flags: u16, ccp_text: u32) -> Vec<u8> {
        let mut data = vec![0u8; 154 + 93 * 8];
        data[0..2].copy_from_slice(&WORD97_IDENT.to_le_bytes());
        data[2..4].copy_from_slice(&0x00C1u16.to_le_bytes());
        data[10..12].copy_from_slice(&flags.to_le_bytes());
        data[32..34].copy_from_slice(&14u16.to_le_bytes());
        data[62..64].copy_from_slice(&22u16.to_le_bytes());
        data[76..80].copy_from_slice(&ccp_text.to_le_bytes());
        data[152..154].copy_from_slice(&93u16.to_le_bytes());
        let clx = 154 + FIB_CLX * 8;
        data[clx..clx + 4].copy_from_slice(&0x40u32.to_le_bytes());
        data[clx + 4..clx + 8].copy_from_slice(&21u32.to_le_bytes());
        data
    }

    #[test]
    fn test_fib_fields() {
        let fib = FileInformationBlock::parse(&fib_bytes(0x0200, 42)).unwrap();
        assert_eq!(fib.version(), 0x00C1);
        assert_eq!(fib.ccp_text(), 42);
        assert_eq!(fib.table_stream_name(), "1Table");
        assert!(!fib.is_encrypted());
        assert_eq!(fib.table_pointer(FIB_CLX), Some((0x40, 21)));
        assert_eq!(fib.table_pointer(FIB_PLCF_BTE_CHPX), None);
        assert_eq!(fib.table_pointer(500), None);
    }

    #[test]
    fn test_fib_flags() {
        let fib = FileInformationBlock::parse(&fib_bytes(0x0100, 0)).unwrap();
        assert!(fib.is_encrypted());
        assert_eq!(fib.table_stream_name(), "0Table");
    }

    #[test]
    fn test_fib_rejects_bad_magic() {
        let mut data = fib_bytes(0, 0);
        data[0] = 0;
        assert!(matches!(
            FileInformationBlock::parse(&data),
            Err(DocError::InvalidFormat(_))
        ));
        assert!(matches!(
            FileInformationBlock::parse(&data[..10]),
            Err(DocError::Corrupted(_))
        ));
    }
}
