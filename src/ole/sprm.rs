//! Single property modifiers.
//!
//! A grpprl is a packed list of SPRMs. Each starts with a u16 opcode whose
//! top three bits give the operand size; code 6 operands carry their own
//! length prefix.

use crate::common::binary::read_u16_le;

/// Character underline style (`kul`); non-zero means underlined.
pub const SPRM_C_KUL: u16 = 0x2A3E;
/// Paragraph is inside a table.
pub const SPRM_P_F_IN_TABLE: u16 = 0x2416;
/// Paragraph is a table terminating paragraph (row end).
pub const SPRM_P_F_TTP: u16 = 0x2417;
/// Paragraph is an inner table cell mark.
pub const SPRM_P_F_INNER_TABLE_CELL: u16 = 0x244B;
/// Paragraph is an inner table row end.
pub const SPRM_P_F_INNER_TTP: u16 = 0x244C;
/// Table nesting depth.
pub const SPRM_P_ITAP: u16 = 0x6649;
/// Long table properties; the length prefix is two bytes.
pub const SPRM_T_DEF_TABLE: u16 = 0xD608;
/// Long paragraph tab stops; the length prefix is two bytes.
pub const SPRM_P_CHG_TABS: u16 = 0xC615;

/// One property modifier borrowed from a grpprl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprm<'a> {
    pub opcode: u16,
    pub operand: &'a [u8],
}

impl Sprm<'_> {
    /// Size code from bits 13..16 of the opcode.
    #[inline]
    pub fn size_code(&self) -> u8 {
        size_code(self.opcode)
    }

    /// First operand byte.
    #[inline]
    pub fn operand_byte(&self) -> Option<u8> {
        self.operand.first().copied()
    }

    /// Operand as a little-endian u16.
    #[inline]
    pub fn operand_word(&self) -> Option<u16> {
        read_u16_le(self.operand, 0).ok()
    }

    /// Whether the first operand byte is non-zero.
    #[inline]
    pub fn is_set(&self) -> bool {
        self.operand_byte().is_some_and(|b| b != 0)
    }
}

#[inline]
fn size_code(opcode: u16) -> u8 {
    ((opcode & 0xE000) >> 13) as u8
}

/// Iterator over the SPRMs of a grpprl.
///
/// Iteration stops at the first truncated SPRM.
///
/// # Examples
///
/// ```
/// use longan::ole::sprm::{SprmIter, SPRM_C_KUL};
///
/// let grpprl = [0x3E, 0x2A, 0x01, 0x43, 0x4A, 0x18, 0x00];
/// let sprms: Vec<_> = SprmIter::new(&grpprl).collect();
/// assert_eq!(sprms.len(), 2);
/// assert_eq!(sprms[0].opcode, SPRM_C_KUL);
/// assert!(sprms[0].is_set());
/// assert_eq!(sprms[1].operand_word(), Some(24));
/// ```
#[derive(Debug, Clone)]
pub struct SprmIter<'a> {
    grpprl: &'a [u8],
    offset: usize,
}

impl<'a> SprmIter<'a> {
    pub fn new(grpprl: &'a [u8]) -> Self {
        Self { grpprl, offset: 0 }
    }
}

impl<'a> Iterator for SprmIter<'a> {
    type Item = Sprm<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let opcode = read_u16_le(self.grpprl, self.offset).ok()?;
        let mut start = self.offset + 2;
        let len = match size_code(opcode) {
            0 | 1 => 1,
            2 | 4 | 5 => 2,
            3 => 4,
            7 => 3,
            _ => {
                if opcode == SPRM_T_DEF_TABLE || opcode == SPRM_P_CHG_TABS {
                    let declared = read_u16_le(self.grpprl, start).ok()? as usize;
                    start += 2;
                    declared.saturating_sub(1)
                } else {
                    let declared = *self.grpprl.get(start)? as usize;
                    start += 1;
                    declared
                }
            },
        };
        let operand = self.grpprl.get(start..start + len)?;
        self.offset = start + len;
        Some(Sprm { opcode, operand })
    }
}

/// Last SPRM with `opcode`; later modifiers override earlier ones.
#[inline]
pub fn find_sprm(grpprl: &[u8], opcode: u16) -> Option<Sprm<'_>> {
    SprmIter::new(grpprl).filter(|s| s.opcode == opcode).last()
}
