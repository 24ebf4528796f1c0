/// Formatted disk pages and the bin tables that index them.
///
/// Character and paragraph properties are stored in 512-byte FKP pages in
/// the WordDocument stream. A bin table (a PLC in the table stream) lists the
/// page number of every FKP. Each page maps FC ranges to a grpprl; only the
/// handful of SPRMs that matter for layout are decoded here.
use super::super::package::Result;
use crate::common::binary::{read_u16_le, read_u32_le};
use crate::ole::plcf::Plcf;
use crate::ole::sprm::{
    SPRM_C_KUL, SPRM_P_F_INNER_TABLE_CELL, SPRM_P_F_INNER_TTP, SPRM_P_F_IN_TABLE, SPRM_P_F_TTP,
    SPRM_P_ITAP, SprmIter,
};

/// Size of an FKP page in bytes
const FKP_PAGE_SIZE: usize = 512;
/// Size of a `BxPap` entry in a PAPX page
const BX_PAP_SIZE: usize = 13;
/// Page number bits of a `PnFkp`
const PN_MASK: u32 = 0x003F_FFFF;

/// Character properties that survive into the document model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharProps {
    pub underlined: bool,
}

impl CharProps {
    fn from_grpprl(grpprl: &[u8]) -> Self {
        let mut props = Self::default();
        for sprm in SprmIter::new(grpprl) {
            if sprm.opcode == SPRM_C_KUL {
                props.underlined = sprm.is_set();
            }
        }
        props
    }
}

/// Table membership of a paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParaProps {
    pub in_table: bool,
    /// Paragraph mark ends a table row
    pub row_end: bool,
    /// Table nesting depth, 0 outside tables
    pub depth: u32,
    /// Paragraph mark ends a cell of a nested table
    pub inner_cell_end: bool,
    /// Paragraph mark ends a row of a nested table
    pub inner_row_end: bool,
}

impl ParaProps {
    fn from_grpprl(grpprl: &[u8]) -> Self {
        let mut props = Self::default();
        for sprm in SprmIter::new(grpprl) {
            match sprm.opcode {
                SPRM_P_F_IN_TABLE => props.in_table = sprm.is_set(),
                SPRM_P_F_TTP => props.row_end = sprm.is_set(),
                SPRM_P_ITAP => {
                    props.depth = read_u32_le(sprm.operand, 0).map_or(0, |d| d.min(64));
                },
                SPRM_P_F_INNER_TABLE_CELL => props.inner_cell_end = sprm.is_set(),
                SPRM_P_F_INNER_TTP => props.inner_row_end = sprm.is_set(),
                _ => {},
            }
        }
        props
    }

    /// Effective nesting depth: `in_table` without `itap` means depth 1.
    #[inline]
    pub fn table_depth(&self) -> u32 {
        match (self.depth, self.in_table) {
            (0, true) => 1,
            (depth, _) => depth,
        }
    }
}

/// A formatting state applying to `[fc_start, fc_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FcRange<T> {
    pub fc_start: u32,
    pub fc_end: u32,
    pub props: T,
}

/// Every FKP range of one kind, ordered by FC.
#[derive(Debug, Clone)]
pub struct BinTable<T> {
    ranges: Vec<FcRange<T>>,
}

impl<T> Default for BinTable<T> {
    fn default() -> Self {
        Self { ranges: Vec::new() }
    }
}

impl<T> BinTable<T> {
    /// Index and properties of the range containing `fc`.
    pub fn find(&self, fc: u32) -> Option<(usize, &T)> {
        let index = self.ranges.partition_point(|r| r.fc_end <= fc);
        self.ranges
            .get(index)
            .filter(|r| r.fc_start <= fc)
            .map(|r| (index, &r.props))
    }

    #[inline]
    pub fn ranges(&self) -> &[FcRange<T>] {
        &self.ranges
    }

    fn from_pages(
        word_document: &[u8],
        bin_table: &[u8],
        parse_page: impl Fn(&[u8], &mut Vec<FcRange<T>>),
    ) -> Result<Self> {
        let plc = Plcf::parse(bin_table, 4)?;
        let mut ranges = Vec::new();
        for (_, _, pn) in plc.iter() {
            let pn = (read_u32_le(pn, 0)? & PN_MASK) as usize;
            let start = pn * FKP_PAGE_SIZE;
            match word_document.get(start..start + FKP_PAGE_SIZE) {
                Some(page) => parse_page(page, &mut ranges),
                None => log::warn!("FKP page {pn} lies outside the WordDocument stream"),
            }
        }
        ranges.sort_by_key(|r| r.fc_start);
        Ok(Self { ranges })
    }
}

impl BinTable<CharProps> {
    /// Load every CHPX FKP listed in `PlcfBteChpx`.
    pub fn characters(word_document: &[u8], bin_table: &[u8]) -> Result<Self> {
        Self::from_pages(word_document, bin_table, parse_chpx_page)
    }
}

impl BinTable<ParaProps> {
    /// Load every PAPX FKP listed in `PlcfBtePapx`.
    pub fn paragraphs(word_document: &[u8], bin_table: &[u8]) -> Result<Self> {
        Self::from_pages(word_document, bin_table, parse_papx_page)
    }
}

/// Page boundaries shared by both FKP kinds: `count + 1` FCs and the count.
fn page_fcs(page: &[u8]) -> Option<(usize, Vec<u32>)> {
    let count = page[FKP_PAGE_SIZE - 1] as usize;
    let fcs = (0..=count)
        .map(|i| read_u32_le(page, i * 4).ok())
        .collect::<Option<Vec<_>>>()?;
    Some((count, fcs))
}

fn parse_chpx_page(page: &[u8], out: &mut Vec<FcRange<CharProps>>) {
    let Some((crun, fcs)) = page_fcs(page) else {
        return;
    };
    let rgb = (crun + 1) * 4;
    for i in 0..crun {
        let props = match page.get(rgb + i).copied() {
            Some(0) | None => CharProps::default(),
            Some(word_offset) => {
                let at = word_offset as usize * 2;
                let cb = page.get(at).copied().unwrap_or(0) as usize;
                page.get(at + 1..at + 1 + cb)
                    .map(CharProps::from_grpprl)
                    .unwrap_or_default()
            },
        };
        out.push(FcRange {
            fc_start: fcs[i],
            fc_end: fcs[i + 1],
            props,
        });
    }
}

fn parse_papx_page(page: &[u8], out: &mut Vec<FcRange<ParaProps>>) {
    let Some((cpara, fcs)) = page_fcs(page) else {
        return;
    };
    let rgbx = (cpara + 1) * 4;
    for i in 0..cpara {
        let props = match page.get(rgbx + i * BX_PAP_SIZE).copied() {
            Some(0) | None => ParaProps::default(),
            Some(word_offset) => papx_grpprl(page, word_offset as usize * 2)
                .map(ParaProps::from_grpprl)
                .unwrap_or_default(),
        };
        out.push(FcRange {
            fc_start: fcs[i],
            fc_end: fcs[i + 1],
            props,
        });
    }
}

/// The grpprl of a `PapxInFkp`, after its style index.
fn papx_grpprl(page: &[u8], at: usize) -> Option<&[u8]> {
    let cb = *page.get(at)? as usize;
    let (start, len) = if cb != 0 {
        (at + 1, 2 * cb - 1)
    } else {
        (at + 2, 2 * *page.get(at + 1)? as usize)
    };
    let papx = page.get(start..start + len)?;
    // istd
    read_u16_le(papx, 0).ok()?;
    papx.get(2..)
}
