//! PLC structures: sorted position arrays with parallel fixed-size data.
//!
//! A PLC holds `n + 1` little-endian u32 positions followed by `n` elements
//! of `element_size` bytes. Element `i` covers `[position(i), position(i+1))`.
//! The piece table and both formatting bin tables are PLCs.

use crate::common::binary::{self, BinaryError};

/// A borrowed PLC.
///
/// # Examples
///
/// ```
/// use longan::ole::plcf::Plcf;
///
/// // Positions 0, 10, 20 and two 2-byte elements
/// let data = [
///     0x00, 0x00, 0x00, 0x00,
///     0x0A, 0x00, 0x00, 0x00,
///     0x14, 0x00, 0x00, 0x00,
///     0x01, 0x02,
///     0x03, 0x04,
/// ];
///
/// let plcf = Plcf::parse(&data, 2).unwrap();
/// assert_eq!(plcf.count(), 2);
/// assert_eq!(plcf.range(1), Some((10, 20)));
/// assert_eq!(plcf.element(1), Some(&[0x03, 0x04][..]));
/// ```
#[derive(Debug, Clone)]
pub struct Plcf<'a> {
    positions: Vec<u32>,
    elements: &'a [u8],
    element_size: usize,
}

impl<'a> Plcf<'a> {
    /// Parse a PLC whose elements are `element_size` bytes long.
    ///
    /// The element count is derived from the data length. Trailing bytes
    /// that do not form a whole entry are ignored.
    pub fn parse(data: &'a [u8], element_size: usize) -> Result<Self, BinaryError> {
        if data.len() < 4 {
            return Err(BinaryError::InsufficientData {
                expected: 4,
                available: data.len(),
            });
        }
        let count = (data.len() - 4) / (4 + element_size);
        let positions = (0..=count)
            .map(|i| binary::read_u32_le(data, i * 4))
            .collect::<Result<Vec<_>, _>>()?;
        let start = (count + 1) * 4;
        let elements = binary::read_bytes(data, start, count * element_size)?;
        Ok(Self {
            positions,
            elements,
            element_size,
        })
    }

    /// Number of elements.
    #[inline]
    pub fn count(&self) -> usize {
        self.positions.len().saturating_sub(1)
    }

    /// Position at `index`, including the closing position at `count()`.
    #[inline]
    pub fn position(&self, index: usize) -> Option<u32> {
        self.positions.get(index).copied()
    }

    /// Range covered by element `index`.
    #[inline]
    pub fn range(&self, index: usize) -> Option<(u32, u32)> {
        Some((self.position(index)?, self.position(index + 1)?))
    }

    /// Raw bytes of element `index`.
    #[inline]
    pub fn element(&self, index: usize) -> Option<&'a [u8]> {
        let start = index.checked_mul(self.element_size)?;
        self.elements.get(start..start + self.element_size)
    }

    /// Iterate over `(start, end, element)` triples.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &'a [u8])> + '_ {
        (0..self.count()).filter_map(|i| {
            let (start, end) = self.range(i)?;
            Some((start, end, self.element(i)?))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_plc() {
        let plcf = Plcf::parse(&[0, 0, 0, 0], 8).unwrap();
        assert_eq!(plcf.count(), 0);
        assert_eq!(plcf.range(0), None);
        assert!(Plcf::parse(&[0, 0], 8).is_err());
    }

    #[test]
    fn test_iter() {
        let mut data = Vec::new();
        for cp in [0u32, 5, 9] {
            data.extend_from_slice(&cp.to_le_bytes());
        }
        data.extend_from_slice(&7u32.to_le_bytes());
        data.extend_from_slice(&8u32.to_le_bytes());
        let plcf = Plcf::parse(&data, 4).unwrap();
        let items: Vec<_> = plcf.iter().map(|(s, e, d)| (s, e, d[0])).collect();
        assert_eq!(items, vec![(0, 5, 7), (5, 9, 8)]);
    }
}
