//! Occupancy bitboard: one bit per cell, 49 of 64 bits used

use super::{Pos, TOTAL_CELLS};

const FULL_MASK: u64 = (1u64 << TOTAL_CELLS) - 1;

/// Bitboard marking occupied cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard {
    bits: u64,
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Set a bit at position
    #[inline]
    pub fn set(&mut self, pos: Pos) {
        self.bits |= 1u64 << pos.to_index();
    }

    /// Clear a bit at position
    #[inline]
    pub fn clear(&mut self, pos: Pos) {
        self.bits &= !(1u64 << pos.to_index());
    }

    /// Check if bit is set at position
    #[inline]
    pub fn get(&self, pos: Pos) -> bool {
        (self.bits >> pos.to_index()) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.count_ones()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.bits == FULL_MASK
    }

    /// Complement within the 49 board cells
    #[inline]
    pub fn inverted(&self) -> Bitboard {
        Bitboard {
            bits: !self.bits & FULL_MASK,
        }
    }

    /// Iterate over set bit positions in index order
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter { current: self.bits }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    current: u64,
}

impl Iterator for BitboardIter {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == 0 {
            return None;
        }
        let idx = self.current.trailing_zeros() as usize;
        // Clear the bit we just found
        self.current &= self.current - 1;
        Some(Pos::from_index(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_clear_get() {
        let mut bb = Bitboard::new();
        let pos = Pos::new(3, 3);
        assert!(!bb.get(pos));
        bb.set(pos);
        assert!(bb.get(pos));
        assert_eq!(bb.count(), 1);
        bb.clear(pos);
        assert!(bb.is_empty());
    }

    #[test]
    fn test_inverted_stays_on_board() {
        let bb = Bitboard::new().inverted();
        assert!(bb.is_full());
        assert_eq!(bb.count() as usize, TOTAL_CELLS);
        assert_eq!(bb.iter_ones().last(), Some(Pos::from_index(TOTAL_CELLS - 1)));
    }

    #[test]
    fn test_iter_ones_in_index_order() {
        let mut bb = Bitboard::new();
        bb.set(Pos::new(6, 6));
        bb.set(Pos::new(0, 1));
        bb.set(Pos::new(2, 0));
        let order: Vec<usize> = bb.iter_ones().map(Pos::to_index).collect();
        assert_eq!(order, vec![1, 14, 48]);
    }
}
