//! Board structure with per-color bag accounting

use std::fmt;

use super::bitboard::Bitboard;
use super::{Color, Pos, BOARD_SIZE, COLOR_COUNT, TOKENS_PER_COLOR, TOTAL_CELLS};

/// Packed board serialization: 3 bits per cell, 21 cells per word.
pub type BoardKey = [u64; 3];

const CELLS_PER_WORD: usize = 21;

/// Game board: 49 cells in row-major order, each empty or holding a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Color>; TOTAL_CELLS],
    /// Occupied cells
    occupied: Bitboard,
    /// On-board token count per color
    counts: [u8; COLOR_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; TOTAL_CELLS],
            occupied: Bitboard::new(),
            counts: [0; COLOR_COUNT],
        }
    }

    /// Build a board from row-major cells.
    pub fn from_cells(cells: [Option<Color>; TOTAL_CELLS]) -> Self {
        let mut board = Self::new();
        for (idx, cell) in cells.iter().enumerate() {
            if let Some(color) = cell {
                board.place(Pos::from_index(idx), *color);
            }
        }
        board
    }

    #[inline]
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Get cell content at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Color> {
        self.cells[pos.to_index()]
    }

    #[inline]
    pub fn get_index(&self, idx: usize) -> Option<Color> {
        self.cells[idx]
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.occupied.get(pos)
    }

    /// Put a token on a cell, replacing whatever was there
    #[inline]
    pub fn place(&mut self, pos: Pos, color: Color) {
        self.remove(pos);
        self.cells[pos.to_index()] = Some(color);
        self.occupied.set(pos);
        self.counts[color.index()] += 1;
    }

    /// Remove a token; no-op on an empty cell
    #[inline]
    pub fn remove(&mut self, pos: Pos) -> Option<Color> {
        let prev = self.cells[pos.to_index()].take();
        if let Some(color) = prev {
            self.occupied.clear(pos);
            self.counts[color.index()] -= 1;
        }
        prev
    }

    /// Occupancy bitboard
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    /// Empty cells in index order
    #[inline]
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> {
        self.occupied.inverted().iter_ones()
    }

    /// Total tokens on board
    #[inline]
    pub fn filled_count(&self) -> usize {
        self.occupied.count() as usize
    }

    #[inline]
    pub fn empty_count(&self) -> usize {
        TOTAL_CELLS - self.filled_count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupied.is_full()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    /// Tokens of `color` currently on the board
    #[inline]
    pub fn count(&self, color: Color) -> u8 {
        self.counts[color.index()]
    }

    /// Tokens of `color` still in the bag, assuming a full starting bag
    #[inline]
    pub fn remaining(&self, color: Color) -> u8 {
        TOKENS_PER_COLOR.saturating_sub(self.count(color))
    }

    /// Number of distinct colors on the board
    pub fn distinct_colors(&self) -> usize {
        self.counts.iter().filter(|&&n| n > 0).count()
    }

    /// The color most likely to be drawn next (most tokens left in the bag).
    /// Ties go to the lower color index; `None` once the bag is exhausted.
    pub fn modal_remaining_color(&self) -> Option<Color> {
        let mut best: Option<(Color, u8)> = None;
        for color in Color::ALL {
            let left = self.remaining(color);
            if left > 0 && best.map_or(true, |(_, n)| left > n) {
                best = Some((color, left));
            }
        }
        best.map(|(color, _)| color)
    }

    /// First color whose on-board count exceeds the bag size
    pub fn bag_overflow(&self) -> Option<(Color, u8)> {
        Color::ALL
            .iter()
            .map(|&c| (c, self.count(c)))
            .find(|&(_, n)| n > TOKENS_PER_COLOR)
    }

    /// Cells of row `r`, left to right
    #[inline]
    pub fn row(&self, r: usize) -> [Option<Color>; BOARD_SIZE] {
        let start = r * BOARD_SIZE;
        let mut line = [None; BOARD_SIZE];
        line.copy_from_slice(&self.cells[start..start + BOARD_SIZE]);
        line
    }

    /// Cells of column `c`, top to bottom
    #[inline]
    pub fn column(&self, c: usize) -> [Option<Color>; BOARD_SIZE] {
        let mut line = [None; BOARD_SIZE];
        for (r, cell) in line.iter_mut().enumerate() {
            *cell = self.cells[r * BOARD_SIZE + c];
        }
        line
    }

    /// Row-major cells
    #[inline]
    pub fn cells(&self) -> &[Option<Color>; TOTAL_CELLS] {
        &self.cells
    }

    /// Full board serialization used as a cache key.
    pub fn key(&self) -> BoardKey {
        let mut key = [0u64; 3];
        for (idx, cell) in self.cells.iter().enumerate() {
            let code = cell.map_or(0, |c| c.index() as u64 + 1);
            key[idx / CELLS_PER_WORD] |= code << (3 * (idx % CELLS_PER_WORD));
        }
        key
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// One text row per board row, `.` for empty cells
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..BOARD_SIZE {
            for cell in self.row(r) {
                write!(f, "{}", cell.map_or('.', Color::symbol))?;
            }
            if r + 1 < BOARD_SIZE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
