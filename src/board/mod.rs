//! Board representation for Entropy

pub mod bitboard;
pub mod board;

#[cfg(test)]
mod tests;

// Re-exports
pub use bitboard::Bitboard;
pub use board::{Board, BoardKey};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Board size (7x7)
pub const BOARD_SIZE: usize = 7;
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE; // 49

/// Number of distinct token colors
pub const COLOR_COUNT: usize = 7;
/// Tokens of each color in the bag at the start of a game
pub const TOKENS_PER_COLOR: u8 = 7;

/// Filled-cell thresholds separating the game phases
pub const MID_GAME_FILLED: usize = 16;
pub const LATE_GAME_FILLED: usize = 35;

/// Token colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    White,
}

impl Color {
    pub const ALL: [Color; COLOR_COUNT] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Blue,
        Color::Purple,
        Color::White,
    ];

    /// Dense index 0..7
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Option<Color> {
        Self::ALL.get(idx).copied()
    }

    /// Single-letter symbol used on the wire
    pub fn symbol(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Orange => 'O',
            Color::Yellow => 'Y',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Purple => 'P',
            Color::White => 'W',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Color> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.symbol() == symbol.to_ascii_uppercase())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Color {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => {
                Color::from_symbol(ch).ok_or_else(|| EngineError::UnknownColor(s.to_string()))
            }
            _ => Err(EngineError::UnknownColor(s.to_string())),
        }
    }
}

/// Game phase, derived from the number of filled cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Early,
    Mid,
    Late,
}

impl Phase {
    #[inline]
    pub fn from_filled(filled: usize) -> Phase {
        if filled < MID_GAME_FILLED {
            Phase::Early
        } else if filled < LATE_GAME_FILLED {
            Phase::Mid
        } else {
            Phase::Late
        }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_SIZE as u8 && col < BOARD_SIZE as u8);
        Self { row, col }
    }

    #[inline]
    pub fn to_index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        debug_assert!(idx < TOTAL_CELLS);
        Self {
            row: (idx / BOARD_SIZE) as u8,
            col: (idx % BOARD_SIZE) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32) -> bool {
        row >= 0 && row < BOARD_SIZE as i32 && col >= 0 && col < BOARD_SIZE as i32
    }

    /// Neighbor in direction (dr, dc), if still on the board.
    #[inline]
    pub fn offset(self, dr: i32, dc: i32) -> Option<Pos> {
        let r = i32::from(self.row) + dr;
        let c = i32::from(self.col) + dc;
        Pos::is_valid(r, c).then(|| Pos::new(r as u8, c as u8))
    }

    /// Point reflection through the board center.
    #[inline]
    pub fn mirror(self) -> Pos {
        let last = BOARD_SIZE as u8 - 1;
        Pos::new(last - self.row, last - self.col)
    }

    /// Manhattan distance to the center cell (0..=6).
    #[inline]
    pub fn center_distance(self) -> u8 {
        let mid = (BOARD_SIZE / 2) as u8;
        self.row.abs_diff(mid) + self.col.abs_diff(mid)
    }

    #[inline]
    pub fn is_edge(self) -> bool {
        let last = BOARD_SIZE as u8 - 1;
        self.row == 0 || self.col == 0 || self.row == last || self.col == last
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_index().cmp(&other.to_index())
    }
}

/// Cell address: row letter followed by 1-based column number (`c4` is row 2, column 3).
impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.row) as char, self.col + 1)
    }
}

impl FromStr for Pos {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidAddress(s.to_string());
        let bytes = s.trim().as_bytes();
        let &[letter, digit] = bytes else {
            return Err(invalid());
        };
        let row = letter.to_ascii_lowercase().wrapping_sub(b'a');
        let col = digit.wrapping_sub(b'1');
        if usize::from(row) >= BOARD_SIZE || usize::from(col) >= BOARD_SIZE {
            return Err(invalid());
        }
        Ok(Pos::new(row, col))
    }
}
