//! Rows and columns, and the per-line features shared by the evaluator and
//! the placement strategies.

use crate::board::{Board, Color, Pos, BOARD_SIZE, COLOR_COUNT};
use crate::rules::Slide;

use super::patterns::PotentialTier;

/// The seven cells of one row or column, in board order.
pub type LineCells = [Option<Color>; BOARD_SIZE];

/// A scoring line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Line {
    Row(usize),
    Col(usize),
}

impl Line {
    /// All 14 lines: rows first, then columns
    pub const ALL: [Line; 2 * BOARD_SIZE] = [
        Line::Row(0),
        Line::Row(1),
        Line::Row(2),
        Line::Row(3),
        Line::Row(4),
        Line::Row(5),
        Line::Row(6),
        Line::Col(0),
        Line::Col(1),
        Line::Col(2),
        Line::Col(3),
        Line::Col(4),
        Line::Col(5),
        Line::Col(6),
    ];

    /// Row and column through a cell
    #[inline]
    pub fn through(pos: Pos) -> [Line; 2] {
        [Line::Row(pos.row as usize), Line::Col(pos.col as usize)]
    }

    /// Lines whose content a slide changes: the line it runs along plus
    /// the two crossing lines at its ends.
    #[inline]
    pub fn touched_by(slide: Slide) -> [Line; 3] {
        if slide.is_horizontal() {
            [
                Line::Row(slide.from.row as usize),
                Line::Col(slide.from.col as usize),
                Line::Col(slide.to.col as usize),
            ]
        } else {
            [
                Line::Col(slide.from.col as usize),
                Line::Row(slide.from.row as usize),
                Line::Row(slide.to.row as usize),
            ]
        }
    }

    #[inline]
    pub fn cells(self, board: &Board) -> LineCells {
        match self {
            Line::Row(r) => board.row(r),
            Line::Col(c) => board.column(c),
        }
    }

    /// Board position of the `i`-th cell along the line
    #[inline]
    pub fn pos(self, i: usize) -> Pos {
        match self {
            Line::Row(r) => Pos::new(r as u8, i as u8),
            Line::Col(c) => Pos::new(i as u8, c as u8),
        }
    }

    /// Offset of `pos` along this line (the line must pass through it)
    #[inline]
    pub fn offset_of(self, pos: Pos) -> usize {
        match self {
            Line::Row(_) => pos.col as usize,
            Line::Col(_) => pos.row as usize,
        }
    }
}

/// Filled cells of a line in order, empties dropped.
#[derive(Debug, Clone, Copy)]
pub struct Filled {
    colors: [Color; BOARD_SIZE],
    len: usize,
}

impl Filled {
    pub fn of(cells: &LineCells) -> Self {
        let mut colors = [Color::Red; BOARD_SIZE];
        let mut len = 0;
        for color in cells.iter().flatten() {
            colors[len] = *color;
            len += 1;
        }
        Self { colors, len }
    }

    #[inline]
    pub fn as_slice(&self) -> &[Color] {
        &self.colors[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Pack a line into 21 bits (3 per cell, 0 = empty).
#[inline]
pub fn line_code(cells: &LineCells) -> u32 {
    cells.iter().enumerate().fold(0, |code, (i, cell)| {
        code | (cell.map_or(0, |c| c.index() as u32 + 1) << (3 * i))
    })
}

#[inline]
pub fn is_palindrome(seq: &[Color]) -> bool {
    seq.iter().eq(seq.iter().rev())
}

/// Palindrome test over the filled cells of a slice, skipping empties.
pub fn is_filled_palindrome(cells: &[Option<Color>]) -> bool {
    let mut front = cells.iter().flatten();
    let mut back = cells.iter().rev().flatten();
    let filled = cells.iter().flatten().count();
    (0..filled / 2).all(|_| front.next() == back.next())
}

/// Near-complete palindrome opportunities in one line.
///
/// Every pair of same-colored cells separated by one to three empty cells
/// (and a palindromic filled interior) adds its [`PotentialTier`] weight.
pub fn pattern_potential(cells: &LineCells) -> f64 {
    let mut potential = 0.0;
    for i in 0..BOARD_SIZE {
        let Some(left) = cells[i] else { continue };
        for j in i + 2..BOARD_SIZE {
            if cells[j] != Some(left) {
                continue;
            }
            let interior = &cells[i + 1..j];
            let empties = interior.iter().filter(|c| c.is_none()).count();
            if empties == 0 || empties > 3 {
                continue;
            }
            if is_filled_palindrome(interior) {
                potential += PotentialTier::weight(empties);
            }
        }
    }
    potential
}

/// Near-complete potential removed from the row and column through `pos`
/// by dropping `color` there. Negative when the drop creates potential.
pub fn potential_reduction(board: &Board, pos: Pos, color: Color) -> f64 {
    Line::through(pos)
        .iter()
        .map(|line| {
            let before = line.cells(board);
            let mut after = before;
            after[line.offset_of(pos)] = Some(color);
            pattern_potential(&before) - pattern_potential(&after)
        })
        .sum()
}

/// Number of maximal same-color runs in the filled sequence.
pub fn run_count(cells: &LineCells) -> usize {
    let filled = Filled::of(cells);
    let seq = filled.as_slice();
    if seq.is_empty() {
        return 0;
    }
    1 + seq.windows(2).filter(|w| w[0] != w[1]).count()
}

/// Number of distinct colors in a line.
pub fn distinct_colors(cells: &LineCells) -> usize {
    let mut seen = [false; COLOR_COUNT];
    for color in cells.iter().flatten() {
        seen[color.index()] = true;
    }
    seen.iter().filter(|&&s| s).count()
}

/// Occurrences of `color` in a line.
#[inline]
pub fn color_count(cells: &LineCells, color: Color) -> usize {
    cells.iter().filter(|c| **c == Some(color)).count()
}
