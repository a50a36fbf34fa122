//! Palindrome scoring of rows, columns and whole boards
//!
//! Each line is reduced to its filled cells (gaps never break a pattern).
//! Every palindromic run of that sequence which is not contained in a longer
//! palindromic run scores its table value; the table already folds in the
//! palindromes nested inside a shape. Where maximal runs overlap, a nested
//! palindrome they share is counted once.
//!
//! # Example
//!
//! ```
//! use entropy::board::{Board, Color, Pos};
//! use entropy::eval::score_board;
//!
//! let mut board = Board::new();
//! for col in 0..7 {
//!     board.place(Pos::new(0, col), Color::Red);
//! }
//! assert_eq!(score_board(&board), 77);
//! ```

use rustc_hash::FxHashMap;

use crate::board::{Board, Color, Pos};
use crate::rules::{apply_slide, with_token, Slide};

use super::lines::{is_palindrome, line_code, Filled, Line, LineCells};
use super::patterns::{ScoreTable, Signature};

/// Points of a filled color sequence.
pub fn score_sequence(seq: &[Color]) -> u32 {
    let n = seq.len();
    if n < 2 {
        return 0;
    }

    // Palindromic runs as inclusive (start, end) pairs, longest first
    let mut runs: Vec<(usize, usize)> = Vec::with_capacity(n * n / 2);
    for len in (2..=n).rev() {
        for start in 0..=n - len {
            let end = start + len - 1;
            if is_palindrome(&seq[start..=end]) {
                runs.push((start, end));
            }
        }
    }

    let (maximal, nested): (Vec<_>, Vec<_>) =
        runs.iter().enumerate().partition(|&(i, &(start, end))| {
            !runs[..i]
                .iter()
                .any(|&(s, e)| s <= start && end <= e && (s, e) != (start, end))
        });

    let mut total: usize = maximal
        .iter()
        .map(|&(_, &(start, end))| ScoreTable::points(Signature::of(&seq[start..=end])) as usize)
        .sum();

    // A nested run shared by several maximal runs is folded into each of
    // their table values; keep one copy of its length.
    for &(_, &(start, end)) in &nested {
        let cover = maximal
            .iter()
            .filter(|&&(_, &(s, e))| s <= start && end <= e)
            .count();
        total -= cover.saturating_sub(1) * (end - start + 1);
    }
    total as u32
}

/// Points of one row or column.
#[inline]
pub fn score_line(cells: &LineCells) -> u32 {
    score_sequence(Filled::of(cells).as_slice())
}

/// Total points over all 14 lines.
pub fn score_board(board: &Board) -> u32 {
    DirectScorer.board_score(board)
}

/// Score change caused by a slide (rows and columns it touches only).
pub fn slide_delta(board: &Board, slide: Slide) -> i32 {
    DirectScorer.slide_delta(board, slide)
}

/// Score change caused by dropping `color` on `pos`.
pub fn placement_delta(board: &Board, pos: Pos, color: Color) -> i32 {
    DirectScorer.placement_delta(board, pos, color)
}

/// Source of line scores.
///
/// Board totals and incremental deltas are derived from [`line_score`],
/// so every implementation agrees with a full recomputation.
///
/// [`line_score`]: LineScorer::line_score
pub trait LineScorer {
    fn line_score(&mut self, cells: &LineCells) -> u32;

    fn board_score(&mut self, board: &Board) -> u32 {
        self.lines_score(board, &Line::ALL)
    }

    fn lines_score(&mut self, board: &Board, lines: &[Line]) -> u32 {
        lines
            .iter()
            .map(|line| self.line_score(&line.cells(board)))
            .sum()
    }

    /// Rescore the three lines a slide touches before and after the move.
    fn slide_delta(&mut self, board: &Board, slide: Slide) -> i32 {
        let lines = Line::touched_by(slide);
        let before = self.lines_score(board, &lines);
        let after = self.lines_score(&apply_slide(board, slide), &lines);
        after as i32 - before as i32
    }

    /// Rescore the row and column through `pos` before and after a drop.
    fn placement_delta(&mut self, board: &Board, pos: Pos, color: Color) -> i32 {
        let lines = Line::through(pos);
        let before = self.lines_score(board, &lines);
        let after = self.lines_score(&with_token(board, pos, color), &lines);
        after as i32 - before as i32
    }
}

/// Scores every line from scratch.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectScorer;

impl LineScorer for DirectScorer {
    #[inline]
    fn line_score(&mut self, cells: &LineCells) -> u32 {
        score_line(cells)
    }
}

/// Line score memo keyed by packed line content.
///
/// Owned by a single decision; nothing is shared between calls.
#[derive(Debug, Default)]
pub struct LineScoreCache {
    scores: FxHashMap<u32, u32>,
    hits: u64,
    misses: u64,
}

impl LineScoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

impl LineScorer for LineScoreCache {
    fn line_score(&mut self, cells: &LineCells) -> u32 {
        let code = line_code(cells);
        if let Some(&score) = self.scores.get(&code) {
            self.hits += 1;
            return score;
        }
        self.misses += 1;
        let score = score_line(cells);
        self.scores.insert(code, score);
        score
    }
}
