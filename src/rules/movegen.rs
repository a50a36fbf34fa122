//! Move generation and application
//!
//! A token slides along a row or column and stops before the first occupied
//! cell or the board edge. It can never jump or land on another token.
//! Applying a move returns a fresh board; the input is never mutated.

use crate::board::{Board, Color, Pos};
use crate::error::{EngineError, Result};

use super::moves::{MoverAction, Placement, Slide};

/// Direction vectors for slides (4 axis directions)
pub const DIRECTIONS: [(i32, i32); 4] = [
    (-1, 0), // Up
    (1, 0),  // Down
    (0, -1), // Left
    (0, 1),  // Right
];

/// Every legal slide, grouped by origin in index order, then by direction.
///
/// An empty result means the mover can only pass.
pub fn generate_slides(board: &Board) -> Vec<Slide> {
    let mut slides = Vec::with_capacity(64);
    for from in board.occupied().iter_ones() {
        push_slides_from(board, from, &mut slides);
    }
    slides
}

/// Legal slides of the token at `from` (none if the cell is empty).
pub fn slides_from(board: &Board, from: Pos) -> Vec<Slide> {
    let mut slides = Vec::new();
    if !board.is_empty(from) {
        push_slides_from(board, from, &mut slides);
    }
    slides
}

fn push_slides_from(board: &Board, from: Pos, out: &mut Vec<Slide>) {
    for &(dr, dc) in &DIRECTIONS {
        let mut cur = from;
        while let Some(next) = cur.offset(dr, dc) {
            if !board.is_empty(next) {
                break;
            }
            out.push(Slide::new(from, next));
            cur = next;
        }
    }
}

/// Every cell the placer may target, in index order.
pub fn placement_cells(board: &Board) -> Vec<Pos> {
    board.empty_cells().collect()
}

/// Check that a slide follows an axis over empty cells only.
pub fn is_legal_slide(board: &Board, slide: Slide) -> bool {
    let Slide { from, to } = slide;
    if from == to || board.is_empty(from) || !board.is_empty(to) {
        return false;
    }
    let (dr, dc) = if from.row == to.row {
        (0, if to.col > from.col { 1 } else { -1 })
    } else if from.col == to.col {
        (if to.row > from.row { 1 } else { -1 }, 0)
    } else {
        return false;
    };

    let mut cur = from;
    while let Some(next) = cur.offset(dr, dc) {
        if !board.is_empty(next) {
            return false;
        }
        if next == to {
            return true;
        }
        cur = next;
    }
    false
}

/// Board after a slide. The slide must be legal.
#[must_use]
pub fn apply_slide(board: &Board, slide: Slide) -> Board {
    let mut next = *board;
    if let Some(color) = next.remove(slide.from) {
        next.place(slide.to, color);
    }
    next
}

/// Board after a mover action; a pass leaves it unchanged.
#[must_use]
pub fn apply_action(board: &Board, action: MoverAction) -> Board {
    match action {
        MoverAction::Slide(slide) => apply_slide(board, slide),
        MoverAction::Pass => *board,
    }
}

/// Board after a placement. The target cell must be empty.
#[must_use]
pub fn apply_placement(board: &Board, placement: Placement) -> Board {
    with_token(board, placement.pos, placement.color)
}

/// Apply a slide received from outside the engine, rejecting illegal ones.
pub fn checked_slide(board: &Board, slide: Slide) -> Result<Board> {
    if !is_legal_slide(board, slide) {
        return Err(EngineError::IllegalSlide { slide });
    }
    Ok(apply_slide(board, slide))
}

/// Apply a placement received from outside the engine, rejecting occupied cells.
pub fn checked_placement(board: &Board, placement: Placement) -> Result<Board> {
    if !board.is_empty(placement.pos) {
        return Err(EngineError::OccupiedCell { pos: placement.pos });
    }
    Ok(apply_placement(board, placement))
}

#[inline]
#[must_use]
pub fn with_token(board: &Board, pos: Pos, color: Color) -> Board {
    let mut next = *board;
    next.place(pos, color);
    next
}

/// The game ends once every cell is filled.
#[inline]
pub fn is_game_over(board: &Board) -> bool {
    board.is_full()
}
