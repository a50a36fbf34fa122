//! Entropy placement: break structure without simulating the mover
//!
//! Each empty cell is scored on five terms, higher is better:
//! - run fragmentation added to the cell's row and column
//! - symmetry breaking against the point-reflected cell
//! - parity of the empty gaps left in the four directions (odd favored)
//! - color diversity added to the cell's zone
//! - phase preference (center early, edges late)

use crate::board::{Board, Color, Phase, Pos, BOARD_SIZE};
use crate::config::{EngineConfig, EntropyWeights};
use crate::eval::lines::run_count;
use crate::eval::Line;
use crate::rules::DIRECTIONS;

use super::{CellScore, PlacementStrategy};

/// Farthest Manhattan distance from the center
const MAX_CENTER_DISTANCE: f64 = 6.0;

/// Unweighted terms for one candidate cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EntropyTerms {
    pub fragmentation: f64,
    pub symmetry: f64,
    pub parity: f64,
    pub zone_diversity: f64,
    pub phase: f64,
}

impl EntropyTerms {
    pub fn of(board: &Board, pos: Pos, color: Color) -> Self {
        Self {
            fragmentation: fragmentation(board, pos, color),
            symmetry: symmetry(board, pos, color),
            parity: parity(board, pos),
            zone_diversity: zone_diversity(board, pos, color),
            phase: phase_preference(Phase::from_filled(board.filled_count()), pos),
        }
    }

    pub fn combined(&self, weights: &EntropyWeights) -> f64 {
        self.fragmentation * weights.fragmentation
            + self.symmetry * weights.symmetry
            + self.parity * weights.parity
            + self.zone_diversity * weights.zone_diversity
            + self.phase * weights.phase
    }
}

pub struct EntropyStrategy {
    weights: EntropyWeights,
}

impl EntropyStrategy {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            weights: config.entropy,
        }
    }
}

impl PlacementStrategy for EntropyStrategy {
    fn score_cells(&mut self, board: &Board, color: Color) -> Vec<CellScore> {
        board
            .empty_cells()
            .map(|pos| CellScore {
                pos,
                score: EntropyTerms::of(board, pos, color).combined(&self.weights),
            })
            .collect()
    }
}

/// Extra same-color runs created in the row and column.
fn fragmentation(board: &Board, pos: Pos, color: Color) -> f64 {
    Line::through(pos)
        .iter()
        .map(|line| {
            let before = line.cells(board);
            let mut after = before;
            after[line.offset_of(pos)] = Some(color);
            run_count(&after) as f64 - run_count(&before) as f64
        })
        .sum()
}

/// +1 when the mirror cell holds another color, -1 when it holds this one.
fn symmetry(board: &Board, pos: Pos, color: Color) -> f64 {
    let mirror = pos.mirror();
    if mirror == pos {
        return 0.0;
    }
    match board.get(mirror) {
        Some(c) if c == color => -1.0,
        Some(_) => 1.0,
        None => 0.0,
    }
}

/// Empty run lengths leading away from `pos`: +1 per odd gap, -0.5 per
/// even one.
fn parity(board: &Board, pos: Pos) -> f64 {
    DIRECTIONS
        .iter()
        .map(|&(dr, dc)| {
            let mut gap = 0;
            let mut cur = pos;
            while let Some(next) = cur.offset(dr, dc) {
                if !board.is_empty(next) {
                    break;
                }
                gap += 1;
                cur = next;
            }
            match gap {
                0 => 0.0,
                g if g % 2 == 1 => 1.0,
                _ => -0.5,
            }
        })
        .sum()
}

/// Zone band of a row or column index: 0..=1, 2..=4, 5..=6.
#[inline]
fn band(i: u8) -> u8 {
    match i {
        0..=1 => 0,
        2..=4 => 1,
        _ => 2,
    }
}

/// Which of the nine zones tiling the board holds `pos`.
#[inline]
pub fn zone_of(pos: Pos) -> u8 {
    band(pos.row) * 3 + band(pos.col)
}

/// +1 for a color new to the zone, -0.5 per copy already there.
fn zone_diversity(board: &Board, pos: Pos, color: Color) -> f64 {
    let zone = zone_of(pos);
    let copies = (0..BOARD_SIZE * BOARD_SIZE)
        .map(Pos::from_index)
        .filter(|&p| zone_of(p) == zone && board.get(p) == Some(color))
        .count();
    if copies == 0 {
        1.0
    } else {
        -0.5 * copies as f64
    }
}

/// Center cells early, edge cells late, indifferent mid-game.
fn phase_preference(phase: Phase, pos: Pos) -> f64 {
    let distance = f64::from(pos.center_distance()) / MAX_CENTER_DISTANCE;
    match phase {
        Phase::Early => 1.0 - distance,
        Phase::Mid => 0.0,
        Phase::Late => distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragmentation() {
        let mut board = Board::new();
        board.place(Pos::new(1, 0), Color::Red);
        board.place(Pos::new(1, 2), Color::Red);
        // R G R splits one run into three
        assert_eq!(fragmentation(&board, Pos::new(1, 1), Color::Green), 2.0 + 1.0);
        // R R R keeps one run; the column gains a run
        assert_eq!(fragmentation(&board, Pos::new(1, 1), Color::Red), 1.0);
    }

    #[test]
    fn test_symmetry() {
        let mut board = Board::new();
        board.place(Pos::new(0, 0), Color::Blue);
        assert_eq!(symmetry(&board, Pos::new(6, 6), Color::Red), 1.0);
        assert_eq!(symmetry(&board, Pos::new(6, 6), Color::Blue), -1.0);
        assert_eq!(symmetry(&board, Pos::new(6, 5), Color::Blue), 0.0);
        assert_eq!(symmetry(&board, Pos::new(3, 3), Color::Blue), 0.0);
    }

    #[test]
    fn test_parity() {
        let board = Board::new();
        // Corner: two gaps of 6, two of 0
        assert_eq!(parity(&board, Pos::new(0, 0)), -1.0);
        // a2: gaps 0 up, 6 down, 1 left, 5 right
        assert_eq!(parity(&board, Pos::new(0, 1)), -0.5 + 1.0 + 1.0);
    }

    #[test]
    fn test_zones_tile_the_board() {
        let mut seen = [0usize; 9];
        for idx in 0..49 {
            seen[zone_of(Pos::from_index(idx)) as usize] += 1;
        }
        assert_eq!(seen, [4, 6, 4, 6, 9, 6, 4, 6, 4]);
    }

    #[test]
    fn test_zone_diversity() {
        let mut board = Board::new();
        board.place(Pos::new(3, 3), Color::Purple);
        board.place(Pos::new(2, 2), Color::Purple);
        assert_eq!(zone_diversity(&board, Pos::new(4, 4), Color::Red), 1.0);
        assert_eq!(zone_diversity(&board, Pos::new(4, 4), Color::Purple), -1.0);
        assert_eq!(zone_diversity(&board, Pos::new(0, 0), Color::Purple), 1.0);
    }

    #[test]
    fn test_phase_preference() {
        let center = Pos::new(3, 3);
        let corner = Pos::new(0, 6);
        assert!(phase_preference(Phase::Early, center) > phase_preference(Phase::Early, corner));
        assert!(phase_preference(Phase::Late, corner) > phase_preference(Phase::Late, center));
        assert_eq!(phase_preference(Phase::Mid, corner), 0.0);
    }

    #[test]
    fn test_empty_board_prefers_center_area() {
        let mut strategy = EntropyStrategy::new(&EngineConfig::default());
        let choice = strategy.choose(&Board::new(), Color::Red).unwrap();
        assert!(choice.pos.center_distance() <= 2, "{}", choice.pos);
    }
}
