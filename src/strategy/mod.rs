//! Placement strategies for the placer
//!
//! - [`DisruptionStrategy`]: simulate the mover's best immediate reply and
//!   keep it low, while breaking near-complete patterns
//! - [`EntropyStrategy`]: break structure (runs, symmetry, parity, zone
//!   colors) without simulating the opponent
//! - [`HybridStrategy`]: phase-weighted blend of the two
//!
//! Every strategy scores each empty cell; [`choose_placement`] picks the
//! configured one and returns the best cell.

pub mod disruption;
pub mod entropy;
pub mod hybrid;

use crate::board::{Board, Color, Pos};
use crate::config::{EngineConfig, PlacerStrategy};

pub use disruption::DisruptionStrategy;
pub use entropy::EntropyStrategy;
pub use hybrid::HybridStrategy;

/// A candidate cell and its combined strategy score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellScore {
    pub pos: Pos,
    pub score: f64,
}

/// Per-cell scoring shared by the placer strategies.
pub trait PlacementStrategy {
    /// Combined score of every empty cell, in index order.
    fn score_cells(&mut self, board: &Board, color: Color) -> Vec<CellScore>;

    /// True when lower scores are better.
    fn prefers_low(&self) -> bool {
        false
    }

    /// Best cell; ties go to the first cell in index order.
    fn choose(&mut self, board: &Board, color: Color) -> Option<CellScore> {
        let scores = self.score_cells(board, color);
        best_cell(&scores, self.prefers_low())
    }
}

/// First cell with the strictly best score.
pub fn best_cell(scores: &[CellScore], prefers_low: bool) -> Option<CellScore> {
    let mut best: Option<CellScore> = None;
    for &cell in scores {
        let better = match best {
            None => true,
            Some(b) if prefers_low => cell.score < b.score,
            Some(b) => cell.score > b.score,
        };
        if better {
            best = Some(cell);
        }
    }
    best
}

/// Rescale scores to `[0, 1]` with 1 the most desirable cell.
///
/// All cells get 1 when every score is equal.
pub fn normalize(scores: &[CellScore], prefers_low: bool) -> Vec<f64> {
    let (min, max) = scores.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
        (lo.min(c.score), hi.max(c.score))
    });
    let span = max - min;
    scores
        .iter()
        .map(|c| {
            if span <= f64::EPSILON {
                1.0
            } else if prefers_low {
                (max - c.score) / span
            } else {
                (c.score - min) / span
            }
        })
        .collect()
}

/// Chosen cell plus the strategy that picked it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementChoice {
    pub pos: Pos,
    pub score: f64,
    pub strategy: PlacerStrategy,
}

/// Run the configured strategy. `None` only when the board is full.
pub fn choose_placement(
    board: &Board,
    color: Color,
    config: &EngineConfig,
) -> Option<PlacementChoice> {
    let strategy = config.placer_strategy;
    let best = match strategy {
        PlacerStrategy::Disruption => DisruptionStrategy::new(config).choose(board, color),
        PlacerStrategy::Entropy => EntropyStrategy::new(config).choose(board, color),
        PlacerStrategy::Hybrid => HybridStrategy::new(config).choose(board, color),
    }?;
    Some(PlacementChoice {
        pos: best.pos,
        score: best.score,
        strategy,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(scores: &[f64]) -> Vec<CellScore> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| CellScore {
                pos: Pos::from_index(i),
                score,
            })
            .collect()
    }

    #[test]
    fn test_best_cell_direction_and_ties() {
        let scores = cells(&[3.0, 1.0, 5.0, 1.0, 5.0]);
        assert_eq!(best_cell(&scores, false).map(|c| c.pos), Some(Pos::from_index(2)));
        assert_eq!(best_cell(&scores, true).map(|c| c.pos), Some(Pos::from_index(1)));
        assert_eq!(best_cell(&[], true), None);
    }

    #[test]
    fn test_normalize() {
        let scores = cells(&[2.0, 4.0, 6.0]);
        assert_eq!(normalize(&scores, false), vec![0.0, 0.5, 1.0]);
        assert_eq!(normalize(&scores, true), vec![1.0, 0.5, 0.0]);
        assert_eq!(normalize(&cells(&[7.0, 7.0]), true), vec![1.0, 1.0]);
    }

    #[test]
    fn test_choose_placement_uses_configured_strategy() {
        let mut board = Board::new();
        board.place(Pos::new(3, 3), Color::Red);
        for strategy in [
            PlacerStrategy::Disruption,
            PlacerStrategy::Entropy,
            PlacerStrategy::Hybrid,
        ] {
            let config = EngineConfig::default().with_placer_strategy(strategy);
            let choice = choose_placement(&board, Color::Blue, &config).unwrap();
            assert_eq!(choice.strategy, strategy);
            assert!(board.is_empty(choice.pos));
        }
    }

    #[test]
    fn test_full_board_has_no_placement() {
        let mut board = Board::new();
        for idx in 0..49 {
            board.place(Pos::from_index(idx), Color::ALL[idx % 7]);
        }
        assert!(choose_placement(&board, Color::Red, &EngineConfig::default()).is_none());
    }
}
