//! Phase-weighted blend of the entropy and disruption strategies
//!
//! Both strategies score every empty cell, each set of scores is rescaled
//! to `[0, 1]` (1 = that strategy's favorite), and the two are mixed with
//! the entropy share for the current phase.

use crate::board::{Board, Color, Phase};
use crate::config::{EngineConfig, HybridWeights};

use super::{normalize, CellScore, DisruptionStrategy, EntropyStrategy, PlacementStrategy};

pub struct HybridStrategy {
    weights: HybridWeights,
    disruption: DisruptionStrategy,
    entropy: EntropyStrategy,
}

impl HybridStrategy {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            weights: config.hybrid,
            disruption: DisruptionStrategy::new(config),
            entropy: EntropyStrategy::new(config),
        }
    }

    /// Entropy share of the blend; disruption gets the rest.
    pub fn entropy_share(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Early => self.weights.early_entropy,
            Phase::Mid => self.weights.mid_entropy,
            Phase::Late => self.weights.late_entropy,
        }
    }
}

impl PlacementStrategy for HybridStrategy {
    fn score_cells(&mut self, board: &Board, color: Color) -> Vec<CellScore> {
        let share = self.entropy_share(Phase::from_filled(board.filled_count()));

        let disruption = self.disruption.score_cells(board, color);
        let entropy = self.entropy.score_cells(board, color);
        let d = normalize(&disruption, self.disruption.prefers_low());
        let e = normalize(&entropy, self.entropy.prefers_low());

        // Both lists follow the board's empty-cell order
        disruption
            .iter()
            .zip(d.iter().zip(&e))
            .map(|(cell, (&d, &e))| CellScore {
                pos: cell.pos,
                score: share * e + (1.0 - share) * d,
            })
            .collect()
    }
}
