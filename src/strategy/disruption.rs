//! Disruption placement: keep the mover's best reply low
//!
//! For each empty cell the announced color is dropped there and the mover's
//! strongest immediate slide is estimated: slides are ranked by a quick
//! same-color count, and only the top sample is scored exactly. The estimate dominates the combined score; three local terms
//! refine it:
//! - potential removed from the cell's row and column
//! - other colors that would have scored at the cell (foreclosed patterns)
//! - scarcity: keep a scarce color away from its mates, spend an abundant
//!   one inside high-potential lines
//!
//! Lower combined scores are better.

use crate::board::{Board, Color, Pos};
use crate::config::{DisruptionWeights, EngineConfig};
use crate::eval::lines::color_count;
use crate::eval::patterns::PotentialTier;
use crate::eval::{pattern_potential, potential_reduction, Line, LineScoreCache, LineScorer};
use crate::rules::{apply_slide, generate_slides, with_token, Slide};

use super::{CellScore, PlacementStrategy};

/// A color with at most this many tokens left in the bag is scarce.
const SCARCE_REMAINING: u8 = 2;

/// Unweighted terms for one candidate cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisruptionTerms {
    /// Best board score the mover reaches with one slide (or a pass)
    pub reply: f64,
    pub potential_reduction: f64,
    pub foreclosure: f64,
    pub scarcity: f64,
}

impl DisruptionTerms {
    pub fn combined(&self, weights: &DisruptionWeights) -> f64 {
        self.reply * weights.reply - self.potential_reduction * weights.potential_reduction
            - self.foreclosure * weights.foreclosure
            + self.scarcity * weights.scarcity
    }
}

pub struct DisruptionStrategy {
    weights: DisruptionWeights,
    reply_sample: usize,
    lines: LineScoreCache,
}

impl DisruptionStrategy {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            weights: config.disruption,
            reply_sample: config.reply_sample.max(1),
            lines: LineScoreCache::new(),
        }
    }

    /// All four terms for dropping `color` on `pos`.
    pub fn terms(&mut self, board: &Board, pos: Pos, color: Color) -> DisruptionTerms {
        let after = with_token(board, pos, color);
        DisruptionTerms {
            reply: self.best_reply(&after),
            potential_reduction: potential_reduction(board, pos, color),
            foreclosure: self.foreclosure(board, pos, color),
            scarcity: scarcity(board, pos, color),
        }
    }

    /// Highest score the mover reaches in one move.
    ///
    /// Slides are ranked by [`quick_delta`] and only the top sample gets an
    /// exact score delta; passing keeps the current score.
    fn best_reply(&mut self, board: &Board) -> f64 {
        let base = self.lines.board_score(board) as i32;
        let mut ranked: Vec<(Slide, i32)> = generate_slides(board)
            .into_iter()
            .map(|slide| (slide, quick_delta(board, slide)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(self.reply_sample);

        let best = ranked
            .into_iter()
            .map(|(slide, _)| self.lines.slide_delta(board, slide))
            .fold(0, i32::max);
        f64::from(base + best)
    }

    /// Other colors that would have added points at `pos`.
    fn foreclosure(&mut self, board: &Board, pos: Pos, color: Color) -> f64 {
        Color::ALL
            .iter()
            .filter(|&&other| other != color)
            .filter(|&&other| self.lines.placement_delta(board, pos, other) > 0)
            .count() as f64
    }
}

/// Same-color tokens the slider gains in its new row and column minus those
/// it leaves behind.
fn quick_delta(board: &Board, slide: Slide) -> i32 {
    let Some(color) = board.get(slide.from) else {
        return 0;
    };
    let after = apply_slide(board, slide);
    mates(&after, slide.to, color) - mates(board, slide.from, color)
}

fn mates(board: &Board, pos: Pos, color: Color) -> i32 {
    Line::through(pos)
        .iter()
        .map(|line| color_count(&line.cells(board), color))
        .sum::<usize>() as i32
}

/// Scarce colors are penalized for landing next to their own kind;
/// abundant ones are rewarded for landing in lines with potential.
fn scarcity(board: &Board, pos: Pos, color: Color) -> f64 {
    let lines = Line::through(pos).map(|line| line.cells(board));
    if board.remaining(color) <= SCARCE_REMAINING {
        lines.iter().map(|cells| color_count(cells, color)).sum::<usize>() as f64
    } else {
        -lines.iter().map(pattern_potential).sum::<f64>() / PotentialTier::ALMOST_COMPLETE
    }
}

impl PlacementStrategy for DisruptionStrategy {
    fn score_cells(&mut self, board: &Board, color: Color) -> Vec<CellScore> {
        board
            .empty_cells()
            .map(|pos| {
                let score = self.terms(board, pos, color).combined(&self.weights);
                CellScore { pos, score }
            })
            .collect()
    }

    fn prefers_low(&self) -> bool {
        true
    }
}
