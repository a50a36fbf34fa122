//! Position evaluation for the mover
//!
//! The evaluation is a weighted sum of six components:
//! - Immediate score (ground truth from the scoring engine)
//! - Pattern potential (near-complete palindromes)
//! - Board control (center, edges, same-color multiplicity)
//! - Opponent opportunity (empty cells and vulnerable lines, weighted negatively)
//! - Preparation for the announced color
//! - Line fertility
//!
//! Higher is better for the mover. Only the first component is exact; the
//! rest steer the search between scoring moves.

use crate::board::{Board, Color, Pos, BOARD_SIZE};
use crate::config::EvalWeights;

use super::lines::{color_count, distinct_colors, pattern_potential, Filled, Line, LineCells};
use super::scoring::LineScorer;

/// Center cells worth double control.
const CENTER_CELLS: [Pos; 4] = [
    Pos { row: 2, col: 3 },
    Pos { row: 3, col: 2 },
    Pos { row: 3, col: 4 },
    Pos { row: 4, col: 3 },
];

const CENTER_WEIGHT: f64 = 2.0;
const EDGE_WEIGHT: f64 = 1.0;
const MULTIPLICITY_WEIGHT: f64 = 1.5;

const EMPTY_CELL_PENALTY: f64 = 0.5;
const VULNERABLE_LINE_PENALTY: f64 = 2.0;

const DIVERSITY_BONUS: f64 = 1.0;
const SCARCE_BONUS: f64 = 5.0;
const ABUNDANT_PENALTY: f64 = 5.0;
const SHARED_LINE_BONUS: f64 = 0.5;

/// Fixed fertility of a completely filled line
const FULL_LINE_FERTILITY: f64 = 1.0;

/// Unweighted component values of one evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvalBreakdown {
    pub score: f64,
    pub potential: f64,
    pub control: f64,
    pub opponent: f64,
    pub preparation: f64,
    pub fertility: f64,
}

impl EvalBreakdown {
    /// Compute every component for `board` with `announced` as the next color.
    pub fn of<S: LineScorer>(scorer: &mut S, board: &Board, announced: Color) -> Self {
        let lines: [LineCells; 2 * BOARD_SIZE] = Line::ALL.map(|line| line.cells(board));
        Self {
            score: f64::from(scorer.board_score(board)),
            potential: lines.iter().map(pattern_potential).sum(),
            control: board_control(board, &lines),
            opponent: opponent_opportunity(board, &lines),
            preparation: preparation(board, announced),
            fertility: lines.iter().map(line_fertility).sum(),
        }
    }

    pub fn total(&self, weights: &EvalWeights) -> f64 {
        self.score * weights.score
            + self.potential * weights.potential
            + self.control * weights.control
            + self.opponent * weights.opponent
            + self.preparation * weights.preparation
            + self.fertility * weights.fertility
    }
}

/// Evaluate a board from the mover's point of view.
///
/// # Arguments
/// * `scorer` - Line scorer used for the immediate score
/// * `board` - Position to evaluate
/// * `announced` - Color the placer drops next
/// * `weights` - Component weights
#[must_use]
pub fn evaluate<S: LineScorer>(
    scorer: &mut S,
    board: &Board,
    announced: Color,
    weights: &EvalWeights,
) -> f64 {
    EvalBreakdown::of(scorer, board, announced).total(weights)
}

/// Center and edge occupancy plus repeated colors within lines.
fn board_control(board: &Board, lines: &[LineCells]) -> f64 {
    let center = CENTER_CELLS.iter().filter(|&&p| !board.is_empty(p)).count();
    let edges = board.occupied().iter_ones().filter(|p| p.is_edge()).count();

    let mut extra = 0usize;
    for cells in lines {
        for color in Color::ALL {
            extra += color_count(cells, color).saturating_sub(1);
        }
    }

    center as f64 * CENTER_WEIGHT + edges as f64 * EDGE_WEIGHT + extra as f64 * MULTIPLICITY_WEIGHT
}

/// Room the placer has to work with: empty cells and lines that are one
/// drop away from a new pattern.
fn opponent_opportunity(board: &Board, lines: &[LineCells]) -> f64 {
    let vulnerable = lines.iter().filter(|cells| is_vulnerable(cells)).count();
    board.empty_count() as f64 * EMPTY_CELL_PENALTY + vulnerable as f64 * VULNERABLE_LINE_PENALTY
}

/// At least one empty cell and two filled ones, with matching outer ends or
/// a same-color neighbor pair in the filled sequence.
fn is_vulnerable(cells: &LineCells) -> bool {
    let filled = Filled::of(cells);
    let seq = filled.as_slice();
    if seq.len() < 2 || seq.len() == BOARD_SIZE {
        return false;
    }
    seq.first() == seq.last() || seq.windows(2).any(|w| w[0] == w[1])
}

fn preparation(board: &Board, announced: Color) -> f64 {
    let mut value = board.distinct_colors() as f64 * DIVERSITY_BONUS;

    let on_board = board.count(announced);
    if on_board <= 1 {
        value += SCARCE_BONUS;
    } else if on_board >= 4 {
        value -= ABUNDANT_PENALTY;
    }

    let shared = board
        .empty_cells()
        .filter(|&pos| {
            Line::through(pos)
                .iter()
                .any(|line| color_count(&line.cells(board), announced) > 0)
        })
        .count();
    value + shared as f64 * SHARED_LINE_BONUS
}

/// Per-line curve peaking at 2..=4 filled cells, scaled by color diversity.
fn line_fertility(cells: &LineCells) -> f64 {
    let filled = cells.iter().flatten().count();
    let base = match filled {
        0 => return 0.0,
        7 => return FULL_LINE_FERTILITY,
        1 => 0.5,
        2..=4 => 3.0,
        5 => 1.0,
        _ => 0.5,
    };
    let diversity = match distinct_colors(cells) {
        1 => 1.5,
        2 => 1.2,
        3 => 1.0,
        _ => 0.6,
    };
    base * diversity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::scoring::DirectScorer;

    fn eval(board: &Board, announced: Color) -> f64 {
        evaluate(&mut DirectScorer, board, announced, &EvalWeights::default())
    }

    #[test]
    fn test_empty_board_breakdown() {
        let b = EvalBreakdown::of(&mut DirectScorer, &Board::new(), Color::Red);
        assert_eq!(b.score, 0.0);
        assert_eq!(b.potential, 0.0);
        assert_eq!(b.control, 0.0);
        assert_eq!(b.opponent, 49.0 * EMPTY_CELL_PENALTY);
        // No colors yet, announced color is scarce, no shared lines
        assert_eq!(b.preparation, SCARCE_BONUS);
        assert_eq!(b.fertility, 0.0);
    }

    #[test]
    fn test_score_component_dominates() {
        let mut open = Board::new();
        open.place(Pos::new(0, 0), Color::Red);
        open.place(Pos::new(0, 2), Color::Red);

        let mut closed = open;
        closed.place(Pos::new(0, 1), Color::Red);

        assert!(eval(&closed, Color::Blue) > eval(&open, Color::Blue));
    }

    #[test]
    fn test_control_counts_center_edges_and_repeats() {
        let mut board = Board::new();
        board.place(Pos::new(2, 3), Color::Green);
        board.place(Pos::new(0, 3), Color::Green);
        let lines = Line::ALL.map(|line| line.cells(&board));
        // One center cell, one edge cell, one repeat in column 3
        assert_eq!(board_control(&board, &lines), 2.0 + 1.0 + 1.5);
    }

    #[test]
    fn test_vulnerable_lines() {
        let r = Some(Color::Red);
        let g = Some(Color::Green);
        assert!(is_vulnerable(&[r, None, r, None, None, None, None]));
        assert!(is_vulnerable(&[g, r, r, None, None, None, None]));
        assert!(!is_vulnerable(&[r, g, None, None, None, None, None]));
        assert!(!is_vulnerable(&[r, None, None, None, None, None, None]));
        assert!(!is_vulnerable(&[r, r, r, r, r, r, r]));
    }

    #[test]
    fn test_preparation_scarcity() {
        let mut board = Board::new();
        for col in 0..4 {
            board.place(Pos::new(6, col), Color::White);
        }
        // One color on board, abundant penalty, 27 empty cells share a line with white
        assert_eq!(preparation(&board, Color::White), 1.0 - 5.0 + 13.5);
        // One color on board, scarce bonus, no blue lines
        assert_eq!(preparation(&board, Color::Blue), 1.0 + 5.0);
    }

    #[test]
    fn test_fertility_curve() {
        let r = Some(Color::Red);
        let g = Some(Color::Green);
        assert_eq!(line_fertility(&[None; 7]), 0.0);
        assert_eq!(line_fertility(&[r; 7]), FULL_LINE_FERTILITY);
        let sweet = line_fertility(&[r, None, r, None, None, None, None]);
        let sparse = line_fertility(&[r, None, None, None, None, None, None]);
        let crowded = line_fertility(&[r, g, r, g, r, g, None]);
        assert!(sweet > sparse);
        assert!(sweet > crowded);
        // Uniform lines beat mixed ones at equal fill
        assert!(sweet > line_fertility(&[r, None, g, None, None, None, None]));
    }

    #[test]
    fn test_total_applies_weights() {
        let b = EvalBreakdown {
            score: 1.0,
            potential: 1.0,
            control: 1.0,
            opponent: 1.0,
            preparation: 1.0,
            fertility: 1.0,
        };
        assert_eq!(b.total(&EvalWeights::default()), 100.0 + 50.0 + 30.0 - 40.0 + 20.0 + 25.0);
    }
}
