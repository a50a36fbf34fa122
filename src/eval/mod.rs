//! Scoring and evaluation for Entropy
//!
//! This module provides:
//! - The 30 palindrome shapes and their point table
//! - Exact line and board scoring, with incremental deltas
//! - Line features shared by the evaluator and the placement strategies
//! - The six-component heuristic evaluation used by the mover search

pub mod heuristic;
pub mod lines;
pub mod patterns;
pub mod scoring;

pub use heuristic::{evaluate, EvalBreakdown};
pub use lines::{pattern_potential, potential_reduction, Line, LineCells};
pub use patterns::{PatternShape, PotentialTier, ScoreTable, Signature};
pub use scoring::{
    placement_delta, score_board, score_line, score_sequence, slide_delta, DirectScorer,
    LineScoreCache, LineScorer,
};
