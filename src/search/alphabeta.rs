//! Alpha-beta search with iterative deepening and a transposition cache
//!
//! The mover maximizes the evaluation; the placer minimizes it by dropping a
//! token. Only the announced color is known for the first placer ply. Deeper
//! placer plies either assume the modal remaining bag color or stop there,
//! depending on [`FuturePlacerModel`].
//!
//! # Features
//!
//! - Iterative deepening that keeps the last completed depth
//! - Fail-hard alpha-beta with slides ordered by score delta
//! - Placements ordered by how much potential they destroy
//! - Pass as an explicit candidate at every mover node
//! - Wall-clock deadline polled at every node (the first depth ignores it)
//!
//! # Example
//!
//! ```
//! use entropy::board::{Board, Color, Pos};
//! use entropy::search::Searcher;
//! use entropy::{EngineConfig, GameState, Role};
//!
//! let mut board = Board::new();
//! board.place(Pos::new(3, 3), Color::Red);
//! let state = GameState::new(board, Color::Blue, Role::Mover);
//!
//! let mut searcher = Searcher::new(&EngineConfig::default().with_max_depth(2));
//! let result = searcher.search(&state);
//! assert!(result.depth >= 1);
//! ```

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::board::{Board, Color, Phase, Pos};
use crate::config::{EngineConfig, EvalWeights, FuturePlacerModel};
use crate::eval::{evaluate, potential_reduction, LineScoreCache, LineScorer};
use crate::rules::{
    apply_action, generate_slides, is_game_over, placement_cells, with_token, MoverAction,
};
use crate::state::{GameState, Role};

use super::cache::{Bound, CacheKey, TranspositionCache};
use super::deadline::{Deadline, TimeBudget};

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Transposition cache probes that settled a node
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// Line score memo hits and misses
    pub line_hits: u64,
    pub line_misses: u64,
    /// Alpha or beta cutoffs
    pub cutoffs: u64,
}

/// Outcome of a mover search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Chosen slide, or pass
    pub action: MoverAction,
    /// Evaluation of the chosen action at `depth`
    pub value: f64,
    /// Deepest iteration that completed
    pub depth: u8,
    /// Nodes visited over all iterations
    pub nodes: u64,
    pub elapsed: Duration,
    pub stats: SearchStats,
}

/// Depth iterative deepening reaches on the time threshold alone.
///
/// `branching` is slide count times empty-cell count. Wide positions get a
/// shallow ceiling, narrow ones a deep one, and late positions at least 3.
/// Past the ceiling each iteration must also be projected to finish in time.
pub fn depth_ceiling(phase: Phase, branching: usize) -> u8 {
    let by_branching = match branching {
        b if b > 10_000 => 1,
        b if b > 2_000 => 2,
        b if b > 400 => 3,
        _ => 4,
    };
    match phase {
        Phase::Late => by_branching.max(3),
        Phase::Early | Phase::Mid => by_branching,
    }
}

/// Expected duration of the next iteration from the last two.
fn project_next(previous: Duration, last: Duration) -> Duration {
    if previous.is_zero() || last.is_zero() {
        return last * 3;
    }
    let growth = (last.as_secs_f64() / previous.as_secs_f64()).clamp(1.5, 5.0);
    last.mul_f64(growth)
}

/// Mover search engine.
///
/// Caches live for one call to [`search`](Searcher::search) or
/// [`search_depth`](Searcher::search_depth) and are cleared at the start of
/// the next one.
pub struct Searcher {
    weights: EvalWeights,
    future_placer: FuturePlacerModel,
    max_depth: u8,
    budget: TimeBudget,
    deepen_threshold: Duration,
    cache: TranspositionCache,
    lines: LineScoreCache,
    /// Active deadline; `None` while the clock is ignored
    deadline: Option<Deadline>,
    /// Set once the deadline fired during the current iteration
    stopped: bool,
    announced: Color,
    nodes: u64,
    cutoffs: u64,
}

impl Searcher {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            weights: config.eval,
            future_placer: config.future_placer,
            max_depth: config.max_depth.max(1),
            budget: TimeBudget::from_config(config),
            deepen_threshold: config.deepen_threshold(),
            cache: TranspositionCache::new(config.cache_capacity),
            lines: LineScoreCache::new(),
            deadline: None,
            stopped: false,
            announced: Color::Red,
            nodes: 0,
            cutoffs: 0,
        }
    }

    /// Same searcher without a transposition cache.
    #[must_use]
    pub fn with_cache_disabled(mut self) -> Self {
        self.cache = TranspositionCache::new(0);
        self
    }

    /// Time-bounded search for the mover's action.
    ///
    /// Depth 1 always completes. Each further depth up to `max_depth` starts
    /// only while more than the deepening threshold is left; beyond the
    /// [`depth_ceiling`] the projected iteration time must fit as well. An
    /// iteration cut by the deadline is thrown away.
    pub fn search(&mut self, state: &GameState) -> SearchResult {
        let deadline = self.budget.start();
        self.reset(state);

        let board = &state.board;
        let branching = generate_slides(board).len() * board.empty_count();
        let ceiling = depth_ceiling(state.phase(), branching);

        let (mut action, mut value) = self.search_root(board, 1);
        let mut completed = 1;
        let mut previous = Duration::ZERO;
        let mut last = deadline.elapsed();
        self.log_depth(1, value, &deadline);

        for depth in 2..=self.max_depth {
            let remaining = deadline.remaining();
            if remaining < self.deepen_threshold {
                break;
            }
            if depth > ceiling && project_next(previous, last) > remaining {
                break;
            }

            let started = deadline.elapsed();
            self.deadline = Some(deadline);
            let (candidate, candidate_value) = self.search_root(board, depth);
            if self.stopped {
                break;
            }
            action = candidate;
            value = candidate_value;
            completed = depth;
            previous = last;
            last = deadline.elapsed().saturating_sub(started);
            self.log_depth(depth, value, &deadline);
        }
        self.deadline = None;

        if completed < 2 && self.max_depth >= 2 {
            warn!(
                target: "entropy::search",
                ceiling,
                elapsed_ms = deadline.elapsed().as_millis() as u64,
                "search cut before depth 2"
            );
        }

        self.result(action, value, completed, deadline.elapsed())
    }

    /// Full-window search to exactly `depth` plies, ignoring the clock.
    pub fn search_depth(&mut self, state: &GameState, depth: u8) -> SearchResult {
        let start = Instant::now();
        self.reset(state);
        let depth = depth.max(1);
        let (action, value) = self.search_root(&state.board, depth);
        self.result(action, value, depth, start.elapsed())
    }

    fn reset(&mut self, state: &GameState) {
        self.cache.clear();
        self.lines = LineScoreCache::new();
        self.deadline = None;
        self.stopped = false;
        self.announced = state.announced;
        self.nodes = 0;
        self.cutoffs = 0;
    }

    fn result(&self, action: MoverAction, value: f64, depth: u8, elapsed: Duration) -> SearchResult {
        SearchResult {
            action,
            value,
            depth,
            nodes: self.nodes,
            elapsed,
            stats: SearchStats {
                cache_hits: self.cache.hits(),
                cache_misses: self.cache.misses(),
                line_hits: self.lines.hits(),
                line_misses: self.lines.misses(),
                cutoffs: self.cutoffs,
            },
        }
    }

    fn log_depth(&self, depth: u8, value: f64, deadline: &Deadline) {
        debug!(
            target: "entropy::search",
            depth,
            value,
            nodes = self.nodes,
            elapsed_ms = deadline.elapsed().as_millis() as u64,
            cache_hits = self.cache.hits(),
            "depth complete"
        );
    }

    // =========================================================================
    // Tree walk
    // =========================================================================

    /// Root of the tree: the first strictly better action wins.
    fn search_root(&mut self, board: &Board, depth: u8) -> (MoverAction, f64) {
        self.stopped = false;
        let pending = Some(self.announced);
        let mut best_action = MoverAction::Pass;
        let mut best = f64::NEG_INFINITY;

        for action in self.ordered_actions(board) {
            let child = apply_action(board, action);
            let value = self.node(&child, Role::Placer, pending, depth - 1, best, f64::INFINITY);
            if self.stopped {
                break;
            }
            if value > best {
                best = value;
                best_action = action;
            }
        }
        (best_action, best)
    }

    /// Fail-hard alpha-beta. Always returns a value inside `[alpha, beta]`.
    fn node(
        &mut self,
        board: &Board,
        role: Role,
        pending: Option<Color>,
        depth: u8,
        alpha: f64,
        beta: f64,
    ) -> f64 {
        self.nodes += 1;

        if self.stopped || self.deadline.is_some_and(|d| d.expired()) {
            self.stopped = true;
            return self.static_eval(board, pending).clamp(alpha, beta);
        }

        let key = CacheKey::new(board, role, pending);
        if let Some(value) = self.cache.probe(&key, depth, alpha, beta) {
            return value;
        }

        let placer_color = match role {
            Role::Placer => self.placer_color(board, pending),
            Role::Mover => None,
        };
        let leaf = depth == 0
            || is_game_over(board)
            || (role == Role::Placer && placer_color.is_none());
        if leaf {
            let value = self.static_eval(board, pending);
            self.cache.store(key, depth, value, Bound::Exact);
            return value.clamp(alpha, beta);
        }

        let (value, bound) = match placer_color {
            Some(color) => self.placer_node(board, color, depth, alpha, beta),
            None => self.mover_node(board, pending, depth, alpha, beta),
        };
        if !self.stopped {
            self.cache.store(key, depth, value, bound);
        }
        value
    }

    fn mover_node(
        &mut self,
        board: &Board,
        pending: Option<Color>,
        depth: u8,
        alpha: f64,
        beta: f64,
    ) -> (f64, Bound) {
        let mut value = alpha;
        for action in self.ordered_actions(board) {
            let child = apply_action(board, action);
            let score = self.node(&child, Role::Placer, pending, depth - 1, value, beta);
            if self.stopped {
                break;
            }
            if score >= beta {
                self.cutoffs += 1;
                return (beta, Bound::Lower);
            }
            if score > value {
                value = score;
            }
        }
        let bound = if value <= alpha { Bound::Upper } else { Bound::Exact };
        (value, bound)
    }

    fn placer_node(
        &mut self,
        board: &Board,
        color: Color,
        depth: u8,
        alpha: f64,
        beta: f64,
    ) -> (f64, Bound) {
        let mut value = beta;
        for pos in self.ordered_placements(board, color) {
            let child = with_token(board, pos, color);
            let score = self.node(&child, Role::Mover, None, depth - 1, alpha, value);
            if self.stopped {
                break;
            }
            if score <= alpha {
                self.cutoffs += 1;
                return (alpha, Bound::Upper);
            }
            if score < value {
                value = score;
            }
        }
        let bound = if value >= beta { Bound::Lower } else { Bound::Exact };
        (value, bound)
    }

    /// Color the placer drops at this node, if it can be known or assumed.
    fn placer_color(&self, board: &Board, pending: Option<Color>) -> Option<Color> {
        pending.or_else(|| match self.future_placer {
            FuturePlacerModel::ModalColor => board.modal_remaining_color(),
            FuturePlacerModel::Horizon => None,
        })
    }

    fn static_eval(&mut self, board: &Board, pending: Option<Color>) -> f64 {
        let next = pending
            .or_else(|| board.modal_remaining_color())
            .unwrap_or(self.announced);
        evaluate(&mut self.lines, board, next, &self.weights)
    }

    // =========================================================================
    // Move ordering
    // =========================================================================

    /// Pass plus every slide, by descending immediate score delta. Pass sits
    /// ahead of the zero-delta slides; ties keep generation order.
    fn ordered_actions(&mut self, board: &Board) -> Vec<MoverAction> {
        let slides = generate_slides(board);
        let mut scored: Vec<(MoverAction, i32)> = Vec::with_capacity(slides.len() + 1);
        scored.push((MoverAction::Pass, 0));
        for slide in slides {
            let delta = self.lines.slide_delta(board, slide);
            scored.push((MoverAction::Slide(slide), delta));
        }
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(action, _)| action).collect()
    }

    /// Empty cells by descending potential destroyed.
    fn ordered_placements(&self, board: &Board, color: Color) -> Vec<Pos> {
        let mut scored: Vec<(Pos, f64)> = placement_cells(board)
            .into_iter()
            .map(|pos| (pos, potential_reduction(board, pos, color)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.into_iter().map(|(pos, _)| pos).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TOTAL_CELLS;
    use crate::eval::slide_delta;
    use crate::rules::is_legal_slide;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn mover(board: Board, announced: Color) -> GameState {
        GameState::new(board, announced, Role::Mover)
    }

    fn random_board(rng: &mut StdRng, fill: f64) -> Board {
        let mut board = Board::new();
        for idx in 0..TOTAL_CELLS {
            if rng.gen_bool(fill) {
                board.place(Pos::from_index(idx), Color::ALL[rng.gen_range(0..7)]);
            }
        }
        board
    }

    fn assert_legal(board: &Board, action: MoverAction) {
        if let MoverAction::Slide(slide) = action {
            assert!(is_legal_slide(board, slide), "{slide} on\n{board}");
        }
    }

    /// Two reds on row a and a third that can slide up into it.
    fn rrr_board() -> Board {
        let mut board = Board::new();
        board.place(Pos::new(0, 0), Color::Red);
        board.place(Pos::new(0, 1), Color::Red);
        board.place(Pos::new(3, 2), Color::Red);
        board
    }

    #[test]
    fn test_depth_ceiling() {
        assert_eq!(depth_ceiling(Phase::Early, 20_000), 1);
        assert_eq!(depth_ceiling(Phase::Early, 5_000), 2);
        assert_eq!(depth_ceiling(Phase::Mid, 1_000), 3);
        assert_eq!(depth_ceiling(Phase::Mid, 100), 4);
        assert_eq!(depth_ceiling(Phase::Late, 50_000), 3);
    }

    #[test]
    fn test_project_next() {
        let ms = Duration::from_millis;
        let close = |a: Duration, b: Duration| a.abs_diff(b) < Duration::from_micros(1);
        assert_eq!(project_next(Duration::ZERO, ms(10)), ms(30));
        assert!(close(project_next(ms(10), ms(20)), ms(40)));
        // Growth is clamped to 1.5..=5
        assert!(close(project_next(ms(10), ms(10)), ms(15)));
        assert!(close(project_next(ms(1), ms(100)), ms(500)));
    }

    #[test]
    fn test_deepens_past_ceiling_with_time_left() {
        let mut rng = StdRng::seed_from_u64(44);
        let board = random_board(&mut rng, 0.4);
        let state = mover(board, Color::Purple);
        let branching = generate_slides(&board).len() * board.empty_count();
        let ceiling = depth_ceiling(state.phase(), branching);
        assert!(ceiling < 3, "ceiling {ceiling}");

        let config = EngineConfig::default()
            .with_time_budget_ms(120_000)
            .with_max_depth(3);
        let result = Searcher::new(&config).search(&state);
        assert_eq!(result.depth, 3);
        assert_legal(&board, result.action);
    }

    #[test]
    fn test_deadline_bounds_deeper_iterations() {
        let mut rng = StdRng::seed_from_u64(45);
        let board = random_board(&mut rng, 0.4);
        let config = EngineConfig::default().with_time_budget_ms(1_000);
        let result = Searcher::new(&config).search(&mover(board, Color::Red));
        assert!(result.depth >= 1);
        assert!(result.elapsed < Duration::from_millis(1_000), "{:?}", result.elapsed);
        assert_legal(&board, result.action);
    }

    #[test]
    fn test_completing_rrr_is_chosen() {
        let board = rrr_board();
        for depth in 1..=2 {
            let mut searcher = Searcher::new(&EngineConfig::default());
            let result = searcher.search_depth(&mover(board, Color::Blue), depth);
            let slide = result.action.slide().expect("a scoring slide exists");
            assert!(slide_delta(&board, slide) > 0, "depth {depth}: {slide}");
        }
    }

    #[test]
    fn test_tiny_deadline_still_returns_legal_move() {
        let mut rng = StdRng::seed_from_u64(3);
        let config = EngineConfig::default().with_time_budget_ms(1);
        for _ in 0..5 {
            let board = random_board(&mut rng, 0.3);
            let mut searcher = Searcher::new(&config);
            let result = searcher.search(&mover(board, Color::Green));
            assert_eq!(result.depth, 1);
            assert_legal(&board, result.action);
        }
    }

    #[test]
    fn test_passes_without_slides() {
        let mut full = Board::new();
        for idx in 0..TOTAL_CELLS {
            full.place(Pos::from_index(idx), Color::ALL[idx % 7]);
        }
        let mut searcher = Searcher::new(&EngineConfig::default().with_max_depth(2));
        assert_eq!(searcher.search(&mover(full, Color::Red)).action, MoverAction::Pass);
        assert_eq!(
            searcher.search(&mover(Board::new(), Color::Red)).action,
            MoverAction::Pass
        );
    }

    #[test]
    fn test_cache_does_not_change_fixed_depth_results() {
        let mut rng = StdRng::seed_from_u64(21);
        let config = EngineConfig::default();
        for _ in 0..4 {
            let board = random_board(&mut rng, 0.8);
            let state = mover(board, Color::ALL[rng.gen_range(0..7)]);

            let cached = Searcher::new(&config).search_depth(&state, 3);
            let uncached = Searcher::new(&config)
                .with_cache_disabled()
                .search_depth(&state, 3);

            assert_eq!(cached.action, uncached.action);
            assert_eq!(cached.value, uncached.value);
            assert_eq!(uncached.stats.cache_hits + uncached.stats.cache_misses, 0);
            assert!(cached.stats.cache_hits + cached.stats.cache_misses > 0);
        }
    }

    #[test]
    fn test_small_cache_still_agrees() {
        let mut rng = StdRng::seed_from_u64(8);
        let board = random_board(&mut rng, 0.75);
        let state = mover(board, Color::Yellow);

        let tiny = EngineConfig::default().with_cache_capacity(16);
        let evicting = Searcher::new(&tiny).search_depth(&state, 3);
        let uncached = Searcher::new(&tiny)
            .with_cache_disabled()
            .search_depth(&state, 3);
        assert_eq!(evicting.action, uncached.action);
        assert_eq!(evicting.value, uncached.value);
    }

    #[test]
    fn test_horizon_model_agrees_with_and_without_cache() {
        let mut rng = StdRng::seed_from_u64(17);
        let config = EngineConfig::default().with_future_placer(FuturePlacerModel::Horizon);
        let board = random_board(&mut rng, 0.8);
        let state = mover(board, Color::White);

        let cached = Searcher::new(&config).search_depth(&state, 4);
        let uncached = Searcher::new(&config)
            .with_cache_disabled()
            .search_depth(&state, 4);
        assert_eq!(cached.action, uncached.action);
        assert_eq!(cached.value, uncached.value);
    }

    #[test]
    fn test_generous_budget_reaches_ceiling() {
        let mut rng = StdRng::seed_from_u64(31);
        let board = random_board(&mut rng, 0.85);
        let config = EngineConfig::default()
            .with_time_budget_ms(30_000)
            .with_max_depth(2);
        let result = Searcher::new(&config).search(&mover(board, Color::Blue));
        assert_eq!(result.depth, 2);
        assert!(result.nodes > 0);
        assert_legal(&board, result.action);
    }

    #[test]
    fn test_results_are_legal_on_random_boards() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..10 {
            let board = random_board(&mut rng, 0.6);
            let result =
                Searcher::new(&EngineConfig::default()).search_depth(&mover(board, Color::Red), 2);
            assert_legal(&board, result.action);
        }
    }
}
