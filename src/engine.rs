//! Decision engine entry points
//!
//! The engine reacts to one [`GameState`] at a time:
//!
//! 1. **Mover**: iterative-deepening alpha-beta search over slides and pass
//! 2. **Placer**: the configured placement strategy over the empty cells
//!
//! Every call owns its caches and deadline; nothing carries over between
//! decisions. Results come back with enough statistics to log or tune.
//!
//! # Example
//!
//! ```
//! use entropy::board::{Board, Color, Pos};
//! use entropy::{Decision, Engine, EngineConfig, GameState, Role};
//!
//! let mut board = Board::new();
//! board.place(Pos::new(3, 3), Color::Red);
//!
//! let mut engine = Engine::with_config(EngineConfig::default().with_max_depth(2));
//!
//! let mover = engine.decide_mover_turn(&GameState::new(board, Color::Red, Role::Mover));
//! println!("mover plays {}", mover.action);
//!
//! match engine.decide(&GameState::new(board, Color::Blue, Role::Placer)) {
//!     Decision::Placer(placer) => assert!(placer.placement.is_some()),
//!     Decision::Mover(_) => unreachable!(),
//! }
//! ```

use std::fmt;
use std::time::Instant;

use tracing::{info, warn};

use crate::config::{EngineConfig, PlacerStrategy};
use crate::rules::{generate_slides, MoverAction, Placement};
use crate::search::{SearchStats, Searcher};
use crate::state::{GameState, Role};
use crate::strategy::choose_placement;

/// Mover decision with search statistics.
#[derive(Debug, Clone)]
pub struct MoverDecision {
    pub action: MoverAction,
    /// Evaluation of the chosen action
    pub value: f64,
    /// Deepest completed search depth (0 when there was nothing to search)
    pub depth: u8,
    pub nodes: u64,
    pub time_ms: u64,
    pub stats: SearchStats,
}

impl MoverDecision {
    /// Forced pass: no token can slide
    fn forced_pass(time_ms: u64) -> Self {
        Self {
            action: MoverAction::Pass,
            value: 0.0,
            depth: 0,
            nodes: 0,
            time_ms,
            stats: SearchStats::default(),
        }
    }
}

/// Placer decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacerDecision {
    /// `None` only when the board has no empty cell
    pub placement: Option<Placement>,
    pub strategy: PlacerStrategy,
    /// Combined score of the chosen cell under `strategy`
    pub score: f64,
    pub time_ms: u64,
}

/// Outcome of [`Engine::decide`]
#[derive(Debug, Clone)]
pub enum Decision {
    Mover(MoverDecision),
    Placer(PlacerDecision),
}

impl Decision {
    pub fn role(&self) -> Role {
        match self {
            Decision::Mover(_) => Role::Mover,
            Decision::Placer(_) => Role::Placer,
        }
    }
}

/// Move notation: a slide, `pass`, or a cell address.
impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Mover(d) => fmt::Display::fmt(&d.action, f),
            Decision::Placer(PlacerDecision {
                placement: Some(placement),
                ..
            }) => fmt::Display::fmt(placement, f),
            Decision::Placer(_) => f.write_str("none"),
        }
    }
}

/// The decision engine.
///
/// Holds configuration only; per-decision state is created inside each call.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Engine with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Engine configured from `ENTROPY_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::with_config(EngineConfig::from_env())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Dispatch on the state's active role.
    pub fn decide(&mut self, state: &GameState) -> Decision {
        match state.role {
            Role::Mover => Decision::Mover(self.decide_mover_turn(state)),
            Role::Placer => Decision::Placer(self.decide_placer_turn(state)),
        }
    }

    /// Pick a slide or pass for the mover within the time budget.
    ///
    /// Never fails: with no legal slide the answer is a pass, and the first
    /// search depth always completes.
    pub fn decide_mover_turn(&mut self, state: &GameState) -> MoverDecision {
        let start = Instant::now();
        warn_on_bag_overflow(state);

        let decision = if generate_slides(&state.board).is_empty() {
            MoverDecision::forced_pass(start.elapsed().as_millis() as u64)
        } else {
            let result = Searcher::new(&self.config).search(state);
            MoverDecision {
                action: result.action,
                value: result.value,
                depth: result.depth,
                nodes: result.nodes,
                time_ms: start.elapsed().as_millis() as u64,
                stats: result.stats,
            }
        };

        info!(
            target: "entropy::engine",
            role = %Role::Mover,
            action = %decision.action,
            depth = decision.depth,
            nodes = decision.nodes,
            elapsed_ms = decision.time_ms,
            "mover decision"
        );
        decision
    }

    /// Pick the cell for the announced color.
    pub fn decide_placer_turn(&self, state: &GameState) -> PlacerDecision {
        let start = Instant::now();
        warn_on_bag_overflow(state);

        let choice = choose_placement(&state.board, state.announced, &self.config);
        let decision = PlacerDecision {
            placement: choice.map(|c| Placement::new(c.pos, state.announced)),
            strategy: self.config.placer_strategy,
            score: choice.map_or(0.0, |c| c.score),
            time_ms: start.elapsed().as_millis() as u64,
        };

        match decision.placement {
            Some(placement) => info!(
                target: "entropy::strategy",
                role = %Role::Placer,
                cell = %placement,
                color = %state.announced,
                strategy = ?decision.strategy,
                elapsed_ms = decision.time_ms,
                "placer decision"
            ),
            None => warn!(target: "entropy::strategy", "no empty cell to place on"),
        }
        decision
    }
}

fn warn_on_bag_overflow(state: &GameState) {
    if let Some((color, count)) = state.board.bag_overflow() {
        warn!(
            target: "entropy::engine",
            %color,
            count,
            "board holds more tokens of one color than the bag"
        );
    }
}
