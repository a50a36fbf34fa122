//! Decision engine for Entropy, the 7x7 palindrome board game
//!
//! Two roles alternate on a 7x7 board with seven colors of seven tokens:
//! - The placer drops a token of the announced color on any empty cell
//! - The mover slides one token along a row or column until blocked, or passes
//!
//! Points come from palindromic color sequences in every row and column.
//! The mover wants them, the placer wants to prevent them.
//!
//! # Architecture
//!
//! - [`board`]: Board, colors, positions and bag accounting
//! - [`rules`]: Move types, notation, generation and application
//! - [`eval`]: Palindrome scoring and the mover's heuristic evaluation
//! - [`search`]: Time-bounded alpha-beta search for the mover
//! - [`strategy`]: Placement strategies for the placer
//! - [`engine`]: Entry points tying it all together
//!
//! # Quick Start
//!
//! ```
//! use entropy::{Engine, EngineConfig, GameState, Role};
//!
//! let mut cells = vec![""; 49];
//! cells[0] = "R";
//! cells[2] = "R";
//! cells[30] = "R";
//!
//! let state = GameState::from_symbols(&cells, Some("G"), Role::Mover).unwrap();
//! let mut engine = Engine::with_config(EngineConfig::default().with_max_depth(2));
//! let decision = engine.decide(&state);
//! println!("{decision}");
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod state;
pub mod strategy;

// Re-export commonly used types for convenience
pub use board::{Board, Color, Phase, Pos, BOARD_SIZE};
pub use config::{EngineConfig, FuturePlacerModel, PlacerStrategy};
pub use engine::{Decision, Engine, MoverDecision, PlacerDecision};
pub use error::{EngineError, Result};
pub use rules::{MoverAction, Placement, Slide};
pub use state::{GameState, Role, StateInput};
