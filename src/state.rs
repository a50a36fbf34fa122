//! Game state handed to the engine, and its validating boundary form
//!
//! Callers usually deserialize a [`StateInput`] (one symbol per cell, `""`
//! for empty) and convert it with `GameState::try_from`. Nothing past that
//! conversion can fail.
//!
//! ```
//! use entropy::{GameState, Role};
//!
//! let mut cells = vec![""; 49];
//! cells[24] = "R";
//! let state = GameState::from_symbols(&cells, Some("b"), Role::Mover).unwrap();
//! assert_eq!(state.board.filled_count(), 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Color, Phase, Pos, TOTAL_CELLS};
use crate::error::{EngineError, Result};

/// Whose turn it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Drops the announced color on an empty cell
    Placer,
    /// Slides one token or passes
    Mover,
}

impl Role {
    #[inline]
    pub fn other(self) -> Role {
        match self {
            Role::Placer => Role::Mover,
            Role::Mover => Role::Placer,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Placer => "placer",
            Role::Mover => "mover",
        })
    }
}

/// One decision's worth of input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    pub board: Board,
    /// Color the placer must drop next
    pub announced: Color,
    pub role: Role,
}

impl GameState {
    pub fn new(board: Board, announced: Color, role: Role) -> Self {
        Self {
            board,
            announced,
            role,
        }
    }

    /// Build a state from per-cell symbols (`""` marks an empty cell).
    pub fn from_symbols<S: AsRef<str>>(
        cells: &[S],
        announced: Option<&str>,
        role: Role,
    ) -> Result<Self> {
        if cells.len() != TOTAL_CELLS {
            return Err(EngineError::WrongBoardLength { len: cells.len() });
        }

        let mut board = Board::new();
        for (index, symbol) in cells.iter().enumerate() {
            if let Some(color) = parse_cell(index, symbol.as_ref())? {
                board.place(Pos::from_index(index), color);
            }
        }

        let announced = announced
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(EngineError::MissingAnnouncedColor)?
            .parse()?;

        Ok(Self::new(board, announced, role))
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        Phase::from_filled(self.board.filled_count())
    }

    /// Reject boards holding more than seven tokens of one color.
    ///
    /// The engine itself only warns about such boards.
    pub fn check_bag(&self) -> Result<()> {
        match self.board.bag_overflow() {
            Some((color, count)) => Err(EngineError::BagOverflow { color, count }),
            None => Ok(()),
        }
    }
}

fn parse_cell(index: usize, symbol: &str) -> Result<Option<Color>> {
    let trimmed = symbol.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let mut chars = trimmed.chars();
    match (chars.next().and_then(Color::from_symbol), chars.next()) {
        (Some(color), None) => Ok(Some(color)),
        _ => Err(EngineError::UnknownSymbol {
            index,
            symbol: symbol.to_string(),
        }),
    }
}

/// Serialized form of a [`GameState`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateInput {
    pub board: Vec<String>,
    #[serde(default)]
    pub announced: Option<String>,
    pub role: Role,
}

impl TryFrom<StateInput> for GameState {
    type Error = EngineError;

    fn try_from(input: StateInput) -> Result<Self> {
        GameState::from_symbols(&input.board, input.announced.as_deref(), input.role)
    }
}

impl From<&GameState> for StateInput {
    fn from(state: &GameState) -> Self {
        StateInput {
            board: state
                .board
                .cells()
                .iter()
                .map(|cell| cell.map(|c| c.symbol().to_string()).unwrap_or_default())
                .collect(),
            announced: Some(state.announced.symbol().to_string()),
            role: state.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_cells() -> Vec<String> {
        vec![String::new(); TOTAL_CELLS]
    }

    #[test]
    fn test_from_symbols_builds_board() {
        let mut cells = empty_cells();
        cells[0] = "R".into();
        cells[48] = "w".into();
        let state = GameState::from_symbols(&cells, Some("G"), Role::Placer).unwrap();
        assert_eq!(state.board.get(Pos::new(0, 0)), Some(Color::Red));
        assert_eq!(state.board.get(Pos::new(6, 6)), Some(Color::White));
        assert_eq!(state.announced, Color::Green);
        assert_eq!(state.role, Role::Placer);
        assert_eq!(state.phase(), Phase::Early);
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        let cells = vec![String::new(); 48];
        assert_eq!(
            GameState::from_symbols(&cells, Some("R"), Role::Mover),
            Err(EngineError::WrongBoardLength { len: 48 })
        );
    }

    #[test]
    fn test_unknown_symbol_is_rejected() {
        let mut cells = empty_cells();
        cells[7] = "X".into();
        assert_eq!(
            GameState::from_symbols(&cells, Some("R"), Role::Mover),
            Err(EngineError::UnknownSymbol {
                index: 7,
                symbol: "X".into()
            })
        );

        cells[7] = "RR".into();
        assert!(matches!(
            GameState::from_symbols(&cells, Some("R"), Role::Mover),
            Err(EngineError::UnknownSymbol { index: 7, .. })
        ));
    }

    #[test]
    fn test_announced_color_is_required() {
        let cells = empty_cells();
        assert_eq!(
            GameState::from_symbols(&cells, None, Role::Mover),
            Err(EngineError::MissingAnnouncedColor)
        );
        assert_eq!(
            GameState::from_symbols(&cells, Some(" "), Role::Mover),
            Err(EngineError::MissingAnnouncedColor)
        );
        assert!(matches!(
            GameState::from_symbols(&cells, Some("Z"), Role::Mover),
            Err(EngineError::UnknownColor(_))
        ));
    }

    #[test]
    fn test_bag_check() {
        let mut board = Board::new();
        for idx in 0..8 {
            board.place(Pos::from_index(idx), Color::Blue);
        }
        let state = GameState::new(board, Color::Red, Role::Mover);
        assert_eq!(
            state.check_bag(),
            Err(EngineError::BagOverflow {
                color: Color::Blue,
                count: 8
            })
        );

        board.remove(Pos::from_index(0));
        assert!(GameState::new(board, Color::Red, Role::Mover).check_bag().is_ok());
    }

    #[test]
    fn test_state_input_json_boundary() {
        let mut cells: Vec<String> = empty_cells();
        cells[24] = "P".into();
        let json = serde_json::json!({
            "board": cells,
            "announced": "O",
            "role": "mover",
        });
        let input: StateInput = serde_json::from_value(json).unwrap();
        let state = GameState::try_from(input.clone()).unwrap();
        assert_eq!(state.board.get(Pos::new(3, 3)), Some(Color::Purple));
        assert_eq!(state.announced, Color::Orange);
        assert_eq!(StateInput::from(&state), input);

        let missing = serde_json::json!({ "board": empty_cells(), "role": "placer" });
        let input: StateInput = serde_json::from_value(missing).unwrap();
        assert_eq!(
            GameState::try_from(input),
            Err(EngineError::MissingAnnouncedColor)
        );
    }

    #[test]
    fn test_role_other() {
        assert_eq!(Role::Mover.other(), Role::Placer);
        assert_eq!(Role::Placer.to_string(), "placer");
    }
}
