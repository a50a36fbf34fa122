//! Boundary errors
//!
//! Only input validation can fail. Once a [`GameState`](crate::GameState) exists,
//! every decision call produces a move.

use thiserror::Error;

use crate::board::{Color, Pos};
use crate::rules::Slide;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("board must have 49 cells, got {len}")]
    WrongBoardLength { len: usize },
    #[error("unknown cell symbol {symbol:?} at index {index}")]
    UnknownSymbol { index: usize, symbol: String },
    #[error("announced color is missing")]
    MissingAnnouncedColor,
    #[error("unknown color {0:?}")]
    UnknownColor(String),
    #[error("invalid cell address {0:?}")]
    InvalidAddress(String),
    #[error("invalid move notation {0:?}")]
    InvalidNotation(String),
    #[error("{count} {color} tokens on board, bag only holds 7")]
    BagOverflow { color: Color, count: u8 },
    #[error("slide {slide} is not legal on this board")]
    IllegalSlide { slide: Slide },
    #[error("cell {pos} is already occupied")]
    OccupiedCell { pos: Pos },
}

pub type Result<T> = std::result::Result<T, EngineError>;
