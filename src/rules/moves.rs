//! Move types and their textual notation
//!
//! - slide: `<from>-<to>`, e.g. `c4-c7`
//! - pass: `pass`
//! - placement: a single cell address, e.g. `d4`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Color, Pos};
use crate::error::EngineError;

/// The mover's slide of one token along a row or column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slide {
    pub from: Pos,
    pub to: Pos,
}

impl Slide {
    #[inline]
    pub fn new(from: Pos, to: Pos) -> Self {
        Self { from, to }
    }

    /// True when the slide stays within one row
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.from.row == self.to.row
    }
}

impl fmt::Display for Slide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl FromStr for Slide {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| EngineError::InvalidNotation(s.to_string()))?;
        Ok(Slide::new(from.parse()?, to.parse()?))
    }
}

/// What the mover does on its turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoverAction {
    Slide(Slide),
    Pass,
}

impl MoverAction {
    #[inline]
    pub fn is_pass(&self) -> bool {
        matches!(self, MoverAction::Pass)
    }

    #[inline]
    pub fn slide(&self) -> Option<Slide> {
        match self {
            MoverAction::Slide(slide) => Some(*slide),
            MoverAction::Pass => None,
        }
    }
}

impl From<Slide> for MoverAction {
    fn from(slide: Slide) -> Self {
        MoverAction::Slide(slide)
    }
}

impl fmt::Display for MoverAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoverAction::Slide(slide) => fmt::Display::fmt(slide, f),
            MoverAction::Pass => f.write_str("pass"),
        }
    }
}

impl FromStr for MoverAction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("pass") {
            Ok(MoverAction::Pass)
        } else {
            s.parse().map(MoverAction::Slide)
        }
    }
}

/// The placer's drop of the announced color on an empty cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    pub pos: Pos,
    pub color: Color,
}

impl Placement {
    #[inline]
    pub fn new(pos: Pos, color: Color) -> Self {
        Self { pos, color }
    }
}

/// Only the cell is rendered; the color is implied by the announcement.
impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.pos, f)
    }
}
