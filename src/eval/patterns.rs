//! Palindrome shapes and the score table
//!
//! A color sequence is reduced to its signature by relabeling colors in order
//! of first appearance (Red, Green, Red → `ABA`). The 30 palindromic shapes of
//! length 2..=7 each carry a fixed number of points, which already include
//! every palindrome nested inside the shape.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::board::{Color, COLOR_COUNT};

/// Relabeled color sequence, packed 3 bits per position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    len: u8,
    code: u32,
}

impl Signature {
    /// Signature of a concrete color sequence (at most 7 long).
    pub fn of(seq: &[Color]) -> Self {
        debug_assert!(seq.len() <= 7);
        let mut labels: [Option<u8>; COLOR_COUNT] = [None; COLOR_COUNT];
        let mut next_label = 0u8;
        let mut code = 0u32;
        for (i, color) in seq.iter().enumerate() {
            let label = *labels[color.index()].get_or_insert_with(|| {
                next_label += 1;
                next_label - 1
            });
            code |= u32::from(label) << (3 * i);
        }
        Self {
            len: seq.len() as u8,
            code,
        }
    }

    /// Signature of a letter pattern such as `"ABCBA"`.
    fn from_letters(letters: &str) -> Self {
        let mut code = 0u32;
        for (i, b) in letters.bytes().enumerate() {
            code |= u32::from(b - b'A') << (3 * i);
        }
        Self {
            len: letters.len() as u8,
            code,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

macro_rules! pattern_shapes {
    ($($shape:ident => $points:expr),* $(,)?) => {
        /// The palindromic shapes that score points
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum PatternShape {
            $($shape),*
        }

        impl PatternShape {
            pub const ALL: [PatternShape; 30] = [$(PatternShape::$shape),*];

            /// Letter form of the shape, e.g. `"ABBA"`
            pub fn letters(self) -> &'static str {
                match self {
                    $(PatternShape::$shape => stringify!($shape)),*
                }
            }

            pub fn points(self) -> u32 {
                match self {
                    $(PatternShape::$shape => $points),*
                }
            }
        }
    };
}

pattern_shapes! {
    AA => 2,
    ABA => 3,
    AAA => 7,
    ABBA => 6,
    AAAA => 16,
    ABCBA => 8,
    AABAA => 12,
    ABABA => 14,
    ABBBA => 12,
    AAAAA => 30,
    AABBAA => 16,
    ABAABA => 18,
    ABBBBA => 22,
    ABCCBA => 12,
    AAAAAA => 50,
    ABCDCBA => 15,
    AAABAAA => 29,
    AABABAA => 25,
    AABBBAA => 23,
    AABCBAA => 19,
    ABAAABA => 25,
    ABABABA => 27,
    ABACABA => 21,
    ABBABBA => 27,
    ABBBBBA => 37,
    ABBCBBA => 19,
    ABCACBA => 15,
    ABCBCBA => 21,
    ABCCCBA => 19,
    AAAAAAA => 77,
}

impl PatternShape {
    #[inline]
    pub fn signature(self) -> Signature {
        Signature::from_letters(self.letters())
    }

    #[inline]
    pub fn length(self) -> usize {
        self.letters().len()
    }
}

/// Signature → shape, built once from [`PatternShape::ALL`].
static SHAPE_INDEX: Lazy<FxHashMap<Signature, PatternShape>> = Lazy::new(|| {
    PatternShape::ALL
        .iter()
        .map(|&shape| (shape.signature(), shape))
        .collect()
});

/// Score table lookups
pub struct ScoreTable;

impl ScoreTable {
    /// Shape matching a signature, if it is one of the 30 scored shapes
    #[inline]
    pub fn shape(signature: Signature) -> Option<PatternShape> {
        SHAPE_INDEX.get(&signature).copied()
    }

    /// Points for a palindromic signature; unknown shapes score their length.
    #[inline]
    pub fn points(signature: Signature) -> u32 {
        Self::shape(signature).map_or(signature.len() as u32, PatternShape::points)
    }
}

/// Weights of near-complete palindrome opportunities, by how many empty
/// cells separate two matching endpoints.
pub struct PotentialTier;

impl PotentialTier {
    /// One empty cell between matching endpoints
    pub const ALMOST_COMPLETE: f64 = 10.0;
    /// Two empty cells
    pub const TWO_MOVE: f64 = 5.0;
    /// Three empty cells
    pub const THREE_MOVE: f64 = 2.0;

    #[inline]
    pub fn weight(empties: usize) -> f64 {
        match empties {
            1 => Self::ALMOST_COMPLETE,
            2 => Self::TWO_MOVE,
            3 => Self::THREE_MOVE,
            _ => 0.0,
        }
    }
}
