//! Game rules for Entropy
//!
//! This module implements:
//! - Move types and notation (slide, pass, placement)
//! - Slide and placement generation
//! - Pure move application (checked variants for external moves)
//! - The end-of-game test

pub mod movegen;
pub mod moves;

// Re-exports for convenient access
pub use movegen::{
    apply_action, apply_placement, apply_slide, checked_placement, checked_slide, generate_slides,
    is_game_over, is_legal_slide, placement_cells, slides_from, with_token, DIRECTIONS,
};
pub use moves::{MoverAction, Placement, Slide};
