//! Mover search for Entropy
//!
//! Contains:
//! - Wall-clock budgeting
//! - Transposition cache with LRU eviction
//! - Alpha-beta search with iterative deepening

pub mod alphabeta;
pub mod cache;
pub mod deadline;

pub use alphabeta::{depth_ceiling, SearchResult, SearchStats, Searcher};
pub use cache::{Bound, CacheKey, TranspositionCache};
pub use deadline::{Deadline, TimeBudget};
