//! Transposition cache for the mover search
//!
//! Results are keyed by the full board plus the side to move and the color
//! still pending from the announcement. Capacity is fixed; once full, the
//! least recently used entry is evicted.
//!
//! An entry is only reused at the remaining depth it was computed for, and
//! bound entries are only reused when they decide the current window. With
//! a fail-hard search this makes cached and uncached runs return the same
//! values at any fixed depth.
//!
//! # Example
//!
//! ```
//! use entropy::board::Board;
//! use entropy::search::{Bound, CacheKey, TranspositionCache};
//! use entropy::Role;
//!
//! let mut cache = TranspositionCache::new(16);
//! let key = CacheKey::new(&Board::new(), Role::Mover, None);
//! cache.store(key, 2, 12.5, Bound::Exact);
//! assert_eq!(cache.probe(&key, 2, f64::NEG_INFINITY, f64::INFINITY), Some(12.5));
//! assert_eq!(cache.probe(&key, 3, f64::NEG_INFINITY, f64::INFINITY), None);
//! ```

use rustc_hash::FxHashMap;

use crate::board::{Board, BoardKey, Color};
use crate::state::Role;

/// How a stored value relates to the true value of the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The search completed inside its window
    Exact,
    /// True value >= stored value (beta cutoff)
    Lower,
    /// True value <= stored value (nothing beat alpha)
    Upper,
}

/// Node identity for the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    board: BoardKey,
    role: Role,
    pending: Option<Color>,
}

impl CacheKey {
    /// `pending` is the announced color while no placement has used it yet.
    pub fn new(board: &Board, role: Role, pending: Option<Color>) -> Self {
        Self {
            board: board.key(),
            role,
            pending,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    key: CacheKey,
    depth: u8,
    value: f64,
    bound: Bound,
    prev: usize,
    next: usize,
}

const NIL: usize = usize::MAX;

/// Bounded LRU map from [`CacheKey`] to search results.
///
/// Slots live in a vector threaded by a doubly linked recency list; the
/// head is the most recently used slot.
#[derive(Debug)]
pub struct TranspositionCache {
    index: FxHashMap<CacheKey, usize>,
    slots: Vec<Slot>,
    head: usize,
    tail: usize,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl TranspositionCache {
    /// A capacity of zero disables the cache.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            index: FxHashMap::default(),
            slots: Vec::with_capacity(capacity.min(1 << 16)),
            head: NIL,
            tail: NIL,
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.head = NIL;
        self.tail = NIL;
        self.hits = 0;
        self.misses = 0;
    }

    /// Look up a node searched with window `(alpha, beta)` at `depth`.
    ///
    /// Returns the value a fail-hard search would return for that window,
    /// or `None` when the entry is missing, was computed at another depth,
    /// or its bound does not settle the window.
    pub fn probe(&mut self, key: &CacheKey, depth: u8, alpha: f64, beta: f64) -> Option<f64> {
        if self.capacity == 0 {
            return None;
        }
        let found = self.index.get(key).and_then(|&idx| {
            let slot = &self.slots[idx];
            if slot.depth != depth {
                return None;
            }
            let value = match slot.bound {
                Bound::Exact => slot.value.clamp(alpha, beta),
                Bound::Lower if slot.value >= beta => beta,
                Bound::Upper if slot.value <= alpha => alpha,
                _ => return None,
            };
            Some((idx, value))
        });

        match found {
            Some((idx, value)) => {
                self.hits += 1;
                self.touch(idx);
                Some(value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Insert or overwrite the entry for `key`, evicting the least recently
    /// used entry when full.
    pub fn store(&mut self, key: CacheKey, depth: u8, value: f64, bound: Bound) {
        if self.capacity == 0 {
            return;
        }

        if let Some(&idx) = self.index.get(&key) {
            let slot = &mut self.slots[idx];
            slot.depth = depth;
            slot.value = value;
            slot.bound = bound;
            self.touch(idx);
            return;
        }

        let idx = if self.slots.len() < self.capacity {
            self.slots.push(Slot {
                key,
                depth,
                value,
                bound,
                prev: NIL,
                next: NIL,
            });
            self.slots.len() - 1
        } else {
            // Reuse the least recently used slot
            let idx = self.tail;
            self.unlink(idx);
            let evicted = self.slots[idx].key;
            self.index.remove(&evicted);
            self.slots[idx] = Slot {
                key,
                depth,
                value,
                bound,
                prev: NIL,
                next: NIL,
            };
            idx
        };

        self.index.insert(key, idx);
        self.push_front(idx);
    }

    fn touch(&mut self, idx: usize) {
        if self.head != idx {
            self.unlink(idx);
            self.push_front(idx);
        }
    }

    fn unlink(&mut self, idx: usize) {
        let Slot { prev, next, .. } = self.slots[idx];
        if prev == NIL {
            self.head = next;
        } else {
            self.slots[prev].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.slots[next].prev = prev;
        }
        self.slots[idx].prev = NIL;
        self.slots[idx].next = NIL;
    }

    fn push_front(&mut self, idx: usize) {
        self.slots[idx].prev = NIL;
        self.slots[idx].next = self.head;
        if self.head != NIL {
            self.slots[self.head].prev = idx;
        }
        self.head = idx;
        if self.tail == NIL {
            self.tail = idx;
        }
    }
}
