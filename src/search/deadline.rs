//! Wall-clock budgeting
//!
//! The search polls a [`Deadline`] at every node; nothing ever blocks on it.

use std::time::{Duration, Instant};

use crate::config::EngineConfig;

/// Total time per decision and the part of it kept back for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBudget {
    pub total: Duration,
    pub buffer: Duration,
}

impl TimeBudget {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            total: Duration::from_millis(config.time_budget_ms),
            buffer: Duration::from_millis(config.safety_buffer_ms),
        }
    }

    /// Time the search may spend
    #[inline]
    pub fn search_time(&self) -> Duration {
        self.total.saturating_sub(self.buffer)
    }

    /// Deadline for a search starting now
    pub fn start(&self) -> Deadline {
        Deadline::after(self.search_time())
    }
}

/// Instant by which the current search must stop.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    end: Instant,
}

impl Deadline {
    pub fn after(limit: Duration) -> Self {
        let start = Instant::now();
        Self {
            start,
            end: start + limit,
        }
    }

    #[inline]
    pub fn expired(&self) -> bool {
        Instant::now() >= self.end
    }

    #[inline]
    pub fn remaining(&self) -> Duration {
        self.end.saturating_duration_since(Instant::now())
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
