//! Engine configuration
//!
//! Every knob has a default tuned for the 7x7 board. A handful of them
//! can be overridden from the environment through [`EngineConfig::from_env`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which placement heuristic the placer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacerStrategy {
    /// Simulate the mover's best reply and block it
    Disruption,
    /// Break up structure without simulating the opponent
    Entropy,
    /// Phase-weighted blend of both
    Hybrid,
}

impl PlacerStrategy {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "disruption" => Some(Self::Disruption),
            "entropy" => Some(Self::Entropy),
            "hybrid" | "default" => Some(Self::Hybrid),
            _ => None,
        }
    }
}

/// How placer plies are modeled once the announced color has been used.
///
/// Only the next color is known for certain. Deeper placer plies either
/// assume the color with the most tokens left in the bag, or are not
/// expanded at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuturePlacerModel {
    /// Expand with the modal remaining bag color
    ModalColor,
    /// Treat unknown-color placer nodes as leaves
    Horizon,
}

/// Weights of the six evaluator components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalWeights {
    pub score: f64,
    pub potential: f64,
    pub control: f64,
    pub opponent: f64,
    pub preparation: f64,
    pub fertility: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            score: 100.0,
            potential: 50.0,
            control: 30.0,
            opponent: -40.0,
            preparation: 20.0,
            fertility: 25.0,
        }
    }
}

/// Weights of the disruption strategy (lower combined score is better).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisruptionWeights {
    /// Mover's best immediate reply score
    pub reply: f64,
    /// Near-complete potential removed from the touched lines
    pub potential_reduction: f64,
    /// Palindromes other colors could have formed at the cell
    pub foreclosure: f64,
    pub scarcity: f64,
}

impl Default for DisruptionWeights {
    fn default() -> Self {
        Self {
            reply: 10.0,
            potential_reduction: 1.0,
            foreclosure: 3.0,
            scarcity: 1.0,
        }
    }
}

/// Weights of the entropy strategy (higher combined score is better).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntropyWeights {
    pub fragmentation: f64,
    pub symmetry: f64,
    pub parity: f64,
    pub zone_diversity: f64,
    pub phase: f64,
}

impl Default for EntropyWeights {
    fn default() -> Self {
        Self {
            fragmentation: 2.0,
            symmetry: 1.5,
            parity: 1.0,
            zone_diversity: 1.0,
            phase: 1.0,
        }
    }
}

/// Share of the entropy strategy in the hybrid blend, per phase.
/// The disruption strategy gets the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridWeights {
    pub early_entropy: f64,
    pub mid_entropy: f64,
    pub late_entropy: f64,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            early_entropy: 0.6,
            mid_entropy: 0.4,
            late_entropy: 0.2,
        }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Wall-clock budget per decision
    pub time_budget_ms: u64,
    /// Part of the budget reserved for the caller
    pub safety_buffer_ms: u64,
    /// Do not start a deeper iteration with less than this left
    pub deepen_threshold_ms: u64,
    /// Hard ceiling on iterative deepening
    pub max_depth: u8,
    /// Transposition cache entries
    pub cache_capacity: usize,
    /// Mover replies sampled by the disruption strategy
    pub reply_sample: usize,
    pub placer_strategy: PlacerStrategy,
    pub future_placer: FuturePlacerModel,
    pub eval: EvalWeights,
    pub disruption: DisruptionWeights,
    pub entropy: EntropyWeights,
    pub hybrid: HybridWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_budget_ms: 2_000,
            safety_buffer_ms: 200,
            deepen_threshold_ms: 500,
            max_depth: 4,
            cache_capacity: 5_000,
            reply_sample: 50,
            placer_strategy: PlacerStrategy::Hybrid,
            future_placer: FuturePlacerModel::ModalColor,
            eval: EvalWeights::default(),
            disruption: DisruptionWeights::default(),
            entropy: EntropyWeights::default(),
            hybrid: HybridWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Defaults, overridden by `ENTROPY_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    /// Defaults, overridden by whatever `read` returns for each known key.
    /// Values that fail to parse are ignored.
    pub fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ms) = read("ENTROPY_TIME_BUDGET_MS").and_then(|raw| raw.trim().parse().ok()) {
            config.time_budget_ms = ms;
        }
        if let Some(depth) = read("ENTROPY_MAX_DEPTH")
            .and_then(|raw| raw.trim().parse::<u8>().ok())
            .filter(|d| *d >= 1)
        {
            config.max_depth = depth;
        }
        if let Some(cap) = read("ENTROPY_CACHE_CAPACITY").and_then(|raw| raw.trim().parse().ok())
        {
            config.cache_capacity = cap;
        }
        if let Some(n) = read("ENTROPY_REPLY_SAMPLE")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|n| *n >= 1)
        {
            config.reply_sample = n;
        }
        if let Some(strategy) =
            read("ENTROPY_PLACER_STRATEGY").and_then(|raw| PlacerStrategy::parse(&raw))
        {
            config.placer_strategy = strategy;
        }

        config
    }

    #[must_use]
    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = ms;
        self
    }

    #[must_use]
    pub fn with_safety_buffer_ms(mut self, ms: u64) -> Self {
        self.safety_buffer_ms = ms;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_placer_strategy(mut self, strategy: PlacerStrategy) -> Self {
        self.placer_strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_future_placer(mut self, model: FuturePlacerModel) -> Self {
        self.future_placer = model;
        self
    }

    /// Time the search itself may use: budget minus the safety buffer.
    pub fn search_time(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms.saturating_sub(self.safety_buffer_ms))
    }

    pub fn deepen_threshold(&self) -> Duration {
        Duration::from_millis(self.deepen_threshold_ms)
    }
}
