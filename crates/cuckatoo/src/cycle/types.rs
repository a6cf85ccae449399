//! Search configuration and bookkeeping types.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Number of edges in a solution cycle.
pub const CYCLE_LEN: usize = 42;

/// Default cap on start edges tried per bin.
pub const DEFAULT_MAX_STARTS: usize = 1000;

/// Default cap on DFS expansions per start edge.
pub const DEFAULT_STEP_BUDGET: u64 = 100_000;

/// Key of a shuffled start order: one reproducible stream per `(seed, attempt)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShuffleKey {
    pub seed: u64,
    pub attempt: u32,
}

impl ShuffleKey {
    /// ChaCha-backed `StdRng` seeded with the key bytes laid side by side.
    pub(crate) fn rng(self) -> StdRng {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&self.seed.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.attempt.to_le_bytes());
        StdRng::from_seed(bytes)
    }
}

/// Order in which surviving edges are tried as DFS starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOrder {
    /// Bin order (edge-index ascending).
    InOrder,
    /// Seeded permutation of the bin's edges.
    Shuffled(ShuffleKey),
}

impl StartOrder {
    /// Attempt 1 walks starts in bin order; later attempts shuffle so that a
    /// start budget smaller than the bin reaches different edges.
    pub fn for_attempt(seed: u64, attempt: u32) -> Self {
        if attempt <= 1 {
            Self::InOrder
        } else {
            Self::Shuffled(ShuffleKey { seed, attempt })
        }
    }
}

/// Per-bin search limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchCfg {
    /// Start edges tried; `None` means `min(DEFAULT_MAX_STARTS, |edges|)`.
    pub max_starts: Option<usize>,
    /// DFS expansions allowed per start before moving on.
    pub step_budget: u64,
    pub order: StartOrder,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            max_starts: None,
            step_budget: DEFAULT_STEP_BUDGET,
            order: StartOrder::InOrder,
        }
    }
}

impl SearchCfg {
    pub fn starts_for(&self, edges: usize) -> usize {
        self.max_starts.unwrap_or(DEFAULT_MAX_STARTS).min(edges)
    }
}

/// Counters from one bin search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Start edges taken from the start budget (including pruned ones).
    pub starts: usize,
    /// Starts skipped because no edge returns to their `u`.
    pub pruned_starts: usize,
    pub steps: u64,
    /// Completed 42-edge walks handed to the acceptor.
    pub candidates: u64,
}
