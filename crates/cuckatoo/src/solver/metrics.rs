//! Solve counters and the peak-memory estimate.

/// Counters for one `solve` call. Bin-level counters are merged by addition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolveMetrics {
    /// Endpoint hashes: trimming passes, materialisation, verification.
    pub hashes_computed: u64,
    /// Edges streamed into bins before trimming.
    pub edges_touched: u64,
    /// Attempt currently (or last) running, 1-based.
    pub attempts: u64,
    pub dfs_steps: u64,
    /// 42-edge walks handed to the verifier.
    pub candidates: u64,
}

impl SolveMetrics {
    /// Add another accumulator; `attempts` keeps the larger value.
    pub fn merge(&mut self, other: &SolveMetrics) {
        self.hashes_computed += other.hashes_computed;
        self.edges_touched += other.edges_touched;
        self.attempts = self.attempts.max(other.attempts);
        self.dfs_steps += other.dfs_steps;
        self.candidates += other.candidates;
    }
}

/// Running maximum of structural footprint estimates, in bytes.
///
/// Estimates come from container capacities, so observing never fails; a
/// missing observation leaves the last known value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PeakMemory {
    peak: u64,
}

impl PeakMemory {
    pub fn observe(&mut self, bytes: u64) {
        self.peak = self.peak.max(bytes);
    }

    /// Estimate for `workers` bins resident at once: the sum of the largest
    /// `workers` footprints.
    pub fn observe_concurrent(&mut self, mut footprints: Vec<u64>, workers: usize) {
        footprints.sort_unstable_by(|a, b| b.cmp(a));
        self.observe(footprints.iter().take(workers.max(1)).sum());
    }

    pub fn peak(&self) -> u64 {
        self.peak
    }
}
