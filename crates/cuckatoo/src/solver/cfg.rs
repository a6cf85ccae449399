//! Solver configuration and its validation.

use std::mem::size_of;
use std::time::Duration;

use crate::bins::BinPlan;
use crate::cycle::{SearchCfg, StartOrder, DEFAULT_STEP_BUDGET};
use crate::error::SolveError;
use crate::graph::EdgeTriple;
use crate::hash::MAX_N;
use crate::trim::DEFAULT_TRIM_ROUNDS;

/// Recognised solve options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveCfg {
    /// Node-space exponent; the graph has `2^n` edges and `2^n` ids per side.
    pub n: u32,
    /// Bin count.
    pub k: u64,
    pub max_attempts: u32,
    /// `None` runs to exhaustion.
    pub time_budget: Option<Duration>,
    pub trim_rounds: u32,
    /// `None` means `min(1000, survivors in the bin)`.
    pub max_starts_per_bin: Option<usize>,
    /// DFS expansions per start edge.
    pub step_budget: u64,
    /// Worker threads for bins of one attempt; 1 is sequential.
    pub threads: usize,
    /// Seeds the start order of attempts after the first.
    pub seed: u64,
}

impl Default for SolveCfg {
    fn default() -> Self {
        Self {
            n: 8,
            k: 2,
            max_attempts: 1,
            time_budget: None,
            trim_rounds: DEFAULT_TRIM_ROUNDS,
            max_starts_per_bin: None,
            step_budget: DEFAULT_STEP_BUDGET,
            threads: 1,
            seed: 0,
        }
    }
}

impl SolveCfg {
    pub fn new(n: u32, k: u64) -> Self {
        Self {
            n,
            k,
            ..Self::default()
        }
    }

    /// Reject configurations that leave the graph or the run ill-defined.
    pub fn validate(&self) -> Result<(), SolveError> {
        if self.n == 0 {
            return Err(SolveError::invalid("n must be > 0"));
        }
        if self.n > MAX_N {
            return Err(SolveError::invalid(format!(
                "n = {} exceeds the {MAX_N}-bit node id width",
                self.n
            )));
        }
        let plan = BinPlan::new(1u64 << self.n, self.k)?;
        let bin_bytes = plan
            .bin_size()
            .checked_mul(size_of::<EdgeTriple>() as u64)
            .filter(|&b| b <= isize::MAX as u64);
        if bin_bytes.is_none() {
            return Err(SolveError::invalid(format!(
                "bin of 2^{} / {} edges exceeds the largest allocatable edge vector",
                self.n, self.k
            )));
        }
        if self.max_attempts == 0 {
            return Err(SolveError::invalid("max_attempts must be >= 1"));
        }
        if self.threads == 0 {
            return Err(SolveError::invalid("threads must be >= 1"));
        }
        Ok(())
    }

    pub(crate) fn search_cfg(&self, order: StartOrder) -> SearchCfg {
        SearchCfg {
            max_starts: self.max_starts_per_bin,
            step_budget: self.step_budget,
            order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid(cfg: SolveCfg) -> bool {
        matches!(cfg.validate(), Err(SolveError::InvalidConfig { .. }))
    }

    #[test]
    fn defaults_are_valid() {
        let cfg = SolveCfg::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.trim_rounds, 2);
        assert_eq!(cfg.max_attempts, 1);
        assert_eq!(cfg.threads, 1);
        assert!(cfg.time_budget.is_none());
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(invalid(SolveCfg::new(0, 2)));
        assert!(invalid(SolveCfg::new(MAX_N + 1, 2)));
        assert!(invalid(SolveCfg::new(8, 0)));
        assert!(invalid(SolveCfg {
            max_attempts: 0,
            ..SolveCfg::default()
        }));
        assert!(invalid(SolveCfg {
            threads: 0,
            ..SolveCfg::default()
        }));
    }

    #[test]
    fn bin_must_fit_one_allocation() {
        assert!(invalid(SolveCfg::new(MAX_N, 1)));
        assert!(invalid(SolveCfg::new(MAX_N, 2)));
        assert!(SolveCfg::new(MAX_N, 1 << 40).validate().is_ok());
        assert!(SolveCfg::new(20, 1).validate().is_ok());
    }
}
