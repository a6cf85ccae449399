//! JSON documents printed by the CLI.

use serde::{Deserialize, Serialize};

use cuckatoo::api::{SolveCfg, SolveResult};

use crate::provenance::current_git_rev;

#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub code_rev: String,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: cuckatoo::VERSION,
            code_rev: current_git_rev(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsReport {
    pub elapsed_ms: f64,
    pub peak_memory_bytes: u64,
    pub hashes_computed: u64,
    pub edges_touched: u64,
    pub attempts: u64,
    pub dfs_steps: u64,
    pub candidates: u64,
}

/// Result of `solve`: status, solution triples, metrics and build info.
#[derive(Debug, Serialize)]
pub struct SolveReport {
    pub status: &'static str,
    pub outcome: &'static str,
    pub solution: Vec<(u64, u64, u64)>,
    pub metrics: MetricsReport,
    pub build_info: BuildInfo,
}

impl SolveReport {
    pub fn new(res: &SolveResult) -> Self {
        Self {
            status: if res.found { "FOUND" } else { "NOT_FOUND" },
            outcome: res.outcome.as_str(),
            solution: res.cycle.iter().map(|&t| t.into()).collect(),
            metrics: MetricsReport {
                elapsed_ms: res.elapsed.as_secs_f64() * 1e3,
                peak_memory_bytes: res.peak_memory_estimate,
                hashes_computed: res.metrics.hashes_computed,
                edges_touched: res.metrics.edges_touched,
                attempts: res.metrics.attempts,
                dfs_steps: res.metrics.dfs_steps,
                candidates: res.metrics.candidates,
            },
            build_info: BuildInfo::current(),
        }
    }
}

/// Echo of the solve parameters for provenance sidecars.
#[derive(Debug, Serialize)]
pub struct ParamsReport<'a> {
    pub header: &'a str,
    pub n: u32,
    pub k: u64,
    pub threads: usize,
    pub seed: u64,
    pub max_attempts: u32,
    pub time_budget_sec: Option<f64>,
    pub trim_rounds: u32,
    pub max_starts_per_bin: Option<usize>,
}

impl<'a> ParamsReport<'a> {
    pub fn new(header: &'a str, cfg: &SolveCfg) -> Self {
        Self {
            header,
            n: cfg.n,
            k: cfg.k,
            threads: cfg.threads,
            seed: cfg.seed,
            max_attempts: cfg.max_attempts,
            time_budget_sec: cfg.time_budget.map(|d| d.as_secs_f64()),
            trim_rounds: cfg.trim_rounds,
            max_starts_per_bin: cfg.max_starts_per_bin,
        }
    }
}

/// Cycle input for `verify`: either a saved solve report or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CycleDoc {
    Report { solution: Vec<(u64, u64, u64)> },
    Bare(Vec<(u64, u64, u64)>),
}

impl CycleDoc {
    pub fn into_triples(self) -> Vec<(u64, u64, u64)> {
        match self {
            CycleDoc::Report { solution } => solution,
            CycleDoc::Bare(v) => v,
        }
    }
}
