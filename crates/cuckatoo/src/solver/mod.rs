//! Orchestration: attempts × bins, first verified cycle wins.
//!
//! States: `Idle → Attempting → {Found, Exhausted, TimedOut}`. Each attempt
//! walks the non-empty bins in index order; per bin the edges are trimmed,
//! searched, and every candidate goes through the verifier. The time budget
//! is polled after every bin and inside the DFS.
//!
//! With `threads > 1` the bins of one attempt run on a rayon pool. A single
//! atomic winner slot holds the lowest bin index with a verified cycle; bins
//! above it are skipped or cancelled, so the reported cycle is the one a
//! sequential run reports.

mod cfg;
mod metrics;

use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::bins::BinPlan;
use crate::cycle::{find_cycle, verify_with, StartOrder, CYCLE_LEN};
use crate::error::SolveError;
use crate::graph::{EdgeTriple, GraphView};
use crate::hash::{Blake2bEdgeHash, EdgeHash};
use crate::trim::trim;

pub use cfg::SolveCfg;
pub use metrics::{PeakMemory, SolveMetrics};

/// Hashes spent by one verifier call (two endpoints per entry).
const VERIFY_HASHES: u64 = 2 * CYCLE_LEN as u64;

/// Terminal state of a solve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Found,
    /// Every attempt ran to completion without a verified cycle.
    Exhausted,
    /// The time budget expired first. Not evidence that no cycle exists.
    TimedOut,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Found => "FOUND",
            Outcome::Exhausted => "EXHAUSTED",
            Outcome::TimedOut => "TIMED_OUT",
        }
    }
}

/// Terminal record of one `solve` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveResult {
    /// `outcome == Outcome::Found`.
    pub found: bool,
    pub outcome: Outcome,
    /// The verified cycle, or empty.
    pub cycle: Vec<EdgeTriple>,
    pub elapsed: Duration,
    pub peak_memory_estimate: u64,
    pub metrics: SolveMetrics,
}

/// Solve over the header-keyed BLAKE2b graph.
///
/// Configuration and header are validated before any hashing.
pub fn solve(header: &[u8], cfg: &SolveCfg) -> Result<SolveResult, SolveError> {
    cfg.validate()?;
    let hash = Blake2bEdgeHash::new(header)?;
    solve_with(&hash, cfg)
}

/// Solve over an arbitrary edge hash.
pub fn solve_with<H>(hash: &H, cfg: &SolveCfg) -> Result<SolveResult, SolveError>
where
    H: EdgeHash + Sync + ?Sized,
{
    cfg.validate()?;
    let t0 = Instant::now();
    let graph = GraphView::new(hash, cfg.n);
    let plan = BinPlan::new(graph.total_edges(), cfg.k)?;
    let deadline = Deadline::new(t0, cfg.time_budget);
    let pool = worker_pool(cfg.threads);

    let mut metrics = SolveMetrics::default();
    let mut memory = PeakMemory::default();
    let mut outcome = Outcome::Exhausted;
    let mut cycle = Vec::new();
    for attempt in 1..=cfg.max_attempts {
        metrics.attempts = u64::from(attempt);
        let order = StartOrder::for_attempt(cfg.seed, attempt);
        let sweep = match &pool {
            Some(pool) => sweep_parallel(pool, &graph, &plan, cfg, order, &deadline),
            None => sweep_sequential(&graph, &plan, cfg, order, &deadline),
        };
        metrics.merge(&sweep.metrics);
        memory.observe_concurrent(sweep.footprints, cfg.threads);
        if let Some(found) = sweep.cycle {
            cycle = found;
            outcome = Outcome::Found;
            break;
        }
        if sweep.timed_out {
            outcome = Outcome::TimedOut;
            break;
        }
    }
    let elapsed = t0.elapsed();
    tracing::info!(
        outcome = outcome.as_str(),
        elapsed_ms = elapsed.as_secs_f64() * 1e3,
        attempts = metrics.attempts,
        hashes = metrics.hashes_computed,
        "solve finished"
    );
    Ok(SolveResult {
        found: outcome == Outcome::Found,
        outcome,
        cycle,
        elapsed,
        peak_memory_estimate: memory.peak(),
        metrics,
    })
}

/// Optional wall-clock deadline.
struct Deadline(Option<Instant>);

impl Deadline {
    fn new(t0: Instant, budget: Option<Duration>) -> Self {
        Self(budget.and_then(|b| t0.checked_add(b)))
    }

    fn expired(&self) -> bool {
        self.0.is_some_and(|at| Instant::now() >= at)
    }
}

fn worker_pool(threads: usize) -> Option<ThreadPool> {
    if threads <= 1 {
        return None;
    }
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => Some(pool),
        Err(err) => {
            tracing::warn!(%err, threads, "thread pool unavailable; running bins sequentially");
            None
        }
    }
}

/// One bin's contribution to an attempt.
struct BinReport {
    bin: u64,
    cycle: Option<Vec<EdgeTriple>>,
    metrics: SolveMetrics,
    peak_bytes: u64,
    cancelled: bool,
}

/// One attempt's merged bin reports.
#[derive(Default)]
struct Sweep {
    cycle: Option<Vec<EdgeTriple>>,
    metrics: SolveMetrics,
    footprints: Vec<u64>,
    timed_out: bool,
}

impl Sweep {
    /// Reports must arrive in bin order so the lowest bin's cycle is kept.
    fn absorb(&mut self, report: BinReport) {
        self.metrics.merge(&report.metrics);
        self.footprints.push(report.peak_bytes);
        if self.cycle.is_none() {
            self.cycle = report.cycle;
        }
    }
}

fn sweep_sequential<H>(
    graph: &GraphView<'_, H>,
    plan: &BinPlan,
    cfg: &SolveCfg,
    order: StartOrder,
    deadline: &Deadline,
) -> Sweep
where
    H: EdgeHash + ?Sized,
{
    let mut sweep = Sweep::default();
    for b in 0..plan.occupied() {
        let report = run_bin(graph, b, plan.range(b), cfg, order, || deadline.expired());
        let cancelled = report.cancelled;
        sweep.absorb(report);
        if sweep.cycle.is_some() {
            break;
        }
        if cancelled || deadline.expired() {
            sweep.timed_out = true;
            break;
        }
    }
    sweep
}

fn sweep_parallel<H>(
    pool: &ThreadPool,
    graph: &GraphView<'_, H>,
    plan: &BinPlan,
    cfg: &SolveCfg,
    order: StartOrder,
    deadline: &Deadline,
) -> Sweep
where
    H: EdgeHash + Sync + ?Sized,
{
    let winner = AtomicU64::new(u64::MAX);
    let expired = AtomicBool::new(false);
    let beaten = |b: u64| winner.load(Ordering::Acquire) < b;
    let out_of_time = || {
        let hit = deadline.expired();
        if hit {
            expired.store(true, Ordering::Relaxed);
        }
        hit
    };
    let mut reports: Vec<BinReport> = pool.install(|| {
        (0..plan.occupied())
            .into_par_iter()
            .filter_map(|b| {
                if beaten(b) || out_of_time() {
                    return None;
                }
                let report = run_bin(graph, b, plan.range(b), cfg, order, || {
                    beaten(b) || out_of_time()
                });
                if report.cycle.is_some() {
                    winner.fetch_min(b, Ordering::AcqRel);
                }
                Some(report)
            })
            .collect()
    });
    reports.sort_unstable_by_key(|r| r.bin);
    let mut sweep = Sweep::default();
    for report in reports {
        sweep.absorb(report);
    }
    sweep.timed_out = sweep.cycle.is_none() && expired.load(Ordering::Relaxed);
    sweep
}

/// Trim and search one bin. Empty ranges produce an empty report.
fn run_bin<H, C>(
    graph: &GraphView<'_, H>,
    bin: u64,
    range: Range<u64>,
    cfg: &SolveCfg,
    order: StartOrder,
    cancel: C,
) -> BinReport
where
    H: EdgeHash + ?Sized,
    C: Fn() -> bool,
{
    let len = range.end - range.start;
    let mut metrics = SolveMetrics {
        edges_touched: len,
        ..SolveMetrics::default()
    };
    let trimmed = trim(graph, range, cfg.trim_rounds);
    metrics.hashes_computed += trimmed.hashes;

    let mut verify_calls = 0u64;
    let searched = find_cycle(
        &trimmed.survivors,
        &cfg.search_cfg(order),
        |candidate| {
            verify_calls += 1;
            verify_with(graph.hash(), graph.n(), candidate)
        },
        cancel,
    );
    metrics.hashes_computed += verify_calls * VERIFY_HASHES;
    metrics.dfs_steps = searched.stats.steps;
    metrics.candidates = searched.stats.candidates;

    let survivor_bytes = (trimmed.survivors.capacity() * std::mem::size_of::<EdgeTriple>()) as u64;
    tracing::debug!(
        bin,
        edges = len,
        survivors = trimmed.survivors.len(),
        starts = searched.stats.starts,
        found = searched.cycle.is_some(),
        "bin searched"
    );
    BinReport {
        bin,
        cycle: searched.cycle,
        metrics,
        peak_bytes: trimmed.peak_bytes.max(survivor_bytes + searched.peak_bytes),
        cancelled: searched.cancelled,
    }
}

#[cfg(test)]
mod tests;
