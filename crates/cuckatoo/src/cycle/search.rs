//! Bounded depth-first search for 42-edge closed walks in one bin.

use std::collections::HashMap;
use std::mem::size_of;

use rand::seq::SliceRandom;

use super::types::{SearchCfg, SearchStats, StartOrder, CYCLE_LEN};
use crate::graph::EdgeTriple;
use crate::trim::map_bytes;

/// Cancellation is polled once per this many DFS expansions.
const CANCEL_POLL_STEPS: u64 = 1024;

/// Node id → positions (into the bin's edge slice) of incident edges.
type Adjacency = HashMap<u64, Vec<usize>>;

/// Result of searching one bin.
#[derive(Clone, Debug, Default)]
pub struct SearchOutcome {
    /// First accepted candidate, if any.
    pub cycle: Option<Vec<EdgeTriple>>,
    pub stats: SearchStats,
    /// The cancel hook fired before the start budget was used up.
    pub cancelled: bool,
    /// Structural estimate of the search's footprint in bytes.
    pub peak_bytes: u64,
}

/// Search `edges` for a 42-edge walk that `accept` certifies.
///
/// Builds forward (`u → (edge, v)`) and backward (`v → (edge, u)`) views,
/// then runs a DFS from up to `cfg.starts_for(edges.len())` start edges. A
/// walk never reuses an edge position; edge indices in `edges` are expected
/// to be distinct. Every completed walk goes to `accept`; on rejection the
/// search moves to the next start. `cancel` is polled every few thousand
/// expansions and aborts the whole search when it returns true.
///
/// This is best-effort: a cycle may exist and still be missed once the start
/// or step budget runs out.
pub fn find_cycle<A, C>(
    edges: &[EdgeTriple],
    cfg: &SearchCfg,
    accept: A,
    cancel: C,
) -> SearchOutcome
where
    A: FnMut(&[EdgeTriple]) -> bool,
    C: Fn() -> bool,
{
    let mut out = SearchOutcome::default();
    if edges.len() < CYCLE_LEN {
        return out;
    }
    let (forward, backward) = build_views(edges);
    let starts = start_positions(edges.len(), cfg);
    let mut runner = DfsRunner {
        edges,
        forward: &forward,
        backward: &backward,
        step_budget: cfg.step_budget,
        accept,
        cancel,
        used: vec![false; edges.len()],
        path: Vec::with_capacity(CYCLE_LEN),
        start_u: 0,
        start_steps: 0,
        stats: SearchStats::default(),
        found: None,
    };
    for s in starts {
        runner.stats.starts += 1;
        let first = edges[s];
        // Closure needs an edge back into the start node.
        if !backward.contains_key(&first.u) {
            runner.stats.pruned_starts += 1;
            continue;
        }
        runner.start_u = first.u;
        runner.start_steps = 0;
        runner.used[s] = true;
        runner.path.push(s);
        let flow = runner.extend(first.v);
        runner.path.pop();
        runner.used[s] = false;
        match flow {
            Flow::Found => break,
            Flow::Cancelled => {
                out.cancelled = true;
                break;
            }
            Flow::Continue | Flow::Abandon => {}
        }
    }
    out.peak_bytes = views_bytes(&forward)
        + views_bytes(&backward)
        + (runner.used.capacity() + runner.path.capacity() * size_of::<usize>()) as u64;
    out.stats = runner.stats;
    out.cycle = runner.found;
    out
}

fn build_views(edges: &[EdgeTriple]) -> (Adjacency, Adjacency) {
    let mut forward: Adjacency = HashMap::with_capacity(edges.len());
    let mut backward: Adjacency = HashMap::with_capacity(edges.len());
    for (i, t) in edges.iter().enumerate() {
        forward.entry(t.u).or_default().push(i);
        backward.entry(t.v).or_default().push(i);
    }
    (forward, backward)
}

fn views_bytes(view: &Adjacency) -> u64 {
    map_bytes(view)
        + view
            .values()
            .map(|l| (l.capacity() * size_of::<usize>()) as u64)
            .sum::<u64>()
}

pub(super) fn start_positions(len: usize, cfg: &SearchCfg) -> Vec<usize> {
    let take = cfg.starts_for(len);
    match cfg.order {
        StartOrder::InOrder => (0..take).collect(),
        StartOrder::Shuffled(tok) => {
            let mut all: Vec<usize> = (0..len).collect();
            all.shuffle(&mut tok.rng());
            all.truncate(take);
            all
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    /// Keep exploring siblings.
    Continue,
    /// Candidate accepted; unwind everything.
    Found,
    /// Give up on the current start (budget spent or candidate rejected).
    Abandon,
    /// Cancel hook fired; unwind and stop searching.
    Cancelled,
}

/// DFS state for one bin; the path holds positions into `edges`.
struct DfsRunner<'a, A, C> {
    edges: &'a [EdgeTriple],
    forward: &'a Adjacency,
    backward: &'a Adjacency,
    step_budget: u64,
    accept: A,
    cancel: C,
    used: Vec<bool>,
    path: Vec<usize>,
    start_u: u64,
    start_steps: u64,
    stats: SearchStats,
    found: Option<Vec<EdgeTriple>>,
}

impl<'a, A, C> DfsRunner<'a, A, C>
where
    A: FnMut(&[EdgeTriple]) -> bool,
    C: Fn() -> bool,
{
    /// Extend the walk that currently ends at `node`.
    fn extend(&mut self, node: u64) -> Flow {
        if let Some(flow) = self.tick() {
            return flow;
        }
        if self.path.len() == CYCLE_LEN {
            return self.offer();
        }
        let (edges, forward, backward) = (self.edges, self.forward, self.backward);
        // The final hop must land on the start node; only its in-edges qualify.
        let (options, closing) = if self.path.len() == CYCLE_LEN - 1 {
            (backward.get(&self.start_u), true)
        } else {
            (forward.get(&node), false)
        };
        let Some(options) = options else {
            return Flow::Continue;
        };
        for &i in options {
            if self.used[i] || (closing && edges[i].u != node) {
                continue;
            }
            self.used[i] = true;
            self.path.push(i);
            let flow = self.extend(edges[i].v);
            self.path.pop();
            self.used[i] = false;
            if flow != Flow::Continue {
                return flow;
            }
        }
        Flow::Continue
    }

    /// Count one expansion; `Some` when the budget or cancel hook stops us.
    fn tick(&mut self) -> Option<Flow> {
        self.stats.steps += 1;
        self.start_steps += 1;
        if self.stats.steps % CANCEL_POLL_STEPS == 0 && (self.cancel)() {
            return Some(Flow::Cancelled);
        }
        if self.start_steps > self.step_budget {
            return Some(Flow::Abandon);
        }
        None
    }

    fn offer(&mut self) -> Flow {
        self.stats.candidates += 1;
        let candidate: Vec<EdgeTriple> = self.path.iter().map(|&i| self.edges[i]).collect();
        if (self.accept)(&candidate) {
            self.found = Some(candidate);
            Flow::Found
        } else {
            Flow::Abandon
        }
    }
}
