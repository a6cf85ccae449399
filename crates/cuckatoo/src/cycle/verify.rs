//! Independent cycle verification.

use std::collections::HashSet;

use super::types::CYCLE_LEN;
use crate::graph::{EdgeTriple, GraphView};
use crate::hash::{Blake2bEdgeHash, EdgeHash, MAX_N};

/// Verify `candidate` against the header-keyed graph with `2^n` edges.
///
/// Total over its inputs: an unusable header or `n` simply yields `false`.
pub fn verify_cycle(header: &[u8], n: u32, candidate: &[EdgeTriple]) -> bool {
    match Blake2bEdgeHash::new(header) {
        Ok(hash) => verify_with(&hash, n, candidate),
        Err(_) => false,
    }
}

/// Verify `candidate` against an arbitrary edge hash.
///
/// Accepts only if all hold:
/// - exactly [`CYCLE_LEN`] entries, every edge index distinct and `< 2^n`;
/// - each `(u, v)` equals the endpoints re-derived from `hash`;
/// - consecutive entries chain (`prev.v == next.u`);
/// - the last entry's `v` closes onto the first entry's `u`.
pub fn verify_with<H: EdgeHash + ?Sized>(hash: &H, n: u32, candidate: &[EdgeTriple]) -> bool {
    if n == 0 || n > MAX_N || candidate.len() != CYCLE_LEN {
        return false;
    }
    let graph = GraphView::new(hash, n);
    let total = graph.total_edges();
    let mut seen = HashSet::with_capacity(CYCLE_LEN);
    if !candidate.iter().all(|t| t.edge < total && seen.insert(t.edge)) {
        return false;
    }
    if !candidate.iter().all(|t| graph.edge(t.edge) == (t.u, t.v)) {
        return false;
    }
    let chained = candidate.windows(2).all(|w| w[0].v == w[1].u);
    chained && candidate[CYCLE_LEN - 1].v == candidate[0].u
}
