//! Curated surface for thin callers (CLI, benches).
//!
//! Not a stability promise; it only saves callers from reaching into
//! submodules.

pub use crate::bins::{bins, BinPlan};
pub use crate::cycle::{
    find_cycle, verify_cycle, verify_with, SearchCfg, SearchOutcome, StartOrder, CYCLE_LEN,
};
pub use crate::error::SolveError;
pub use crate::graph::{EdgeTriple, GraphView};
pub use crate::hash::{endpoint, Blake2bEdgeHash, EdgeHash, Side, MAX_HEADER_LEN, MAX_N};
pub use crate::solver::{solve, solve_with, Outcome, SolveCfg, SolveMetrics, SolveResult};
pub use crate::trim::{trim, Trimmed, DEFAULT_TRIM_ROUNDS};

/// Standalone verification over `(edge_index, u, v)` tuples.
///
/// Convenience for callers that hold plain tuples (e.g. parsed JSON).
pub fn verify_tuples(header: &[u8], n: u32, candidate: &[(u64, u64, u64)]) -> bool {
    let triples: Vec<EdgeTriple> = candidate.iter().copied().map(EdgeTriple::from).collect();
    verify_cycle(header, n, &triples)
}
