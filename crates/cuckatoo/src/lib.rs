//! Cuckatoo-style 42-cycle finder over a header-keyed bipartite graph.
//!
//! Layout
//! - `hash`: keyed edge hash (header → endpoint ids).
//! - `graph`: stateless endpoint derivation for a fixed `(hash, n)`.
//! - `bins`: contiguous edge-index ranges for bounded-memory processing.
//! - `trim`: bin-local leaf-edge trimming.
//! - `cycle`: bounded DFS for 42-edge cycles and the independent verifier.
//! - `solver`: attempts × bins orchestration, metrics, time budget.
//!
//! Trust boundary
//! - Nothing the search produces is reported before `cycle::verify_with`
//!   has re-derived every endpoint from the hash.

pub mod api;
pub mod bins;
pub mod cycle;
pub mod error;
pub mod graph;
pub mod hash;
pub mod solver;
pub mod trim;

#[cfg(test)]
mod testing;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cycle::{verify_cycle, CYCLE_LEN};
pub use error::SolveError;
pub use graph::EdgeTriple;
pub use solver::{solve, Outcome, SolveCfg, SolveMetrics, SolveResult};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cycle::{verify_cycle, verify_with, CYCLE_LEN};
    pub use crate::graph::{EdgeTriple, GraphView};
    pub use crate::hash::{Blake2bEdgeHash, EdgeHash, Side};
    pub use crate::solver::{solve, solve_with, Outcome, SolveCfg, SolveResult};
    pub use crate::SolveError;
}
