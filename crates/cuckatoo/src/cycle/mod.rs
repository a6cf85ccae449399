//! 42-cycle search and verification.
//!
//! Purpose
//! - `search`: bounded DFS over one trimmed bin, handing every completed
//!   42-edge walk to a caller-supplied acceptor (the verifier in practice).
//! - `verify`: total, side-effect-free check that re-derives every endpoint
//!   from the hash. This is the only place a sequence of numbers becomes a
//!   solution.
//!
//! Walk orientation
//! - An entry `(e, u, v)` is a directed hop `u → v`; the next entry must start
//!   where the previous one ended (`prev.v == next.u`) and the last must end
//!   at the first `u`. The searcher walks exactly this relation, so a walk it
//!   completes is one the verifier can accept.
//! - A hop's `v` id is therefore looked up as the `u` of the next hop. This
//!   differs from a literal U/V alternation that steps back through V
//!   adjacency, whose walks the verifier's chain check would reject.

mod search;
mod types;
mod verify;

pub use search::{find_cycle, SearchOutcome};
pub use types::{
    SearchCfg, SearchStats, ShuffleKey, StartOrder, CYCLE_LEN, DEFAULT_MAX_STARTS,
    DEFAULT_STEP_BUDGET,
};
pub use verify::{verify_cycle, verify_with};
