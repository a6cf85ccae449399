//! Bin-local leaf trimming.
//!
//! Each round rebuilds per-side degree maps over the edges still alive in the
//! bin and drops every edge with an endpoint of local degree ≤ 1. Degrees only
//! see edges inside the bin, so a node's global degree may be higher than its
//! local count: trimming can drop edges of a cycle spanning several bins and
//! can keep edges on no cycle at all. Memory stays proportional to one bin.
//!
//! Endpoints are re-derived on every pass instead of cached; only the alive
//! edge indices and the two degree maps are held between passes.

use std::collections::HashMap;
use std::mem::size_of;
use std::ops::Range;

use crate::graph::{EdgeTriple, GraphView};
use crate::hash::EdgeHash;

/// Default number of trimming rounds.
pub const DEFAULT_TRIM_ROUNDS: u32 = 2;

/// Result of trimming one bin.
#[derive(Clone, Debug, Default)]
pub struct Trimmed {
    /// Surviving edges with materialised endpoints, in edge-index order.
    pub survivors: Vec<EdgeTriple>,
    /// Alive count after each executed round; non-increasing.
    pub round_sizes: Vec<usize>,
    /// Endpoint hashes evaluated, including the final materialisation.
    pub hashes: u64,
    /// Structural estimate of the largest live footprint in bytes.
    pub peak_bytes: u64,
}

/// Per-side local degree counts for one round.
#[derive(Default)]
struct LocalDegrees {
    u: HashMap<u64, u32>,
    v: HashMap<u64, u32>,
}

impl LocalDegrees {
    fn with_capacity(cap: usize) -> Self {
        Self {
            u: HashMap::with_capacity(cap),
            v: HashMap::with_capacity(cap),
        }
    }

    fn add(&mut self, u: u64, v: u64) {
        *self.u.entry(u).or_insert(0) += 1;
        *self.v.entry(v).or_insert(0) += 1;
    }

    fn keeps(&self, u: u64, v: u64) -> bool {
        self.u.get(&u).copied().unwrap_or(0) > 1 && self.v.get(&v).copied().unwrap_or(0) > 1
    }

    fn bytes(&self) -> u64 {
        map_bytes(&self.u) + map_bytes(&self.v)
    }
}

/// Capacity-based size estimate of a hash map (entries plus one control byte).
pub(crate) fn map_bytes<K, V>(map: &HashMap<K, V>) -> u64 {
    (map.capacity() * (size_of::<K>() + size_of::<V>() + 1)) as u64
}

/// Trim the edges in `range` for at most `rounds` rounds.
///
/// Stops early once a round removes nothing. An empty range yields an empty
/// result without hashing.
pub fn trim<H: EdgeHash + ?Sized>(
    graph: &GraphView<'_, H>,
    range: Range<u64>,
    rounds: u32,
) -> Trimmed {
    let mut alive: Vec<u64> = range.collect();
    let mut out = Trimmed::default();
    if alive.is_empty() {
        return out;
    }
    let mut hashes = 0u64;
    let mut peak = 0u64;
    for round in 0..rounds {
        let mut degrees = LocalDegrees::with_capacity(alive.len());
        for &e in &alive {
            let (u, v) = graph.edge(e);
            degrees.add(u, v);
        }
        let before = alive.len();
        let mut next = Vec::with_capacity(before);
        for &e in &alive {
            let (u, v) = graph.edge(e);
            if degrees.keeps(u, v) {
                next.push(e);
            }
        }
        hashes += 4 * before as u64;
        let live =
            degrees.bytes() + ((alive.capacity() + next.capacity()) * size_of::<u64>()) as u64;
        peak = peak.max(live);
        tracing::trace!(round, before, after = next.len(), "trim round");
        out.round_sizes.push(next.len());
        if next.len() == before {
            break;
        }
        alive = next;
    }
    out.survivors = alive.iter().map(|&e| graph.triple(e)).collect();
    hashes += 2 * alive.len() as u64;
    let tail = (alive.capacity() * size_of::<u64>()
        + out.survivors.capacity() * size_of::<EdgeTriple>()) as u64;
    out.hashes = hashes;
    out.peak_bytes = peak.max(tail);
    out
}
