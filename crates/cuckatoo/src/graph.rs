//! Implicit bipartite graph: `2^n` edges, each with derived endpoints.
//!
//! An edge is only its index. `(u, v)` are recomputed from the hash whenever
//! needed; `EdgeTriple` is a transient materialisation used inside one bin.

use crate::hash::{endpoint, EdgeHash, Side, MAX_N};

/// One edge with its derived endpoints, `u` on side U and `v` on side V.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeTriple {
    pub edge: u64,
    pub u: u64,
    pub v: u64,
}

impl EdgeTriple {
    pub const fn new(edge: u64, u: u64, v: u64) -> Self {
        Self { edge, u, v }
    }
}

impl From<(u64, u64, u64)> for EdgeTriple {
    fn from((edge, u, v): (u64, u64, u64)) -> Self {
        Self { edge, u, v }
    }
}

impl From<EdgeTriple> for (u64, u64, u64) {
    fn from(t: EdgeTriple) -> Self {
        (t.edge, t.u, t.v)
    }
}

/// Stateless endpoint derivation for a fixed `(hash, n)`.
pub struct GraphView<'h, H: ?Sized> {
    hash: &'h H,
    n: u32,
}

impl<H: ?Sized> Clone for GraphView<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: ?Sized> Copy for GraphView<'_, H> {}

impl<'h, H: EdgeHash + ?Sized> GraphView<'h, H> {
    /// `n` is clamped to [`MAX_N`]; callers validate it beforehand.
    pub fn new(hash: &'h H, n: u32) -> Self {
        Self {
            hash,
            n: n.min(MAX_N),
        }
    }

    pub fn n(&self) -> u32 {
        self.n
    }

    pub fn hash(&self) -> &'h H {
        self.hash
    }

    /// Number of edges (and of node ids per side): `2^n`.
    pub fn total_edges(&self) -> u64 {
        1u64 << self.n
    }

    #[inline]
    pub fn endpoint(&self, edge: u64, side: Side) -> u64 {
        endpoint(self.hash, edge, side, self.n)
    }

    /// `(u, v)` for `edge`.
    #[inline]
    pub fn edge(&self, edge: u64) -> (u64, u64) {
        (self.endpoint(edge, Side::U), self.endpoint(edge, Side::V))
    }

    #[inline]
    pub fn triple(&self, edge: u64) -> EdgeTriple {
        let (u, v) = self.edge(edge);
        EdgeTriple { edge, u, v }
    }
}
