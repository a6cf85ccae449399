//! Table-driven edge hashes for tests: graphs with known structure.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::cycle::CYCLE_LEN;
use crate::hash::{EdgeHash, Side};

/// Edge `e` maps to `table[e]`; indices past the table map to `(e, e)`.
pub(crate) struct TableHash(pub Vec<(u64, u64)>);

impl EdgeHash for TableHash {
    fn digest64(&self, e: u64, side: Side) -> u64 {
        let (u, v) = self.0.get(e as usize).copied().unwrap_or((e, e));
        match side {
            Side::U => u,
            Side::V => v,
        }
    }
}

impl TableHash {
    /// Two overlaid rings on nodes `0..42`: edge `i` is `i → i+1` and edge
    /// `42 + i` is `i → i+2` (mod 42). Every ring node has local degree 2 on
    /// both sides, so trimming keeps edges `0..84`; the only 42-edge closed
    /// walks use the `+1` ring. Edges from 84 on are isolated self-pairs.
    pub(crate) fn two_rings(n: u32) -> Self {
        let m = CYCLE_LEN as u64;
        let mut t: Vec<(u64, u64)> = (0..m).map(|i| (i, (i + 1) % m)).collect();
        t.extend((0..m).map(|i| (i, (i + 2) % m)));
        t.extend((2 * m..(1u64 << n)).map(|e| (e, e)));
        Self(t)
    }
}

/// Wraps a hash and counts digest calls.
pub(crate) struct Counting<H> {
    pub inner: H,
    pub calls: AtomicU64,
}

impl<H> Counting<H> {
    pub(crate) fn new(inner: H) -> Self {
        Self {
            inner,
            calls: AtomicU64::new(0),
        }
    }

    pub(crate) fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

impl<H: EdgeHash> EdgeHash for Counting<H> {
    fn digest64(&self, e: u64, side: Side) -> u64 {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.inner.digest64(e, side)
    }
}
