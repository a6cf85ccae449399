//! Partition of the edge-index space into `k` contiguous bins.

use std::ops::Range;

use crate::error::SolveError;

/// Bin geometry for `total_edges` split `k` ways; ranges are computed on demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BinPlan {
    total_edges: u64,
    k: u64,
    size: u64,
}

impl BinPlan {
    pub fn new(total_edges: u64, k: u64) -> Result<Self, SolveError> {
        if k < 1 {
            return Err(SolveError::invalid("k must be >= 1"));
        }
        Ok(Self {
            total_edges,
            k,
            size: total_edges.div_ceil(k),
        })
    }

    /// Number of bins, including empty ones.
    pub fn len(&self) -> u64 {
        self.k
    }

    pub fn is_empty(&self) -> bool {
        self.k == 0
    }

    /// Nominal bin size `ceil(total_edges / k)`.
    pub fn bin_size(&self) -> u64 {
        self.size
    }

    /// Bins `0..occupied()` are non-empty; every later bin is empty.
    pub fn occupied(&self) -> u64 {
        if self.size == 0 {
            0
        } else {
            self.total_edges.div_ceil(self.size).min(self.k)
        }
    }

    /// Range of bin `b`; out-of-range bins are empty.
    pub fn range(&self, b: u64) -> Range<u64> {
        let start = b.saturating_mul(self.size).min(self.total_edges);
        let end = start.saturating_add(self.size).min(self.total_edges);
        start..end
    }

    pub fn iter(&self) -> impl Iterator<Item = Range<u64>> + '_ {
        (0..self.k).map(|b| self.range(b))
    }
}

/// `[start, end)` ranges covering `[0, total_edges)` exactly once.
///
/// Every bin has `ceil(total_edges / k)` edges except possibly the tail; when
/// `k > total_edges` the trailing bins are empty and callers skip them.
pub fn bins(total_edges: u64, k: u64) -> Result<Vec<Range<u64>>, SolveError> {
    Ok(BinPlan::new(total_edges, k)?.iter().collect())
}
