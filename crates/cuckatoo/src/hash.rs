//! Keyed edge hash: `(header, edge_index, side) → node id`.
//!
//! Model
//! - The header is the key of a BLAKE2b MAC with an 8-byte tag. The message is
//!   `header ‖ edge_index (u64 LE) ‖ side (1 byte)`; the tag is read as a
//!   little-endian `u64` and masked to `n` bits.
//! - Distinct `(edge_index, side)` messages give independent-looking draws, so
//!   the U and V endpoints of one edge are uncorrelated.
//!
//! The `EdgeHash` trait is the seam used by the graph, trimmer, searcher and
//! verifier; tests plug in table-driven hashes to build graphs with known
//! cycles.

use blake2::digest::consts::U8;
use blake2::digest::Mac;
use blake2::Blake2bMac;

use crate::error::SolveError;

/// Largest supported node-space exponent; node ids must fit a masked `u64`.
pub const MAX_N: u32 = 63;

/// BLAKE2b accepts keys of at most 64 bytes.
pub const MAX_HEADER_LEN: usize = 64;

/// Bipartite side of an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    U = 0,
    V = 1,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::U, Side::V];
}

/// Deterministic keyed pseudorandom function over `(edge_index, side)`.
///
/// Implementations must return the same digest for the same input on every
/// call; the verifier relies on this to re-derive endpoints.
pub trait EdgeHash {
    fn digest64(&self, edge_index: u64, side: Side) -> u64;
}

/// Bit mask selecting node ids in `[0, 2^n)`. `n` is clamped to [`MAX_N`].
#[inline]
pub fn node_mask(n: u32) -> u64 {
    (1u64 << n.min(MAX_N)) - 1
}

/// Endpoint id of `edge_index` on `side` in a graph with `2^n` nodes per side.
#[inline]
pub fn endpoint<H: EdgeHash + ?Sized>(hash: &H, edge_index: u64, side: Side, n: u32) -> u64 {
    hash.digest64(edge_index, side) & node_mask(n)
}

/// Header-keyed BLAKE2b-64 edge hash.
#[derive(Clone)]
pub struct Blake2bEdgeHash {
    keyed: Blake2bMac<U8>,
    header: Vec<u8>,
}

impl Blake2bEdgeHash {
    pub fn new(header: &[u8]) -> Result<Self, SolveError> {
        if header.len() > MAX_HEADER_LEN {
            return Err(SolveError::invalid(format!(
                "header is {} bytes; at most {MAX_HEADER_LEN} supported",
                header.len()
            )));
        }
        let keyed = Blake2bMac::<U8>::new_from_slice(header)
            .map_err(|_| SolveError::invalid("header rejected as MAC key"))?;
        Ok(Self {
            keyed,
            header: header.to_vec(),
        })
    }

    pub fn header(&self) -> &[u8] {
        &self.header
    }
}

impl EdgeHash for Blake2bEdgeHash {
    fn digest64(&self, edge_index: u64, side: Side) -> u64 {
        let mut mac = self.keyed.clone();
        mac.update(&self.header);
        mac.update(&edge_index.to_le_bytes());
        mac.update(&[side as u8 & 1]);
        let tag = mac.finalize().into_bytes();
        let mut word = [0u8; 8];
        word.copy_from_slice(&tag[..8]);
        u64::from_le_bytes(word)
    }
}

impl std::fmt::Debug for Blake2bEdgeHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blake2bEdgeHash")
            .field("header_len", &self.header.len())
            .finish()
    }
}
