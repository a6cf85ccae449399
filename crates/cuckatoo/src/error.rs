//! Error type shared by configuration and hasher construction.
//!
//! Search, trimming and verification never fail on data; only inputs that
//! make the graph itself ill-defined are rejected, before any hashing.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },
}

impl SolveError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
