//! Errors surfaced to callers of the DDA entry points.
//!
//! Only input problems live here. Per-level solver failures are
//! [`OracleError`](crate::oracle::OracleError)s and never leave the k-loop.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DdaError {
    /// γ must lie in `[0, 1]` (NaN is rejected as well).
    #[error("gamma must be between 0 and 1, got {0}")]
    GammaOutOfRange(f64),

    /// Malformed DIMACS input.
    #[error("DIMACS parse error on line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DdaError>;
