//! Contract between the DDA engine and a 0/1 integer-program backend.
//!
//! A backend receives a [`QuasiCliqueModel`] (binary variables, sparse
//! `≤`/`≥` rows, objective "maximise the number of ones") and answers with
//! an optimum, a proof of infeasibility, or an error. Backends bound to a
//! single native engine instance take `&mut self`, so one instance is never
//! driven from two threads at once.

use bitvec::prelude::*;
use std::time::Instant;
use thiserror::Error;

use crate::model::QuasiCliqueModel;

/// Successful oracle answers.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Proven optimum with its objective value and 0/1 assignment.
    Optimal { objective: usize, assignment: BitVec },
    Infeasible,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// Backend-internal failure.
    #[error("solver error: {0}")]
    Solver(String),
    /// The per-call deadline passed before optimality was proven.
    #[error("solver deadline exceeded")]
    Timeout,
}

pub trait IntegerProgramOracle {
    /// Solve `model` to optimality, giving up at `deadline` if one is set.
    ///
    /// The model may have grown rows since the previous call; backends must
    /// not cache anything that depends on the row set.
    fn solve(
        &mut self,
        model: &QuasiCliqueModel,
        deadline: Option<Instant>,
    ) -> Result<Outcome, OracleError>;
}

/// Membership test for backends that report fractional column values.
#[inline]
pub fn is_one(val: f64) -> bool {
    const EPS: f64 = 1e-6;
    (1.0 - EPS..=1.0 + EPS).contains(&val)
}

/// Round a column-value vector into an assignment bitset.
pub fn assignment_from_values(values: &[f64]) -> BitVec {
    values.iter().map(|&v| is_one(v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_tolerance() {
        assert!(is_one(0.9999999));
        assert!(!is_one(0.5));
        let a = assignment_from_values(&[1.0, 0.0, 1.0000001, 1e-9]);
        assert_eq!(a, bitvec![1, 0, 1, 0]);
    }
}
