//! Turning oracle answers into [`SolutionSet`]s.
//!
//! `extract_all` keeps cutting off the last optimum with an exclusion row
//! and re-solving until the optimum shrinks or the model runs dry. The
//! result is every maximum-size point of one fixed-k model; it says nothing
//! about other density levels.

use bitvec::prelude::*;
use std::time::Instant;

use crate::graph::Graph;
use crate::model::QuasiCliqueModel;
use crate::oracle::{IntegerProgramOracle, OracleError, Outcome};
use crate::solution::SolutionSet;

/// Selected vertex set of an optimal answer; `None` when infeasible.
///
/// Answers that do not fit `model` (wrong length, a violated row, or an
/// objective that disagrees with the assignment) are reported as
/// [`OracleError::Solver`].
pub fn extract_first<'g>(
    graph: &'g Graph,
    model: &QuasiCliqueModel,
    outcome: &Outcome,
) -> Result<Option<SolutionSet<'g>>, OracleError> {
    match outcome {
        Outcome::Optimal { objective, assignment } => {
            checked(graph, model, *objective, assignment).map(Some)
        }
        Outcome::Infeasible => Ok(None),
    }
}

fn checked<'g>(
    graph: &'g Graph,
    model: &QuasiCliqueModel,
    objective: usize,
    assignment: &BitSlice,
) -> Result<SolutionSet<'g>, OracleError> {
    if assignment.len() != model.num_vars() || model.num_vars() != graph.n() {
        return Err(OracleError::Solver(format!(
            "assignment has {} values, model has {} variables",
            assignment.len(),
            model.num_vars()
        )));
    }
    if assignment.count_ones() != objective {
        return Err(OracleError::Solver(format!(
            "objective {objective} disagrees with {} selected vertices",
            assignment.count_ones()
        )));
    }
    if !model.is_feasible(assignment) {
        return Err(OracleError::Solver("assignment violates the model".into()));
    }
    Ok(SolutionSet::from_bitset(graph, assignment))
}

/// Solve `model` once, then enumerate every other optimum of equal size.
///
/// An error on the first solve is returned as-is. Errors after the first
/// optimum end the enumeration; the optima collected so far are kept.
pub fn extract_all<'g, O>(
    graph: &'g Graph,
    model: &mut QuasiCliqueModel,
    oracle: &mut O,
    deadline: Option<Instant>,
) -> Result<Vec<SolutionSet<'g>>, OracleError>
where
    O: IntegerProgramOracle + ?Sized,
{
    let first = oracle.solve(model, deadline)?;
    let Some(first) = extract_first(graph, model, &first)? else {
        return Ok(Vec::new());
    };
    let target = first.size();
    let mut found = vec![first];

    loop {
        let prev = found.last().map(|s| s.bitset().clone()).unwrap_or_default();
        model.exclude(&prev);
        let next = oracle.solve(model, deadline).and_then(|out| match out {
            Outcome::Optimal { objective, assignment } if objective == target => {
                checked(graph, model, objective, &assignment).map(Some)
            }
            _ => Ok(None),
        });
        match next {
            Ok(Some(s)) => found.push(s),
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(k = model.k(), found = found.len(), error = %e,
                    "enumeration stopped early");
                break;
            }
        }
    }

    tracing::debug!(k = model.k(), size = target, count = found.len(), "optima enumerated");
    Ok(found)
}
