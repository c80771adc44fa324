//! Outer DDA loop: walk density levels k downward from degeneracy + 1.
//!
//! Each level asks the oracle for the largest self-contained k-core whose
//! size respects ⌊k/γ⌋ + 1. The loop stops once the best size found meets
//! the cap of the current level, since no smaller k can beat it. Levels are
//! solved strictly in sequence because that guard depends on the best so far.

use std::time::Instant;

use crate::degeneracy::degeneracy;
use crate::enumerate::{extract_all, extract_first};
use crate::error::{DdaError, Result};
use crate::graph::Graph;
use crate::model::{size_bound, QuasiCliqueModel};
use crate::oracle::{IntegerProgramOracle, OracleError};
use crate::params::{Params, SolveMode};
use crate::solution::SolutionSet;

/// Why a level produced no candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LevelFailure {
    Infeasible,
    Oracle(OracleError),
}

/// Outcome of a full DDA run.
#[derive(Clone, Debug)]
pub struct DdaResult<'g> {
    /// Best tier: one set, or every optimum of the winning level.
    pub solutions:  Vec<SolutionSet<'g>>,
    pub best_size:  usize,
    /// Density level the best tier came from.
    pub k:          Option<usize>,
    pub degeneracy: usize,
    /// Number of k levels handed to the oracle.
    pub iterations: usize,
    /// Levels lost to infeasibility, solver errors or timeouts.
    pub failures:   usize,
}

/*───────────────────────────────────────────────────────────────────────*/
/*  Public solver                                                       */
/*───────────────────────────────────────────────────────────────────────*/

/// Find a maximum γ-quasi-clique of `graph` (all of them with
/// [`SolveMode::AllSolutions`]). Fails only on invalid parameters.
pub fn solve_dda<'g, O>(graph: &'g Graph, oracle: &mut O, p: &Params) -> Result<DdaResult<'g>>
where
    O: IntegerProgramOracle + ?Sized,
{
    solve_dda_with(graph, oracle, p, |_, _| {})
}

/// Like [`solve_dda`], reporting every failed level to `on_failure`.
pub fn solve_dda_with<'g, O, F>(
    graph: &'g Graph,
    oracle: &mut O,
    p: &Params,
    mut on_failure: F,
) -> Result<DdaResult<'g>>
where
    O: IntegerProgramOracle + ?Sized,
    F: FnMut(usize, &LevelFailure),
{
    if !(0.0..=1.0).contains(&p.gamma) {
        return Err(DdaError::GammaOutOfRange(p.gamma));
    }
    let gamma = p.gamma;

    let degeneracy = degeneracy(graph);
    let mut k = degeneracy + 1;
    let mut best: Vec<SolutionSet<'g>> = Vec::new();
    let mut best_size = 0usize;
    let mut best_k = None;
    let mut iterations = 0usize;
    let mut failures = 0usize;

    while best_size < size_bound(gamma, k) {
        k -= 1;
        iterations += 1;

        let mut model = QuasiCliqueModel::build(graph, gamma, k);
        let deadline = p.time_limit.map(|t| Instant::now() + t);
        tracing::debug!(k, cap = model.cap(), "solving gamma-QC(k)");

        let level = match p.mode {
            SolveMode::OneSolution => oracle
                .solve(&model, deadline)
                .and_then(|out| extract_first(graph, &model, &out))
                .map(|set| set.into_iter().collect::<Vec<_>>()),
            SolveMode::AllSolutions => extract_all(graph, &mut model, &mut *oracle, deadline),
        };

        match level {
            Ok(sets) if sets.is_empty() => {
                failures += 1;
                tracing::warn!(k, "gamma-QC(k) infeasible");
                on_failure(k, &LevelFailure::Infeasible);
            }
            Ok(sets) => {
                let size = sets[0].size();
                tracing::debug!(k, size, count = sets.len(), "level solved");
                // ties with the current best are dropped
                if size > best_size {
                    tracing::info!(k, size, "new best quasi-clique");
                    best = sets;
                    best_size = size;
                    best_k = Some(k);
                }
            }
            Err(e) => {
                failures += 1;
                tracing::warn!(k, error = %e, "error while solving gamma-QC(k)");
                on_failure(k, &LevelFailure::Oracle(e));
            }
        }

        if k == 0 {
            break;
        }
    }

    tracing::info!(gamma, degeneracy, iterations, best_size, solutions = best.len(), "DDA finished");
    Ok(DdaResult {
        solutions: best,
        best_size,
        k: best_k,
        degeneracy,
        iterations,
        failures,
    })
}

/*────────────────── unit checks ──────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use crate::bnb::BranchAndBound;
    use crate::oracle::Outcome;
    use bitvec::prelude::*;
    use std::time::Duration;

    /// Fails every call.
    struct Broken;

    impl IntegerProgramOracle for Broken {
        fn solve(&mut self, _: &QuasiCliqueModel, _: Option<Instant>) -> std::result::Result<Outcome, OracleError> {
            Err(OracleError::Solver("boom".into()))
        }
    }

    /// Fails above a given k, delegates below.
    struct FailAbove(usize, BranchAndBound);

    impl IntegerProgramOracle for FailAbove {
        fn solve(&mut self, m: &QuasiCliqueModel, d: Option<Instant>) -> std::result::Result<Outcome, OracleError> {
            if m.k() > self.0 {
                return Err(OracleError::Timeout);
            }
            self.1.solve(m, d)
        }
    }

    /// Answers with a single-bit assignment whatever the model size.
    struct Truncated;

    impl IntegerProgramOracle for Truncated {
        fn solve(&mut self, _: &QuasiCliqueModel, _: Option<Instant>) -> std::result::Result<Outcome, OracleError> {
            Ok(Outcome::Optimal { objective: 1, assignment: bitvec![1] })
        }
    }

    fn k5() -> Graph {
        let mut edges = Vec::new();
        for u in 0..5 {
            for v in (u + 1)..5 {
                edges.push((u, v));
            }
        }
        Graph::from_edge_list(5, &edges)
    }

    #[test]
    fn rejects_bad_gamma() {
        let g = k5();
        for gamma in [-0.1, 1.5, f64::NAN] {
            let p = Params::new(gamma, SolveMode::OneSolution);
            assert!(matches!(
                solve_dda(&g, &mut BranchAndBound::new(), &p),
                Err(DdaError::GammaOutOfRange(_))
            ));
        }
    }

    #[test]
    fn complete_graph_in_one_level() {
        let g = k5();
        let r = solve_dda(&g, &mut BranchAndBound::new(), &Params::new(1.0, SolveMode::OneSolution)).unwrap();
        assert_eq!(r.degeneracy, 4);
        assert_eq!(r.best_size, 5);
        assert_eq!(r.k, Some(4));
        assert_eq!(r.iterations, 1);
    }

    #[test]
    fn broken_oracle_is_not_fatal() {
        let g = k5();
        let mut seen = Vec::new();
        let r = solve_dda_with(&g, &mut Broken, &Params::new(1.0, SolveMode::OneSolution), |k, f| {
            seen.push((k, f.clone()))
        })
        .unwrap();
        assert_eq!(r.best_size, 0);
        assert!(r.solutions.is_empty());
        // every level down to 0 is tried
        assert_eq!(r.iterations, 5);
        assert_eq!(r.failures, 5);
        assert_eq!(seen.first(), Some(&(4, LevelFailure::Oracle(OracleError::Solver("boom".into())))));
    }

    #[test]
    fn malformed_answer_fails_the_level_only() {
        let g = Graph::from_edge_list(3, &[(0, 1), (1, 2), (0, 2)]);
        for mode in [SolveMode::OneSolution, SolveMode::AllSolutions] {
            let mut seen = Vec::new();
            let r = solve_dda_with(&g, &mut Truncated, &Params::new(1.0, mode), |k, f| {
                seen.push((k, f.clone()))
            })
            .unwrap();
            assert_eq!(r.best_size, 0);
            assert_eq!(r.failures, 3);
            assert!(seen.iter().all(|(_, f)| matches!(f, LevelFailure::Oracle(OracleError::Solver(_)))));
        }
    }

    #[test]
    fn zero_time_limit_times_out_every_level() {
        let g = k5();
        let p = Params {
            time_limit: Some(Duration::ZERO),
            ..Params::new(1.0, SolveMode::AllSolutions)
        };
        let mut seen = Vec::new();
        let r = solve_dda_with(&g, &mut BranchAndBound::new(), &p, |k, f| seen.push((k, f.clone()))).unwrap();
        assert_eq!(r.best_size, 0);
        assert!(r.solutions.is_empty());
        assert_eq!(r.iterations, 5);
        assert_eq!(r.failures, 5);
        let ks: Vec<usize> = seen.iter().map(|(k, _)| *k).collect();
        assert_eq!(ks, vec![4, 3, 2, 1, 0]);
        assert!(seen.iter().all(|(_, f)| *f == LevelFailure::Oracle(OracleError::Timeout)));
    }

    #[test]
    fn search_continues_past_failed_levels() {
        let g = k5();
        let mut oracle = FailAbove(2, BranchAndBound::new());
        let r = solve_dda(&g, &mut oracle, &Params::new(1.0, SolveMode::OneSolution)).unwrap();
        // k = 4, 3 time out; k = 2 caps the set at 3 vertices
        assert_eq!(r.failures, 2);
        assert_eq!(r.best_size, 3);
        assert_eq!(r.k, Some(2));
        assert!(r.solutions[0].is_k_core(2));
    }

    #[test]
    fn empty_graph() {
        let g = Graph::with_vertices(0);
        let r = solve_dda(&g, &mut BranchAndBound::new(), &Params::new(0.8, SolveMode::AllSolutions)).unwrap();
        assert_eq!(r.best_size, 0);
        assert!(r.solutions.is_empty());
        assert_eq!(r.iterations, 1);
    }

    #[test]
    fn gamma_zero_takes_whole_graph() {
        let g = Graph::from_edge_list(4, &[(0, 1), (2, 3)]);
        let r = solve_dda(&g, &mut BranchAndBound::new(), &Params::new(0.0, SolveMode::OneSolution)).unwrap();
        assert_eq!(r.best_size, 4);
        assert_eq!(r.k, Some(1));
        // no cap at all, so the loop only ends at k = 0
        assert_eq!(r.iterations, 2);
    }
}
