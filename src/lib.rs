//! QCDDA – maximum γ-quasi-clique search via the Degree Decomposition
//! Algorithm, with optional PyO3 bindings (`--features python`).
//!
//! ```
//! use qcdda::{Graph, Params, SolveMode, BranchAndBound, solve_dda};
//!
//! let g = Graph::from_edge_list(4, &[(0, 1), (0, 2), (1, 2), (2, 3)]);
//! let r = solve_dda(&g, &mut BranchAndBound::new(), &Params::new(1.0, SolveMode::OneSolution)).unwrap();
//! assert_eq!(r.best_size, 3);
//! ```

/*───────── interne modules ─────────*/
pub mod error;
pub mod graph;
pub mod degeneracy;
pub mod model;
pub mod oracle;
pub mod bnb;
pub mod solution;
pub mod enumerate;
pub mod params;
pub mod dda;

/*───────── re-exports voor Rust-gebruikers ─────────*/
pub use error::DdaError;
pub use graph::Graph;
pub use degeneracy::{degeneracy, degeneracy_ordering, Degeneracy};
pub use model::QuasiCliqueModel;
pub use oracle::{IntegerProgramOracle, OracleError, Outcome};
pub use bnb::BranchAndBound;
pub use solution::SolutionSet;
pub use params::{Params, SolveMode};
pub use dda::{solve_dda, solve_dda_with, DdaResult, LevelFailure};

/*======================================================================
│  Python-functies
└=====================================================================*/

#[cfg(feature = "python")]
mod python {
    use pyo3::prelude::*;
    use pyo3::wrap_pyfunction;
    use pyo3::types::PyModule;
    use pyo3::prelude::Bound;       // Bound<'py, T> API in PyO3 v0.25

    use std::fs::File;
    use std::io::BufReader;

    use crate::{BranchAndBound, DdaError, Graph, Params, SolveMode};

    fn to_py_err(e: DdaError) -> PyErr {
        match e {
            DdaError::Io(e) => pyo3::exceptions::PyIOError::new_err(e.to_string()),
            other => pyo3::exceptions::PyValueError::new_err(other.to_string()),
        }
    }

    fn load(graph_path: &str) -> PyResult<Graph> {
        let file = File::open(graph_path)
            .map_err(|e| pyo3::exceptions::PyIOError::new_err(e.to_string()))?;
        Graph::parse_dimacs(BufReader::new(file)).map_err(to_py_err)
    }

    /// DDA on a DIMACS file – returns (best size, list of vertex-label lists).
    #[pyfunction]
    #[pyo3(text_signature = "(graph_path, gamma, all_solutions)")]
    fn solve_dda_py(graph_path: String, gamma: f64, all_solutions: bool) -> PyResult<(usize, Vec<Vec<u64>>)> {
        let graph = load(&graph_path)?;
        let mode = if all_solutions { SolveMode::AllSolutions } else { SolveMode::OneSolution };
        let p = Params::new(gamma, mode);

        let res = crate::solve_dda(&graph, &mut BranchAndBound::new(), &p).map_err(to_py_err)?;
        let sets = res.solutions.iter().map(|s| s.labels()).collect();
        Ok((res.best_size, sets))
    }

    /// Degeneracy of the graph in a DIMACS file.
    #[pyfunction]
    #[pyo3(text_signature = "(graph_path)")]
    fn degeneracy_py(graph_path: String) -> PyResult<usize> {
        Ok(crate::degeneracy(&load(&graph_path)?))
    }

    /// Helper: parse DIMACS, return (n, m).
    #[pyfunction]
    #[pyo3(text_signature = "(graph_path)")]
    fn parse_dimacs_py(graph_path: String) -> PyResult<(usize, usize)> {
        let graph = load(&graph_path)?;
        Ok((graph.n(), graph.m()))
    }

    /*======================================================================
    │  PyO3 module-init
    └=====================================================================*/

    /// ***Important***: name `_native` must match `pyproject.toml -> module-name`.
    #[pymodule]
    fn _native(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(solve_dda_py, m)?)?;
        m.add_function(wrap_pyfunction!(degeneracy_py, m)?)?;
        m.add_function(wrap_pyfunction!(parse_dimacs_py, m)?)?;
        Ok(())
    }
}
