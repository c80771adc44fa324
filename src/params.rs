// src/params.rs
//! Parameter bundle for a DDA run.
//!
//! - `gamma` is the density threshold γ of the quasi-clique.
//! - `mode` selects one optimum or every optimum of the winning k level.
//! - `time_limit` bounds the oracle work of one k level, the first solve
//!   and every enumeration re-solve together; running out counts as
//!   "no candidate at this k".

use std::time::Duration;

/// How many maximum solutions the engine collects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SolveMode {
    /// Stop at the first optimum of every k level.
    #[default]
    OneSolution,
    /// Enumerate every same-size optimum of the winning k level.
    AllSolutions,
}

/// All tunable controls for DDA.
#[derive(Clone, Debug)]
pub struct Params {
    /// Target density γ ∈ [0,1] defining a γ-quasi-clique.
    pub gamma: f64,

    pub mode: SolveMode,

    /// Wall-clock budget shared by all oracle calls of one k level.
    /// `None` = unbounded.
    pub time_limit: Option<Duration>,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            gamma:      0.90,        // example default; override as needed
            mode:       SolveMode::OneSolution,
            time_limit: None,
        }
    }
}

impl Params {
    pub fn new(gamma: f64, mode: SolveMode) -> Self {
        Params { gamma, mode, ..Self::default() }
    }
}
