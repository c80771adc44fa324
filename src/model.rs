//! The binary program handed to the oracle for one density level k.
//!
//! One 0/1 variable `x_v` per vertex, objective `max Σ x_v`, and rows
//!
//! ```text
//!   Σ_{u ∈ N(v)} x_u − k·x_v ≥ 0          for every vertex v
//!   Σ_v x_v ≤ ⌊k/γ⌋ + 1
//! ```
//!
//! Feasible points are exactly the vertex sets that are k-cores of
//! themselves and small enough for that core to be a γ-quasi-clique.

use bitvec::prelude::*;

use crate::graph::Graph;

/// Row comparator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cmp {
    /// `activity ≤ bound`
    Le,
    /// `activity ≥ bound`
    Ge,
}

/// One sparse linear constraint.
#[derive(Clone, Debug)]
pub struct Row {
    pub name:  String,
    /// `(variable, coefficient)` pairs; variables appear at most once.
    pub coefs: Vec<(usize, f64)>,
    pub cmp:   Cmp,
    pub bound: f64,
}

impl Row {
    /// Left-hand side under a 0/1 assignment.
    pub fn activity(&self, x: &BitSlice) -> f64 {
        self.coefs.iter().filter(|&&(j, _)| x[j]).map(|&(_, c)| c).sum()
    }

    pub fn is_satisfied(&self, x: &BitSlice) -> bool {
        const EPS: f64 = 1e-6;
        let a = self.activity(x);
        match self.cmp {
            Cmp::Le => a <= self.bound + EPS,
            Cmp::Ge => a >= self.bound - EPS,
        }
    }
}

/// Size cap ⌊k/γ⌋ + 1 under which a k-core is a γ-quasi-clique.
///
/// Saturates instead of overflowing; γ = 0 gives no cap at all.
pub fn size_bound(gamma: f64, k: usize) -> usize {
    if gamma <= 0.0 {
        return usize::MAX;
    }
    // `as` saturates on overflow
    (((k as f64) / gamma).floor() as usize).saturating_add(1)
}

/// Linear system over `num_vars` binary variables. The objective is
/// implicit: maximise the number of variables set to one.
#[derive(Clone, Debug)]
pub struct QuasiCliqueModel {
    num_vars: usize,
    rows:     Vec<Row>,
    k:        usize,
    cap:      usize,
}

impl QuasiCliqueModel {
    /// Build the γ-QC(k) model for `graph`.
    pub fn build(graph: &Graph, gamma: f64, k: usize) -> Self {
        let n = graph.n();
        let mut rows = Vec::with_capacity(n + 1);

        for v in 0..n {
            let mut coefs: Vec<(usize, f64)> =
                graph.neighbors(v).iter().map(|&u| (u, 1.0)).collect();
            if k > 0 {
                coefs.push((v, -(k as f64)));
            }
            rows.push(Row {
                name: format!("x{v} has at least {k} neighbours"),
                coefs,
                cmp: Cmp::Ge,
                bound: 0.0,
            });
        }

        let cap = size_bound(gamma, k).min(n);
        rows.push(Row {
            name: "qc is k-core".to_string(),
            coefs: (0..n).map(|j| (j, 1.0)).collect(),
            cmp: Cmp::Le,
            bound: cap as f64,
        });

        Self { num_vars: n, rows, k, cap }
    }

    #[inline] pub fn num_vars(&self) -> usize { self.num_vars }
    #[inline] pub fn rows(&self) -> &[Row] { &self.rows }
    #[inline] pub fn k(&self) -> usize { self.k }
    /// Effective size cap (already clamped to the vertex count).
    #[inline] pub fn cap(&self) -> usize { self.cap }

    pub fn add_row(&mut self, row: Row) {
        debug_assert!(row.coefs.iter().all(|&(j, _)| j < self.num_vars));
        self.rows.push(row);
    }

    /// Forbid exactly the assignment whose ones are `selection`:
    /// `Σ_{v ∈ S} x_v ≤ |S| − 0.5`. No other integral point is cut off.
    pub fn exclude(&mut self, selection: &BitSlice) {
        let coefs: Vec<(usize, f64)> = selection.iter_ones().map(|j| (j, 1.0)).collect();
        let bound = coefs.len() as f64 - 0.5;
        let name = format!("exclude_prev_solution_{}", self.rows.len() + 1);
        self.add_row(Row { name, coefs, cmp: Cmp::Le, bound });
    }

    /// True iff every row holds under `x`.
    pub fn is_feasible(&self, x: &BitSlice) -> bool {
        x.len() == self.num_vars && self.rows.iter().all(|r| r.is_satisfied(x))
    }
}

/*────────────────── unit checks ──────────────────*/
