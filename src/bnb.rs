//! Depth-first branch and bound for small binary programs.
//!
//! This is the in-crate reference backend for [`IntegerProgramOracle`]. It
//! needs no native library and proves optimality exactly, which is enough
//! for tests and for graphs of a few dozen vertices; larger instances
//! should plug a real MIP engine in behind the same trait.
//!
//! Every row keeps three running sums over its coefficients:
//! the activity of variables fixed to one, and the positive / negative
//! mass of variables still free. A row is dead as soon as its best-case
//! activity can no longer meet its bound.

use bitvec::prelude::*;
use std::cmp::Reverse;
use std::time::Instant;

use crate::model::{Cmp, QuasiCliqueModel, Row};
use crate::oracle::{IntegerProgramOracle, OracleError, Outcome};

const EPS: f64 = 1e-6;

/// Exact binary branch and bound.
#[derive(Clone, Debug, Default)]
pub struct BranchAndBound {
    /// Give up with [`OracleError::Solver`] after this many nodes.
    node_limit: Option<u64>,
    /// Nodes explored by the most recent call.
    last_nodes: u64,
}

impl BranchAndBound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node_limit(limit: u64) -> Self {
        Self { node_limit: Some(limit), last_nodes: 0 }
    }

    #[inline] pub fn last_nodes(&self) -> u64 { self.last_nodes }
}

impl IntegerProgramOracle for BranchAndBound {
    fn solve(
        &mut self,
        model: &QuasiCliqueModel,
        deadline: Option<Instant>,
    ) -> Result<Outcome, OracleError> {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(OracleError::Timeout);
        }

        let mut search = Search::new(model, self.node_limit, deadline);
        if !(0..model.rows().len()).all(|r| search.row_ok(r)) {
            self.last_nodes = 0;
            return Ok(Outcome::Infeasible);
        }
        let res = search.dfs(0);
        self.last_nodes = search.nodes;
        res?;

        tracing::trace!(nodes = search.nodes, "branch and bound finished");
        Ok(match search.best {
            Some((objective, assignment)) => Outcome::Optimal { objective, assignment },
            None => Outcome::Infeasible,
        })
    }
}

/*───────────────────────────────────────────────────────────*/
/*  Search state                                             */
/*───────────────────────────────────────────────────────────*/

struct Search<'m> {
    rows:     &'m [Row],
    /// Column view: `cols[j]` lists `(row, coefficient)`.
    cols:     Vec<Vec<(usize, f64)>>,
    fixed:    Vec<f64>,
    pos_free: Vec<f64>,
    neg_free: Vec<f64>,
    /// Branching order over variables.
    order:    Vec<usize>,
    x:        BitVec,
    selected: usize,
    /// Objective can never exceed the model's size cap.
    cap:      usize,
    best:     Option<(usize, BitVec)>,
    nodes:    u64,
    node_limit: Option<u64>,
    deadline:   Option<Instant>,
}

impl<'m> Search<'m> {
    fn new(model: &'m QuasiCliqueModel, node_limit: Option<u64>, deadline: Option<Instant>) -> Self {
        let n = model.num_vars();
        let rows = model.rows();
        let mut cols = vec![Vec::new(); n];
        let mut pos_free = vec![0.0; rows.len()];
        let mut neg_free = vec![0.0; rows.len()];
        for (r, row) in rows.iter().enumerate() {
            for &(j, c) in &row.coefs {
                cols[j].push((r, c));
                if c > 0.0 { pos_free[r] += c } else { neg_free[r] += c }
            }
        }
        // Densest columns first: they settle the most rows early.
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by_key(|&j| (Reverse(cols[j].len()), j));

        Self {
            rows,
            cols,
            fixed: vec![0.0; rows.len()],
            pos_free,
            neg_free,
            order,
            x: bitvec![0; n],
            selected: 0,
            cap: model.cap(),
            best: None,
            nodes: 0,
            node_limit,
            deadline,
        }
    }

    /// Row can still be satisfied by some completion of the free variables.
    fn row_ok(&self, r: usize) -> bool {
        let row = &self.rows[r];
        match row.cmp {
            Cmp::Ge => self.fixed[r] + self.pos_free[r] >= row.bound - EPS,
            Cmp::Le => self.fixed[r] + self.neg_free[r] <= row.bound + EPS,
        }
    }

    /// Fix variable `j`; returns false when some touched row died.
    fn assign(&mut self, j: usize, one: bool) -> bool {
        for t in 0..self.cols[j].len() {
            let (r, c) = self.cols[j][t];
            if c > 0.0 { self.pos_free[r] -= c } else { self.neg_free[r] -= c }
            if one {
                self.fixed[r] += c;
            }
        }
        if one {
            self.x.set(j, true);
            self.selected += 1;
        }
        self.cols[j].iter().all(|&(r, _)| self.row_ok(r))
    }

    fn unassign(&mut self, j: usize, one: bool) {
        for t in 0..self.cols[j].len() {
            let (r, c) = self.cols[j][t];
            if c > 0.0 { self.pos_free[r] += c } else { self.neg_free[r] += c }
            if one {
                self.fixed[r] -= c;
            }
        }
        if one {
            self.x.set(j, false);
            self.selected -= 1;
        }
    }

    fn dfs(&mut self, depth: usize) -> Result<(), OracleError> {
        self.nodes += 1;
        if let Some(limit) = self.node_limit {
            if self.nodes > limit {
                return Err(OracleError::Solver(format!("node limit {limit} reached")));
            }
        }
        if self.nodes & 0x3ff == 0 && self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(OracleError::Timeout);
        }

        let free = self.order.len() - depth;
        if let Some((b, _)) = &self.best {
            if (self.selected + free).min(self.cap) <= *b {
                return Ok(());
            }
        }
        if free == 0 {
            // every row was checked as its variables got fixed
            self.best = Some((self.selected, self.x.clone()));
            return Ok(());
        }

        let j = self.order[depth];
        for one in [true, false] {
            if self.assign(j, one) {
                self.dfs(depth + 1)?;
            }
            self.unassign(j, one);
            if self.saturated() {
                break;
            }
        }
        Ok(())
    }

    /// Incumbent already meets the size cap, nothing left to prove.
    fn saturated(&self) -> bool {
        self.best.as_ref().is_some_and(|(b, _)| *b >= self.cap)
    }
}

/*────────────────── unit checks ──────────────────*/
