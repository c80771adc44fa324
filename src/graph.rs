//! Simple undirected graph stored as an adjacency BitVec per row, plus a
//! sorted neighbour list per vertex.
//!
//! Vertices are dense indices `0..n`; each one carries an external `u64`
//! label so graphs with sparse identifiers can be loaded and reported back
//! in their own terms. Supports DIMACS *.clq parsing and G(n, p) generation.

use bitvec::prelude::*;
use rand::Rng;
use std::collections::HashMap;
use std::io::{BufRead, Read};

use crate::error::{DdaError, Result};

#[derive(Clone, Debug)]
pub struct Graph {
    /// Row‐major adjacency; `adj[i][j]` is 1 ⇔ edge (i,j) exists, j≠i.
    adj: Vec<BitVec>,
    /// Sorted neighbours of every vertex.
    nbrs: Vec<Vec<usize>>,
    /// External identifier of every dense index.
    labels: Vec<u64>,
}

impl Graph {
    /*────────── constructors ──────────*/

    /// Empty graph with `n` isolated vertices labelled `0..n`.
    pub fn with_vertices(n: usize) -> Self {
        Self::with_labels((0..n as u64).collect())
    }

    /// Isolated vertices with the given labels (must be distinct).
    pub fn with_labels(labels: Vec<u64>) -> Self {
        let n = labels.len();
        debug_assert_eq!(
            labels.iter().collect::<std::collections::HashSet<_>>().len(),
            n,
            "duplicate vertex labels"
        );
        let mut rows = Vec::with_capacity(n);
        for _ in 0..n {
            rows.push(bitvec![0; n]);
        }
        Self { adj: rows, nbrs: vec![Vec::new(); n], labels }
    }

    /// Build from explicit edge list (0-based indices, undirected).
    pub fn from_edge_list(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut g = Self::with_vertices(n);
        for &(u, v) in edges {
            g.add_edge(u, v);
        }
        g
    }

    /// Build from an edge list over arbitrary labels. Dense indices are
    /// assigned in order of first appearance.
    pub fn from_labeled_edges(edges: &[(u64, u64)]) -> Self {
        let mut index: HashMap<u64, usize> = HashMap::new();
        let mut labels = Vec::new();
        for &(a, b) in edges {
            for l in [a, b] {
                index.entry(l).or_insert_with(|| {
                    labels.push(l);
                    labels.len() - 1
                });
            }
        }
        let mut g = Self::with_labels(labels);
        for &(a, b) in edges {
            g.add_edge(index[&a], index[&b]);
        }
        g
    }

    /// Erdős–Rényi G(n, p): every pair is joined independently with
    /// probability `p`.
    pub fn gnp<R>(n: usize, p: f64, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let p = p.clamp(0.0, 1.0);
        let mut g = Self::with_vertices(n);
        for u in 0..n {
            for v in (u + 1)..n {
                if rng.gen_bool(p) {
                    g.add_edge(u, v);
                }
            }
        }
        g
    }

    /// Parse DIMACS *.clq format from any buffered reader.
    ///
    /// Vertices are 1-based in the file and labelled `0..n` here.
    pub fn parse_dimacs<R: Read>(reader: R) -> Result<Self> {
        let mut n: Option<usize> = None;
        let mut edges: Vec<(usize, usize)> = Vec::new();

        for (lineno, line) in std::io::BufReader::new(reader).lines().enumerate() {
            let line = line?;
            let line = line.trim();
            let lineno = lineno + 1;
            if line.is_empty() || line.starts_with('c') {
                continue;
            }
            let parts: Vec<_> = line.split_whitespace().collect();
            let field = |i: usize| -> Result<usize> {
                parts
                    .get(i)
                    .ok_or_else(|| DdaError::Parse { line: lineno, msg: "missing field".into() })?
                    .parse()
                    .map_err(|e| DdaError::Parse { line: lineno, msg: format!("{e}") })
            };
            match parts[0] {
                // p edge <n> <m>
                "p" => n = Some(field(2)?),
                // e u v   (1-based)
                "e" => {
                    let (u, v) = (field(1)?, field(2)?);
                    if u == 0 || v == 0 {
                        return Err(DdaError::Parse { line: lineno, msg: "vertex ids are 1-based".into() });
                    }
                    edges.push((u - 1, v - 1));
                }
                other => {
                    return Err(DdaError::Parse { line: lineno, msg: format!("unknown line type `{other}`") });
                }
            }
        }

        let n = n.ok_or(DdaError::Parse { line: 0, msg: "missing problem line".into() })?;
        if let Some(&(u, v)) = edges.iter().find(|&&(u, v)| u >= n || v >= n) {
            return Err(DdaError::Parse {
                line: 0,
                msg: format!("edge ({}, {}) out of range for {n} vertices", u + 1, v + 1),
            });
        }
        Ok(Self::from_edge_list(n, &edges))
    }

    /*────────── getters ──────────*/

    #[inline] pub fn n(&self) -> usize { self.adj.len() }

    /// Number of edges (each counted once).
    pub fn m(&self) -> usize {
        self.nbrs.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Degree of vertex v.
    #[inline]
    pub fn degree(&self, v: usize) -> usize {
        self.nbrs[v].len()
    }

    pub fn max_degree(&self) -> usize {
        self.nbrs.iter().map(Vec::len).max().unwrap_or(0)
    }

    #[inline]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adj[u][v]
    }

    /// Sorted neighbours of v.
    #[inline]
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.nbrs[v]
    }

    /// Immutable row slice for adjacency of v.
    #[inline]
    pub fn neigh_row(&self, v: usize) -> &BitSlice {
        &self.adj[v]
    }

    #[inline]
    pub fn label(&self, v: usize) -> u64 {
        self.labels[v]
    }

    pub fn labels(&self) -> &[u64] {
        &self.labels
    }

    /// Dense index of an external label. Linear scan.
    pub fn index_of(&self, label: u64) -> Option<usize> {
        self.labels.iter().position(|&l| l == label)
    }

    /// Return all edges as Vec<(u,v)> with u < v.
    pub fn edge_list(&self) -> Vec<(usize, usize)> {
        let mut edges = Vec::with_capacity(self.m());
        for i in 0..self.n() {
            for &j in self.nbrs[i].iter().filter(|&&j| j > i) {
                edges.push((i, j));
            }
        }
        edges
    }

    /// Subgraph induced by `vertices`, re-indexed densely in ascending
    /// order but keeping the parent's labels.
    pub fn induced_subgraph(&self, vertices: &BitSlice) -> Graph {
        let keep: Vec<usize> = vertices.iter_ones().collect();
        let mut sub = Graph::with_labels(keep.iter().map(|&v| self.labels[v]).collect());
        for (i, &u) in keep.iter().enumerate() {
            for (j, &v) in keep.iter().enumerate().skip(i + 1) {
                if self.has_edge(u, v) {
                    sub.add_edge(i, j);
                }
            }
        }
        sub
    }

    /*────────── mutators ──────────*/

    /// Insert edge {u, v}; self-loops and repeated edges are ignored.
    pub fn add_edge(&mut self, u: usize, v: usize) {
        assert!(u < self.n() && v < self.n());
        if u == v || self.adj[u][v] {
            return;
        }
        self.adj[u].set(v, true);
        self.adj[v].set(u, true);
        let pos = self.nbrs[u].partition_point(|&x| x < v);
        self.nbrs[u].insert(pos, v);
        let pos = self.nbrs[v].partition_point(|&x| x < u);
        self.nbrs[v].insert(pos, u);
    }
}

/*────────────────── tiny unit check ──────────────────*/
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::io::Cursor;

    #[test]
    fn tiny_triangle() {
        let g = Graph::from_edge_list(3, &[(0, 1), (0, 2), (1, 2)]);
        assert_eq!(g.n(), 3);
        assert_eq!(g.m(), 3);
        assert_eq!(g.edge_list().len(), 3);
        assert_eq!(g.neighbors(0), &[1, 2]);
    }

    #[test]
    fn loops_and_duplicates_ignored() {
        let g = Graph::from_edge_list(3, &[(0, 1), (1, 0), (2, 2)]);
        assert_eq!(g.m(), 1);
        assert_eq!(g.degree(2), 0);
        assert!(!g.has_edge(2, 2));
    }

    #[test]
    fn sparse_labels_are_remapped() {
        let g = Graph::from_labeled_edges(&[(100, 7), (7, 42)]);
        assert_eq!(g.n(), 3);
        assert_eq!(g.labels(), &[100, 7, 42]);
        let seven = g.index_of(7).unwrap();
        assert_eq!(g.degree(seven), 2);
        assert!(g.has_edge(g.index_of(100).unwrap(), seven));
        assert!(g.index_of(5).is_none());
    }

    #[test]
    fn dimacs_roundtrip() {
        let dimacs = b"c comment\np edge 4 3\ne 1 2\ne 2 3\ne 3 4\n";
        let g = Graph::parse_dimacs(Cursor::new(dimacs)).unwrap();
        assert_eq!((g.n(), g.m()), (4, 3));
        assert!(g.has_edge(2, 3));
    }

    #[test]
    fn dimacs_rejects_garbage() {
        let bad = b"p edge 2 1\ne 1 x\n";
        assert!(matches!(
            Graph::parse_dimacs(Cursor::new(bad)),
            Err(DdaError::Parse { line: 2, .. })
        ));
        let out_of_range = b"p edge 2 1\ne 1 3\n";
        assert!(Graph::parse_dimacs(Cursor::new(out_of_range)).is_err());
        assert!(Graph::parse_dimacs(Cursor::new(b"e 1 2\n")).is_err());
    }

    #[test]
    fn induced_keeps_labels() {
        let g = Graph::from_labeled_edges(&[(10, 20), (20, 30), (30, 10), (30, 40)]);
        let mut keep = bitvec![0; g.n()];
        for l in [10, 20, 30] {
            keep.set(g.index_of(l).unwrap(), true);
        }
        let sub = g.induced_subgraph(&keep);
        assert_eq!(sub.n(), 3);
        assert_eq!(sub.m(), 3);
        assert_eq!(sub.labels(), &[10, 20, 30]);
    }

    #[test]
    fn gnp_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(Graph::gnp(10, 0.0, &mut rng).m(), 0);
        assert_eq!(Graph::gnp(10, 1.0, &mut rng).m(), 45);
    }
}
