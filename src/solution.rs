//! Candidate quasi-clique: a vertex subset S with cached |S| and m(S).
//!
//! • O(1) access to size and internal edge count.
//! • Built once from an oracle assignment; read-only afterwards.
//! • Works together with [`Graph`] and the enumerator.

use bitvec::prelude::*;
use crate::graph::Graph;

/// Vertex subset bound to a single [`Graph`].
#[derive(Clone, Debug)]
pub struct SolutionSet<'g> {
    graph:      &'g Graph,
    vertices:   BitVec,
    edge_count: usize,
    size:       usize,
}

/*───────────────────────── impl ─────────────────────────*/

impl<'g> SolutionSet<'g> {
    /* constructors */

    /// Empty set.
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            vertices: bitvec![0; graph.n()],
            edge_count: 0,
            size: 0,
        }
    }

    /// Build from a bitset over the graph's vertices; computes edge count.
    pub fn from_bitset(graph: &'g Graph, subset: &BitSlice) -> Self {
        assert_eq!(subset.len(), graph.n());

        let size = subset.count_ones();
        let mut e = 0usize;
        for i in subset.iter_ones() {
            for &j in graph.neighbors(i).iter().filter(|&&j| j > i) {
                if subset[j] { e += 1; }
            }
        }

        let mut vertices = BitVec::repeat(false, graph.n());
        vertices |= subset;

        Self { graph, vertices, edge_count: e, size }
    }

    /// Build from dense vertex indices.
    pub fn from_vertices(graph: &'g Graph, vs: &[usize]) -> Self {
        let mut bits = bitvec![0; graph.n()];
        for &v in vs {
            bits.set(v, true);
        }
        Self::from_bitset(graph, &bits)
    }

    /* queries */

    #[inline] pub fn size(&self) -> usize          { self.size }
    #[inline] pub fn edges(&self) -> usize         { self.edge_count }
    #[inline] pub fn bitset(&self) -> &BitVec      { &self.vertices }
    #[inline] pub fn graph(&self) -> &'g Graph     { self.graph }

    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        self.vertices[v]
    }

    /// Dense indices in ascending order.
    pub fn vertices(&self) -> Vec<usize> {
        self.vertices.iter_ones().collect()
    }

    /// External labels, sorted ascending.
    pub fn labels(&self) -> Vec<u64> {
        let mut ls: Vec<u64> = self.vertices.iter_ones().map(|v| self.graph.label(v)).collect();
        ls.sort_unstable();
        ls
    }

    /// Number of neighbours of `v` inside S.
    pub fn internal_degree(&self, v: usize) -> usize {
        self.graph.neighbors(v).iter().filter(|&&u| self.vertices[u]).count()
    }

    /// Smallest internal degree over S; `None` for the empty set.
    pub fn min_internal_degree(&self) -> Option<usize> {
        self.vertices.iter_ones().map(|v| self.internal_degree(v)).min()
    }

    /// Every member has at least `k` neighbours in S.
    pub fn is_k_core(&self, k: usize) -> bool {
        self.min_internal_degree().is_none_or(|d| d >= k)
    }

    /// Edge density 2 m(S) / (|S|·(|S|−1)); returns 0 for |S| < 2.
    pub fn density(&self) -> f64 {
        if self.size < 2 { 0.0 }
        else { 2.0 * self.edge_count as f64 / (self.size * (self.size - 1)) as f64 }
    }

    /// Degree-based γ-quasi-clique test: every member is adjacent to at
    /// least γ·(|S|−1) other members.
    pub fn is_gamma_quasi_clique(&self, gamma: f64) -> bool {
        if self.size < 2 {
            return true;
        }
        let need = gamma * (self.size - 1) as f64;
        self.min_internal_degree()
            .is_some_and(|d| d as f64 + 1e-9 >= need)
    }

    /// The subgraph induced by S, keeping the original labels.
    pub fn induced_subgraph(&self) -> Graph {
        self.graph.induced_subgraph(&self.vertices)
    }
}

impl PartialEq for SolutionSet<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.vertices == other.vertices
    }
}

impl Eq for SolutionSet<'_> {}

/*───────────────────────── tests ─────────────────────────*/
