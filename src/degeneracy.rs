//! Graph degeneracy by min-degree peeling (Matula–Beck bucket queue).
//!
//! Buckets are plain vectors indexed by live degree. Every vertex remembers
//! its `(bucket, position)` slot so a move between buckets is a swap-remove
//! plus a push, both O(1). Total work is O(V + E).

use crate::graph::Graph;

/// Result of one peeling pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Degeneracy {
    /// The degeneracy (coloring number minus one) of the graph.
    pub value: usize,
    /// Vertices in the order they were peeled.
    pub order: Vec<usize>,
    /// Core number of every vertex.
    pub core: Vec<usize>,
}

/*───────────────────────────────────────────────────────────*/
/*  Bucket queue                                             */
/*───────────────────────────────────────────────────────────*/

struct Buckets {
    lists: Vec<Vec<usize>>,
    /// `slot[v] = (bucket, index in bucket)`.
    slot: Vec<(usize, usize)>,
}

impl Buckets {
    fn new(graph: &Graph) -> Self {
        let mut lists = vec![Vec::new(); graph.max_degree() + 1];
        let mut slot = Vec::with_capacity(graph.n());
        for v in 0..graph.n() {
            let d = graph.degree(v);
            slot.push((d, lists[d].len()));
            lists[d].push(v);
        }
        Self { lists, slot }
    }

    /// Remove `v` from its bucket, patching the slot of the vertex that
    /// takes its place.
    fn take(&mut self, v: usize) {
        let (b, i) = self.slot[v];
        self.lists[b].swap_remove(i);
        if let Some(&moved) = self.lists[b].get(i) {
            self.slot[moved] = (b, i);
        }
    }

    fn put(&mut self, v: usize, b: usize) {
        self.slot[v] = (b, self.lists[b].len());
        self.lists[b].push(v);
    }

    /// First non-empty bucket at or above `from`.
    fn first_nonempty(&self, from: usize) -> Option<usize> {
        (from..self.lists.len()).find(|&i| !self.lists[i].is_empty())
    }
}

/*───────────────────────────────────────────────────────────*/
/*  Public API                                               */
/*───────────────────────────────────────────────────────────*/

/// Degeneracy of `graph`; 0 for an empty or edgeless graph.
pub fn degeneracy(graph: &Graph) -> usize {
    degeneracy_ordering(graph).value
}

/// Full peeling pass: degeneracy, elimination order and core numbers.
pub fn degeneracy_ordering(graph: &Graph) -> Degeneracy {
    let n = graph.n();
    let mut buckets = Buckets::new(graph);
    let mut live: Vec<usize> = (0..n).map(|v| graph.degree(v)).collect();
    let mut removed = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut core = vec![0usize; n];

    let mut k = 0usize;
    let mut scan_from = 0usize;
    for _ in 0..n {
        // A removal lowers live degrees by at most one, so nothing can sit
        // below `i - 1` on the next round.
        let Some(i) = buckets.first_nonempty(scan_from) else {
            break;
        };
        k = k.max(i);

        let Some(&v) = buckets.lists[i].last() else {
            break;
        };
        buckets.take(v);
        removed[v] = true;
        core[v] = k;
        order.push(v);

        for &w in graph.neighbors(v) {
            if removed[w] {
                continue;
            }
            buckets.take(w);
            live[w] -= 1;
            buckets.put(w, live[w]);
        }
        scan_from = i.saturating_sub(1);
    }

    tracing::debug!(n, degeneracy = k, "degeneracy computed");
    Degeneracy { value: k, order, core }
}

/*────────────────── unit checks ──────────────────*/
#[cfg(test)]
mod tests {
    use super::*;

    fn complete(n: usize) -> Graph {
        let mut edges = Vec::new();
        for u in 0..n {
            for v in (u + 1)..n {
                edges.push((u, v));
            }
        }
        Graph::from_edge_list(n, &edges)
    }

    #[test]
    fn empty_and_edgeless() {
        assert_eq!(degeneracy(&Graph::with_vertices(0)), 0);
        assert_eq!(degeneracy(&Graph::with_vertices(5)), 0);
    }

    #[test]
    fn known_values() {
        assert_eq!(degeneracy(&complete(5)), 4);
        // a path is a tree
        let path = Graph::from_edge_list(4, &[(0, 1), (1, 2), (2, 3)]);
        assert_eq!(degeneracy(&path), 1);
        // a cycle is 2-degenerate
        let cycle = Graph::from_edge_list(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
        assert_eq!(degeneracy(&cycle), 2);
    }

    #[test]
    fn six_vertex_example() {
        let g = Graph::from_edge_list(
            6,
            &[(0, 1), (0, 3), (0, 4), (0, 5), (1, 2), (1, 3), (1, 4), (2, 3), (3, 4), (4, 5)],
        );
        let d = degeneracy_ordering(&g);
        assert_eq!(d.value, 3);
        assert_eq!(d.order.len(), 6);
        // 2 and 5 are peeled before the K4 core
        assert_eq!(d.core[2], 2);
        assert_eq!(d.core[5], 2);
        for v in [0, 1, 3, 4] {
            assert_eq!(d.core[v], 3);
        }
    }

    #[test]
    fn order_is_a_permutation() {
        let g = complete(4);
        let mut order = degeneracy_ordering(&g).order;
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }
}
