//! All-pairs weighted distances for distance-based layouts.
//!
//! Edges are read as undirected; self-loops never shorten a path.

use crate::error::{Error, Result};
use crate::graph::Graph;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    dist: f64,
    node: usize,
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on distance.
        other
            .dist
            .total_cmp(&self.dist)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Row-major `n x n` matrix; unreachable pairs hold `f64::INFINITY`.
pub(crate) fn all_pairs(graph: &Graph) -> Result<Vec<Vec<f64>>> {
    let index = graph.index();
    let n = graph.nodes.len();
    let mut adj: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
    for e in &graph.edges {
        let (Some(&a), Some(&b)) = (index.get(e.source.as_str()), index.get(e.target.as_str()))
        else {
            return Err(Error::MissingEndpoint { edge_id: e.id() });
        };
        if a == b {
            continue;
        }
        if !(e.weight.is_finite() && e.weight > 0.0) {
            return Err(Error::NonPositiveWeight {
                edge_id: e.id(),
                weight: e.weight,
            });
        }
        adj[a].push((b, e.weight));
        adj[b].push((a, e.weight));
    }

    let mut out = Vec::with_capacity(n);
    for source in 0..n {
        let mut dist = vec![f64::INFINITY; n];
        dist[source] = 0.0;
        let mut heap = BinaryHeap::new();
        heap.push(Entry {
            dist: 0.0,
            node: source,
        });
        while let Some(Entry { dist: d, node }) = heap.pop() {
            if d > dist[node] {
                continue;
            }
            for &(next, w) in &adj[node] {
                let nd = d + w;
                if nd < dist[next] {
                    dist[next] = nd;
                    heap.push(Entry {
                        dist: nd,
                        node: next,
                    });
                }
            }
        }
        out.push(dist);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    fn edge(a: &str, b: &str, w: f64) -> Edge {
        Edge {
            source: a.into(),
            target: b.into(),
            weight: w,
        }
    }

    #[test]
    fn prefers_the_lighter_detour() {
        let g = Graph {
            nodes: ["a", "b", "c", "d"]
                .iter()
                .map(|id| Node { id: id.to_string() })
                .collect(),
            edges: vec![edge("a", "b", 5.0), edge("a", "c", 1.0), edge("c", "b", 1.0)],
        };
        let d = all_pairs(&g).unwrap();
        assert_eq!(d[0][1], 2.0);
        assert_eq!(d[1][0], 2.0);
        assert!(d[0][3].is_infinite());
    }

    #[test]
    fn rejects_zero_weight() {
        let g = Graph {
            nodes: vec![Node { id: "a".into() }, Node { id: "b".into() }],
            edges: vec![edge("a", "b", 0.0)],
        };
        assert!(matches!(
            all_pairs(&g),
            Err(Error::NonPositiveWeight { .. })
        ));
    }
}
