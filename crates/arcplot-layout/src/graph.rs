use crate::error::{Error, Result};
use crate::geom::Point;
use arcplot_graphlib::Attrs;
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Node id -> position, in node insertion order.
pub type Positions = IndexMap<String, Point>;

/// Layout input: just enough of a graph to place nodes.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub source: String,
    pub target: String,
    /// Distance-like weight; missing or non-numeric attributes read as `1.0`.
    pub weight: f64,
}

impl Edge {
    pub fn id(&self) -> String {
        format!("{}->{}", self.source, self.target)
    }
}

impl Graph {
    /// Copies node ids and edge weights out of an attribute graph.
    ///
    /// Edges whose `weight_key` attribute is missing or not a number get weight `1.0`, so
    /// they count as a single hop. Layouts that ignore weights never look at it.
    pub fn from_graphlib(g: &arcplot_graphlib::Graph<Attrs>, weight_key: &str) -> Self {
        let nodes = g.nodes().map(|id| Node { id: id.to_string() }).collect();
        let edges = g
            .edges()
            .map(|key| {
                let weight = g
                    .edge_by_key(key)
                    .and_then(|attrs| attrs.get(weight_key))
                    .and_then(serde_json::Value::as_f64)
                    .unwrap_or(1.0);
                Edge {
                    source: key.v.clone(),
                    target: key.w.clone(),
                    weight,
                }
            })
            .collect();
        Self { nodes, edges }
    }

    pub fn validate(&self) -> Result<()> {
        let node_exists: BTreeSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        for e in &self.edges {
            if !node_exists.contains(e.source.as_str()) || !node_exists.contains(e.target.as_str())
            {
                return Err(Error::MissingEndpoint { edge_id: e.id() });
            }
        }
        Ok(())
    }

    /// Node id -> dense index, in node order.
    pub(crate) fn index(&self) -> IndexMap<&str, usize> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcplot_graphlib::{AttrGraph, GraphOptions, weighted};

    #[test]
    fn from_graphlib_reads_weights_with_default() {
        let mut g = AttrGraph::new(GraphOptions::directed());
        g.set_edge_with_label("a", "b", weighted(2.5));
        g.set_edge("b", "c");
        let mut labeled = Attrs::new();
        labeled.insert("weight".to_string(), serde_json::json!("heavy"));
        g.set_edge_with_label("c", "a", labeled);

        let lg = Graph::from_graphlib(&g, "weight");
        assert_eq!(lg.nodes.len(), 3);
        assert_eq!(lg.edges[0].weight, 2.5);
        assert_eq!(lg.edges[1].weight, 1.0);
        assert_eq!(lg.edges[2].weight, 1.0);
        assert!(lg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_dangling_edges() {
        let lg = Graph {
            nodes: vec![Node { id: "a".into() }],
            edges: vec![Edge {
                source: "a".into(),
                target: "z".into(),
                weight: 1.0,
            }],
        };
        let err = lg.validate().unwrap_err();
        assert!(matches!(err, Error::MissingEndpoint { edge_id } if edge_id == "a->z"));
    }
}
