//! Core `Graph` container.
//!
//! Storage is two insertion-ordered vectors (nodes, edges) plus hash indexes keyed by id /
//! endpoint pair. Removal keeps the relative order of the survivors, so enumeration order is
//! always "order of first insertion".

mod edge_key;
mod entries;
mod options;

pub use edge_key::EdgeKey;
pub use options::GraphOptions;

use edge_key::EdgeKeyView;
use entries::EdgeEntry;
use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

pub struct Graph<E>
where
    E: Default + 'static,
{
    options: GraphOptions,

    default_edge_label: Box<dyn Fn() -> E + Send + Sync>,

    nodes: Vec<String>,
    node_index: HashMap<String, usize>,

    edges: Vec<EdgeEntry<E>>,
    edge_index: HashMap<EdgeKey, usize>,
}

impl<E> Graph<E>
where
    E: Default + 'static,
{
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            default_edge_label: Box::new(E::default),
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
        }
    }

    pub fn is_directed(&self) -> bool {
        self.options.directed
    }

    pub fn set_default_edge_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> E + Send + Sync + 'static,
    {
        self.default_edge_label = Box::new(f);
        self
    }

    // Nodes

    /// Adds `id` if it is not present yet; existing nodes keep their position.
    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return self;
        }
        self.node_index.insert(id.clone(), self.nodes.len());
        self.nodes.push(id);
        self
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.clone()
    }

    pub fn remove_node(&mut self, id: &str) -> bool {
        let Some(idx) = self.node_index.remove(id) else {
            return false;
        };

        self.nodes.remove(idx);
        for i in idx..self.nodes.len() {
            if let Some(v) = self.node_index.get_mut(self.nodes[i].as_str()) {
                *v = i;
            }
        }

        // Remove incident edges.
        let before = self.edges.len();
        self.edges.retain(|e| e.key.v != id && e.key.w != id);
        if self.edges.len() != before {
            self.reindex_edges();
        }
        true
    }

    // Edges

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edge keys in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter().map(|e| &e.key)
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges.iter().map(|e| e.key.clone()).collect()
    }

    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        self.set_edge_inner(v.into(), w.into(), None)
    }

    pub fn set_edge_with_label(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        label: E,
    ) -> &mut Self {
        self.set_edge_inner(v.into(), w.into(), Some(label))
    }

    fn set_edge_inner(&mut self, v: String, w: String, label: Option<E>) -> &mut Self {
        self.ensure_node(v.clone());
        self.ensure_node(w.clone());

        if let Some(idx) = self.edge_index_of(&v, &w) {
            if let Some(label) = label {
                self.edges[idx].label = label;
            }
            return self;
        }

        let key = EdgeKey { v, w };
        let idx = self.edges.len();
        self.edges.push(EdgeEntry {
            key: key.clone(),
            label: label.unwrap_or_else(|| (self.default_edge_label)()),
        });
        self.edge_index.insert(key, idx);
        self
    }

    pub fn set_path(&mut self, nodes: &[&str]) -> &mut Self {
        for pair in nodes.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }

    fn edge_index_of(&self, v: &str, w: &str) -> Option<usize> {
        if let Some(&idx) = self.edge_index.get(&EdgeKeyView { v, w }) {
            return Some(idx);
        }
        if self.options.directed {
            return None;
        }
        self.edge_index.get(&EdgeKeyView { v: w, w: v }).copied()
    }

    /// For undirected graphs `(v, w)` and `(w, v)` name the same edge.
    pub fn has_edge(&self, v: &str, w: &str) -> bool {
        self.edge_index_of(v, w).is_some()
    }

    pub fn edge(&self, v: &str, w: &str) -> Option<&E> {
        let idx = self.edge_index_of(v, w)?;
        Some(&self.edges[idx].label)
    }

    pub fn edge_by_key(&self, key: &EdgeKey) -> Option<&E> {
        self.edge(&key.v, &key.w)
    }

    /// Returns the stored key for `(v, w)`, which for undirected graphs may be `(w, v)`.
    pub fn canonical_key(&self, v: &str, w: &str) -> Option<&EdgeKey> {
        let idx = self.edge_index_of(v, w)?;
        Some(&self.edges[idx].key)
    }

    pub fn remove_edge(&mut self, v: &str, w: &str) -> bool {
        let Some(idx) = self.edge_index_of(v, w) else {
            return false;
        };
        let key = self.edges.remove(idx).key;
        self.edge_index.remove(&key);
        for i in idx..self.edges.len() {
            let k = &self.edges[i].key;
            if let Some(slot) = self.edge_index.get_mut(k) {
                *slot = i;
            }
        }
        true
    }

    fn reindex_edges(&mut self) {
        self.edge_index.clear();
        for (i, e) in self.edges.iter().enumerate() {
            self.edge_index.insert(e.key.clone(), i);
        }
    }

    // Adjacency

    pub fn successors(&self, v: &str) -> Vec<&str> {
        if !self.options.directed {
            return self.neighbors(v);
        }
        self.edges
            .iter()
            .filter(|e| e.key.v == v)
            .map(|e| e.key.w.as_str())
            .collect()
    }

    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        if !self.options.directed {
            return self.neighbors(v);
        }
        self.edges
            .iter()
            .filter(|e| e.key.w == v)
            .map(|e| e.key.v.as_str())
            .collect()
    }

    pub fn neighbors(&self, v: &str) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for e in &self.edges {
            let other = if e.key.v == v {
                e.key.w.as_str()
            } else if e.key.w == v {
                e.key.v.as_str()
            } else {
                continue;
            };
            if !out.contains(&other) {
                out.push(other);
            }
        }
        out
    }

    pub fn out_edges(&self, v: &str) -> Vec<EdgeKey> {
        self.edges
            .iter()
            .filter(|e| e.key.v == v || (!self.options.directed && e.key.w == v))
            .map(|e| e.key.clone())
            .collect()
    }

    pub fn in_edges(&self, v: &str) -> Vec<EdgeKey> {
        self.edges
            .iter()
            .filter(|e| e.key.w == v || (!self.options.directed && e.key.v == v))
            .map(|e| e.key.clone())
            .collect()
    }
}
