//! Edge key types.
//!
//! Edges are identified by their `(v, w)` endpoint pair. Undirected graphs keep the
//! orientation the edge was first inserted with; lookups accept either orientation.

use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Clone, Copy, Hash)]
pub(in crate::graph) struct EdgeKeyView<'a> {
    pub(in crate::graph) v: &'a str,
    pub(in crate::graph) w: &'a str,
}

impl<'a> hashbrown::Equivalent<EdgeKey> for EdgeKeyView<'a> {
    fn equivalent(&self, key: &EdgeKey) -> bool {
        key.v == self.v && key.w == self.w
    }
}

#[derive(Debug, Clone)]
pub struct EdgeKey {
    pub v: String,
    pub w: String,
}

impl EdgeKey {
    pub fn new(v: impl Into<String>, w: impl Into<String>) -> Self {
        Self {
            v: v.into(),
            w: w.into(),
        }
    }

    /// `true` when source and target are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.v == self.w
    }

    /// The `(w, v)` counterpart of this key.
    pub fn reversed(&self) -> EdgeKey {
        EdgeKey {
            v: self.w.clone(),
            w: self.v.clone(),
        }
    }
}

impl PartialEq for EdgeKey {
    fn eq(&self, other: &Self) -> bool {
        self.v == other.v && self.w == other.w
    }
}

impl Eq for EdgeKey {}

impl Hash for EdgeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must agree with the derived `Hash` of `EdgeKeyView` for `Equivalent` lookups.
        self.v.as_str().hash(state);
        self.w.as_str().hash(state);
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.v, self.w)
    }
}
