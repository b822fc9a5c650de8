#![forbid(unsafe_code)]

//! Graph container used by the `arcplot` layout and render crates.
//!
//! Nodes are opaque string ids kept in insertion order. Edges are directed or undirected
//! (see [`GraphOptions::directed`]) and are enumerated in insertion order, which is the
//! "native" order every renderer relies on when it walks `Graph::edges`.

pub mod adjacency;
pub mod attrs;
pub mod error;
pub mod graph;

pub use attrs::{Attrs, weighted};
pub use error::{Error, Result};
pub use graph::{EdgeKey, Graph, GraphOptions};

/// Graph shape produced by the adjacency-matrix constructors and consumed by the renderer.
pub type AttrGraph = Graph<Attrs>;
