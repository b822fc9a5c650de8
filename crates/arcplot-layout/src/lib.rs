#![forbid(unsafe_code)]

//! Headless node placement for `arcplot` diagrams.
//!
//! Every algorithm returns a [`Positions`] map in node insertion order, rescaled so that the
//! largest absolute coordinate equals the requested `scale` and shifted to `center`. Renderers
//! assume the origin-centered output (self-loops are bowed away from the origin).

pub mod algo;
pub mod error;
pub mod geom;
pub mod graph;

pub use algo::{Algorithm, CircularOptions, KamadaKawaiOptions, SpringOptions};
pub use error::{Error, Result};
pub use geom::{Point, Vector};
pub use graph::{Edge, Graph, Node, Positions};

/// Headless layout entry point.
pub fn layout(graph: &Graph, algorithm: &Algorithm) -> Result<Positions> {
    match algorithm {
        Algorithm::Circular(opts) => algo::circular::layout(graph, opts),
        Algorithm::KamadaKawai(opts) => algo::kamada_kawai::layout(graph, opts),
        Algorithm::Spring(opts) => algo::spring::layout(graph, opts),
    }
}

/// Places the nodes of `graph` evenly on a circle (see [`CircularOptions`]).
pub fn circular_layout(graph: &Graph, opts: &CircularOptions) -> Result<Positions> {
    algo::circular::layout(graph, opts)
}

pub fn kamada_kawai_layout(graph: &Graph, opts: &KamadaKawaiOptions) -> Result<Positions> {
    algo::kamada_kawai::layout(graph, opts)
}

pub fn spring_layout(graph: &Graph, opts: &SpringOptions) -> Result<Positions> {
    algo::spring::layout(graph, opts)
}
