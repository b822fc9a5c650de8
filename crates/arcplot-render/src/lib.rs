#![forbid(unsafe_code)]

//! Drawing context and graph drawing routines for `arcplot`.
//!
//! The interesting parts are [`self_loop`] (closed cubic loops bowed away from the origin) and
//! [`edges`] (edge/reverse-edge disambiguation so that `a -> b` and `b -> a` never overlap).
//! Everything draws into an explicit [`Canvas`], which serializes to SVG via [`svg`].

pub mod canvas;
pub mod chord;
pub mod edges;
pub mod error;
pub mod geom;
pub mod nodes;
pub mod path;
pub mod self_loop;
pub mod svg;

pub use canvas::{ArrowGeometry, ArrowHead, ArrowPatch, Canvas, Item, Marker, TextLabel};
pub use chord::{ChordOptions, chord_diagram, render_chord_diagram};
pub use edges::{
    EdgeRoute, EdgeStyle, ReverseWidth, RoutingOptions, draw_graph_edge, draw_graph_edges,
    draw_plain_edges, graph_edges_weights, route_edges,
};
pub use error::{Error, Result};
pub use geom::{EPSILON, normalize_vector, orthogonal_vector};
pub use nodes::{LabelStyle, NodeStyle, draw_labels, draw_nodes};
pub use path::{BezierPath, PathCommand};
pub use self_loop::{LoopStyle, draw_self_loop, self_loop_path};
pub use svg::{SvgRenderOptions, render_svg};

pub use arcplot_layout::{Point, Positions, Vector};
