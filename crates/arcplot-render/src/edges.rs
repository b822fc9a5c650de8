//! Edge drawing with reverse-pair disambiguation.
//!
//! A plain renderer draws `a -> b` and `b -> a` on top of each other. [`draw_graph_edges`]
//! instead walks the edges in graph order with a working set of not-yet-drawn edges: the first
//! edge of a pair gets the forward style, its reverse (if present and still pending) gets the
//! reverse style right away, and self-loops go through [`crate::self_loop`].

use crate::canvas::{ArrowGeometry, ArrowHead, ArrowPatch, Canvas, Item};
use crate::Positions;
use crate::error::{Error, Result};
use crate::nodes::position;
use crate::self_loop::{LoopStyle, loop_patch};
use arcplot_graphlib::{Attrs, EdgeKey, Graph};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

#[derive(Debug, Clone)]
pub struct EdgeStyle {
    pub color: String,
    /// Curvature of the arc (see [`ArrowGeometry::Arc3`]); `0.0` draws a straight line.
    pub arc_radius: f64,
    pub alpha: f64,
    /// Arrow size in points; heads are only drawn for directed graphs.
    pub arrow_size: f64,
    /// Marker area (square points) assumed at both ends; the arc stops at the marker edge.
    pub node_size: f64,
}

impl EdgeStyle {
    pub fn forward() -> Self {
        Self {
            color: "pink".to_string(),
            arc_radius: 0.2,
            alpha: 0.5,
            arrow_size: 30.0,
            node_size: 1000.0,
        }
    }

    pub fn reverse() -> Self {
        Self {
            color: "lightblue".to_string(),
            arc_radius: 0.1,
            ..Self::forward()
        }
    }

    /// Straight black edges between default-sized markers.
    pub fn plain() -> Self {
        Self {
            color: "black".to_string(),
            arc_radius: 0.0,
            alpha: 1.0,
            arrow_size: 10.0,
            node_size: 300.0,
        }
    }

    fn shrink(&self) -> f64 {
        self.node_size.max(0.0).sqrt() / 2.0
    }
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self::forward()
    }
}

/// Line width of the reverse edge of a pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReverseWidth {
    /// The weight of the forward edge it pairs with, so both arcs of a pair match.
    #[default]
    Forward,
    /// The reverse edge's own weight.
    Own,
}

#[derive(Debug, Clone)]
pub struct RoutingOptions {
    /// Edge attribute used as line width.
    pub weight_key: String,
    /// First edge of a pair, and edges without a reverse.
    pub forward: EdgeStyle,
    /// Reverse edge of a pair.
    pub reverse: EdgeStyle,
    pub reverse_width: ReverseWidth,
    /// Self-loops; `line_width` is replaced by the edge weight.
    pub self_loop: LoopStyle,
}

impl Default for RoutingOptions {
    fn default() -> Self {
        Self {
            weight_key: "weight".to_string(),
            forward: EdgeStyle::forward(),
            reverse: EdgeStyle::reverse(),
            reverse_width: ReverseWidth::default(),
            self_loop: LoopStyle::default(),
        }
    }
}

/// How one edge ends up being drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeRoute {
    SelfLoop { edge: EdgeKey, weight: f64 },
    Forward { edge: EdgeKey, weight: f64 },
    Reverse { edge: EdgeKey, weight: f64 },
}

impl EdgeRoute {
    pub fn edge(&self) -> &EdgeKey {
        match self {
            EdgeRoute::SelfLoop { edge, .. }
            | EdgeRoute::Forward { edge, .. }
            | EdgeRoute::Reverse { edge, .. } => edge,
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            EdgeRoute::SelfLoop { weight, .. }
            | EdgeRoute::Forward { weight, .. }
            | EdgeRoute::Reverse { weight, .. } => *weight,
        }
    }
}

/// Edge -> numeric `weight_key` attribute, in graph edge order.
pub fn graph_edges_weights(
    graph: &Graph<Attrs>,
    weight_key: &str,
) -> Result<IndexMap<EdgeKey, f64>> {
    let mut out = IndexMap::with_capacity(graph.edge_count());
    for key in graph.edges() {
        let attrs = graph.edge_by_key(key).ok_or_else(|| Error::MissingWeight {
            edge: key.clone(),
            key: weight_key.to_string(),
        })?;
        let value = attrs.get(weight_key).ok_or_else(|| Error::MissingWeight {
            edge: key.clone(),
            key: weight_key.to_string(),
        })?;
        let weight = value.as_f64().ok_or_else(|| Error::NonNumericWeight {
            edge: key.clone(),
            key: weight_key.to_string(),
            value: value.clone(),
        })?;
        out.insert(key.clone(), weight);
    }
    Ok(out)
}

/// Edges that still have to be drawn. Each edge can be taken exactly once.
struct WorkingSet {
    remaining: FxHashSet<EdgeKey>,
}

impl WorkingSet {
    fn new<'a>(edges: impl Iterator<Item = &'a EdgeKey>) -> Self {
        Self {
            remaining: edges.cloned().collect(),
        }
    }

    fn contains(&self, key: &EdgeKey) -> bool {
        self.remaining.contains(key)
    }

    fn take(&mut self, key: &EdgeKey) -> bool {
        self.remaining.remove(key)
    }

    fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Decides, in graph edge order, how every edge is drawn.
///
/// Self-loops become [`EdgeRoute::SelfLoop`]. Any other edge becomes [`EdgeRoute::Forward`]
/// and, when its reverse exists and has not been drawn yet, is immediately followed by an
/// [`EdgeRoute::Reverse`] for that reverse edge. Every edge of the graph appears exactly once.
///
/// Route weights are line widths: an edge's entry in `weights`, or `1.0` when `weights` has
/// no entry for it. A reverse route takes the width selected by `reverse_width`.
pub fn route_edges<E>(
    graph: &Graph<E>,
    weights: &IndexMap<EdgeKey, f64>,
    reverse_width: ReverseWidth,
) -> Vec<EdgeRoute>
where
    E: Default + 'static,
{
    let weight_of = |k: &EdgeKey| weights.get(k).copied().unwrap_or(1.0);
    let mut pending = WorkingSet::new(graph.edges());
    let mut routes = Vec::with_capacity(graph.edge_count());

    for edge in graph.edges() {
        if !pending.contains(edge) {
            continue;
        }

        if edge.is_self_loop() {
            pending.take(edge);
            routes.push(EdgeRoute::SelfLoop {
                edge: edge.clone(),
                weight: weight_of(edge),
            });
            continue;
        }

        pending.take(edge);
        let forward_weight = weight_of(edge);
        routes.push(EdgeRoute::Forward {
            edge: edge.clone(),
            weight: forward_weight,
        });

        // For undirected graphs the stored key is the only key, so the reverse is never
        // pending and nothing is drawn twice.
        let reverse = edge.reversed();
        if graph.has_edge(&reverse.v, &reverse.w) && pending.take(&reverse) {
            let weight = match reverse_width {
                ReverseWidth::Forward => forward_weight,
                ReverseWidth::Own => weight_of(&reverse),
            };
            routes.push(EdgeRoute::Reverse {
                edge: reverse,
                weight,
            });
        }

        if pending.is_empty() {
            break;
        }
    }

    debug_assert!(pending.is_empty());
    routes
}

/// Draws one edge as an arc with the given style and line width.
pub fn draw_graph_edge(
    canvas: &mut Canvas,
    pos: &Positions,
    edge: &EdgeKey,
    edge_weight: f64,
    directed: bool,
    style: &EdgeStyle,
) -> Result<()> {
    let from = position(pos, &edge.v)?;
    let to = position(pos, &edge.w)?;
    let shrink = style.shrink();
    canvas.push(Item::Arrow(ArrowPatch {
        edge: Some(edge.clone()),
        geometry: ArrowGeometry::Arc3 {
            from,
            to,
            rad: style.arc_radius,
        },
        color: style.color.clone(),
        alpha: style.alpha,
        line_width: edge_weight,
        head: directed.then(|| ArrowHead::from_mutation_scale(style.arrow_size)),
        shrink_a: shrink,
        shrink_b: shrink,
    }));
    Ok(())
}

/// Draws every edge of `graph` so that opposite directions stay distinguishable.
///
/// Line widths come from the `weight_key` attribute, which must be numeric on every edge.
pub fn draw_graph_edges(
    graph: &Graph<Attrs>,
    pos: &Positions,
    canvas: &mut Canvas,
    opts: &RoutingOptions,
) -> Result<()> {
    let weights = graph_edges_weights(graph, &opts.weight_key)?;
    let routes = route_edges(graph, &weights, opts.reverse_width);
    let directed = graph.is_directed();

    for route in &routes {
        match route {
            EdgeRoute::SelfLoop { edge, weight } => {
                let point = position(pos, &edge.v)?;
                let style = LoopStyle {
                    line_width: *weight,
                    ..opts.self_loop.clone()
                };
                canvas.push(Item::Arrow(loop_patch(Some(edge.clone()), point, &style)));
            }
            EdgeRoute::Forward { edge, weight } => {
                draw_graph_edge(canvas, pos, edge, *weight, directed, &opts.forward)?;
            }
            EdgeRoute::Reverse { edge, weight } => {
                draw_graph_edge(canvas, pos, edge, *weight, directed, &opts.reverse)?;
            }
        }
        tracing::trace!(edge = %route.edge(), ?route, "edge drawn");
    }

    tracing::debug!(
        edges = routes.len(),
        self_loops = routes
            .iter()
            .filter(|r| matches!(r, EdgeRoute::SelfLoop { .. }))
            .count(),
        reverse_pairs = routes
            .iter()
            .filter(|r| matches!(r, EdgeRoute::Reverse { .. }))
            .count(),
        "graph edges drawn"
    );
    Ok(())
}

/// Draws every edge straight with one style, the way a multigraph-unaware renderer would:
/// reverse pairs overlap and self-loops collapse to nothing (they are skipped).
pub fn draw_plain_edges<E>(
    graph: &Graph<E>,
    pos: &Positions,
    canvas: &mut Canvas,
    style: &EdgeStyle,
    line_width: f64,
) -> Result<()>
where
    E: Default + 'static,
{
    let directed = graph.is_directed();
    for edge in graph.edges() {
        if edge.is_self_loop() {
            position(pos, &edge.v)?;
            tracing::trace!(edge = %edge, "self-loop skipped by plain renderer");
            continue;
        }
        draw_graph_edge(canvas, pos, edge, line_width, directed, style)?;
    }
    Ok(())
}
