//! Chord diagrams: circular layout, nodes, disambiguated edges, then bold labels.

use crate::canvas::Canvas;
use crate::edges::{RoutingOptions, draw_graph_edges};
use crate::error::Result;
use crate::nodes::{LabelStyle, NodeStyle, draw_labels, draw_nodes};
use crate::Positions;
use arcplot_graphlib::{Attrs, Graph};
use arcplot_layout::CircularOptions;

#[derive(Debug, Clone)]
pub struct ChordOptions {
    /// Must stay centered on the origin for self-loops to point outward.
    pub layout: CircularOptions,
    pub nodes: NodeStyle,
    pub labels: LabelStyle,
    pub routing: RoutingOptions,
    /// Side of the square figure created by [`render_chord_diagram`], in inches.
    pub plot_size: f64,
}

impl Default for ChordOptions {
    fn default() -> Self {
        Self {
            layout: CircularOptions::default(),
            nodes: NodeStyle::default(),
            labels: LabelStyle::bold(),
            routing: RoutingOptions::default(),
            plot_size: 10.0,
        }
    }
}

/// Draws `graph` into `canvas` and returns the positions used.
pub fn chord_diagram(
    graph: &Graph<Attrs>,
    canvas: &mut Canvas,
    opts: &ChordOptions,
) -> Result<Positions> {
    let layout_graph = arcplot_layout::Graph::from_graphlib(graph, &opts.routing.weight_key);
    let pos = arcplot_layout::circular_layout(&layout_graph, &opts.layout)?;

    draw_nodes(graph, &pos, canvas, &opts.nodes)?;
    draw_graph_edges(graph, &pos, canvas, &opts.routing)?;
    draw_labels(graph, &pos, canvas, &opts.labels)?;

    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "chord diagram drawn"
    );
    Ok(pos)
}

/// Like [`chord_diagram`], on a fresh square canvas of `opts.plot_size` inches.
pub fn render_chord_diagram(graph: &Graph<Attrs>, opts: &ChordOptions) -> Result<Canvas> {
    let mut canvas = Canvas::square(opts.plot_size);
    chord_diagram(graph, &mut canvas, opts)?;
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Item;
    use arcplot_graphlib::{AttrGraph, GraphOptions, weighted};

    #[test]
    fn draw_order_is_nodes_edges_labels() {
        let mut g = AttrGraph::new(GraphOptions::directed());
        g.set_edge_with_label("a", "b", weighted(1.0));
        g.set_edge_with_label("b", "a", weighted(1.0));

        let canvas = render_chord_diagram(&g, &ChordOptions::default()).unwrap();
        let kinds: Vec<&str> = canvas
            .items()
            .iter()
            .map(|i| match i {
                Item::Marker(_) => "node",
                Item::Arrow(_) => "edge",
                Item::Text(_) => "label",
            })
            .collect();
        assert_eq!(kinds, ["node", "node", "edge", "edge", "label", "label"]);
        assert_eq!(canvas.width_in(), 10.0);
    }

    #[test]
    fn positions_lie_on_the_unit_circle() {
        let mut g = AttrGraph::new(GraphOptions::directed());
        g.set_default_edge_label(|| weighted(1.0));
        g.set_path(&["a", "b", "c", "d"]);
        let mut canvas = Canvas::default();
        let pos = chord_diagram(&g, &mut canvas, &ChordOptions::default()).unwrap();
        for p in pos.values() {
            assert!((p.to_vector().length() - 1.0).abs() < 1e-9);
        }
    }
}
