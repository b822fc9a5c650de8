//! Node markers and node labels.

use crate::canvas::{Canvas, Item, Marker, TextLabel};
use crate::error::{Error, Result};
use crate::{Point, Positions};
use arcplot_graphlib::Graph;
use euclid::vec2;

#[derive(Debug, Clone)]
pub struct NodeStyle {
    /// Marker area in square points.
    pub size: f64,
    pub color: String,
    pub alpha: f64,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            size: 300.0,
            color: "#1f78b4".to_string(),
            alpha: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LabelStyle {
    pub font_size: f64,
    pub color: String,
    pub bold: bool,
    pub font_family: String,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            color: "black".to_string(),
            bold: false,
            font_family: "sans-serif".to_string(),
        }
    }
}

impl LabelStyle {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Self::default()
        }
    }
}

/// Position of `node`, or [`Error::MissingPosition`].
pub(crate) fn position(pos: &Positions, node: &str) -> Result<Point> {
    pos.get(node).copied().ok_or_else(|| Error::MissingPosition {
        node: node.to_string(),
    })
}

/// One marker per graph node, in node order.
pub fn draw_nodes<E>(
    graph: &Graph<E>,
    pos: &Positions,
    canvas: &mut Canvas,
    style: &NodeStyle,
) -> Result<()>
where
    E: Default + 'static,
{
    for id in graph.nodes() {
        let center = position(pos, id)?;
        canvas.push(Item::Marker(Marker {
            node: id.to_string(),
            center,
            size: style.size,
            color: style.color.clone(),
            alpha: style.alpha,
        }));
    }
    Ok(())
}

/// Labels every node with its id, centered on the node.
pub fn draw_labels<E>(
    graph: &Graph<E>,
    pos: &Positions,
    canvas: &mut Canvas,
    style: &LabelStyle,
) -> Result<()>
where
    E: Default + 'static,
{
    for id in graph.nodes() {
        let anchor = position(pos, id)?;
        canvas.push(Item::Text(TextLabel {
            node: Some(id.to_string()),
            anchor,
            text: id.to_string(),
            font_size: style.font_size,
            color: style.color.clone(),
            bold: style.bold,
            font_family: style.font_family.clone(),
            offset: vec2(0.0, 0.0),
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcplot_graphlib::{AttrGraph, GraphOptions};
    use euclid::point2;

    #[test]
    fn one_marker_and_label_per_node() {
        let mut g = AttrGraph::new(GraphOptions::directed());
        g.set_path(&["x", "y", "z"]);
        let pos: Positions = [("x", 0.0), ("y", 1.0), ("z", 2.0)]
            .into_iter()
            .map(|(id, x)| (id.to_string(), point2(x, -x)))
            .collect();

        let mut canvas = Canvas::default();
        draw_nodes(&g, &pos, &mut canvas, &NodeStyle::default()).unwrap();
        draw_labels(&g, &pos, &mut canvas, &LabelStyle::bold()).unwrap();

        let markers: Vec<_> = canvas.markers().map(|m| m.node.as_str()).collect();
        assert_eq!(markers, ["x", "y", "z"]);
        let labels: Vec<_> = canvas.texts().collect();
        assert_eq!(labels.len(), 3);
        assert!(labels.iter().all(|t| t.bold && t.font_size == 12.0));
        assert_eq!(labels[2].anchor, point2(2.0, -2.0));
    }

    #[test]
    fn unpositioned_node_is_reported() {
        let mut g = AttrGraph::new(GraphOptions::directed());
        g.ensure_node("ghost");
        let mut canvas = Canvas::default();
        let err = draw_labels(&g, &Positions::new(), &mut canvas, &LabelStyle::default())
            .unwrap_err();
        assert!(matches!(err, Error::MissingPosition { node } if node == "ghost"));
    }
}
