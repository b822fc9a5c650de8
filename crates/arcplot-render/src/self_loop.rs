//! Self-loops.
//!
//! The loop leaves the node, swings around two anchors placed beyond (or inside) the node as
//! seen from the origin, and comes back. Data must be centered on the origin for the loop to
//! point outward.

use crate::canvas::{ArrowGeometry, ArrowHead, ArrowPatch, Canvas, Item};
use crate::geom::orthogonal_vector;
use crate::path::BezierPath;
use crate::Point;
use arcplot_graphlib::EdgeKey;

#[derive(Debug, Clone)]
pub struct LoopStyle {
    /// Scales the node position to find the loop's far end: above 1 the loop points away from
    /// the origin, below 1 towards it.
    pub padding: f64,
    /// Half-width of the loop (distance of each anchor from the padded point).
    pub width: f64,
    /// Stroke width in points.
    pub line_width: f64,
    pub color: String,
    pub alpha: f64,
    /// Arrow size; the `-|>` head is `0.4 x` long and `0.2 x` half-wide, in points.
    pub mutation_scale: f64,
    /// End trimming in points.
    pub shrink: f64,
}

impl Default for LoopStyle {
    fn default() -> Self {
        Self {
            padding: 1.5,
            width: 0.3,
            line_width: 0.2,
            color: "pink".to_string(),
            alpha: 0.5,
            mutation_scale: 30.0,
            shrink: 2.0,
        }
    }
}

/// Closed cubic path from `point` through two anchors back to `point`.
///
/// The anchors are `padding * point +/- o`, where `o` is orthogonal to `point` and has length
/// `width`.
pub fn self_loop_path(point: Point, padding: f64, width: f64) -> BezierPath {
    let padded = (point.to_vector() * padding).to_point();
    let ort = orthogonal_vector(point, width, Some(width));

    let first_anchor = padded + ort;
    let second_anchor = padded - ort;

    BezierPath::new(point).cubic_to(first_anchor, second_anchor, point)
}

/// Adds a self-loop arrow at `point` to the canvas.
pub fn draw_self_loop(canvas: &mut Canvas, point: Point, style: &LoopStyle) {
    canvas.push(Item::Arrow(loop_patch(None, point, style)));
}

pub(crate) fn loop_patch(edge: Option<EdgeKey>, point: Point, style: &LoopStyle) -> ArrowPatch {
    ArrowPatch {
        edge,
        geometry: ArrowGeometry::Path(self_loop_path(point, style.padding, style.width)),
        color: style.color.clone(),
        alpha: style.alpha,
        line_width: style.line_width,
        head: Some(ArrowHead::from_mutation_scale(style.mutation_scale)),
        shrink_a: style.shrink,
        shrink_b: style.shrink,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathCommand;
    use euclid::point2;

    fn anchors(path: &BezierPath) -> (Point, Point) {
        match path.commands() {
            [PathCommand::MoveTo(_), PathCommand::Curve4(a, b, _)] => (*a, *b),
            other => panic!("unexpected loop shape: {other:?}"),
        }
    }

    #[test]
    fn loop_starts_and_ends_on_the_node() {
        let p = point2(0.6, -0.8);
        let path = self_loop_path(p, 1.5, 0.3);
        assert_eq!(path.start(), Some(p));
        assert_eq!(path.end(), Some(p));
    }

    #[test]
    fn anchors_are_symmetric_around_padded_point() {
        let p = point2(0.6, 0.8);
        let (a, b) = anchors(&self_loop_path(p, 1.5, 0.3));
        let mid = a.lerp(b, 0.5);
        assert!((mid.x - 0.9).abs() < 1e-12);
        assert!((mid.y - 1.2).abs() < 1e-12);
        assert!(((a - b).length() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn padding_below_one_pulls_loop_inward() {
        let p = point2(1.0, 1.0);
        let (a, b) = anchors(&self_loop_path(p, 0.5, 0.1));
        let mid = a.lerp(b, 0.5);
        assert!(mid.to_vector().length() < p.to_vector().length());
    }

    #[test]
    fn draw_self_loop_adds_one_arrow_with_style() {
        let mut canvas = Canvas::default();
        draw_self_loop(&mut canvas, point2(1.0, 0.0), &LoopStyle::default());

        let arrows: Vec<_> = canvas.arrows().collect();
        assert_eq!(arrows.len(), 1);
        let a = arrows[0];
        assert_eq!(a.color, "pink");
        assert_eq!(a.alpha, 0.5);
        assert_eq!(a.line_width, 0.2);
        assert_eq!(a.head, Some(ArrowHead::from_mutation_scale(30.0)));
        assert!(a.edge.is_none());
        assert!(a.arc_radius().is_none());
    }
}
