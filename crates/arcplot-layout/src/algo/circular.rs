use super::{check_center, check_finite, rescale_into};
use crate::algo::CircularOptions;
use crate::error::Result;
use crate::geom::{Vector, vector};
use crate::graph::{Graph, Positions};
use std::f64::consts::TAU;

pub fn layout(graph: &Graph, opts: &CircularOptions) -> Result<Positions> {
    graph.validate()?;
    check_finite("scale", opts.scale)?;
    check_center(opts.center)?;

    let n = graph.nodes.len();
    if n == 1 {
        let mut out = Positions::new();
        out.insert(graph.nodes[0].id.clone(), opts.center);
        return Ok(out);
    }

    Ok(rescale_into(graph, unit_circle(n), opts.scale, opts.center))
}

/// `n` evenly spaced points on the unit circle, the first at angle 0.
pub(crate) fn unit_circle(n: usize) -> Vec<Vector> {
    (0..n)
        .map(|i| {
            let theta = TAU * i as f64 / n as f64;
            vector(theta.cos(), theta.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::point;
    use crate::graph::Node;

    fn graph(n: usize) -> Graph {
        Graph {
            nodes: (0..n).map(|i| Node { id: format!("n{i}") }).collect(),
            edges: Vec::new(),
        }
    }

    #[test]
    fn empty_graph_has_no_positions() {
        let pos = layout(&graph(0), &CircularOptions::default()).unwrap();
        assert!(pos.is_empty());
    }

    #[test]
    fn single_node_sits_at_center() {
        let opts = CircularOptions {
            center: point(2.0, 3.0),
            scale: 1.0,
        };
        let pos = layout(&graph(1), &opts).unwrap();
        assert_eq!(pos["n0"], point(2.0, 3.0));
    }

    #[test]
    fn four_nodes_land_on_the_axes() {
        let pos = layout(&graph(4), &CircularOptions::default()).unwrap();
        let expected = [(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0), (0.0, -1.0)];
        for (i, (x, y)) in expected.iter().enumerate() {
            let p = pos[&format!("n{i}")];
            assert!((p.x - x).abs() < 1e-9, "x of n{i}: {}", p.x);
            assert!((p.y - y).abs() < 1e-9, "y of n{i}: {}", p.y);
        }
    }

    #[test]
    fn largest_coordinate_matches_scale() {
        let opts = CircularOptions {
            scale: 2.5,
            ..Default::default()
        };
        let pos = layout(&graph(7), &opts).unwrap();
        let lim = pos
            .values()
            .map(|p| p.x.abs().max(p.y.abs()))
            .fold(0.0_f64, f64::max);
        assert!((lim - 2.5).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_finite_scale() {
        let opts = CircularOptions {
            scale: f64::NAN,
            ..Default::default()
        };
        assert!(layout(&graph(3), &opts).is_err());
    }
}
