//! Fruchterman-Reingold force-directed placement.
//!
//! Dense O(n^2) formulation: every pair repels with `k^2 / d`, adjacent pairs attract with
//! `w * d^2 / k`. Displacements are capped by a temperature that cools linearly to zero.

use super::{XorShift64Star, check_center, check_finite, rescale_into};
use crate::algo::SpringOptions;
use crate::error::{Error, Result};
use crate::geom::{Vector, vector};
use crate::graph::{Graph, Positions};

const MIN_DISTANCE: f64 = 0.01;

pub fn layout(graph: &Graph, opts: &SpringOptions) -> Result<Positions> {
    graph.validate()?;
    check_finite("scale", opts.scale)?;
    check_center(opts.center)?;
    if let Some(k) = opts.k {
        if !(k.is_finite() && k > 0.0) {
            return Err(Error::InvalidOption {
                option: "k",
                value: k,
            });
        }
    }

    let n = graph.nodes.len();
    if n == 0 {
        return Ok(Positions::new());
    }
    if n == 1 {
        let mut out = Positions::new();
        out.insert(graph.nodes[0].id.clone(), opts.center);
        return Ok(out);
    }

    let adjacency = symmetric_adjacency(graph);
    let mut rng = XorShift64Star::new(opts.random_seed);
    let mut pos: Vec<Vector> = (0..n)
        .map(|_| vector(rng.next_f64_unit(), rng.next_f64_unit()))
        .collect();

    let k = opts.k.unwrap_or_else(|| (1.0 / n as f64).sqrt());
    let mut temperature = 0.1 * spread(&pos).max(MIN_DISTANCE);
    let cooling = temperature / (opts.iterations as f64 + 1.0);

    let mut performed = 0usize;
    for _ in 0..opts.iterations {
        let mut moved = 0.0;
        let mut displacement = vec![Vector::zero(); n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let delta = pos[i] - pos[j];
                let d = delta.length().max(MIN_DISTANCE);
                displacement[i] += delta * (k * k / (d * d) - adjacency[i][j] * d / k);
            }
        }
        for (p, disp) in pos.iter_mut().zip(&displacement) {
            let len = disp.length().max(MIN_DISTANCE);
            let step = *disp * (temperature / len);
            moved += step.length();
            *p += step;
        }
        temperature -= cooling;
        performed += 1;
        if moved / (n as f64) < opts.threshold {
            break;
        }
    }
    tracing::debug!(nodes = n, iterations = performed, "spring layout finished");

    Ok(rescale_into(graph, pos, opts.scale, opts.center))
}

fn symmetric_adjacency(graph: &Graph) -> Vec<Vec<f64>> {
    let index = graph.index();
    let n = graph.nodes.len();
    let mut a = vec![vec![0.0; n]; n];
    for e in &graph.edges {
        let (Some(&i), Some(&j)) = (index.get(e.source.as_str()), index.get(e.target.as_str()))
        else {
            continue;
        };
        if i == j {
            continue;
        }
        a[i][j] += e.weight;
        a[j][i] += e.weight;
    }
    a
}

fn spread(pos: &[Vector]) -> f64 {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in pos {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    (max_x - min_x).max(max_y - min_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    fn triangle_plus_isolated() -> Graph {
        let mut g = Graph {
            nodes: ["a", "b", "c", "d"]
                .iter()
                .map(|id| Node { id: id.to_string() })
                .collect(),
            edges: Vec::new(),
        };
        for (s, t) in [("a", "b"), ("b", "c"), ("c", "a")] {
            g.edges.push(Edge {
                source: s.into(),
                target: t.into(),
                weight: 1.0,
            });
        }
        g
    }

    #[test]
    fn same_seed_same_layout() {
        let g = triangle_plus_isolated();
        let opts = SpringOptions {
            random_seed: 42,
            ..Default::default()
        };
        let a = layout(&g, &opts).unwrap();
        let b = layout(&g, &opts).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn positions_are_finite_and_scaled() {
        let g = triangle_plus_isolated();
        let pos = layout(&g, &SpringOptions::default()).unwrap();
        let lim = pos
            .values()
            .map(|p| p.x.abs().max(p.y.abs()))
            .fold(0.0_f64, f64::max);
        assert!((lim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_non_positive_k() {
        let opts = SpringOptions {
            k: Some(0.0),
            ..Default::default()
        };
        assert!(layout(&triangle_plus_isolated(), &opts).is_err());
    }
}
