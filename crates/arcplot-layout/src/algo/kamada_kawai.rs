//! Kamada-Kawai placement.
//!
//! Springs connect every node pair with rest length proportional to their graph distance and
//! stiffness `1 / d^2`. Starting from the circular layout, the node with the largest energy
//! gradient is moved by Newton-Raphson steps until it settles, then the next worst node is
//! picked. Pairs in different components are treated as `max_distance + 1` apart.

use super::{check_center, check_finite, circular::unit_circle, rescale_into, shortest_path};
use crate::algo::KamadaKawaiOptions;
use crate::error::Result;
use crate::geom::Vector;
use crate::graph::{Graph, Positions};
use nalgebra::{Matrix2, Vector2};

const MIN_SEPARATION: f64 = 1e-9;

pub fn layout(graph: &Graph, opts: &KamadaKawaiOptions) -> Result<Positions> {
    graph.validate()?;
    check_finite("scale", opts.scale)?;
    check_finite("tolerance", opts.tolerance)?;
    check_center(opts.center)?;

    let n = graph.nodes.len();
    if n == 0 {
        return Ok(Positions::new());
    }
    if n == 1 {
        let mut out = Positions::new();
        out.insert(graph.nodes[0].id.clone(), opts.center);
        return Ok(out);
    }

    let mut dist = shortest_path::all_pairs(graph)?;
    let max_finite = dist
        .iter()
        .flatten()
        .copied()
        .filter(|d| d.is_finite())
        .fold(0.0_f64, f64::max);
    let fill = if max_finite > 0.0 {
        max_finite + 1.0
    } else {
        1.0
    };
    for d in dist.iter_mut().flatten() {
        if d.is_infinite() {
            *d = fill;
        }
    }

    let system = SpringSystem::new(&dist);
    let mut pos = unit_circle(n);
    let iterations = system.solve(&mut pos, opts);
    tracing::debug!(nodes = n, iterations, "kamada-kawai layout finished");

    Ok(rescale_into(graph, pos, opts.scale, opts.center))
}

struct SpringSystem {
    /// Rest lengths.
    l: Vec<Vec<f64>>,
    /// Stiffness.
    k: Vec<Vec<f64>>,
}

impl SpringSystem {
    fn new(dist: &[Vec<f64>]) -> Self {
        let n = dist.len();
        let max_d = dist
            .iter()
            .flatten()
            .copied()
            .fold(0.0_f64, f64::max)
            .max(MIN_SEPARATION);
        // Unit display side: the longest shortest path spans the layout diameter.
        let len_unit = 2.0 / max_d;

        let mut l = vec![vec![0.0; n]; n];
        let mut k = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let d = dist[i][j].max(MIN_SEPARATION);
                l[i][j] = len_unit * d;
                k[i][j] = 1.0 / (d * d);
            }
        }
        Self { l, k }
    }

    fn gradient(&self, pos: &[Vector], m: usize) -> (Vector2<f64>, Matrix2<f64>) {
        let mut g = Vector2::zeros();
        let mut h = Matrix2::zeros();
        let pm = pos[m];
        for (i, pi) in pos.iter().enumerate() {
            if i == m {
                continue;
            }
            let dx = pm.x - pi.x;
            let dy = pm.y - pi.y;
            let r = (dx * dx + dy * dy).sqrt().max(MIN_SEPARATION);
            let r3 = r * r * r;
            let k = self.k[m][i];
            let l = self.l[m][i];

            g[0] += k * (dx - l * dx / r);
            g[1] += k * (dy - l * dy / r);

            h[(0, 0)] += k * (1.0 - l * dy * dy / r3);
            h[(0, 1)] += k * (l * dx * dy / r3);
            h[(1, 1)] += k * (1.0 - l * dx * dx / r3);
        }
        h[(1, 0)] = h[(0, 1)];
        (g, h)
    }

    /// Moves nodes until the largest gradient norm drops below `tolerance`; returns the
    /// number of Newton steps taken.
    fn solve(&self, pos: &mut [Vector], opts: &KamadaKawaiOptions) -> usize {
        let n = pos.len();
        let mut steps = 0usize;
        let mut converged = false;

        for _ in 0..opts.max_iterations {
            let (m, delta) = (0..n)
                .map(|m| (m, self.gradient(pos, m).0.norm()))
                .fold((0, f64::NEG_INFINITY), |best, cur| {
                    if cur.1 > best.1 { cur } else { best }
                });
            if delta < opts.tolerance {
                converged = true;
                break;
            }

            for _ in 0..opts.max_inner_iterations {
                let (g, h) = self.gradient(pos, m);
                if g.norm() < opts.tolerance {
                    break;
                }
                let Some(step) = h.lu().solve(&(-g)) else {
                    tracing::trace!(node = m, "singular hessian; skipping node");
                    break;
                };
                if !(step[0].is_finite() && step[1].is_finite()) {
                    break;
                }
                pos[m].x += step[0];
                pos[m].y += step[1];
                steps += 1;
            }
        }

        if !converged && n > 1 {
            tracing::warn!(
                nodes = n,
                max_iterations = opts.max_iterations,
                "kamada-kawai layout did not converge"
            );
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    fn path_graph(ids: &[&str]) -> Graph {
        Graph {
            nodes: ids.iter().map(|id| Node { id: id.to_string() }).collect(),
            edges: ids
                .windows(2)
                .map(|w| Edge {
                    source: w[0].into(),
                    target: w[1].into(),
                    weight: 1.0,
                })
                .collect(),
        }
    }

    fn dist(a: crate::Point, b: crate::Point) -> f64 {
        (a - b).length()
    }

    #[test]
    fn path_ends_are_farthest_apart() {
        let g = path_graph(&["a", "b", "c", "d"]);
        let pos = layout(&g, &KamadaKawaiOptions::default()).unwrap();
        let ad = dist(pos["a"], pos["d"]);
        let ab = dist(pos["a"], pos["b"]);
        let bc = dist(pos["b"], pos["c"]);
        assert!(ad > ab && ad > bc, "ad={ad} ab={ab} bc={bc}");
    }

    #[test]
    fn output_is_bounded_by_scale() {
        let g = path_graph(&["a", "b", "c", "d", "e"]);
        let opts = KamadaKawaiOptions {
            scale: 3.0,
            ..Default::default()
        };
        let pos = layout(&g, &opts).unwrap();
        for p in pos.values() {
            assert!(p.x.abs() <= 3.0 + 1e-9 && p.y.abs() <= 3.0 + 1e-9);
        }
    }

    #[test]
    fn disconnected_nodes_get_positions() {
        let mut g = path_graph(&["a", "b"]);
        g.nodes.push(Node { id: "lonely".into() });
        let pos = layout(&g, &KamadaKawaiOptions::default()).unwrap();
        assert_eq!(pos.len(), 3);
        assert!(pos.values().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn self_loops_are_ignored() {
        let mut g = path_graph(&["a", "b", "c"]);
        g.edges.push(Edge {
            source: "b".into(),
            target: "b".into(),
            weight: 0.0,
        });
        assert!(layout(&g, &KamadaKawaiOptions::default()).is_ok());
    }
}
