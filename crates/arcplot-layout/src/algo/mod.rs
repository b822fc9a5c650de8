pub mod circular;
pub mod kamada_kawai;
mod shortest_path;
pub mod spring;

use crate::error::{Error, Result};
use crate::geom::{Point, Vector, point};
use crate::graph::{Graph, Positions};

#[derive(Debug, Clone)]
pub enum Algorithm {
    /// Nodes evenly spaced on a circle, in node order, starting on the positive x-axis.
    Circular(CircularOptions),
    /// Kamada-Kawai spring energy minimization over weighted shortest-path distances.
    KamadaKawai(KamadaKawaiOptions),
    /// Fruchterman-Reingold force-directed placement from a seeded random start.
    Spring(SpringOptions),
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::Circular(CircularOptions::default())
    }
}

#[derive(Debug, Clone)]
pub struct CircularOptions {
    pub center: Point,
    pub scale: f64,
}

impl Default for CircularOptions {
    fn default() -> Self {
        Self {
            center: point(0.0, 0.0),
            scale: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct KamadaKawaiOptions {
    pub center: Point,
    pub scale: f64,
    /// Upper bound on the number of node moves.
    pub max_iterations: usize,
    /// Newton-Raphson steps spent on one node before picking the next.
    pub max_inner_iterations: usize,
    /// Stop once the largest energy gradient falls below this value.
    pub tolerance: f64,
}

impl Default for KamadaKawaiOptions {
    fn default() -> Self {
        Self {
            center: point(0.0, 0.0),
            scale: 1.0,
            max_iterations: 1_000,
            max_inner_iterations: 50,
            tolerance: 1e-4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SpringOptions {
    pub center: Point,
    pub scale: f64,
    /// Seed for the initial random placement. Equal seeds give equal layouts.
    pub random_seed: u64,
    pub iterations: usize,
    /// Optimal node distance; defaults to `1 / sqrt(n)`.
    pub k: Option<f64>,
    /// Stop once the mean displacement per iteration falls below this value.
    pub threshold: f64,
}

impl Default for SpringOptions {
    fn default() -> Self {
        Self {
            center: point(0.0, 0.0),
            scale: 1.0,
            random_seed: 0,
            iterations: 50,
            k: None,
            threshold: 1e-4,
        }
    }
}

pub(crate) fn check_finite(option: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidOption { option, value })
    }
}

pub(crate) fn check_center(center: Point) -> Result<()> {
    check_finite("center.x", center.x)?;
    check_finite("center.y", center.y)
}

/// Subtracts the mean, scales so the largest absolute coordinate equals `scale`, then moves
/// everything to `center`.
pub(crate) fn rescale_into(
    graph: &Graph,
    mut coords: Vec<Vector>,
    scale: f64,
    center: Point,
) -> Positions {
    if !coords.is_empty() {
        let n = coords.len() as f64;
        let mean = coords.iter().fold(Vector::zero(), |acc, v| acc + *v) / n;
        for c in &mut coords {
            *c -= mean;
        }
        let lim = coords
            .iter()
            .map(|c| c.x.abs().max(c.y.abs()))
            .fold(0.0_f64, f64::max);
        if lim > 0.0 {
            for c in &mut coords {
                *c *= scale / lim;
            }
        }
    }

    graph
        .nodes
        .iter()
        .zip(coords)
        .map(|(node, c)| (node.id.clone(), center + c))
        .collect()
}

#[derive(Debug, Clone)]
pub(crate) struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    pub(crate) fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }

    /// Uniform in `[0, 1)` with 53 bits of precision.
    pub(crate) fn next_f64_unit(&mut self) -> f64 {
        let u = self.next_u64() >> 11;
        (u as f64) / ((1u64 << 53) as f64)
    }
}
