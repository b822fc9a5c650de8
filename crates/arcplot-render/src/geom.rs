//! Vector helpers behind self-loop placement.

use crate::{Point, Vector};
use euclid::vec2;

/// Added to the y-coordinate before dividing by it in [`orthogonal_vector`].
///
/// Points on the x-axis therefore get a huge but finite slope instead of a division by zero;
/// the resulting slight tilt is accepted.
pub const EPSILON: f64 = 0.000001;

/// Returns `vector` scaled to length `normalize_to`, keeping its direction.
///
/// A zero vector has no direction and is returned unchanged.
pub fn normalize_vector(vector: Vector, normalize_to: f64) -> Vector {
    let norm = vector.length();
    if norm == 0.0 {
        return vector;
    }
    vector * (normalize_to / norm)
}

/// Vector orthogonal to the radius vector from the origin to `point`.
///
/// The x component is `width`; the y component follows from `v . p = 0`. When `normalize_to`
/// is given the result is rescaled to that length.
pub fn orthogonal_vector(point: Point, width: f64, normalize_to: Option<f64>) -> Vector {
    let x = width;
    let y = -x * point.x / (point.y + EPSILON);

    let ort = vec2(x, y);
    match normalize_to {
        Some(n) => normalize_vector(ort, n),
        None => ort,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use euclid::point2;

    #[test]
    fn orthogonal_to_radius() {
        let samples = [
            (1.0, 1.0),
            (-0.5, 0.25),
            (0.3, -2.0),
            (-1.0, -1.0),
            (0.0, 0.7),
            (12.0, 0.01),
        ];
        for (x, y) in samples {
            let p = point2(x, y);
            let v = orthogonal_vector(p, 0.3, None);
            let dot = v.dot(p.to_vector());
            // The epsilon shifts the exact root; the error scales with |v.y| * EPSILON.
            let tol = 1e-9 + v.y.abs() * EPSILON * 10.0;
            assert!(dot.abs() <= tol, "p=({x}, {y}) v={v:?} dot={dot}");
        }
    }

    #[test]
    fn first_component_is_width() {
        let v = orthogonal_vector(point2(0.4, 0.9), 0.25, None);
        assert_eq!(v.x, 0.25);
    }

    #[test]
    fn normalized_length_matches_target() {
        for n in [0.1, 0.3, 1.0, 7.5] {
            for (x, y) in [(1.0, 2.0), (-3.0, 0.5), (0.2, -0.2)] {
                let v = orthogonal_vector(point2(x, y), 0.3, Some(n));
                assert!((v.length() - n).abs() < 1e-12, "n={n} p=({x}, {y})");
            }
        }
    }

    #[test]
    fn normalize_keeps_direction() {
        let v = normalize_vector(vec2(3.0, 4.0), 10.0);
        assert!((v.x - 6.0).abs() < 1e-12);
        assert!((v.y - 8.0).abs() < 1e-12);
    }

    #[test]
    fn x_axis_point_stays_finite() {
        let v = orthogonal_vector(point2(1.0, 0.0), 0.3, None);
        assert!(v.y.is_finite());
        assert!(v.y < -1e4);
        let n = orthogonal_vector(point2(1.0, 0.0), 0.3, Some(0.3));
        assert!((n.length() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn zero_vector_normalizes_to_zero() {
        let v = normalize_vector(vec2(0.0, 0.0), 2.0);
        assert_eq!(v, vec2(0.0, 0.0));
    }
}
