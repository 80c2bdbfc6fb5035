//! Lines and tolerance-based line-line intersection.

use crate::error::{GeometryError, GeometryResult};
use crate::Tolerances;
use nalgebra::{Point3, Unit, Vector3};
use std::fmt;

/// An infinite line in 3D space, stored as a point on the line and a unit
/// direction.
///
/// Produced by intersecting two non-parallel planes; the direction's sign is
/// not significant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// A point on the line.
    pub point: Point3<f64>,
    /// Unit direction of the line (sign not significant).
    pub direction: Unit<Vector3<f64>>,
}

impl Line {
    /// Intersect two lines using their mutual closest approach.
    ///
    /// Lines built from empirically probed planes never meet exactly, so the
    /// intersection is computed as the midpoint of the shortest segment
    /// between them. Fails with [`GeometryError::ParallelLines`] when the
    /// directions are collinear within tolerance, and with
    /// [`GeometryError::SkewLines`] when the closest-approach gap exceeds
    /// the intersection tolerance.
    pub fn intersect(&self, other: &Line, tol: &Tolerances) -> GeometryResult<Point3<f64>> {
        let u = self.direction.into_inner();
        let v = other.direction.into_inner();
        if u.cross(&v).norm() < tol.parallelism {
            return Err(GeometryError::ParallelLines);
        }

        // Closest-approach parameters for p1 + s*u and p2 + t*v (unit u, v).
        let w0 = self.point - other.point;
        let b = u.dot(&v);
        let d = u.dot(&w0);
        let e = v.dot(&w0);
        let denom = 1.0 - b * b;

        let s = (b * e - d) / denom;
        let t = (e - b * d) / denom;

        let q1 = self.point + u * s;
        let q2 = other.point + v * t;

        let gap = (q1 - q2).norm();
        if gap > tol.intersection {
            return Err(GeometryError::SkewLines {
                distance: gap,
                tolerance: tol.intersection,
            });
        }

        Ok(Point3::from((q1.coords + q2.coords) * 0.5))
    }

    /// Perpendicular distance from `p` to the line.
    pub fn distance_to_point(&self, p: &Point3<f64>) -> f64 {
        (p - self.point).cross(&self.direction.into_inner()).norm()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line through X:{:.3} Y:{:.3} Z:{:.3} along ({:.4}, {:.4}, {:.4})",
            self.point.x,
            self.point.y,
            self.point.z,
            self.direction.x,
            self.direction.y,
            self.direction.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tol() -> Tolerances {
        Tolerances::default()
    }

    fn line(point: [f64; 3], direction: [f64; 3]) -> Line {
        Line {
            point: Point3::new(point[0], point[1], point[2]),
            direction: Unit::new_normalize(Vector3::new(
                direction[0],
                direction[1],
                direction[2],
            )),
        }
    }

    #[test]
    fn test_exact_crossing() {
        // X axis and Y axis meet at the origin.
        let a = line([-5.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let b = line([0.0, 7.0, 0.0], [0.0, 1.0, 0.0]);

        let p = a.intersect(&b, &tol()).unwrap();
        assert!(p.coords.norm() < 1e-9);
    }

    #[test]
    fn test_oblique_crossing() {
        // Both lines pass through (1, 2, 3).
        let a = line([0.0, 1.0, 2.0], [1.0, 1.0, 1.0]);
        let b = line([1.0, 2.0, 0.0], [0.0, 0.0, 1.0]);

        let p = a.intersect(&b, &tol()).unwrap();
        assert!((p - Point3::new(1.0, 2.0, 3.0)).norm() < 1e-9);
    }

    #[test]
    fn test_near_miss_returns_midpoint() {
        // Lines offset by 0.02 in z: within the default tolerance, the
        // intersection is the midpoint of the crossing gap.
        let a = line([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let b = line([3.0, 0.0, 0.02], [0.0, 1.0, 0.0]);

        let p = a.intersect(&b, &tol()).unwrap();
        assert!((p - Point3::new(3.0, 0.0, 0.01)).norm() < 1e-9);
    }

    #[test]
    fn test_skew_lines_are_rejected() {
        let a = line([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let b = line([3.0, 0.0, 4.0], [0.0, 1.0, 0.0]);

        match a.intersect(&b, &tol()) {
            Err(GeometryError::SkewLines { distance, .. }) => {
                assert!((distance - 4.0).abs() < 1e-9);
            }
            other => panic!("expected SkewLines, got {:?}", other),
        }
    }

    #[test]
    fn test_parallel_lines_are_rejected() {
        let a = line([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let b = line([0.0, 5.0, 0.0], [-1.0, 0.0, 0.0]);

        assert_eq!(a.intersect(&b, &tol()), Err(GeometryError::ParallelLines));
    }

    #[test]
    fn test_distance_to_point() {
        let a = line([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
        assert!((a.distance_to_point(&Point3::new(12.0, 3.0, 4.0)) - 5.0).abs() < 1e-12);
        assert!(a.distance_to_point(&Point3::new(-8.0, 0.0, 0.0)) < 1e-12);
    }
}
