//! Plane construction and plane-plane intersection.

use crate::error::{GeometryError, GeometryResult};
use crate::line::Line;
use crate::Tolerances;
use nalgebra::{Point3, Unit, Vector3};
use std::fmt;

/// An infinite plane in 3D space, stored as a point on the plane and a unit
/// normal.
///
/// The normal's sign carries no meaning to callers; only the geometric locus
/// does. Planes are only ever built from three non-collinear points; there
/// is no default plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// A point on the plane.
    pub point: Point3<f64>,
    /// Unit normal of the plane (sign not significant).
    pub normal: Unit<Vector3<f64>>,
}

impl Plane {
    /// Construct the plane through three points.
    ///
    /// Fails with [`GeometryError::DegeneratePoints`] when the points are
    /// collinear (the edge-vector cross product vanishes relative to the
    /// edge lengths), including when two points coincide.
    pub fn from_points(
        p0: Point3<f64>,
        p1: Point3<f64>,
        p2: Point3<f64>,
        tol: &Tolerances,
    ) -> GeometryResult<Self> {
        let e1 = p1 - p0;
        let e2 = p2 - p0;
        let cross = e1.cross(&e2);

        let edge_scale = e1.norm() * e2.norm();
        if edge_scale == 0.0 || cross.norm() < tol.collinearity * edge_scale {
            return Err(GeometryError::DegeneratePoints);
        }

        Ok(Self {
            point: p0,
            normal: Unit::new_normalize(cross),
        })
    }

    /// The plane constant `n · p` for the stored normal orientation.
    pub fn offset(&self) -> f64 {
        self.normal.dot(&self.point.coords)
    }

    /// Signed distance from `p` to the plane (sign follows the stored
    /// normal orientation).
    pub fn signed_distance(&self, p: &Point3<f64>) -> f64 {
        self.normal.dot(&p.coords) - self.offset()
    }

    /// Intersect two planes into a line.
    ///
    /// Fails with [`GeometryError::ParallelPlanes`] when the normals are
    /// collinear within tolerance; coincident planes have no unique
    /// intersection line and fail the same way.
    pub fn intersect(&self, other: &Plane, tol: &Tolerances) -> GeometryResult<Line> {
        let n1 = self.normal.into_inner();
        let n2 = other.normal.into_inner();
        let dir = n1.cross(&n2);
        if dir.norm() < tol.parallelism {
            return Err(GeometryError::ParallelPlanes);
        }

        // Point on both planes: p = (d1 (n2 x dir) + d2 (dir x n1)) / |dir|^2
        let d1 = self.offset();
        let d2 = other.offset();
        let point = (n2.cross(&dir) * d1 + dir.cross(&n1) * d2) / dir.norm_squared();

        Ok(Line {
            point: Point3::from(point),
            direction: Unit::new_normalize(dir),
        })
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "plane through X:{:.3} Y:{:.3} Z:{:.3} with normal ({:.4}, {:.4}, {:.4})",
            self.point.x, self.point.y, self.point.z, self.normal.x, self.normal.y, self.normal.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tol() -> Tolerances {
        Tolerances::default()
    }

    #[test]
    fn test_plane_contains_its_defining_points() {
        let p0 = Point3::new(10.0, 10.0, 0.2);
        let p1 = Point3::new(90.0, 15.0, -0.1);
        let p2 = Point3::new(45.0, 80.0, 0.4);
        let plane = Plane::from_points(p0, p1, p2, &tol()).unwrap();

        for p in [p0, p1, p2] {
            assert!(plane.signed_distance(&p).abs() < 1e-9);
        }
    }

    #[test]
    fn test_collinear_points_are_rejected() {
        let result = Plane::from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            &tol(),
        );
        assert_eq!(result, Err(GeometryError::DegeneratePoints));
    }

    #[test]
    fn test_coincident_points_are_rejected() {
        let p = Point3::new(5.0, 5.0, 1.0);
        let result = Plane::from_points(p, p, Point3::new(1.0, 2.0, 3.0), &tol());
        assert_eq!(result, Err(GeometryError::DegeneratePoints));
    }

    #[test]
    fn test_point_order_does_not_change_the_locus() {
        let p0 = Point3::new(0.0, 0.0, 1.0);
        let p1 = Point3::new(100.0, 0.0, 2.0);
        let p2 = Point3::new(50.0, 86.6, 3.0);

        let a = Plane::from_points(p0, p1, p2, &tol()).unwrap();
        let b = Plane::from_points(p2, p0, p1, &tol()).unwrap();

        // Same locus: normals parallel up to sign, shared points on both.
        assert!(a.normal.cross(&b.normal.into_inner()).norm() < 1e-12);
        assert!(b.signed_distance(&p0).abs() < 1e-9);
        assert!(a.signed_distance(&p2).abs() < 1e-9);
    }

    #[test]
    fn test_intersection_recovers_a_shared_axis() {
        // XY plane and a plane tilted about the X axis share the X axis.
        let base = Plane::from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            &tol(),
        )
        .unwrap();
        let tilted = Plane::from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.5),
            &tol(),
        )
        .unwrap();

        let line = base.intersect(&tilted, &tol()).unwrap();

        // Direction along X (up to sign), passing through the origin.
        assert!(line.direction.x.abs() > 1.0 - 1e-12);
        assert!(line.direction.y.abs() < 1e-12);
        assert!(line.direction.z.abs() < 1e-12);
        assert!(line.distance_to_point(&Point3::new(0.0, 0.0, 0.0)) < 1e-9);
        assert!(line.distance_to_point(&Point3::new(42.0, 0.0, 0.0)) < 1e-9);
    }

    #[test]
    fn test_parallel_planes_are_rejected() {
        let z0 = Plane::from_points(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 0.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
            &tol(),
        )
        .unwrap();
        let z5 = Plane::from_points(
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(10.0, 0.0, 5.0),
            Point3::new(0.0, 10.0, 5.0),
            &tol(),
        )
        .unwrap();

        assert_eq!(z0.intersect(&z5, &tol()), Err(GeometryError::ParallelPlanes));
        // A plane is parallel to itself: no unique line.
        assert_eq!(z0.intersect(&z0, &tol()), Err(GeometryError::ParallelPlanes));
    }
}
