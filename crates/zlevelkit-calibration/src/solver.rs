//! Pivot solver: drives the probe/displace/restore protocol and solves the
//! three pivot points from plane and line intersections.
//!
//! Protocol, strictly sequential because probing and actuator motion share
//! one physical toolhead:
//!
//! 1. Probe the base plane.
//! 2. For each Z actuator in discovery order: displace it, probe the
//!    perturbed plane, restore it. The restore runs even when the probe
//!    fails.
//! 3. Intersect each perturbed plane with the base plane, giving the three
//!    tilt (hinge) lines.
//! 4. Intersect the tilt lines pairwise, giving the three pivot points.

use crate::actuator::ActuatorController;
use crate::config::CalibrationConfig;
use crate::error::{CalibrationError, CalibrationResult, Phase};
use crate::machine::MachineSession;
use crate::probe::ProbeSession;
use nalgebra::Point3;
use std::fmt;
use tracing::{error, info};
use zlevelkit_core::ActuatorRef;
use zlevelkit_geometry::{Plane, Tolerances};

/// A solved pivot location for one actuator.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotPoint {
    /// The actuator this pivot belongs to.
    pub actuator: ActuatorRef,
    /// Pivot location in machine coordinates, at the base plane's height.
    pub position: Point3<f64>,
}

impl fmt::Display for PivotPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: X:{:.3} Y:{:.3} Z:{:.3}",
            self.actuator, self.position.x, self.position.y, self.position.z
        )
    }
}

/// Solve the pivot points from an already-probed base plane and the three
/// perturbed planes, in actuator order.
///
/// Displacing actuator `i` tilts the bed about the hinge line through the
/// other two pivots, so tilt line `i` (base ∩ perturbed `i`) contains every
/// pivot except pivot `i`. Pivot `i` is therefore the intersection of the
/// two tilt lines that do NOT involve actuator `i`.
pub fn solve_pivots(
    base: &Plane,
    perturbed: &[Plane; 3],
    actuators: &[ActuatorRef; 3],
    tol: &Tolerances,
) -> CalibrationResult<[PivotPoint; 3]> {
    let line = |i: usize| {
        base.intersect(&perturbed[i], tol)
            .map_err(|source| CalibrationError::Geometry {
                phase: Phase::PlaneIntersection(i),
                source,
            })
    };
    let lines = [line(0)?, line(1)?, line(2)?];

    let pivot = |i: usize, a: usize, b: usize| {
        lines[a]
            .intersect(&lines[b], tol)
            .map(|position| PivotPoint {
                actuator: actuators[i].clone(),
                position,
            })
            .map_err(|source| CalibrationError::Geometry {
                phase: Phase::LineIntersection(i),
                source,
            })
    };

    Ok([pivot(0, 1, 2)?, pivot(1, 0, 2)?, pivot(2, 0, 1)?])
}

/// Drives the end-to-end calibration protocol against a connected machine.
pub struct PivotSolver<'a> {
    session: &'a MachineSession,
    config: &'a CalibrationConfig,
}

impl<'a> PivotSolver<'a> {
    /// Create a solver for one calibration run.
    pub fn new(session: &'a MachineSession, config: &'a CalibrationConfig) -> Self {
        Self { session, config }
    }

    /// Run the full protocol and return the three pivot points, in actuator
    /// discovery order.
    pub async fn solve(&self) -> CalibrationResult<[PivotPoint; 3]> {
        self.config.validate()?;

        let probe = ProbeSession::new(self.session.probe(), self.config);
        let controller =
            ActuatorController::new(self.session.motion(), self.config.displace_speed_mm_s);
        let actuators = self.session.actuators();

        info!("probing base plane");
        let base = probe.probe_plane(Phase::BaseProbe).await?;

        let perturbed = [
            self.perturbed_plane(0, &actuators[0], &probe, &controller)
                .await?,
            self.perturbed_plane(1, &actuators[1], &probe, &controller)
                .await?,
            self.perturbed_plane(2, &actuators[2], &probe, &controller)
                .await?,
        ];

        info!("intersecting planes");
        let pivots = solve_pivots(&base, &perturbed, actuators, &self.config.tolerances)?;

        for pivot in &pivots {
            info!("solved pivot {}", pivot);
        }
        Ok(pivots)
    }

    /// Displace actuator `index`, probe the tilted surface, restore the
    /// actuator.
    ///
    /// The restore runs regardless of the probe outcome so the mechanism is
    /// never left displaced; a failed restore outranks the probe error it
    /// may be hiding.
    async fn perturbed_plane(
        &self,
        index: usize,
        actuator: &ActuatorRef,
        probe: &ProbeSession<'_>,
        controller: &ActuatorController<'_>,
    ) -> CalibrationResult<Plane> {
        let distance = self.config.displace_distance_mm;

        info!("displacing {} by {:.3} mm", actuator, distance);
        controller.displace(actuator, distance).await.map_err(|e| {
            CalibrationError::MoveFailed {
                actuator: actuator.name.clone(),
                reason: e.to_string(),
            }
        })?;

        let plane = probe.probe_plane(Phase::PerturbedProbe(index)).await;

        info!("restoring {} by {:.3} mm", actuator, -distance);
        if let Err(e) = controller.displace(actuator, -distance).await {
            if let Err(probe_err) = &plane {
                error!("probe failure preceding the failed restore: {}", probe_err);
            }
            return Err(CalibrationError::RestoreFailed {
                actuator: actuator.name.clone(),
                reason: e.to_string(),
            });
        }

        plane
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zlevelkit_geometry::GeometryError;

    fn plane(p0: [f64; 3], p1: [f64; 3], p2: [f64; 3]) -> Plane {
        Plane::from_points(
            Point3::new(p0[0], p0[1], p0[2]),
            Point3::new(p1[0], p1[1], p1[2]),
            Point3::new(p2[0], p2[1], p2[2]),
            &Tolerances::default(),
        )
        .unwrap()
    }

    fn actuators() -> [ActuatorRef; 3] {
        [
            ActuatorRef::active_z("stepper_z"),
            ActuatorRef::active_z("stepper_z1"),
            ActuatorRef::active_z("stepper_z2"),
        ]
    }

    /// Plane through the three support points of a bed resting on supports
    /// at `xy`, where support `lifted` is raised by `lift`.
    fn bed_plane(xy: &[[f64; 2]; 3], lifted: usize, lift: f64) -> Plane {
        let z = |i: usize| if i == lifted { lift } else { 0.0 };
        plane(
            [xy[0][0], xy[0][1], z(0)],
            [xy[1][0], xy[1][1], z(1)],
            [xy[2][0], xy[2][1], z(2)],
        )
    }

    #[test]
    fn test_pivots_match_the_support_triangle() {
        let xy = [[0.0, 0.0], [100.0, 0.0], [50.0, 86.6]];
        let base = plane(
            [xy[0][0], xy[0][1], 0.0],
            [xy[1][0], xy[1][1], 0.0],
            [xy[2][0], xy[2][1], 0.0],
        );
        let perturbed = [
            bed_plane(&xy, 0, 3.0),
            bed_plane(&xy, 1, 3.0),
            bed_plane(&xy, 2, 3.0),
        ];

        let pivots =
            solve_pivots(&base, &perturbed, &actuators(), &Tolerances::default()).unwrap();

        for (pivot, support) in pivots.iter().zip(&xy) {
            let expected = Point3::new(support[0], support[1], 0.0);
            assert!(
                (pivot.position - expected).norm() < 0.01,
                "pivot {} off: {} vs {:?}",
                pivot.actuator,
                pivot.position,
                support
            );
        }
        assert_eq!(pivots[0].actuator.name, "stepper_z");
        assert_eq!(pivots[2].actuator.name, "stepper_z2");
    }

    #[test]
    fn test_unperturbed_plane_is_rejected() {
        // An actuator whose displacement produced no tilt gives a perturbed
        // plane coincident with the base: no unique tilt line.
        let xy = [[0.0, 0.0], [100.0, 0.0], [50.0, 86.6]];
        let base = plane(
            [xy[0][0], xy[0][1], 0.0],
            [xy[1][0], xy[1][1], 0.0],
            [xy[2][0], xy[2][1], 0.0],
        );
        let perturbed = [
            bed_plane(&xy, 0, 3.0),
            bed_plane(&xy, 1, 0.0),
            bed_plane(&xy, 2, 3.0),
        ];

        let err = solve_pivots(&base, &perturbed, &actuators(), &Tolerances::default())
            .unwrap_err();
        match err {
            CalibrationError::Geometry { phase, source } => {
                assert_eq!(phase, Phase::PlaneIntersection(1));
                assert_eq!(source, GeometryError::ParallelPlanes);
            }
            other => panic!("expected Geometry error, got {:?}", other),
        }
    }
}
