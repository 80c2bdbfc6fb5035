//! Operator-facing command surface.
//!
//! Two entry points: probe a single plane, and run the full pivot-point
//! calibration. Both validate the settings and claim the toolhead before
//! any motion, and report human-readable results.

use crate::config::CalibrationConfig;
use crate::error::{CalibrationResult, Phase};
use crate::machine::MachineSession;
use crate::probe::ProbeSession;
use crate::solver::{PivotPoint, PivotSolver};
use std::fmt;
use tracing::info;
use zlevelkit_geometry::Plane;

/// Result of the probe-plane command.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneReport {
    /// The probed surface plane.
    pub plane: Plane,
}

impl fmt::Display for PlaneReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "probed {}", self.plane)
    }
}

/// Result of the auto-Z-positions command.
#[derive(Debug, Clone, PartialEq)]
pub struct ZPositionsReport {
    /// The solved pivot points, in actuator discovery order.
    pub pivots: [PivotPoint; 3],
}

impl fmt::Display for ZPositionsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "z positions: {}; {}; {}",
            self.pivots[0], self.pivots[1], self.pivots[2]
        )
    }
}

/// Probe a single plane and report it.
pub async fn probe_plane_command(
    session: &MachineSession,
    config: &CalibrationConfig,
) -> CalibrationResult<PlaneReport> {
    config.validate()?;
    let _guard = session.try_begin_run()?;

    let plane = ProbeSession::new(session.probe(), config)
        .probe_plane(Phase::BaseProbe)
        .await?;

    info!("probed plane: {}", plane);
    Ok(PlaneReport { plane })
}

/// Run the full pivot-point calibration and report the three pivot points.
pub async fn auto_z_positions_command(
    session: &MachineSession,
    config: &CalibrationConfig,
) -> CalibrationResult<ZPositionsReport> {
    config.validate()?;
    let _guard = session.try_begin_run()?;

    let pivots = PivotSolver::new(session, config).solve().await?;

    let report = ZPositionsReport { pivots };
    info!("{}", report);
    Ok(report)
}
