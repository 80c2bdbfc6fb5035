//! Actuator controller: bounded force-moves of single Z actuators.

use tracing::info;
use zlevelkit_core::{ActuatorRef, MotionInterface};

/// Issues kinematics-bypassing displacement moves to individual Z actuators.
///
/// The controller owns no persistent state and does not track restoration:
/// callers displace by the negated distance to put an actuator back, and
/// the round trip's correctness belongs to the orchestration layer.
pub struct ActuatorController<'a> {
    motion: &'a dyn MotionInterface,
    speed_mm_s: f64,
}

impl<'a> ActuatorController<'a> {
    /// Create a controller issuing moves at the given speed.
    pub fn new(motion: &'a dyn MotionInterface, speed_mm_s: f64) -> Self {
        Self { motion, speed_mm_s }
    }

    /// Displace one actuator by `distance_mm`.
    ///
    /// The logical machine position model is not updated. The returned
    /// future resolves once mechanical motion has finished.
    pub async fn displace(
        &self,
        actuator: &ActuatorRef,
        distance_mm: f64,
    ) -> anyhow::Result<()> {
        info!(
            "force-moving {} by {:.3} mm at {:.3} mm/s",
            actuator, distance_mm, self.speed_mm_s
        );
        self.motion
            .force_move(actuator, distance_mm, self.speed_mm_s)
            .await
    }
}
