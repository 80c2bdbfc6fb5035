//! Collaborator interfaces for the probing and motion subsystems
//!
//! The calibration layer is polymorphic over these two traits and receives
//! implementations at construction time. Nothing in ZLevelKit looks a
//! collaborator up ambiently.

use crate::data::{ActuatorRef, ProbeResult};
use async_trait::async_trait;

/// Interface to the physical probing subsystem.
///
/// Implementations move the toolhead through a probe pattern, contact the
/// surface at each position, and resolve once the full sample set has been
/// collected. Probing moves the physical machine: implementations must not
/// retry a failed sequence on their own.
#[async_trait]
pub trait ProbeInterface: Send + Sync {
    /// Probe the surface at no fewer than `min_points` positions.
    ///
    /// Resolves with the measured offsets and the ordered contact positions
    /// once the sequence completes. The probe pattern and any extra points
    /// beyond `min_points` are the implementation's choice.
    async fn start_probe(&self, min_points: usize) -> anyhow::Result<ProbeResult>;
}

/// Interface to the motion/kinematics subsystem.
///
/// Exposes actuator discovery and the force-move primitive used for
/// calibration motion outside normal coordinated moves.
#[async_trait]
pub trait MotionInterface: Send + Sync {
    /// Enumerate the machine's steppers with their active-Z capability.
    async fn list_steppers(&self) -> anyhow::Result<Vec<ActuatorRef>>;

    /// Displace a single named actuator by `distance_mm` at `speed_mm_s`,
    /// bypassing the kinematics model.
    ///
    /// The logical machine position is left untouched. The future resolves
    /// only after the mechanical motion has finished.
    async fn force_move(
        &self,
        actuator: &ActuatorRef,
        distance_mm: f64,
        speed_mm_s: f64,
    ) -> anyhow::Result<()>;
}
