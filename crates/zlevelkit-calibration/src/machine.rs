//! Machine session: collaborator handles and actuator discovery.

use crate::error::{CalibrationError, CalibrationResult};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::info;
use zlevelkit_core::error::ConfigurationError;
use zlevelkit_core::{ActuatorRef, MotionInterface, ProbeInterface};

/// A connected machine: the injected probe/motion collaborators plus the
/// three Z actuators discovered at connect time.
///
/// The toolhead and the Z actuators have no safe concurrent-access
/// semantics, so the session also owns the run lock that keeps probe and
/// calibration commands from overlapping.
pub struct MachineSession {
    probe: Arc<dyn ProbeInterface>,
    motion: Arc<dyn MotionInterface>,
    actuators: [ActuatorRef; 3],
    run_lock: Mutex<()>,
}

impl MachineSession {
    /// Connect to the machine: enumerate its steppers and validate that
    /// exactly three drive active Z axes.
    ///
    /// No motion is commanded; a wrong actuator count fails here, before
    /// any hardware is touched.
    pub async fn connect(
        probe: Arc<dyn ProbeInterface>,
        motion: Arc<dyn MotionInterface>,
    ) -> CalibrationResult<Self> {
        let steppers = motion.list_steppers().await.map_err(|e| {
            ConfigurationError::DiscoveryFailed {
                reason: e.to_string(),
            }
        })?;

        let z_actuators: Vec<ActuatorRef> =
            steppers.into_iter().filter(|s| s.active_z).collect();
        let actuators: [ActuatorRef; 3] = z_actuators.try_into().map_err(
            |z: Vec<ActuatorRef>| ConfigurationError::WrongActuatorCount { found: z.len() },
        )?;

        info!(
            "connected: Z actuators {}, {}, {}",
            actuators[0], actuators[1], actuators[2]
        );

        Ok(Self {
            probe,
            motion,
            actuators,
            run_lock: Mutex::new(()),
        })
    }

    /// The three Z actuators, in discovery order.
    pub fn actuators(&self) -> &[ActuatorRef; 3] {
        &self.actuators
    }

    /// The probing collaborator.
    pub fn probe(&self) -> &dyn ProbeInterface {
        self.probe.as_ref()
    }

    /// The motion collaborator.
    pub fn motion(&self) -> &dyn MotionInterface {
        self.motion.as_ref()
    }

    /// Claim exclusive use of the toolhead for one run.
    ///
    /// Fails with [`CalibrationError::Busy`] when another run holds the
    /// claim; the claim is released when the returned guard drops.
    pub fn try_begin_run(&self) -> CalibrationResult<RunGuard<'_>> {
        match self.run_lock.try_lock() {
            Ok(guard) => Ok(RunGuard { _guard: guard }),
            Err(_) => Err(CalibrationError::Busy),
        }
    }
}

/// Exclusive claim on the toolhead for the duration of one run.
pub struct RunGuard<'a> {
    _guard: MutexGuard<'a, ()>,
}
