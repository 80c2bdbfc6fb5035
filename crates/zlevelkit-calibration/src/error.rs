//! Error types for the calibration layer.
//!
//! Every failure carries enough context for an operator to tell which phase
//! of the protocol went wrong (base probe, a specific actuator's probe, a
//! geometry intersection) and act on the mechanical or probing issue behind
//! it.

use std::fmt;
use thiserror::Error;
use zlevelkit_core::error::ConfigurationError;
use zlevelkit_geometry::GeometryError;

/// The protocol phase in which a calibration error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Probing the undisturbed base plane.
    BaseProbe,
    /// Probing the plane perturbed by displacing actuator `n` (0-based).
    PerturbedProbe(usize),
    /// Intersecting the base plane with the plane perturbed by actuator `n`.
    PlaneIntersection(usize),
    /// Intersecting the tilt lines that determine pivot `n`.
    LineIntersection(usize),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::BaseProbe => write!(f, "base plane probe"),
            Phase::PerturbedProbe(n) => write!(f, "actuator {} probe", n),
            Phase::PlaneIntersection(n) => write!(f, "plane intersection for actuator {}", n),
            Phase::LineIntersection(n) => write!(f, "line intersection for pivot {}", n),
        }
    }
}

/// Errors raised while running a calibration or probe command.
#[derive(Error, Debug)]
pub enum CalibrationError {
    /// Machine or settings validation failed; no motion was commanded.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Another calibration or probe run is already using the toolhead.
    #[error("a calibration run is already in progress")]
    Busy,

    /// The probing subsystem reported a failure.
    #[error("{phase} failed: {reason}")]
    ProbeFailed {
        /// The phase whose probe failed.
        phase: Phase,
        /// The reason reported by the probing subsystem.
        reason: String,
    },

    /// The probing subsystem did not deliver a result in time.
    #[error("{phase} timed out after {timeout_secs}s")]
    ProbeTimeout {
        /// The phase whose probe timed out.
        phase: Phase,
        /// The timeout that expired, in seconds.
        timeout_secs: u64,
    },

    /// The probing subsystem delivered fewer points than a plane needs.
    #[error("{phase} returned {got} points, need at least {need}")]
    InsufficientProbePoints {
        /// The phase whose probe came up short.
        phase: Phase,
        /// The number of points delivered.
        got: usize,
        /// The number of points required.
        need: usize,
    },

    /// A displacement force-move failed.
    #[error("force-move of '{actuator}' failed: {reason}")]
    MoveFailed {
        /// The actuator that failed to move.
        actuator: String,
        /// The reason reported by the motion subsystem.
        reason: String,
    },

    /// A restore force-move failed: the actuator is left displaced and the
    /// machine state no longer matches the logical position model.
    #[error("failed to restore '{actuator}' to its original position: {reason}")]
    RestoreFailed {
        /// The actuator left displaced.
        actuator: String,
        /// The reason reported by the motion subsystem.
        reason: String,
    },

    /// The geometry kernel could not produce a unique result, usually from
    /// probing noise or a mechanically implausible configuration.
    #[error("{phase}: {source}")]
    Geometry {
        /// The phase whose geometry failed.
        phase: Phase,
        /// The underlying geometry error.
        #[source]
        source: GeometryError,
    },
}

/// Result type alias for calibration operations.
pub type CalibrationResult<T> = Result<T, CalibrationError>;
