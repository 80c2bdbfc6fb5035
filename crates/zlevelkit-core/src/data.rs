//! Data models for actuators and probe measurements
//!
//! This module provides:
//! - Actuator identity with active-Z capability
//! - Raw probe measurement results delivered by the probing subsystem

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference to one stepper/actuator of the motion system.
///
/// The name is the stable configuration name the motion subsystem knows the
/// actuator by (e.g. `stepper_z1`); `active_z` records whether the actuator
/// participates in Z motion. Only active-Z actuators take part in leveling
/// calibration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorRef {
    /// Stable configuration name of the actuator.
    pub name: String,
    /// Whether this actuator drives an active Z axis.
    pub active_z: bool,
}

impl ActuatorRef {
    /// Create a reference to an active Z actuator.
    pub fn active_z(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active_z: true,
        }
    }

    /// Create a reference to an actuator that does not drive Z.
    pub fn non_z(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active_z: false,
        }
    }
}

impl fmt::Display for ActuatorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Raw result of one probe measurement sequence.
///
/// Owned by a single probe-plane operation and discarded once the plane has
/// been constructed. Positions are toolhead machine coordinates at each
/// surface contact, in the order they were sampled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Probe offsets (x, y, z) reported by the probing subsystem, in mm.
    pub offsets: [f64; 3],
    /// Ordered (x, y, z) toolhead positions at each contact, in mm.
    pub positions: Vec<[f64; 3]>,
}

impl ProbeResult {
    /// Create a probe result from offsets and sampled positions.
    pub fn new(offsets: [f64; 3], positions: Vec<[f64; 3]>) -> Self {
        debug_assert!(
            positions
                .iter()
                .all(|p| p.iter().all(|v| v.is_finite())),
            "probe positions must be finite"
        );
        Self { offsets, positions }
    }

    /// Number of contact positions sampled.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no positions were sampled.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The sampled positions as geometric points.
    pub fn contact_points(&self) -> Vec<Point3<f64>> {
        self.positions
            .iter()
            .map(|&[x, y, z]| Point3::new(x, y, z))
            .collect()
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} contact points (", self.positions.len())?;
        for (i, [x, y, z]) in self.positions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "X:{:.3} Y:{:.3} Z:{:.3}", x, y, z)?;
        }
        write!(f, ")")
    }
}
