//! # ZLevelKit Calibration
//!
//! Hardware orchestration and the pivot-point solver for 3-point
//! Z-leveling. Probes a base plane, perturbs each Z actuator in turn to
//! probe three tilted planes, and intersects planes and tilt lines to
//! recover the mechanism's pivot points.
//!
//! All hardware access goes through the [`zlevelkit_core`] collaborator
//! traits injected at connect time; the [`sim`] module provides a
//! deterministic in-process machine for tests and demos.

pub mod actuator;
pub mod commands;
pub mod config;
pub mod error;
pub mod machine;
pub mod probe;
pub mod sim;
pub mod solver;

pub use actuator::ActuatorController;
pub use commands::{
    auto_z_positions_command, probe_plane_command, PlaneReport, ZPositionsReport,
};
pub use config::CalibrationConfig;
pub use error::{CalibrationError, CalibrationResult, Phase};
pub use machine::{MachineSession, RunGuard};
pub use probe::ProbeSession;
pub use sim::{ForceMoveRecord, SimulatedMachine};
pub use solver::{solve_pivots, PivotPoint, PivotSolver};
