//! # ZLevelKit
//!
//! A calibration toolkit for 3-point Z-leveling mechanisms: three
//! independently actuated Z lift points under a rigid bed. ZLevelKit probes
//! the bed surface, perturbs each Z actuator in turn, and solves for the
//! pivot points the actuators must be positioned at so the bed is level at
//! a known height.
//!
//! ## Architecture
//!
//! ZLevelKit is organized as a workspace with multiple crates:
//!
//! 1. **zlevelkit-core** - Data model, collaborator traits, core errors
//! 2. **zlevelkit-geometry** - Pure plane/line geometry kernel
//! 3. **zlevelkit-calibration** - Probe orchestration, pivot solver, commands
//! 4. **zlevelkit** - Main binary that integrates all crates
//!
//! Machines plug in by implementing the two collaborator traits
//! ([`ProbeInterface`] and [`MotionInterface`]); everything above them is
//! hardware-agnostic, and the built-in [`SimulatedMachine`] runs the full
//! protocol without hardware.

pub use zlevelkit_core::{
    ActuatorRef, ConfigurationError, MotionInterface, ProbeInterface, ProbeResult,
};

pub use zlevelkit_geometry::{GeometryError, Line, Plane, Tolerances};

pub use zlevelkit_calibration::{
    auto_z_positions_command, probe_plane_command, solve_pivots, ActuatorController,
    CalibrationConfig, CalibrationError, CalibrationResult, MachineSession, Phase, PivotPoint,
    PivotSolver, PlaneReport, ProbeSession, SimulatedMachine, ZPositionsReport,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
