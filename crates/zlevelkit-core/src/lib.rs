//! # ZLevelKit Core
//!
//! Core types, traits, and errors for ZLevelKit.
//! Provides the fundamental abstractions shared by the geometry kernel and
//! the calibration layer: the probe/motion collaborator interfaces, actuator
//! identity, and raw probe measurement data.

pub mod data;
pub mod error;
pub mod traits;

pub use data::{ActuatorRef, ProbeResult};

pub use error::{ConfigurationError, ConfigurationResult};

pub use traits::{MotionInterface, ProbeInterface};
