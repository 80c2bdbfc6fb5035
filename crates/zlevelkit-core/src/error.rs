//! Error types shared across the ZLevelKit crates.
//!
//! Configuration errors are raised during machine discovery and settings
//! validation, before any hardware motion is commanded.

use thiserror::Error;

/// Errors detected while validating the machine setup or the calibration
/// settings.
///
/// All variants are raised before the first hardware command is issued;
/// a configuration error never leaves an actuator displaced.
#[derive(Error, Debug, Clone)]
pub enum ConfigurationError {
    /// The mechanism does not have exactly three active Z actuators.
    #[error("3-point Z leveling needs exactly 3 active Z actuators, found {found}")]
    WrongActuatorCount {
        /// The number of active Z actuators reported by the motion subsystem.
        found: usize,
    },

    /// A calibration setting has an invalid value.
    #[error("Invalid setting '{setting}': {reason}")]
    InvalidSetting {
        /// The setting name.
        setting: String,
        /// The reason the value is invalid.
        reason: String,
    },

    /// The motion subsystem could not be queried for its actuators.
    #[error("Actuator discovery failed: {reason}")]
    DiscoveryFailed {
        /// The reason discovery failed.
        reason: String,
    },
}

/// Result type alias for configuration operations.
pub type ConfigurationResult<T> = Result<T, ConfigurationError>;
