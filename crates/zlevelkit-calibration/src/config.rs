//! Calibration settings.
//!
//! Displacement distance and speed are deliberately explicit settings: they
//! must be large enough that a perturbed plane is geometrically
//! distinguishable from the base plane and small enough to stay inside safe
//! mechanical travel. Neither is derived from other machine settings.

use serde::{Deserialize, Serialize};
use zlevelkit_core::error::{ConfigurationError, ConfigurationResult};
use zlevelkit_geometry::Tolerances;

/// Settings for a calibration run.
///
/// All values are validated before any hardware motion is commanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Distance each Z actuator is displaced to tilt the bed, in mm.
    pub displace_distance_mm: f64,
    /// Speed of the displacement force-move, in mm/s.
    pub displace_speed_mm_s: f64,
    /// Minimum number of surface points requested per probed plane.
    pub probe_min_points: usize,
    /// Upper bound on each wait for the probing subsystem, in seconds.
    pub probe_timeout_secs: u64,
    /// Geometry degeneracy tolerances.
    pub tolerances: Tolerances,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            displace_distance_mm: 3.0,
            displace_speed_mm_s: 3.0,
            probe_min_points: 3,
            probe_timeout_secs: 120,
            tolerances: Tolerances::default(),
        }
    }
}

impl CalibrationConfig {
    /// Validate the settings.
    pub fn validate(&self) -> ConfigurationResult<()> {
        if !self.displace_distance_mm.is_finite() || self.displace_distance_mm == 0.0 {
            return Err(ConfigurationError::InvalidSetting {
                setting: "displace_distance_mm".to_string(),
                reason: "must be finite and non-zero".to_string(),
            });
        }
        if !self.displace_speed_mm_s.is_finite() || self.displace_speed_mm_s <= 0.0 {
            return Err(ConfigurationError::InvalidSetting {
                setting: "displace_speed_mm_s".to_string(),
                reason: "must be finite and positive".to_string(),
            });
        }
        if self.probe_min_points < 3 {
            return Err(ConfigurationError::InvalidSetting {
                setting: "probe_min_points".to_string(),
                reason: "a plane needs at least 3 points".to_string(),
            });
        }
        if self.probe_timeout_secs == 0 {
            return Err(ConfigurationError::InvalidSetting {
                setting: "probe_timeout_secs".to_string(),
                reason: "must be at least 1 second".to_string(),
            });
        }
        Ok(())
    }
}
