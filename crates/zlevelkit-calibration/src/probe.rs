//! Probe session: one probe-a-plane operation.

use crate::config::CalibrationConfig;
use crate::error::{CalibrationError, CalibrationResult, Phase};
use std::time::Duration;
use tracing::debug;
use zlevelkit_core::ProbeInterface;
use zlevelkit_geometry::Plane;

/// Obtains a [`Plane`] by physically sampling the surface once.
///
/// Probing moves the toolhead and dwells at each contact point; a failed
/// sequence is surfaced to the caller, never retried here.
pub struct ProbeSession<'a> {
    probe: &'a dyn ProbeInterface,
    config: &'a CalibrationConfig,
}

impl<'a> ProbeSession<'a> {
    /// Create a probe session against the given collaborator.
    pub fn new(probe: &'a dyn ProbeInterface, config: &'a CalibrationConfig) -> Self {
        Self { probe, config }
    }

    /// Request a probe measurement and build a plane from it.
    ///
    /// Suspends until the probing collaborator delivers its sample set,
    /// bounded by the configured timeout. The plane is built from the first
    /// three contact points; any extra points the collaborator samples are
    /// reserved for least-squares fitting.
    pub async fn probe_plane(&self, phase: Phase) -> CalibrationResult<Plane> {
        debug!(
            "{}: requesting at least {} probe points",
            phase, self.config.probe_min_points
        );

        let timeout = Duration::from_secs(self.config.probe_timeout_secs);
        let result = match tokio::time::timeout(
            timeout,
            self.probe.start_probe(self.config.probe_min_points),
        )
        .await
        {
            Err(_) => {
                return Err(CalibrationError::ProbeTimeout {
                    phase,
                    timeout_secs: self.config.probe_timeout_secs,
                })
            }
            Ok(Err(e)) => {
                return Err(CalibrationError::ProbeFailed {
                    phase,
                    reason: e.to_string(),
                })
            }
            Ok(Ok(result)) => result,
        };

        if result.len() < 3 {
            return Err(CalibrationError::InsufficientProbePoints {
                phase,
                got: result.len(),
                need: 3,
            });
        }

        let points = result.contact_points();
        let plane = Plane::from_points(points[0], points[1], points[2], &self.config.tolerances)
            .map_err(|source| CalibrationError::Geometry { phase, source })?;

        debug!("{}: {}", phase, plane);
        Ok(plane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use zlevelkit_core::ProbeResult;

    struct FixedProbe {
        positions: Vec<[f64; 3]>,
    }

    #[async_trait]
    impl ProbeInterface for FixedProbe {
        async fn start_probe(&self, _min_points: usize) -> anyhow::Result<ProbeResult> {
            Ok(ProbeResult::new([0.0, 0.0, 0.0], self.positions.clone()))
        }
    }

    struct FailingProbe;

    #[async_trait]
    impl ProbeInterface for FailingProbe {
        async fn start_probe(&self, _min_points: usize) -> anyhow::Result<ProbeResult> {
            anyhow::bail!("probe did not trigger")
        }
    }

    #[tokio::test]
    async fn test_plane_from_first_three_points() {
        let probe = FixedProbe {
            positions: vec![
                [10.0, 10.0, 0.0],
                [90.0, 10.0, 0.0],
                [50.0, 80.0, 0.0],
                // A fourth sample must not change the plane.
                [50.0, 40.0, 7.0],
            ],
        };
        let config = CalibrationConfig::default();
        let session = ProbeSession::new(&probe, &config);

        let plane = session.probe_plane(Phase::BaseProbe).await.unwrap();
        assert!(plane
            .signed_distance(&nalgebra::Point3::new(33.0, 21.0, 0.0))
            .abs()
            < 1e-9);
    }

    #[tokio::test]
    async fn test_too_few_points_is_surfaced() {
        let probe = FixedProbe {
            positions: vec![[10.0, 10.0, 0.0], [90.0, 10.0, 0.0]],
        };
        let config = CalibrationConfig::default();
        let session = ProbeSession::new(&probe, &config);

        let err = session.probe_plane(Phase::BaseProbe).await.unwrap_err();
        assert!(matches!(
            err,
            CalibrationError::InsufficientProbePoints { got: 2, need: 3, .. }
        ));
    }

    #[tokio::test]
    async fn test_collaborator_failure_is_surfaced() {
        let config = CalibrationConfig::default();
        let session = ProbeSession::new(&FailingProbe, &config);

        let err = session
            .probe_plane(Phase::PerturbedProbe(1))
            .await
            .unwrap_err();
        match err {
            CalibrationError::ProbeFailed { phase, reason } => {
                assert_eq!(phase, Phase::PerturbedProbe(1));
                assert!(reason.contains("probe did not trigger"));
            }
            other => panic!("expected ProbeFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_degenerate_samples_are_surfaced() {
        let probe = FixedProbe {
            positions: vec![[0.0, 0.0, 0.0], [50.0, 0.0, 0.0], [100.0, 0.0, 0.0]],
        };
        let config = CalibrationConfig::default();
        let session = ProbeSession::new(&probe, &config);

        let err = session.probe_plane(Phase::BaseProbe).await.unwrap_err();
        assert!(matches!(
            err,
            CalibrationError::Geometry {
                source: zlevelkit_geometry::GeometryError::DegeneratePoints,
                ..
            }
        ));
    }
}
