//! Simulated machine for demos and tests.
//!
//! Models a rigid bed resting on three Z supports. Probing samples the
//! current bed plane at a fixed pattern of XY positions; a force-move lifts
//! one support, tilting the modeled plane about the line through the other
//! two. Fully deterministic: identical inputs produce identical samples.

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;
use zlevelkit_core::{ActuatorRef, MotionInterface, ProbeInterface, ProbeResult};

/// Record of one force-move issued to the simulator, for assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceMoveRecord {
    /// Name of the actuator that was moved.
    pub actuator: String,
    /// Commanded distance, in mm.
    pub distance_mm: f64,
    /// Commanded speed, in mm/s.
    pub speed_mm_s: f64,
}

#[derive(Debug)]
struct SimState {
    steppers: Vec<ActuatorRef>,
    /// XY position of the support driven by each Z stepper, in listing order.
    support_xy: Vec<[f64; 2]>,
    bed_z: f64,
    /// Current lift of each Z stepper's support.
    lift_mm: Vec<f64>,
    probe_pattern: Vec<[f64; 2]>,
    force_moves: Vec<ForceMoveRecord>,
    probes_started: usize,
    /// 1-based probe ordinal that fails, if any.
    fail_probe_at: Option<usize>,
    /// 1-based probe ordinal that never completes, if any.
    stall_probe_at: Option<usize>,
    /// Cap on the number of positions returned per probe, if any.
    short_probe_points: Option<usize>,
}

/// Deterministic in-process machine implementing both collaborator traits.
pub struct SimulatedMachine {
    state: Mutex<SimState>,
}

impl SimulatedMachine {
    /// A machine with three Z steppers supporting the bed at an equilateral
    /// triangle, plus the usual non-Z steppers.
    pub fn new() -> Self {
        Self::with_supports([[0.0, 0.0], [100.0, 0.0], [50.0, 86.6]])
    }

    /// A machine with three Z steppers at the given support positions.
    pub fn with_supports(support_xy: [[f64; 2]; 3]) -> Self {
        let steppers = vec![
            ActuatorRef::non_z("stepper_x"),
            ActuatorRef::non_z("stepper_y"),
            ActuatorRef::active_z("stepper_z"),
            ActuatorRef::active_z("stepper_z1"),
            ActuatorRef::active_z("stepper_z2"),
        ];
        Self {
            state: Mutex::new(SimState {
                steppers,
                support_xy: support_xy.to_vec(),
                bed_z: 0.0,
                lift_mm: vec![0.0; 3],
                probe_pattern: vec![[10.0, 10.0], [90.0, 10.0], [50.0, 80.0]],
                force_moves: Vec::new(),
                probes_started: 0,
                fail_probe_at: None,
                stall_probe_at: None,
                short_probe_points: None,
            }),
        }
    }

    /// A machine whose kinematics report `count` active Z steppers, for
    /// discovery-validation tests.
    pub fn with_z_stepper_count(count: usize) -> Self {
        let machine = Self::new();
        {
            let mut state = machine.state.lock();
            state.steppers = vec![
                ActuatorRef::non_z("stepper_x"),
                ActuatorRef::non_z("stepper_y"),
            ];
            state.support_xy = Vec::new();
            for i in 0..count {
                let name = if i == 0 {
                    "stepper_z".to_string()
                } else {
                    format!("stepper_z{}", i)
                };
                state.steppers.push(ActuatorRef::active_z(name));
                state
                    .support_xy
                    .push([25.0 * i as f64, if i % 2 == 0 { 0.0 } else { 50.0 }]);
            }
            state.lift_mm = vec![0.0; count];
        }
        machine
    }

    /// Make the `ordinal`-th probe (1-based) fail.
    pub fn fail_probe(&self, ordinal: usize) {
        self.state.lock().fail_probe_at = Some(ordinal);
    }

    /// Make the `ordinal`-th probe (1-based) never complete.
    pub fn stall_probe(&self, ordinal: usize) {
        self.state.lock().stall_probe_at = Some(ordinal);
    }

    /// Cap the number of positions each probe returns.
    pub fn short_probe(&self, points: usize) {
        self.state.lock().short_probe_points = Some(points);
    }

    /// Replace the probe pattern.
    pub fn set_probe_pattern(&self, pattern: Vec<[f64; 2]>) {
        self.state.lock().probe_pattern = pattern;
    }

    /// All force-moves issued so far.
    pub fn force_moves(&self) -> Vec<ForceMoveRecord> {
        self.state.lock().force_moves.clone()
    }

    /// Number of probe sequences started so far.
    pub fn probes_started(&self) -> usize {
        self.state.lock().probes_started
    }

    /// Bed-plane height at `(x, y)` for the current support lifts.
    fn surface_z(state: &SimState, x: f64, y: f64) -> f64 {
        let s: Vec<[f64; 3]> = state
            .support_xy
            .iter()
            .zip(&state.lift_mm)
            .map(|(xy, lift)| [xy[0], xy[1], state.bed_z + lift])
            .collect();

        let e1 = [s[1][0] - s[0][0], s[1][1] - s[0][1], s[1][2] - s[0][2]];
        let e2 = [s[2][0] - s[0][0], s[2][1] - s[0][1], s[2][2] - s[0][2]];
        let nx = e1[1] * e2[2] - e1[2] * e2[1];
        let ny = e1[2] * e2[0] - e1[0] * e2[2];
        let nz = e1[0] * e2[1] - e1[1] * e2[0];

        s[0][2] - (nx * (x - s[0][0]) + ny * (y - s[0][1])) / nz
    }
}

impl Default for SimulatedMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProbeInterface for SimulatedMachine {
    async fn start_probe(&self, min_points: usize) -> anyhow::Result<ProbeResult> {
        let mut stall = false;
        let positions = {
            let mut state = self.state.lock();
            state.probes_started += 1;
            let ordinal = state.probes_started;

            if state.stall_probe_at == Some(ordinal) {
                drop(state);
                debug!("simulated probe {} stalling", ordinal);
                stall = true;
                Vec::new()
            } else {
            if state.fail_probe_at == Some(ordinal) {
                anyhow::bail!("simulated probe sequence {} aborted", ordinal);
            }
            if state.probe_pattern.len() < min_points {
                anyhow::bail!(
                    "probe pattern has {} points, {} requested",
                    state.probe_pattern.len(),
                    min_points
                );
            }

            let mut positions: Vec<[f64; 3]> = state
                .probe_pattern
                .iter()
                .map(|&[x, y]| [x, y, Self::surface_z(&state, x, y)])
                .collect();
            if let Some(cap) = state.short_probe_points {
                positions.truncate(cap);
            }
            positions
            }
        };

        if stall {
            return std::future::pending().await;
        }

        debug!("simulated probe measured {} points", positions.len());
        Ok(ProbeResult::new([0.0, 0.0, 0.0], positions))
    }
}

#[async_trait]
impl MotionInterface for SimulatedMachine {
    async fn list_steppers(&self) -> anyhow::Result<Vec<ActuatorRef>> {
        Ok(self.state.lock().steppers.clone())
    }

    async fn force_move(
        &self,
        actuator: &ActuatorRef,
        distance_mm: f64,
        speed_mm_s: f64,
    ) -> anyhow::Result<()> {
        let mut state = self.state.lock();
        let z_index = state
            .steppers
            .iter()
            .filter(|s| s.active_z)
            .position(|s| s.name == actuator.name);
        let Some(z_index) = z_index else {
            anyhow::bail!("unknown Z stepper '{}'", actuator.name);
        };

        state.lift_mm[z_index] += distance_mm;
        state.force_moves.push(ForceMoveRecord {
            actuator: actuator.name.clone(),
            distance_mm,
            speed_mm_s,
        });
        Ok(())
    }
}
