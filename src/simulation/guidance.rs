//! Guidance strategies for powered bodies
//!
//! A guidance policy answers exactly two questions: how much propellant is
//! flowing at time `t`, and which way the engine points. Strategies are
//! attached per body and dispatched dynamically, like force terms.

use crate::error::{SimError, SimResult};
use crate::simulation::states::NVec3;

/// Speeds below this cannot be normalized into a prograde direction, m/s.
const MIN_PROGRADE_SPEED: f64 = 1e-9;

/// Per-body guidance capability.
///
/// Both queries may fail; failures propagate to the integrator unmodified
/// and abort the run.
pub trait Guidance {
    /// Propellant mass-flow rate at time `t`, kg/s, non-negative.
    fn mass_flow(&self, t: f64) -> SimResult<f64>;

    /// Unit thrust direction for the body whose state starts at `offset`
    /// in the flat buffer `data`.
    fn thrust_direction(&self, data: &[f64], offset: usize, t: f64) -> SimResult<NVec3>;
}

/// Normalized current velocity, read from the state buffer.
fn prograde(data: &[f64], offset: usize, t: f64) -> SimResult<NVec3> {
    let v = NVec3::new(data[offset], data[offset + 1], data[offset + 2]);
    let speed = v.norm();
    if speed < MIN_PROGRADE_SPEED {
        return Err(SimError::Numerical {
            t,
            reason: "cannot derive prograde direction from near-zero velocity".into(),
        });
    }
    Ok(v / speed)
}

/// Always burning, thrust along the current velocity.
pub struct ConstantBurn {
    pub flow: f64, // kg/s
}

impl Guidance for ConstantBurn {
    fn mass_flow(&self, _t: f64) -> SimResult<f64> {
        Ok(self.flow)
    }

    fn thrust_direction(&self, data: &[f64], offset: usize, t: f64) -> SimResult<NVec3> {
        prograde(data, offset, t)
    }
}

/// Burning only strictly inside (ignition, cutoff), thrust prograde.
pub struct TimedBurn {
    pub flow: f64, // kg/s
    pub ignition: f64, // s
    pub cutoff: f64, // s
}

impl Guidance for TimedBurn {
    fn mass_flow(&self, t: f64) -> SimResult<f64> {
        if t > self.ignition && t < self.cutoff {
            Ok(self.flow)
        } else {
            Ok(0.0)
        }
    }

    fn thrust_direction(&self, data: &[f64], offset: usize, t: f64) -> SimResult<NVec3> {
        prograde(data, offset, t)
    }
}

/// Burning inside (ignition, cutoff) along a fixed inertial direction.
#[derive(Debug)]
pub struct FixedBurn {
    pub flow: f64, // kg/s
    pub ignition: f64, // s
    pub cutoff: f64, // s
    direction: NVec3, // unit, normalized at construction
}

impl FixedBurn {
    /// `direction` is normalized here; a zero vector is rejected.
    pub fn new(flow: f64, ignition: f64, cutoff: f64, direction: NVec3) -> SimResult<Self> {
        let norm = direction.norm();
        if norm < MIN_PROGRADE_SPEED {
            return Err(SimError::Configuration(
                "fixed burn direction must be a non-zero vector".into(),
            ));
        }
        Ok(Self {
            flow,
            ignition,
            cutoff,
            direction: direction / norm,
        })
    }

    pub fn direction(&self) -> NVec3 {
        self.direction
    }
}

impl Guidance for FixedBurn {
    fn mass_flow(&self, t: f64) -> SimResult<f64> {
        if t > self.ignition && t < self.cutoff {
            Ok(self.flow)
        } else {
            Ok(0.0)
        }
    }

    fn thrust_direction(&self, _data: &[f64], _offset: usize, _t: f64) -> SimResult<NVec3> {
        Ok(self.direction)
    }
}
