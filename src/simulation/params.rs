//! Numerical parameters for a simulation run
//!
//! `Parameters` holds the runtime settings driving the integration loop:
//! total duration, fixed step size, and the snapshot cadence

#[derive(Debug, Clone)]
pub struct Parameters {
    pub t_end: f64, // total duration, s
    pub dt: f64, // fixed step size, s
    pub sample_every: u64, // snapshot every this many completed steps
}
