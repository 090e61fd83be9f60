//! Fixed-step RK4 integrator for the N-body system
//!
//! Drives the classical four-stage Runge-Kutta loop over the flat state
//! buffer, records periodic snapshots, and owns every scratch buffer: one
//! trial state plus the four stage-derivative buffers. The derivative
//! routine only accumulates; zeroing the stage buffers after each fold is
//! this loop's job.

use super::forces::derivatives;
use super::params::Parameters;
use super::states::{GravModel, Snapshot, STRIDE};
use crate::error::{SimError, SimResult};

/// Integrate `model` from t = 0 to `params.t_end`, sampling every
/// `params.sample_every` completed steps.
///
/// The initial state is always the first snapshot. Time advances by
/// repeated addition of the step size, so very long runs accumulate the
/// usual floating-point drift; a trailing partial step shorter than dt is
/// dropped.
pub fn rk4_integrate(model: &mut GravModel, params: &Parameters) -> SimResult<Vec<Snapshot>> {
    let dt = model.dt();
    if dt <= 0.0 {
        return Err(SimError::Configuration(
            "step size not set; call set_step before integrating".into(),
        ));
    }
    if params.sample_every == 0 {
        return Err(SimError::Configuration(
            "sample_every must be at least 1".into(),
        ));
    }

    let dt_half = model.dt_half();
    let dt_sixth = model.dt_sixth();
    let len = model.body_count() * STRIDE;

    // Scratch buffers, allocated once for the run. The trial buffer starts
    // as a copy of the authoritative state; the stage buffers start zeroed
    // and are re-zeroed after every fold.
    let mut trial = model.coords().to_vec();
    let mut k0 = vec![0.0; len];
    let mut k1 = vec![0.0; len];
    let mut k2 = vec![0.0; len];
    let mut k3 = vec![0.0; len];

    let mut snapshots = vec![model.snapshot(0.0)];
    let mut t = 0.0;
    let mut steps: u64 = 0;

    while t + dt <= params.t_end {
        // k0 = f(state, t); trial currently equals the state
        derivatives(model.meta(), &trial, &mut k0, t)?;

        // trial = state + k0 * dt/2
        for i in 0..len {
            trial[i] += dt_half * k0[i];
        }
        derivatives(model.meta(), &trial, &mut k1, t + dt_half)?;

        // trial = state + k1 * dt/2
        let state = model.coords();
        for i in 0..len {
            trial[i] = state[i] + dt_half * k1[i];
        }
        derivatives(model.meta(), &trial, &mut k2, t + dt_half)?;

        // trial = state + k2 * dt
        for i in 0..len {
            trial[i] = state[i] + dt * k2[i];
        }
        derivatives(model.meta(), &trial, &mut k3, t + dt)?;

        // Fold the weighted stages into the authoritative state and zero
        // the stage buffers in the same pass.
        let state = model.coords_mut();
        for i in 0..len {
            state[i] += dt_sixth * (k0[i] + 2.0 * (k1[i] + k2[i]) + k3[i]);
            k0[i] = 0.0;
            k1[i] = 0.0;
            k2[i] = 0.0;
            k3[i] = 0.0;
        }

        t += dt;
        steps += 1;

        if model.coords().iter().any(|v| !v.is_finite()) {
            return Err(SimError::Numerical {
                t,
                reason: "non-finite state value after step".into(),
            });
        }

        // The final burn step can integrate mass slightly past dry mass;
        // pin it back before anything reads the state.
        model.enforce_dry_mass();

        // Resync the trial buffer for the next step's k0 evaluation.
        trial.copy_from_slice(model.coords());

        if steps % params.sample_every == 0 {
            snapshots.push(model.snapshot(t));
        }
    }

    Ok(snapshots)
}
